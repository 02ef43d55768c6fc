//! Server-side rendering of the icon grid page.

use crate::models::view_state::SLIDER_RANGE;
use crate::models::{FolderEntry, FolderIndex, IconFile, ViewState};

const STYLE: &str = include_str!("assets/viewer.css");
const SCRIPT: &str = include_str!("assets/viewer.js");

/// Message shown in place of the grid when a folder has no icons.
pub const EMPTY_MESSAGE: &str = "No icons found in this folder.";

/// Escapes text for use in HTML content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full viewer page for the selected folder.
pub fn render(
    index: &FolderIndex,
    selected: Option<&FolderEntry>,
    icons: &[IconFile],
    view: &ViewState,
) -> String {
    let theme = view.theme();
    let color = escape_html(&view.color);

    format!(
        r##"<!DOCTYPE html>
<html lang="en" style="--color: {color}; --size: {size}px;">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Icon Viewer</title>
<style>
{style}</style>
</head>
<body style="background: {background}; color: {foreground};">

<header>
  <div class="topbar">
    <input type="search" id="search" placeholder="Search icons..." value="{search}">
    <form method="get" id="folderForm">
      <select name="folder" id="folderSelect">
{options}      </select>
      <input type="hidden" name="q" value="{search}">
      <input type="hidden" name="size" value="{size}">
      <input type="hidden" name="color" value="{color}">
      <input type="hidden" name="apply" value="{apply}">
    </form>
  </div>
  <div class="controls">
    <label>Size <input type="range" id="sizeRange" min="{min}" max="{max}" value="{slider}"><span id="sizeVal">{size}px</span></label>
    <label>Manual px <input type="number" id="sizeInput" min="1" value="{size}"></label>
    <label>Color <input type="color" id="colorPicker" value="{picker}"></label>
    <label>Hex/RGB <input type="text" id="colorText" placeholder="#000000 or rgb(0,0,0)" value="{color}"></label>
    <label for="applySettings">Apply Settings <input id="applySettings" type="checkbox"{checked}></label>
  </div>
</header>

<main id="grid">
{grid}</main>

<div id="notify" role="status">Copied!</div>

<script>
{script}</script>
</body>
</html>
"##,
        color = color,
        size = view.size,
        style = STYLE,
        background = theme.background(),
        foreground = theme.foreground(),
        search = escape_html(&view.search),
        options = render_options(index, selected),
        apply = if view.apply_settings { "1" } else { "0" },
        min = SLIDER_RANGE.start(),
        max = SLIDER_RANGE.end(),
        slider = view.slider_value(),
        picker = view.picker_value(),
        checked = if view.apply_settings { " checked" } else { "" },
        grid = render_grid(icons, view),
        script = SCRIPT,
    )
}

fn render_options(index: &FolderIndex, selected: Option<&FolderEntry>) -> String {
    let mut out = String::new();
    for folder in index.folders() {
        let is_selected = selected.map(|s| s.path == folder.path).unwrap_or(false);
        out.push_str(&format!(
            "        <option value=\"{}\"{}>{} ({})</option>\n",
            escape_html(&folder.path.to_string_lossy()),
            if is_selected { " selected" } else { "" },
            escape_html(&index.label(folder)),
            folder.icons.len(),
        ));
    }
    out
}

fn render_grid(icons: &[IconFile], view: &ViewState) -> String {
    if icons.is_empty() {
        return format!("<p class=\"empty\">{}</p>\n", EMPTY_MESSAGE);
    }

    let mut out = String::new();
    for icon in icons {
        let hidden = if view.is_visible(&icon.name) {
            ""
        } else {
            " style=\"display: none;\""
        };
        out.push_str(&format!(
            "<div class=\"icon\" data-name=\"{}\" data-path=\"{}\" title=\"{}\"{}><span class=\"art\">{}</span><span class=\"label\">{}</span></div>\n",
            escape_html(&icon.search_key()),
            escape_html(&icon.path.to_string_lossy()),
            escape_html(&icon.name),
            hidden,
            icon.markup,
            escape_html(&icon.name),
        ));
    }
    out
}
