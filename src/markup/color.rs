//! CSS color parsing and contrast selection.
//!
//! Supports:
//! - Hex colors: "#RGB", "#RGBA", "#RRGGBB", "#RRGGBBAA"
//! - RGB functions: "rgb(255, 0, 0)", "rgba(255, 0, 0, 0.5)", "rgb(255 0 0 / 50%)"
//! - HSL functions: "hsl(120, 100%, 50%)", "hsla(120deg 100% 50% / 0.5)"
//! - HWB functions: "hwb(0 0% 0%)"
//! - CSS named colors and "transparent"
//!
//! Wide-gamut functions (`lab`, `lch`, `oklab`, `oklch`, `color`) and
//! `currentColor` are accepted as valid input but have no sRGB value here.

/// Brightness above which light icons get a dark ground.
pub const BRIGHTNESS_THRESHOLD: f32 = 180.0;

/// Color used by the picker when a value has no hex form.
pub const FALLBACK_HEX: &str = "#000000";

/// An 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses any supported CSS color syntax.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex_color(hex);
        }

        let lower = value.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_rgb_function(&lower);
        }
        if lower.starts_with("hsl") {
            return parse_hsl_function(&lower);
        }
        if lower.starts_with("hwb") {
            return parse_hwb_function(&lower);
        }

        parse_named_color(&lower)
    }

    /// Perceptual brightness in the 0.0..=255.0 range, not truncated.
    pub fn brightness(&self) -> f32 {
        let weighted = self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114;
        weighted as f32 / 1000.0
    }

    /// Lowercase `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether a string is a color the viewer accepts.
pub fn is_valid_color(value: &str) -> bool {
    Rgba::parse(value).is_some() || is_unresolved_color(value)
}

/// Valid CSS colors that cannot be reduced to sRGB without color management.
fn is_unresolved_color(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower == "currentcolor" {
        return true;
    }

    if let Some(parts) = function_args(&lower, &["lab", "lch", "oklab", "oklch"]) {
        return (3..=4).contains(&parts.len()) && parts.iter().all(|p| is_component(p));
    }

    if let Some(parts) = function_args(&lower, &["color"]) {
        let Some((space, channels)) = parts.split_first() else {
            return false;
        };
        return PREDEFINED_SPACES.contains(space)
            && (3..=4).contains(&channels.len())
            && channels.iter().all(|p| is_component(p));
    }

    false
}

const PREDEFINED_SPACES: &[&str] = &[
    "a98-rgb",
    "display-p3",
    "prophoto-rgb",
    "rec2020",
    "srgb",
    "srgb-linear",
    "xyz",
    "xyz-d50",
    "xyz-d65",
];

fn is_component(part: &str) -> bool {
    if part == "none" {
        return true;
    }
    let number = part
        .strip_suffix('%')
        .or_else(|| part.strip_suffix("deg"))
        .unwrap_or(part);
    parse_number(number).is_some()
}

/// Value to show in a native color picker for a color string.
///
/// Hex input is normalized to `#rrggbb`; anything else falls back to black.
pub fn picker_value(value: &str) -> String {
    let value = value.trim();
    if value.starts_with('#') {
        if let Some(color) = Rgba::parse(value) {
            return color.to_hex();
        }
    }
    FALLBACK_HEX.to_string()
}

/// Page ground chosen to keep icons visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light background with dark text.
    Light,
    /// Dark background with light text, for bright icon colors.
    Dark,
}

impl Theme {
    pub fn for_brightness(brightness: f32) -> Self {
        if brightness > BRIGHTNESS_THRESHOLD {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Theme for a color string; unparsable colors keep the light ground.
    pub fn for_color(value: &str) -> Self {
        Rgba::parse(value)
            .map(|c| Self::for_brightness(c.brightness()))
            .unwrap_or(Self::Light)
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Light => "#f8f8f8",
            Self::Dark => "#000",
        }
    }

    pub fn foreground(&self) -> &'static str {
        match self {
            Self::Light => "#222",
            Self::Dark => "#fff",
        }
    }
}

fn parse_hex_color(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::new(short(0)?, short(1)?, short(2)?, 255)),
        4 => Some(Rgba::new(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Rgba::new(long(0)?, long(2)?, long(4)?, 255)),
        8 => Some(Rgba::new(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

/// Splits the arguments of a color function into components.
///
/// Accepts both the legacy comma syntax and the space syntax with `/ alpha`.
fn function_args<'a>(value: &'a str, names: &[&str]) -> Option<Vec<&'a str>> {
    let start = value.find('(')?;
    let name = value[..start].trim();
    if !names.contains(&name) {
        return None;
    }
    let content = value[start + 1..].strip_suffix(')')?;

    let parts: Vec<&str> = if content.contains(',') {
        content.split(',').map(str::trim).collect()
    } else {
        let (channels, alpha) = match content.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (content, None),
        };
        let mut parts: Vec<&str> = channels.split_whitespace().collect();
        parts.extend(alpha);
        parts
    };

    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Parses a finite number; `nan` and `inf` are not CSS numbers.
fn parse_number(part: &str) -> Option<f32> {
    part.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_percent(part: &str) -> Option<f32> {
    Some(parse_number(part.strip_suffix('%')?)? / 100.0)
}

fn parse_hue(part: &str) -> Option<f32> {
    parse_number(part.strip_suffix("deg").unwrap_or(part))
}

fn parse_channel(part: &str) -> Option<u8> {
    let value = match part.strip_suffix('%') {
        Some(pct) => parse_number(pct)? * 2.55,
        None => parse_number(part)?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(part: &str) -> Option<u8> {
    let value = match part.strip_suffix('%') {
        Some(pct) => parse_number(pct)? / 100.0,
        None => parse_number(part)?,
    };
    Some((value.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_rgb_function(value: &str) -> Option<Rgba> {
    let parts = function_args(value, &["rgb", "rgba"])?;

    match parts.len() {
        3 | 4 => {
            let r = parse_channel(parts[0])?;
            let g = parse_channel(parts[1])?;
            let b = parse_channel(parts[2])?;
            let a = match parts.get(3) {
                Some(a) => parse_alpha(a)?,
                None => 255,
            };
            Some(Rgba::new(r, g, b, a))
        }
        _ => None,
    }
}

fn parse_hsl_function(value: &str) -> Option<Rgba> {
    let parts = function_args(value, &["hsl", "hsla"])?;
    if !(3..=4).contains(&parts.len()) {
        return None;
    }

    let hue = parse_hue(parts[0])?;
    let sat = parse_percent(parts[1])?;
    let light = parse_percent(parts[2])?;
    let a = match parts.get(3) {
        Some(a) => parse_alpha(a)?,
        None => 255,
    };

    let (r, g, b) = hsl_to_rgb(hue, sat.clamp(0.0, 1.0), light.clamp(0.0, 1.0));
    Some(Rgba::new(r, g, b, a))
}

fn parse_hwb_function(value: &str) -> Option<Rgba> {
    let parts = function_args(value, &["hwb"])?;
    if !(3..=4).contains(&parts.len()) {
        return None;
    }

    let hue = parse_hue(parts[0])?;
    let mut white = parse_percent(parts[1])?.clamp(0.0, 1.0);
    let mut black = parse_percent(parts[2])?.clamp(0.0, 1.0);
    let a = match parts.get(3) {
        Some(a) => parse_alpha(a)?,
        None => 255,
    };

    // Whiteness and blackness summing past 100% collapse to a gray.
    if white + black > 1.0 {
        let sum = white + black;
        white /= sum;
        black /= sum;
    }

    let (r, g, b) = hsl_to_rgb(hue, 1.0, 0.5);
    let scale = |v: u8| {
        let v = v as f32 / 255.0 * (1.0 - white - black) + white;
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Some(Rgba::new(scale(r), scale(g), scale(b), a))
}

fn hsl_to_rgb(hue: f32, sat: f32, light: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * light - 1.0).abs()) * sat;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = light - chroma / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

fn parse_named_color(name: &str) -> Option<Rgba> {
    if name == "transparent" {
        return Some(Rgba::new(0, 0, 0, 0));
    }
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| {
            let rgb = NAMED_COLORS[i].1;
            Rgba::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
        })
}

// Sorted by name for binary search.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];
