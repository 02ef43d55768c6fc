//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, FromArgMatches, Parser, Subcommand};

use crate::markup::clipboard::DEFAULT_DIMENSION;
use crate::models::icon_file::DEFAULT_EXTENSION;
use crate::models::IconFormat;
use crate::scanner::ScanConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Parser, Debug)]
#[command(name = "icondex")]
#[command(about = "Browse, restyle and copy folders of SVG icons")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the executable's directory)
    #[arg(short, long, env = "ICONDEX_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Icon file extension, matched case-insensitively
    #[arg(short, long, env = "ICONDEX_EXTENSION", default_value = DEFAULT_EXTENSION, global = true)]
    pub extension: String,

    /// Follow symbolic links while scanning
    #[arg(long, env = "ICONDEX_FOLLOW_SYMLINKS", global = true)]
    pub follow_symlinks: bool,

    /// Maximum directory depth (0 = unlimited)
    #[arg(long, env = "ICONDEX_MAX_DEPTH", default_value_t = 0, global = true)]
    pub max_depth: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the icon viewer over HTTP (default)
    Serve(ServeArgs),

    /// Print the discovered icon folders
    List,

    /// Print the clipboard markup for one icon
    Export {
        /// Icon file, absolute or relative to the scan root
        file: PathBuf,

        /// Size written to the root element
        #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
        size: u32,

        /// Copy the markup without restyling it
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, env = "ICONDEX_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,
}

impl ServeArgs {
    /// Serve settings from the environment and defaults alone.
    pub fn from_env() -> Result<Self> {
        let matches = Self::augment_args(clap::Command::new("serve"))
            .try_get_matches_from(["serve"])
            .context("Invalid serve settings")?;
        Self::from_arg_matches(&matches).context("Invalid serve settings")
    }
}

impl Command {
    /// The command run when none is given.
    pub fn default_serve() -> Result<Self> {
        Ok(Self::Serve(ServeArgs::from_env()?))
    }
}

/// Resolved settings shared by every request.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Absolute scan root.
    pub root: PathBuf,
    pub scan: ScanConfig,
}

impl ViewerConfig {
    pub fn new(root: PathBuf, scan: ScanConfig) -> Self {
        Self { root, scan }
    }
}

impl ScanArgs {
    pub fn resolve(&self) -> Result<ViewerConfig> {
        let root = match &self.root {
            Some(root) => absolute(root)?,
            None => default_root()?,
        };

        let scan = ScanConfig {
            format: IconFormat::new(&self.extension),
            max_depth: self.max_depth,
            follow_symlinks: self.follow_symlinks,
        };

        Ok(ViewerConfig::new(root, scan))
    }
}

/// The directory holding the running executable.
fn default_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable has no parent directory")?
        .to_path_buf();
    Ok(dir)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["icondex"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.scan.extension, "svg");
        assert_eq!(cli.scan.max_depth, 0);
        assert!(!cli.scan.follow_symlinks);
    }

    #[test]
    fn test_cli_serve_and_export() {
        let cli = Cli::try_parse_from(["icondex", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.bind.port(), 9000),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["icondex", "export", "a.svg", "--size", "32", "--raw"])
            .unwrap();
        match cli.command {
            Some(Command::Export { file, size, raw }) => {
                assert_eq!(file, PathBuf::from("a.svg"));
                assert_eq!(size, 32);
                assert!(raw);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_serve_reads_bind_env() {
        std::env::set_var("ICONDEX_BIND", "0.0.0.0:9000");
        let from_env = Command::default_serve();
        std::env::remove_var("ICONDEX_BIND");

        match from_env.unwrap() {
            Command::Serve(args) => assert_eq!(args.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap()),
            other => panic!("unexpected command: {:?}", other),
        }

        match Command::default_serve().unwrap() {
            Command::Serve(args) => assert_eq!(args.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_root_and_format() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["icondex", "--root", &root, "--extension", ".SVG", "list"])
            .unwrap();

        let config = cli.scan.resolve().unwrap();
        assert_eq!(config.root, dir.path().canonicalize().unwrap());
        assert_eq!(config.scan.format.extension(), "svg");
    }

    #[test]
    fn test_resolve_default_root() {
        let args = ScanArgs {
            root: None,
            extension: "svg".into(),
            follow_symlinks: false,
            max_depth: 0,
        };
        let config = args.resolve().unwrap();
        assert!(config.root.is_absolute());
    }
}
