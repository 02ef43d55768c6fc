mod app;
mod config;
mod error;
mod markup;
mod models;
mod scanner;
mod ui;

use anyhow::Result;
use clap::Parser;

use app::IconDexApp;
use config::{Cli, Command};
use markup::clipboard::ExportMode;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("icondex=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.scan.resolve()?;
    let app = IconDexApp::new(config);

    let command = match cli.command {
        Some(command) => command,
        None => Command::default_serve()?,
    };

    match command {
        Command::Serve(args) => app.serve(args.bind).await?,
        Command::List => {
            for folder in app.list().await? {
                println!("{}\t{}\t{}", folder.label, folder.icon_count, folder.path);
            }
        }
        Command::Export { file, size, raw } => {
            let mode = ExportMode::new(!raw, size);
            println!("{}", app.export(&file, mode)?);
        }
    }

    Ok(())
}
