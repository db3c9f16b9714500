/// wire3d - run wireframe scripts
///
/// Usage: wire3d [--config <file.json>] [script ...]
///
/// With no script argument the file `script` in the working directory is
/// run. Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use wire3d_script::{Config, Session};

/// Run wireframe scripts and write or preview the images they draw
#[derive(Parser, Debug)]
#[command(name = "wire3d", version, about)]
struct Cli {
    /// JSON config file overriding raster size and tessellation steps
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scripts to run in order
    #[arg(default_value = "script")]
    scripts: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };
    info!("raster {}x{}", config.width, config.height);

    for path in &cli.scripts {
        info!("Running script '{}'", path.display());
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script '{}'", path.display()))?;
        let mut session = Session::new(config.clone(), io::stdout());
        session
            .run_source(&source)
            .with_context(|| format!("Script '{}' failed", path.display()))?;
    }

    Ok(())
}
