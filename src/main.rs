//! Hearth - headless driver for the hearth state store
//!
//! This is the binary entry point. All logic lives in the library.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hearth_core::prelude::*;
use hearth_state::headless::{demo_backend, run_headless};
use hearth_state::store::config::{init_config_dir, load_settings, CONFIG_FILENAME, HEARTH_DIR};
use hearth_state::{standard_effects, Store};

/// Hearth - drive the hearth state store from an NDJSON action script
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(about = "Drive the hearth state store from an NDJSON action script", long_about = None)]
struct Args {
    /// Script with one JSON action per line (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Directory containing `.hearth/config.toml`
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Write a default `.hearth/config.toml` and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let base_path = match args.dir {
        Some(dir) if !dir.is_dir() => return Err(Error::ConfigNotFound { path: dir }),
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    if args.init_config {
        init_config_dir(&base_path)?;
        eprintln!(
            "Wrote {}",
            base_path.join(HEARTH_DIR).join(CONFIG_FILENAME).display()
        );
        return Ok(());
    }

    hearth_core::logging::init(args.log_dir.as_deref())?;
    let settings = load_settings(&base_path);

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let store = Store::new(settings);
    store.subscribe_effects(standard_effects(Arc::new(demo_backend())))?;

    let mut stdout = io::stdout().lock();
    run_headless(&store, &script, &mut stdout).await
}
