//! mixoss - terminal volume mixer for OSS sound devices

mod app;
mod config;

use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use mixoss_input::CrosstermInput;
use mixoss_mixer::{Catalog, OssMixer};
use mixoss_tui::{TerminalDisplay, TerminalSession};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Settings;

#[derive(Parser)]
#[command(name = "mixoss")]
#[command(about = "Terminal volume mixer for OSS sound devices", long_about = None)]
#[command(disable_version_flag = true)]
#[command(help_template = "usage: {name} [-h]\n")]
struct Cli {}

fn main() -> anyhow::Result<()> {
    if let Err(e) = Cli::try_parse() {
        let _ = e.print();
        std::process::exit(match e.kind() {
            ErrorKind::DisplayHelp => 0,
            _ => 1,
        });
    }

    let settings = Settings::from_env();
    init_logging(&settings);
    tracing::info!("mixoss starting on {}", settings.device.display());

    let mut mixer = OssMixer::open(&settings.device)
        .with_context(|| format!("cannot start on {}", settings.device.display()))?;
    let catalog =
        Catalog::load(&mixer, &settings.vmix_rule).context("cannot enumerate mixer controls")?;
    let mut app = App::new(catalog, settings.theme.clone(), settings.poll_interval)
        .context("cannot start on the first mixer")?;
    if let Some(first) = app.current_mixer() {
        tracing::info!("showing mixer 0 '{}'", first.name);
    }

    // Declared before the display so the terminal is restored last
    let _session = TerminalSession::enter().context("cannot initialise terminal")?;
    let mut display = TerminalDisplay::stdout().context("cannot initialise display")?;

    app::run(&mut app, &mut mixer, &mut display, &mut CrosstermInput)?;

    tracing::info!("mixoss exiting");
    Ok(())
}

/// Log to a file when `RUST_LOG` is set; the terminal belongs to the UI
fn init_logging(settings: &Settings) {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let path = settings.log_path();
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("mixoss: logging disabled, cannot open {}: {}", path.display(), e);
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["mixoss", "-h"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("usage: mixoss [-h]"));
    }

    #[test]
    fn test_rejects_arguments() {
        assert!(Cli::try_parse_from(["mixoss"]).is_ok());
        assert!(Cli::try_parse_from(["mixoss", "-v"]).is_err());
        assert!(Cli::try_parse_from(["mixoss", "--version"]).is_err());
        assert!(Cli::try_parse_from(["mixoss", "extra"]).is_err());
    }
}
