//! Splitboard command-line front end.
//!
//! Drives the same session a GUI would, without a window.
//!
//! # Usage
//!
//! ```text
//! splitboard [--config <FILE>] <COMMAND>
//!
//! Commands:
//!   layout [--json]   Print both keyboard halves
//!   state             Print the current labels and highlights as JSON
//!   type <CHORD>...   Type chords such as `Ctrl+c`, `Shift+a`, `Enter`
//! ```
//!
//! The log level comes from `RUST_LOG` when set, otherwise from
//! `[logging] level` in the config file.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()
//!  └─ prepare_layout()          -- build + split, scan codes from the OS
//!  └─ KeyboardSession::new()    -- locks seeded from the OS
//!  └─ ui_bridge command          -- get_layout / get_visual_state / type_chords
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use splitboard_app::application::{
    inject_key::InjectKeyUseCase, keyboard_session::KeyboardSession,
    prepare_layout::prepare_layout,
};
use splitboard_app::infrastructure::{
    config::{load_config, AppConfig},
    input_injection::platform_backend,
    system_state::{platform_focus_inspector, platform_scan_codes, platform_toggle_source},
    ui_bridge::{get_layout, get_visual_state, render_text, type_chords},
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Split on-screen keyboard.
#[derive(Debug, Parser)]
#[command(name = "splitboard", about = "Split on-screen keyboard", version)]
struct Cli {
    /// TOML configuration file.  A missing file means defaults.
    #[arg(long, env = "SPLITBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print both keyboard halves.
    Layout {
        /// Emit the layout DTO as JSON instead of a text grid.
        #[arg(long)]
        json: bool,
    },
    /// Print the current labels and highlights as JSON.
    State,
    /// Type one or more chords, e.g. `Ctrl+c` or `Enter`.
    Type {
        #[arg(required = true)]
        chords: Vec<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(encoding = ?config.injection.encoding, "splitboard starting");

    let mut session = build_session(&config);

    match cli.command {
        Command::Layout { json } => {
            let result = get_layout(&session, &config.repeat);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let split = session.split_layout();
                println!("Left half:\n{}", render_text(&split.left));
                println!("Right half:\n{}", render_text(&split.right));
            }
        }
        Command::State => {
            println!("{}", serde_json::to_string_pretty(&get_visual_state(&session))?);
        }
        Command::Type { chords } => {
            let result = type_chords(&mut session, &chords);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                let msg = result.error.unwrap_or_default();
                error!("typing failed: {msg}");
                anyhow::bail!(msg);
            }
        }
    }

    Ok(())
}

fn build_session(config: &AppConfig) -> KeyboardSession {
    let layout = prepare_layout(platform_scan_codes().as_ref());
    let toggles = platform_toggle_source().toggle_snapshot();

    let mut injector =
        InjectKeyUseCase::new(platform_backend()).with_encoding(config.injection.encoding);
    if config.injection.focus_diagnostics {
        if let Some(focus) = platform_focus_inspector() {
            injector = injector.with_focus_inspector(focus);
        }
    }

    KeyboardSession::new(layout, toggles, injector)
}
