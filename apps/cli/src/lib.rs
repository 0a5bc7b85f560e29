//! # posada-cli: Interactive Shell for the Posada del Lobo Blanco
//!
//! Reads the configuration, opens the books and runs the menu on the
//! terminal.
//!
//! ## Module Organization
//! ```text
//! posada_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Flags, env vars, defaults
//! ├── error.rs        ◄─── CliError for menu actions
//! ├── prompt.rs       ◄─── Question/answer over BufRead + Write
//! ├── format.rs       ◄─── Fixed-width rows for listings
//! └── menu/
//!     ├── mod.rs      ◄─── Main loop, shared pickers
//!     ├── ventas.rs   ◄─── Vender, comprar, devolver
//!     ├── bienes.rs   ◄─── Goods submenu
//!     ├── clientes.rs ◄─── Customers submenu
//!     ├── mercaderes.rs ◄─ Merchants submenu
//!     └── informes.rs ◄─── Reports
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod menu;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use posada_store::Posada;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Cli};
use error::CliResult;
use prompt::Prompter;

/// Runs the shell.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Parse flags (clap, POSADA_DATA_DIR / POSADA_CAJA_INICIAL)           │
/// │                                                                         │
/// │  2. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn, posada crates at info; override with RUST_LOG     │
/// │                                                                         │
/// │  3. Build AppConfig (defaults → env → flags)                            │
/// │                                                                         │
/// │  4. Open the Posada handle                                              │
/// │     • Production files, or empty Dummy*.json with --seeded              │
/// │                                                                         │
/// │  5. Menu loop on stdin/stdout, or exit with --no-interactive            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, error = %e, "Shell stopped");
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli) -> CliResult<()> {
    let config = AppConfig::from_env().with_cli(cli);
    info!(
        nombre = %config.nombre,
        data_dir = %config.data_dir.display(),
        seeded = config.seeded,
        caja_inicial = config.caja_inicial,
        "Configuration loaded"
    );

    let mut posada = Posada::open(config.to_posada_config())?;

    if !config.interactive {
        info!(
            bienes = posada.inventario().length(),
            clientes = posada.clientes().length(),
            mercaderes = posada.mercaderes().length(),
            transacciones = posada.transacciones().length(),
            caja = posada.caja().value(),
            "Books loaded, exiting (--no-interactive)"
        );
        return Ok(());
    }

    let mut prompter = Prompter::new(stdin().lock(), stdout());
    menu::run(&mut prompter, &mut posada, &config.nombre)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they don't interleave with the menu on stdout.
/// Set `RUST_LOG` to override, e.g. `RUST_LOG=posada_store=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,posada_store=info,posada_cli=info"));

    // Ignore the error if a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
