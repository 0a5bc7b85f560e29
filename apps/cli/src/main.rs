//! # Posada del Lobo Blanco Entry Point
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (stderr)
//! 3. Open the JSON books
//! 4. Run the menu until "Salir" or end of input

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs so the menu can be driven from tests
    posada_cli::run()
}
