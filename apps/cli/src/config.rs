//! # Application Configuration
//!
//! Settings for the interactive shell.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags
//! 2. Environment variables (`POSADA_*`)
//! 3. Defaults (this file)
//!
//! `POSADA_DATA_DIR` and `POSADA_CAJA_INICIAL` are read by clap itself, so a
//! flag always wins over them. `POSADA_NOMBRE` and `POSADA_MODO` have no
//! flag and are read in [`AppConfig::from_env`].

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use posada_store::{BootstrapMode, PosadaConfig};

/// Opening cash when nothing else is configured.
pub const CAJA_INICIAL_POR_DEFECTO: f64 = 1000.0;

/// Data folder name, under the platform data dir or the working directory.
pub const CARPETA_DATOS: &str = "BaseDeDatos";

// =============================================================================
// Command Line
// =============================================================================

/// Gestor de la Posada del Lobo Blanco.
#[derive(Debug, Default, Parser)]
#[command(name = "posada", version, about)]
pub struct Cli {
    /// Directory holding the JSON data files
    #[arg(long, env = "POSADA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Work on empty Dummy*.json files instead of the real books
    #[arg(long)]
    pub seeded: bool,

    /// Load the books, log a summary and exit
    #[arg(long)]
    pub no_interactive: bool,

    /// Cash in the till before any recorded transaction
    #[arg(long, env = "POSADA_CAJA_INICIAL")]
    pub caja_inicial: Option<f64>,
}

// =============================================================================
// AppConfig
// =============================================================================

/// Shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Inn name shown in the menu header.
    /// Default: "Posada del Lobo Blanco"
    pub nombre: String,

    /// Data directory.
    /// Default: platform data dir + "BaseDeDatos"
    pub data_dir: PathBuf,

    /// Use the seeded side files.
    /// Default: false
    pub seeded: bool,

    /// Opening cash.
    /// Default: 1000
    pub caja_inicial: f64,

    /// Run the menu. When false, load and exit.
    /// Default: true
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            nombre: "Posada del Lobo Blanco".to_string(),
            data_dir: default_data_dir(),
            seeded: false,
            caja_inicial: CAJA_INICIAL_POR_DEFECTO,
            interactive: true,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// ## Environment Variables
    /// - `POSADA_NOMBRE`: Inn name
    /// - `POSADA_MODO`: `test` selects the seeded side files
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(nombre) = lookup("POSADA_NOMBRE") {
            if !nombre.trim().is_empty() {
                config.nombre = nombre;
            }
        }

        if let Some(modo) = lookup("POSADA_MODO") {
            config.seeded = modo.eq_ignore_ascii_case("test");
        }

        config
    }

    /// Applies command-line flags on top.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(caja) = cli.caja_inicial {
            self.caja_inicial = caja;
        }
        self.seeded |= cli.seeded;
        self.interactive = !cli.no_interactive;
        self
    }

    pub fn to_posada_config(&self) -> PosadaConfig {
        let mode = if self.seeded {
            BootstrapMode::seeded_empty()
        } else {
            BootstrapMode::Production
        };

        PosadaConfig::new(&self.data_dir)
            .bootstrap(mode)
            .caja_inicial(self.caja_inicial)
    }
}

/// Gets the default data directory.
///
/// Falls back to `./BaseDeDatos` when the platform has no home directory.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "lobo-blanco", "posada")
        .map(|dirs| dirs.data_dir().join(CARPETA_DATOS))
        .unwrap_or_else(|| PathBuf::from(".").join(CARPETA_DATOS))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.nombre, "Posada del Lobo Blanco");
        assert_eq!(config.caja_inicial, CAJA_INICIAL_POR_DEFECTO);
        assert!(config.data_dir.ends_with(CARPETA_DATOS));
        assert!(!config.seeded);
        assert!(config.interactive);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("POSADA_NOMBRE", "La Mandrágora"),
            ("POSADA_MODO", "TEST"),
        ]));
        assert_eq!(config.nombre, "La Mandrágora");
        assert!(config.seeded);
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[("POSADA_NOMBRE", "  ")]));
        assert_eq!(config.nombre, "Posada del Lobo Blanco");
    }

    #[test]
    fn test_cli_flags_win() {
        let cli = Cli::parse_from([
            "posada",
            "--data-dir",
            "/tmp/posada",
            "--caja-inicial",
            "50",
            "--seeded",
            "--no-interactive",
        ]);
        let config = AppConfig::from_lookup(lookup(&[])).with_cli(&cli);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/posada"));
        assert_eq!(config.caja_inicial, 50.0);
        assert!(config.seeded);
        assert!(!config.interactive);
    }

    #[test]
    fn test_posada_config_mode() {
        let mut config = AppConfig::from_lookup(lookup(&[]));
        assert!(!config.to_posada_config().bootstrap.is_seeded());

        config.seeded = true;
        let posada = config.to_posada_config();
        assert!(posada.bootstrap.is_seeded());
        assert_eq!(posada.caja_inicial.value(), CAJA_INICIAL_POR_DEFECTO);
    }
}
