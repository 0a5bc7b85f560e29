//! # Prompter
//!
//! Line-based question and answer over any reader and writer.
//!
//! The menus only talk to the terminal through [`Prompter`], so tests drive
//! them with a `Cursor` of scripted answers and read back what was printed.
//!
//! ```text
//! ┌──────────────┐   question   ┌──────────────┐
//! │    Menus     │ ───────────► │   Prompter   │ ──► W: Write (stdout)
//! │              │ ◄─────────── │              │ ◄── R: BufRead (stdin)
//! └──────────────┘  parsed value└──────────────┘
//!                                      │
//!                     invalid answer: "✗ <message>", ask again
//!                     end of input:   CliError::cancelled()
//! ```

use std::fmt::Display;
use std::io::{BufRead, Write};

use posada_core::validation::validate_required;
use posada_core::Campo;

use crate::error::{CliError, CliResult};

/// Asks questions on `W` and reads answers from `R`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints an error line in the shell's "✗" style.
    pub fn error(&mut self, err: impl Display) -> CliResult<()> {
        self.say(format_args!("✗ {}", err))
    }

    /// Asks a question and returns the trimmed answer, which may be empty.
    pub fn input(&mut self, mensaje: &str) -> CliResult<String> {
        write!(self.output, "{}: ", mensaje)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks until `parse` accepts the answer.
    pub fn input_with<T, E, F>(&mut self, mensaje: &str, parse: F) -> CliResult<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let raw = self.input(mensaje)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => self.error(err)?,
            }
        }
    }

    /// Asks for a required text field.
    pub fn input_text(&mut self, mensaje: &str, campo: Campo) -> CliResult<String> {
        self.input_with(mensaje, |raw| validate_required(campo, raw).map(|_| raw.to_string()))
    }

    /// Asks for a new value, keeping `actual` when the answer is empty.
    pub fn input_or_keep<T, E, F>(&mut self, mensaje: &str, actual: T, parse: F) -> CliResult<T>
    where
        T: Display,
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        let pregunta = format!("{} [{}]", mensaje, actual);
        loop {
            let raw = self.input(&pregunta)?;
            if raw.is_empty() {
                return Ok(actual);
            }
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => self.error(err)?,
            }
        }
    }

    /// Shows a numbered list and returns the index of the chosen entry.
    pub fn select<S: AsRef<str>>(&mut self, mensaje: &str, opciones: &[S]) -> CliResult<usize> {
        self.say(mensaje)?;
        for (n, opcion) in opciones.iter().enumerate() {
            self.say(format_args!("  {}. {}", n + 1, opcion.as_ref()))?;
        }

        let total = opciones.len();
        self.input_with("Opción", |raw| match raw.parse::<usize>() {
            Ok(n) if (1..=total).contains(&n) => Ok(n - 1),
            _ => Err(format!("Opción no válida: '{}'", raw)),
        })
    }

    /// Yes/no question. Accepts s/si/sí and n/no.
    pub fn confirm(&mut self, mensaje: &str) -> CliResult<bool> {
        let pregunta = format!("{} (s/n)", mensaje);
        self.input_with(&pregunta, |raw| match raw.to_lowercase().as_str() {
            "s" | "si" | "sí" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Responde 's' o 'n'"),
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> CliResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::cancelled());
        }
        Ok(line.trim().to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use posada_core::validation::{parse_id, parse_precio};
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_input_trims_answer() {
        let mut p = prompter("  Geralt  \n");
        assert_eq!(p.input("Nombre").unwrap(), "Geralt");
        assert_eq!(printed(p), "Nombre: ");
    }

    #[test]
    fn test_input_with_asks_again_on_invalid_answer() {
        let mut p = prompter("cero\n0\n7\n");
        assert_eq!(p.input_with("ID", parse_id).unwrap(), 7);

        let out = printed(p);
        assert_eq!(out.matches("✗ El ID debe ser un número mayor a 0").count(), 2);
    }

    #[test]
    fn test_input_text_rejects_empty() {
        let mut p = prompter("\nAcero\n");
        assert_eq!(p.input_text("Material", Campo::Material).unwrap(), "Acero");
        assert!(printed(p).contains("✗ El material no puede estar vacío"));
    }

    #[test]
    fn test_input_or_keep() {
        let mut p = prompter("\n-3\n12.5\n");
        assert_eq!(p.input_or_keep("Precio", 10.0, parse_precio).unwrap(), 10.0);
        assert_eq!(p.input_or_keep("Precio", 10.0, parse_precio).unwrap(), 12.5);

        let out = printed(p);
        assert!(out.contains("Precio [10]: "));
        assert!(out.contains("✗ El precio no puede ser negativo."));
    }

    #[test]
    fn test_select_returns_zero_based_index() {
        let mut p = prompter("5\n2\n");
        let idx = p.select("Filtrar por", &["Nombre", "Material"]).unwrap();
        assert_eq!(idx, 1);

        let out = printed(p);
        assert!(out.contains("  1. Nombre"));
        assert!(out.contains("✗ Opción no válida: '5'"));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("quizá\nS\nno\n");
        assert!(p.confirm("¿Seguro?").unwrap());
        assert!(!p.confirm("¿Seguro?").unwrap());
    }

    #[test]
    fn test_end_of_input_cancels() {
        let mut p = prompter("");
        let err = p.input_with("ID", parse_id).unwrap_err();
        assert!(err.is_cancelled());
    }
}
