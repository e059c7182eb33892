//! Console prompts for the generator parameters.

use anyhow::{bail, Result};
use cave_generator::CaveParams;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for each parameter in turn, offering `defaults` for blank answers.
    pub fn ask_params(&mut self, defaults: CaveParams) -> Result<CaveParams> {
        Ok(CaveParams::new(
            self.ask("Enter cave width", defaults.width)?,
            self.ask("Enter cave height", defaults.height)?,
            self.ask("Enter birth chance (0.0-1.0)", defaults.birth_chance)?,
            self.ask("Enter birth limit", defaults.birth_limit)?,
            self.ask("Enter death limit", defaults.death_limit)?,
        ))
    }

    /// Repeats the question until the answer parses. Range checks are left to the caller.
    pub fn ask<T>(&mut self, label: &str, default: T) -> Result<T>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        loop {
            write!(self.output, "{label} [{default}]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input ended before a value for \"{label}\" was entered");
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "Cannot use {answer:?}: {err}")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output.clone()).unwrap()
    }

    #[test]
    fn test_reads_all_params_in_order() {
        let mut prompter = prompter("50\n40\n0.4\n5\n2\n");
        let params = prompter.ask_params(CaveParams::default()).unwrap();
        assert_eq!(params, CaveParams::new(50, 40, 0.4, 5, 2));
        assert!(output(&prompter).starts_with("Enter cave width [80]: Enter cave height [60]: "));
    }

    #[test]
    fn test_blank_answers_take_defaults() {
        let mut prompter = prompter("\n  \n0.5\n\n\n");
        let params = prompter.ask_params(CaveParams::default()).unwrap();
        assert_eq!(params, CaveParams::new(80, 60, 0.5, 4, 3));
    }

    #[test]
    fn test_unparsable_answer_asks_again() {
        let mut prompter = prompter("wide\n-3\n25\n");
        let width: u32 = prompter.ask("Enter cave width", 80).unwrap();
        assert_eq!(width, 25);
        let text = output(&prompter);
        assert_eq!(text.matches("Enter cave width [80]: ").count(), 3);
        assert!(text.contains("Cannot use \"wide\""));
        assert!(text.contains("Cannot use \"-3\""));
    }

    #[test]
    fn test_negative_limits_are_accepted() {
        let mut prompter = prompter("-1\n");
        assert_eq!(prompter.ask("Enter birth limit", 4).unwrap(), -1);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut prompter = prompter("10\n");
        let err = prompter.ask_params(CaveParams::default()).unwrap_err();
        assert!(err.to_string().contains("Enter cave height"));
    }
}
