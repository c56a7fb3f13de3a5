use std::fmt;
use std::path::PathBuf;

use crate::error::{HuffmanError, Result};

const USAGE: &str = "Usage: huffc [-v|--verbose] <compress|decompress> <input> <output>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Compress,
    Decompress,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Compress => write!(f, "compress"),
            Command::Decompress => write!(f, "decompress"),
        }
    }
}

/// Settings of one run, taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Parse the arguments following the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut verbose = false;
        let mut positional: Vec<String> = Vec::new();
        for arg in args.into_iter().map(Into::into) {
            match arg.as_str() {
                "-v" | "--verbose" => verbose = true,
                "-h" | "--help" => return Err(HuffmanError::Usage(USAGE.to_string())),
                _ => positional.push(arg),
            }
        }

        let [command, input, output] = <[String; 3]>::try_from(positional)
            .map_err(|_| HuffmanError::Usage(format!("Incorrect parameters\n{}", USAGE)))?;
        let command = match command.as_str() {
            "compress" => Command::Compress,
            "decompress" => Command::Decompress,
            other => {
                return Err(HuffmanError::Usage(format!(
                    "Unknown command '{}'\n{}",
                    other, USAGE
                )))
            }
        };
        Ok(Self {
            command,
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            verbose,
        })
    }
}
