mod base;
mod bits;
mod coding;
mod config;
mod error;
mod huffman;

use std::process::ExitCode;

use crate::coding::{Decoder, Encoder, HuffmanDecoder, HuffmanEncoder, InputSource, OutputSink};
use crate::config::{Command, Config};
use crate::error::Result;

fn run(config: &Config) -> Result<()> {
    let mut input = InputSource::file(&config.input);
    let mut output = OutputSink::file(&config.output);
    log::debug!("{} -> {}", input, output);

    match config.command {
        Command::Compress => {
            let mut encoder = HuffmanEncoder::new();
            let result = encoder.encode(&mut input, &mut output)?;
            log::info!(
                "Compressed {}: {} ({} distinct symbols)",
                config.input.display(),
                result,
                encoder.tree().num_symbols()
            );
        }
        Command::Decompress => {
            let mut decoder = HuffmanDecoder::new();
            let result = decoder.decode(&mut input, &mut output)?;
            log::info!(
                "Decompressed {}: {} ({} distinct symbols)",
                config.input.display(),
                result,
                decoder.tree().num_symbols()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    base::init_logging(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} failed: {}", config.command, e);
            ExitCode::FAILURE
        }
    }
}
