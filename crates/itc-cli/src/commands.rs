//! Command handlers
//!
//! Each handler takes stamps in text form and returns the lines to print.

use anyhow::{Context, Result};
use base64::Engine as _;
use clap::Subcommand;
use itc_core::codec::{decode_stamp, parse_stamp};
use itc_core::Stamp;

use crate::config::{BinaryEncoding, CliConfig};

/// Stamp operations exposed on the command line
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the seed stamp: sole owner, empty history
    Seed,

    /// Split a stamp into two stamps with disjoint identity
    Fork {
        /// Stamp in text form, e.g. "(1,0)"
        stamp: String,
    },

    /// Print the anonymous snapshot of a stamp's history
    Peek {
        /// Stamp in text form
        stamp: String,
    },

    /// Inflate a stamp to record a local event
    Event {
        /// Stamp in text form
        stamp: String,
    },

    /// Merge two stamps with disjoint identity
    Join {
        /// First stamp in text form
        left: String,
        /// Second stamp in text form
        right: String,
    },

    /// Print how the first stamp's history relates to the second's
    Compare {
        /// First stamp in text form
        left: String,
        /// Second stamp in text form
        right: String,
    },

    /// Print the binary form of a stamp
    Encode {
        /// Stamp in text form
        stamp: String,
    },

    /// Print the text form of a binary stamp
    Decode {
        /// Binary stamp in the configured encoding
        encoded: String,
    },
}

/// Run a command and return its output lines
pub fn run(command: &Command, config: &CliConfig) -> Result<Vec<String>> {
    let lines = match command {
        Command::Seed => vec![Stamp::seed().to_string()],
        Command::Fork { stamp } => {
            let (a, b) = read_stamp(stamp, config)?.fork();
            vec![a.to_string(), b.to_string()]
        }
        Command::Peek { stamp } => vec![read_stamp(stamp, config)?.peek().to_string()],
        Command::Event { stamp } => {
            let next = read_stamp(stamp, config)?
                .event()
                .context("Failed to inflate stamp")?;
            vec![next.to_string()]
        }
        Command::Join { left, right } => {
            let joined = read_stamp(left, config)?
                .join(&read_stamp(right, config)?)
                .context("Failed to join stamps")?;
            vec![joined.to_string()]
        }
        Command::Compare { left, right } => {
            let order = read_stamp(left, config)?.causal_order(&read_stamp(right, config)?);
            vec![order.to_string()]
        }
        Command::Encode { stamp } => {
            let bytes = read_stamp(stamp, config)?.to_binary();
            vec![encode_bytes(&bytes, config.encoding)]
        }
        Command::Decode { encoded } => {
            let bytes = decode_bytes(encoded.trim(), config.encoding)?;
            let stamp = decode_stamp(&bytes, &config.limits).context("Failed to decode stamp")?;
            vec![stamp.to_string()]
        }
    };

    tracing::debug!(?command, output = ?lines, "command complete");
    Ok(lines)
}

fn read_stamp(text: &str, config: &CliConfig) -> Result<Stamp> {
    parse_stamp(text.trim(), &config.limits).with_context(|| format!("Invalid stamp {text:?}"))
}

fn encode_bytes(bytes: &[u8], encoding: BinaryEncoding) -> String {
    match encoding {
        BinaryEncoding::Hex => hex::encode(bytes),
        BinaryEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

fn decode_bytes(text: &str, encoding: BinaryEncoding) -> Result<Vec<u8>> {
    match encoding {
        BinaryEncoding::Hex => hex::decode(text).context("Invalid hex input"),
        BinaryEncoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(text)
            .context("Invalid base64 input"),
    }
}
