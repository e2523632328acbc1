// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;
use tvm_core::{classify, combine, Qualities, Quality, QualityVocabulary};

use crate::cli::{OutputFormat, QualityCommand};
use crate::error::{Error, Result};

pub fn run(cmd: QualityCommand) -> Result<()> {
    let output = match cmd {
        QualityCommand::Combine {
            allowed,
            preferred,
            output,
        } => format_combined(combine(&allowed, &preferred), output),
        QualityCommand::Split {
            value,
            flags,
            output,
        } => format_split(&vocabulary(&flags).split(value), output)?,
        QualityCommand::Status {
            raw_status,
            quality,
            allowed,
            preferred,
        } => classify(&raw_status, quality, &Qualities::new(allowed, preferred)).to_string(),
    };
    println!("{}", output);
    Ok(())
}

/// The given flags, or every single bit of the low half when none are given.
pub(crate) fn vocabulary(flags: &[Quality]) -> QualityVocabulary {
    if flags.is_empty() {
        let all: Vec<Quality> = (0..16).map(|bit| 1 << bit).collect();
        QualityVocabulary::from_flags(&all)
    } else {
        QualityVocabulary::from_flags(flags)
    }
}

pub(crate) fn format_combined(value: u32, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => json!({ "quality": value }).to_string(),
    }
}

pub(crate) fn format_split(qualities: &Qualities, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(format!(
            "allowed: {}\npreferred: {}",
            join(&qualities.allowed),
            join(&qualities.preferred)
        )),
        OutputFormat::Json => serde_json::to_string(qualities)
            .map_err(|e| Error::Config(format!("failed to serialize qualities: {}", e))),
    }
}

fn join(flags: &[Quality]) -> String {
    if flags.is_empty() {
        return "-".to_string();
    }
    flags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
