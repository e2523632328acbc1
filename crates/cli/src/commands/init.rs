// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::cli::ServerArgs;
use crate::config::Config;
use crate::error::{Error, Result};

use super::load_config;

pub fn run(args: &ServerArgs) -> Result<()> {
    let path = write_config(args)?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Saves the loaded config with the flag overrides applied. Settings already
/// in the file are kept.
pub(crate) fn write_config(args: &ServerArgs) -> Result<PathBuf> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?,
    };
    let config = load_config(args)?;
    config.save(&path)?;
    Ok(path)
}
