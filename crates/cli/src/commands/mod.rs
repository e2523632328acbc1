// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod quality;
pub mod url;
pub mod watch;

use crate::cli::ServerArgs;
use crate::config::Config;
use crate::error::Result;

/// Loads the config file named by `args` (or the default one) and applies
/// the command-line overrides.
pub(crate) fn load_config(args: &ServerArgs) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config.server);
    Ok(config)
}
