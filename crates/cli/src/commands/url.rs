// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::ServerArgs;
use crate::error::Result;

use super::load_config;

pub fn run(args: &ServerArgs) -> Result<()> {
    let config = load_config(args)?;
    println!("{}", config.server.push_url());
    Ok(())
}
