// -*- coding: utf-8 -*-
//
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-2.0-or-later

#![forbid(unsafe_code)]

mod cgi;
mod pagegen;

use crate::{cgi::Cgi, pagegen::PageGen};
use anyhow::{self as ah, Context as _};
use clap::Parser;
use kvpcfg::Config;
use kvpreq::ops::builtin_registry;
use std::{path::PathBuf, time::Duration};
use tokio::runtime;

#[derive(Parser, Debug, Clone)]
struct Opts {
    /// Override the default configuration file path.
    #[arg(long)]
    config: Option<PathBuf>,
}

async fn async_main(opts: Opts) -> ah::Result<()> {
    // Read the configuration file.
    let config = match &opts.config {
        Some(path) => Config::parse_file(path),
        None => Config::parse_default_file(),
    }
    .context("Configuration")?;

    // Populate the operation registry.
    let registry = builtin_registry(config.decode.strict).context("Operation registry")?;

    // Create the page generator.
    let mut pagegen = PageGen::new(&registry)
        .await
        .context("Initialize page generator")?;

    // Handle the CGI with the web server.
    let mut cgi = Cgi::new(&config).await.context("Initialize CGI")?;
    cgi.run(&registry, &mut pagegen).await;
    Ok(())
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();
    env_logger::init();

    runtime::Builder::new_current_thread()
        .thread_keep_alive(Duration::from_secs(1))
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Tokio runtime builder")?
        .block_on(async_main(opts))
}

// vim: ts=4 sw=4 expandtab
