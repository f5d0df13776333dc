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

mod command;

use crate::command::{decode::command_decode, operations::command_operations};
use anyhow::{self as ah, Context as _};
use clap::{Parser, Subcommand};
use kvpcfg::Config;
use kvpreq::ops::builtin_registry;
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};
use tokio::runtime;

#[derive(Parser, Debug, Clone)]
struct Opts {
    /// Override the default configuration file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decode in strict mode, regardless of the configuration.
    #[arg(long)]
    strict: bool,

    /// Set the number async worker threads.
    #[arg(long, default_value = "2")]
    worker_threads: NonZeroUsize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List all registered operations and their declared parameters.
    Operations,
    /// Decode a query string against one operation's schema.
    Decode {
        /// The operation identifier (e.g. "conformance" or "items").
        operation: String,
        /// The query string (e.g. "collectionid=roads&limit=10").
        #[arg(default_value = "")]
        query: String,
    },
}

async fn async_main(opts: Opts) -> ah::Result<()> {
    let config = match &opts.config {
        Some(path) => Config::parse_file(path),
        None => Config::parse_default_file(),
    }
    .context("Configuration")?;

    let strict = opts.strict || config.decode.strict;
    let registry = builtin_registry(strict).context("Operation registry")?;

    match &opts.command {
        Command::Operations => command_operations(&registry).await,
        Command::Decode { operation, query } => {
            command_decode(&registry, operation, query).await
        }
    }
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();
    env_logger::init();

    runtime::Builder::new_multi_thread()
        .worker_threads(opts.worker_threads.into())
        .max_blocking_threads(opts.worker_threads.into()) // one blocking per worker.
        .thread_keep_alive(Duration::from_secs(1))
        .enable_all()
        .build()
        .context("Tokio runtime builder")?
        .block_on(async_main(opts))
}

// vim: ts=4 sw=4 expandtab
