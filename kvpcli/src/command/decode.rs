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

use anyhow::{self as ah, Context as _, format_err as err};
use kvpreq::{RawParams, ReaderRegistry, decode};

pub async fn command_decode(
    registry: &ReaderRegistry,
    operation: &str,
    query: &str,
) -> ah::Result<()> {
    let Some(schema) = registry.resolve(operation) else {
        return Err(err!("Unsupported operation: '{operation}'"));
    };

    let raw = RawParams::parse(query).context("Parse query string")?;
    let request = decode(&raw, schema).context("Decode request")?;

    println!("{}", request.operation());
    if request.is_empty() {
        println!("  (no fields)");
    } else {
        for (name, value) in request.fields() {
            println!("  {name} = {value}");
        }
    }

    Ok(())
}

// vim: ts=4 sw=4 expandtab
