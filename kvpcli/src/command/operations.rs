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

use anyhow as ah;
use itertools::Itertools as _;
use kvpreq::ReaderRegistry;

pub async fn command_operations(registry: &ReaderRegistry) -> ah::Result<()> {
    for operation in registry.operations() {
        let schema = registry.resolve(operation).expect("No schema");

        println!("{operation}");
        println!("  strict     = {}", schema.is_strict());
        if schema.fields().is_empty() {
            println!("  parameters = (none)");
        } else {
            for field in schema.fields() {
                let mut notes = vec![field.kind().as_str().to_string()];
                if field.is_required() {
                    notes.push("required".to_string());
                }
                if !field.allowed_values().is_empty() {
                    notes.push(format!("one of: {}", field.allowed_values().iter().join("|")));
                }
                println!("  parameter  = {} ({})", field.name(), notes.iter().join(", "));
            }
        }
        println!();
    }
    println!("{} operations total", registry.len());

    Ok(())
}

// vim: ts=4 sw=4 expandtab
