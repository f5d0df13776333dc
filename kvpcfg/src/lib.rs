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

use anyhow::{self as ah, Context as _, format_err as err};
use std::path::Path;
use toml::{Table, Value};

fn parse_bool(name: &str, value: &Value) -> ah::Result<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        _ => Err(err!("Configuration entry '{name}' invalid boolean.")),
    }
}

fn parse_usize(name: &str, value: &Value) -> ah::Result<usize> {
    match value {
        Value::Integer(val) if val >= &0 => Ok(*val as usize),
        _ => Err(err!("Configuration entry '{name}' invalid integer.")),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigDecode {
    /// Reject request parameters that are not declared in the schema.
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum accepted QUERY_STRING length, in bytes.
    pub max_query_len: usize,
    /// Maximum accepted number of request parameters.
    pub max_params: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_query_len: 1024 * 4,
            max_params: 64,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub decode: ConfigDecode,
    pub limits: ConfigLimits,
}

impl Config {
    fn new() -> Self {
        Default::default()
    }

    pub fn parse_default_file() -> ah::Result<Self> {
        Self::parse_file(Path::new("/opt/kvpreader/etc/kvpreader/kvpreader.conf"))
    }

    pub fn parse_file(path: &Path) -> ah::Result<Self> {
        let s = if path.exists() {
            std::fs::read_to_string(path).context("Read configuration file")?
        } else {
            "".to_string()
        };
        Self::parse_str(&s)
    }

    pub fn parse_str(s: &str) -> ah::Result<Self> {
        let table: Table = toml::from_str(s).context("Parse configuration file")?;
        let mut config = Config::new();

        for (name, value) in &table {
            if name == "decode"
                && let Value::Table(t) = value
            {
                for (name, value) in t {
                    if name == "strict" {
                        config.decode.strict = parse_bool(name, value)?;
                        continue;
                    }
                    log::warn!("Ignoring configuration entry: {name} = {value:?}");
                }
                continue;
            }

            if name == "limits"
                && let Value::Table(t) = value
            {
                for (name, value) in t {
                    if name == "max-query-len" {
                        config.limits.max_query_len = parse_usize(name, value)?;
                        continue;
                    }
                    if name == "max-params" {
                        config.limits.max_params = parse_usize(name, value)?;
                        continue;
                    }
                    log::warn!("Ignoring configuration entry: {name} = {value:?}");
                }
                continue;
            }

            log::warn!("Ignoring configuration entry: {name} = {value:?}");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_defaults() {
        let config = Config::parse_str("").unwrap();
        assert!(!config.decode.strict);
        assert_eq!(config.limits.max_query_len, 4096);
        assert_eq!(config.limits.max_params, 64);
    }

    #[test]
    fn entries_override_defaults() {
        let config = Config::parse_str(
            "\
[decode]
strict = true

[limits]
max-query-len = 128
max-params = 8
",
        )
        .unwrap();
        assert!(config.decode.strict);
        assert_eq!(config.limits.max_query_len, 128);
        assert_eq!(config.limits.max_params, 8);
    }

    #[test]
    fn invalid_value_type_fails() {
        assert!(Config::parse_str("[decode]\nstrict = \"yes\"\n").is_err());
        assert!(Config::parse_str("[limits]\nmax-params = -1\n").is_err());
    }

    #[test]
    fn unknown_entries_are_ignored() {
        let config = Config::parse_str("[decode]\nshiny = true\n[whatever]\nx = 1\n").unwrap();
        assert!(!config.decode.strict);
    }
}

// vim: ts=4 sw=4 expandtab
