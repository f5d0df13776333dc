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
use querystrong::{QueryStrong, Value};
use std::collections::HashMap;

/// Raw key-value request parameters, as handed over by the transport layer.
///
/// Parameter names are case-insensitive. They are folded to ASCII
/// lowercase on insert. A name may carry more than one value.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    items: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl RawParams {
    pub fn new() -> Self {
        Self {
            items: HashMap::with_capacity(8),
            order: Vec::with_capacity(8),
        }
    }

    /// Parse an URI query string into raw parameters.
    pub fn parse(qs: &str) -> ah::Result<Self> {
        let qs = QueryStrong::parse(qs);
        let mut this = Self::new();
        for (name, value) in qs.as_map().into_iter().flatten() {
            match value {
                Value::Empty => this.insert(name, ""),
                Value::String(s) => this.insert(name, s),
                Value::List(list) => {
                    for value in list {
                        if let Value::String(s) = value {
                            this.insert(name, s);
                        }
                    }
                }
                // Nested maps are not plain KVP. Ignore them.
                Value::Map(_) | Value::SparseList(_) => (),
            }
        }
        Ok(this)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        if !self.items.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.items.entry(name).or_default().push(value.to_string());
    }

    /// Get one value. If the parameter was repeated, the last value wins.
    pub fn get_one(&self, name: &str) -> Option<&str> {
        self.items
            .get(&name.to_ascii_lowercase())
            .and_then(|l| l.iter().last())
            .map(|v| &**v)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.items.get(&name.to_ascii_lowercase()).map(|l| &**l)
    }

    /// All parameter names, in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|n| &**n)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_query_string() {
        let raw = RawParams::parse("collectionId=roads&limit=10").unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get_one("collectionid"), Some("roads"));
        assert_eq!(raw.get_one("limit"), Some("10"));
        assert_eq!(raw.get_one("startindex"), None);
    }

    #[test]
    fn parse_empty_query_string() {
        let raw = RawParams::parse("").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut raw = RawParams::new();
        raw.insert("Limit", "10");
        assert_eq!(raw.get_one("limit"), Some("10"));
        assert_eq!(raw.get_one("LIMIT"), Some("10"));
    }

    #[test]
    fn last_value_wins() {
        let mut raw = RawParams::new();
        raw.insert("f", "json");
        raw.insert("F", "html");
        assert_eq!(raw.get_one("f"), Some("html"));
        assert_eq!(raw.get_list("f").unwrap().len(), 2);
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn names_keep_first_seen_order() {
        let mut raw = RawParams::new();
        raw.insert("b", "1");
        raw.insert("a", "2");
        raw.insert("b", "3");
        let names: Vec<&str> = raw.names().collect();
        assert_eq!(names, ["b", "a"]);
    }
}

// vim: ts=4 sw=4 expandtab
