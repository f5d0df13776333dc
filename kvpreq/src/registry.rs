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

use crate::{error::Error, schema::RequestSchema};
use std::collections::HashMap;

/// Maps operation identifiers to their request schemas.
///
/// The registry is populated once during single threaded startup and is
/// only read afterwards. Concurrent readers need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct ReaderRegistry {
    readers: HashMap<String, RequestSchema>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register one operation binding.
    ///
    /// The registry is unchanged if registration fails.
    pub fn register(&mut self, schema: RequestSchema) -> Result<(), Error> {
        let operation = schema.operation().to_string();
        if self.readers.contains_key(&operation) {
            return Err(Error::Configuration(format!(
                "Operation '{operation}' is already registered."
            )));
        }
        self.readers.insert(operation, schema);
        Ok(())
    }

    /// Resolve an operation identifier to its schema.
    ///
    /// `None` means the operation is not supported. The dispatcher turns
    /// that into a protocol level response, it is not an error here.
    pub fn resolve(&self, operation: &str) -> Option<&RequestSchema> {
        self.readers.get(&operation.trim().to_ascii_lowercase())
    }

    /// All registered operation identifiers, sorted.
    pub fn operations(&self) -> Vec<&str> {
        let mut ops: Vec<&str> = self.readers.keys().map(|o| &**o).collect();
        ops.sort_unstable();
        ops
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec};

    #[test]
    fn register_and_resolve() {
        let mut registry = ReaderRegistry::new();
        registry
            .register(RequestSchema::bind("conformance").unwrap())
            .unwrap();
        assert!(registry.resolve("conformance").is_some());
        assert!(registry.resolve("CONFORMANCE").is_some());
        assert!(registry.resolve("nosuchoperation").is_none());
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_first_binding() {
        let mut registry = ReaderRegistry::new();
        registry
            .register(RequestSchema::bind("conformance").unwrap())
            .unwrap();

        let second = RequestSchema::bind("conformance")
            .unwrap()
            .field(FieldSpec::new("f", FieldKind::Str))
            .unwrap();
        let e = registry.register(second).unwrap_err();
        assert!(matches!(e, Error::Configuration(_)));

        // The first binding is still in place.
        assert_eq!(registry.len(), 1);
        let schema = registry.resolve("conformance").unwrap();
        assert!(schema.fields().is_empty());
    }

    #[test]
    fn operations_are_sorted() {
        let mut registry = ReaderRegistry::new();
        registry
            .register(RequestSchema::bind("items").unwrap())
            .unwrap();
        registry
            .register(RequestSchema::bind("conformance").unwrap())
            .unwrap();
        assert_eq!(registry.operations(), ["conformance", "items"]);
    }
}

// vim: ts=4 sw=4 expandtab
