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

use crate::error::Error;

/// Value type of one declared request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    I64,
    F64,
    Bool,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::I64 => "integer",
            Self::F64 => "float",
            Self::Bool => "boolean",
        }
    }
}

/// Declaration of one request parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    allowed: Vec<String>,
}

impl FieldSpec {
    /// Declare an optional parameter.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.trim().to_ascii_lowercase(),
            kind,
            required: false,
            allowed: vec![],
        }
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict a string parameter to a fixed set of values.
    pub fn allowed(mut self, values: &[&str]) -> Self {
        self.allowed = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed
    }
}

/// Binding of one operation identifier to its declared parameter shape.
///
/// This is plain data. All operations of the service share one generic
/// decode function instead of one reader type per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSchema {
    operation: String,
    fields: Vec<FieldSpec>,
    strict: bool,
}

impl RequestSchema {
    /// Bind an operation identifier to an empty parameter shape.
    pub fn bind(operation: &str) -> Result<Self, Error> {
        let operation = operation.trim().to_ascii_lowercase();
        if operation.is_empty() {
            return Err(Error::Configuration(
                "Operation identifier is empty.".to_string(),
            ));
        }
        Ok(Self {
            operation,
            fields: vec![],
            strict: false,
        })
    }

    /// Fail decoding on parameters that are not declared in this schema.
    ///
    /// The default is to ignore unknown parameters for forward compatibility.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Declare one parameter.
    pub fn field(mut self, field: FieldSpec) -> Result<Self, Error> {
        if self.find_field(field.name()).is_some() {
            return Err(Error::Configuration(format!(
                "Operation '{}': parameter '{}' is declared twice.",
                self.operation,
                field.name(),
            )));
        }
        self.fields.push(field);
        Ok(self)
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn find_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_folds_case() {
        let schema = RequestSchema::bind(" Conformance ").unwrap();
        assert_eq!(schema.operation(), "conformance");
        assert!(schema.fields().is_empty());
        assert!(!schema.is_strict());
    }

    #[test]
    fn bind_empty_operation_fails() {
        let e = RequestSchema::bind("  ").unwrap_err();
        assert!(matches!(e, Error::Configuration(_)));
    }

    #[test]
    fn duplicate_field_fails() {
        let e = RequestSchema::bind("items")
            .unwrap()
            .field(FieldSpec::new("limit", FieldKind::I64))
            .unwrap()
            .field(FieldSpec::new("LIMIT", FieldKind::Str))
            .unwrap_err();
        assert!(matches!(e, Error::Configuration(_)));
    }
}

// vim: ts=4 sw=4 expandtab
