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

use crate::{
    error::Error,
    params::RawParams,
    schema::{FieldKind, FieldSpec, RequestSchema},
};
use std::collections::HashMap;

/// One decoded parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// A decoded, validated request.
///
/// Immutable after decoding. The dispatcher hands it to the operation
/// handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    operation: String,
    fields: HashMap<String, FieldValue>,
}

impl Request {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(&name.to_ascii_lowercase())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_i64())
    }

    /// All decoded fields, sorted by parameter name.
    pub fn fields(&self) -> Vec<(&str, &FieldValue)> {
        let mut fields: Vec<_> = self.fields.iter().map(|(n, v)| (&**n, v)).collect();
        fields.sort_unstable_by_key(|(n, _)| *n);
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn coerce(spec: &FieldSpec, value: &str) -> Result<FieldValue, Error> {
    let format_error = |expected| Error::ParameterFormat {
        name: spec.name().to_string(),
        value: value.to_string(),
        expected,
    };

    match spec.kind() {
        FieldKind::Str => {
            let allowed = spec.allowed_values();
            if !allowed.is_empty() && !allowed.iter().any(|a| a == value) {
                return Err(format_error("one of the allowed values"));
            }
            Ok(FieldValue::Str(value.to_string()))
        }
        FieldKind::I64 => match value.trim().parse() {
            Ok(v) => Ok(FieldValue::I64(v)),
            Err(_) => Err(format_error("an integer")),
        },
        FieldKind::F64 => match value.trim().parse() {
            Ok(v) => Ok(FieldValue::F64(v)),
            Err(_) => Err(format_error("a number")),
        },
        FieldKind::Bool => match &value.trim().to_ascii_lowercase()[..] {
            "true" | "1" => Ok(FieldValue::Bool(true)),
            "false" | "0" => Ok(FieldValue::Bool(false)),
            _ => Err(format_error("a boolean")),
        },
    }
}

/// Decode raw transport parameters into a typed request.
///
/// This is a pure function of its inputs. It does not log and it does
/// not suspend. Decoding the same inputs twice yields equal requests.
pub fn decode(raw: &RawParams, schema: &RequestSchema) -> Result<Request, Error> {
    if schema.is_strict() {
        for name in raw.names() {
            if schema.find_field(name).is_none() {
                return Err(Error::UnknownParameter(name.to_string()));
            }
        }
    }

    let mut fields = HashMap::with_capacity(schema.fields().len());
    for spec in schema.fields() {
        match raw.get_one(spec.name()) {
            Some(value) => {
                fields.insert(spec.name().to_string(), coerce(spec, value)?);
            }
            None if spec.is_required() => {
                return Err(Error::MissingParameter(spec.name().to_string()));
            }
            None => (),
        }
    }

    Ok(Request {
        operation: schema.operation().to_string(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items_schema() -> RequestSchema {
        RequestSchema::bind("items")
            .unwrap()
            .field(FieldSpec::new("collectionid", FieldKind::Str).required())
            .unwrap()
            .field(FieldSpec::new("limit", FieldKind::I64))
            .unwrap()
            .field(FieldSpec::new("resulttype", FieldKind::Str).allowed(&["results", "hits"]))
            .unwrap()
    }

    #[test]
    fn decode_valid_request() {
        let raw = RawParams::parse("collectionId=roads&limit=10").unwrap();
        let req = decode(&raw, &items_schema()).unwrap();
        assert_eq!(req.operation(), "items");
        assert_eq!(req.get_str("collectionid"), Some("roads"));
        assert_eq!(req.get_i64("limit"), Some(10));
        assert_eq!(req.get("resulttype"), None);
    }

    #[test]
    fn decode_empty_schema_is_canonical_empty() {
        let schema = RequestSchema::bind("conformance").unwrap();
        let raw = RawParams::new();
        let req = decode(&raw, &schema).unwrap();
        assert_eq!(req.operation(), "conformance");
        assert!(req.is_empty());
    }

    #[test]
    fn decode_is_idempotent() {
        let raw = RawParams::parse("collectionid=roads&limit=3").unwrap();
        let schema = items_schema();
        let a = decode(&raw, &schema).unwrap();
        let b = decode(&raw, &schema).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_required_parameter() {
        let raw = RawParams::parse("limit=10").unwrap();
        let e = decode(&raw, &items_schema()).unwrap_err();
        assert_eq!(e, Error::MissingParameter("collectionid".to_string()));
        assert!(e.is_request_error());
    }

    #[test]
    fn invalid_integer_value() {
        let raw = RawParams::parse("collectionid=roads&limit=ten").unwrap();
        let e = decode(&raw, &items_schema()).unwrap_err();
        assert_eq!(
            e,
            Error::ParameterFormat {
                name: "limit".to_string(),
                value: "ten".to_string(),
                expected: "an integer",
            }
        );
    }

    #[test]
    fn value_outside_allowed_set() {
        let raw = RawParams::parse("collectionid=roads&resultType=everything").unwrap();
        let e = decode(&raw, &items_schema()).unwrap_err();
        assert!(matches!(e, Error::ParameterFormat { .. }));
    }

    #[test]
    fn unknown_parameter_is_ignored_by_default() {
        let raw = RawParams::parse("collectionid=roads&shiny=yes").unwrap();
        let req = decode(&raw, &items_schema()).unwrap();
        assert_eq!(req.get("shiny"), None);
    }

    #[test]
    fn unknown_parameter_fails_in_strict_mode() {
        let raw = RawParams::parse("collectionid=roads&shiny=yes").unwrap();
        let e = decode(&raw, &items_schema().strict()).unwrap_err();
        assert_eq!(e, Error::UnknownParameter("shiny".to_string()));
    }

    #[test]
    fn bool_and_float_coercion() {
        let schema = RequestSchema::bind("probe")
            .unwrap()
            .field(FieldSpec::new("exact", FieldKind::Bool))
            .unwrap()
            .field(FieldSpec::new("scale", FieldKind::F64))
            .unwrap();
        let raw = RawParams::parse("exact=1&scale=0.5").unwrap();
        let req = decode(&raw, &schema).unwrap();
        assert_eq!(req.get("exact").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(req.get("scale").and_then(|v| v.as_f64()), Some(0.5));
    }

    #[test]
    fn repeated_parameter_last_value_wins() {
        let mut raw = RawParams::new();
        raw.insert("collectionid", "roads");
        raw.insert("limit", "1");
        raw.insert("limit", "2");
        let req = decode(&raw, &items_schema()).unwrap();
        assert_eq!(req.get_i64("limit"), Some(2));
    }
}

// vim: ts=4 sw=4 expandtab
