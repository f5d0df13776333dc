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

//! The built-in operation bindings of the features service.

use crate::{
    error::Error,
    registry::ReaderRegistry,
    schema::{FieldKind, FieldSpec, RequestSchema},
};

pub const OP_LANDING_PAGE: &str = "landingpage";
pub const OP_CONFORMANCE: &str = "conformance";
pub const OP_COLLECTIONS: &str = "collections";
pub const OP_COLLECTION: &str = "collection";
pub const OP_ITEMS: &str = "items";

const FORMATS: &[&str] = &["json", "html"];

fn bind(operation: &str, strict: bool) -> Result<RequestSchema, Error> {
    let schema = RequestSchema::bind(operation)?;
    Ok(if strict { schema.strict() } else { schema })
}

fn format_field() -> FieldSpec {
    FieldSpec::new("f", FieldKind::Str).allowed(FORMATS)
}

/// Build the registry with all operations of the service.
///
/// Called once during startup, before request processing begins.
/// `strict` makes every schema reject undeclared parameters.
pub fn builtin_registry(strict: bool) -> Result<ReaderRegistry, Error> {
    let mut registry = ReaderRegistry::new();

    // The landing page and conformance requests carry no parameters.
    registry.register(bind(OP_LANDING_PAGE, strict)?)?;
    registry.register(bind(OP_CONFORMANCE, strict)?)?;

    registry.register(bind(OP_COLLECTIONS, strict)?.field(format_field())?)?;

    registry.register(
        bind(OP_COLLECTION, strict)?
            .field(FieldSpec::new("collectionid", FieldKind::Str).required())?
            .field(format_field())?,
    )?;

    registry.register(
        bind(OP_ITEMS, strict)?
            .field(FieldSpec::new("collectionid", FieldKind::Str).required())?
            .field(FieldSpec::new("limit", FieldKind::I64))?
            .field(FieldSpec::new("startindex", FieldKind::I64))?
            .field(FieldSpec::new("time", FieldKind::Str))?
            .field(FieldSpec::new("resulttype", FieldKind::Str).allowed(&["results", "hits"]))?
            .field(format_field())?,
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode::decode, params::RawParams};

    #[test]
    fn all_operations_are_registered() {
        let registry = builtin_registry(false).unwrap();
        assert_eq!(
            registry.operations(),
            [
                OP_COLLECTION,
                OP_COLLECTIONS,
                OP_CONFORMANCE,
                OP_ITEMS,
                OP_LANDING_PAGE,
            ]
        );
    }

    #[test]
    fn conformance_decodes_empty_parameters() {
        let registry = builtin_registry(false).unwrap();
        let schema = registry.resolve(OP_CONFORMANCE).unwrap();
        let req = decode(&RawParams::new(), schema).unwrap();
        assert_eq!(req.operation(), OP_CONFORMANCE);
        assert!(req.is_empty());
    }

    #[test]
    fn items_requires_collectionid() {
        let registry = builtin_registry(false).unwrap();
        let schema = registry.resolve(OP_ITEMS).unwrap();
        let raw = RawParams::parse("limit=5").unwrap();
        let e = decode(&raw, schema).unwrap_err();
        assert_eq!(e, Error::MissingParameter("collectionid".to_string()));
    }

    #[test]
    fn strict_registry_rejects_unknown_parameters() {
        let registry = builtin_registry(true).unwrap();
        let schema = registry.resolve(OP_CONFORMANCE).unwrap();
        let raw = RawParams::parse("f=json").unwrap();
        let e = decode(&raw, schema).unwrap_err();
        assert_eq!(e, Error::UnknownParameter("f".to_string()));
    }

    #[test]
    fn collection_format_is_constrained() {
        let registry = builtin_registry(false).unwrap();
        let schema = registry.resolve(OP_COLLECTION).unwrap();
        let raw = RawParams::parse("collectionId=roads&f=xml").unwrap();
        let e = decode(&raw, schema).unwrap_err();
        assert!(matches!(e, Error::ParameterFormat { .. }));
    }
}

// vim: ts=4 sw=4 expandtab
