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
use kvpreq::{
    ReaderRegistry, Request,
    ops::{OP_CONFORMANCE, OP_LANDING_PAGE},
};
use std::{fmt::Write as _, writeln as ln};

const MIME: &str = "text/html";
const BODY_PREALLOC: usize = 1024 * 16;

/// Conformance classes implemented by this service.
const CONFORMANCE_CLASSES: &[&str] = &[
    "http://www.opengis.net/spec/wfs-1/3.0/req/core",
    "http://www.opengis.net/spec/wfs-1/3.0/req/oas30",
    "http://www.opengis.net/spec/wfs-1/3.0/req/html",
];

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        s.len()
    } else {
        while i > 0 {
            if s.is_char_boundary(i) {
                break;
            }
            i -= 1;
        }
        i
    }
}

fn escape(s: &str, maxlen: usize) -> String {
    let boundary = floor_char_boundary(s, maxlen);
    let mut snipped = s[0..boundary].to_string();
    if snipped.len() != s.len() {
        snipped.push_str("...");
    }
    html_escape::encode_safe(&snipped).into_owned()
}

#[rustfmt::skip]
fn gen_landing_page(
    b: &mut String,
    registry: &ReaderRegistry,
) -> ah::Result<()> {
    ln!(b, r#"<div id="operation_list">"#)?;
    ln!(b, r#"  <h1>Features service</h1>"#)?;
    ln!(b, r#"  <ul>"#)?;
    for operation in registry.operations() {
        let operation = escape(operation, 64);
        ln!(b, r#"    <li>"#)?;
        ln!(b, r#"      <a href="/cgi-bin/kvp/{operation}">{operation}</a>"#)?;
        ln!(b, r#"    </li>"#)?;
    }
    ln!(b, r#"  </ul>"#)?;
    ln!(b, r#"</div>"#)?;
    Ok(())
}

#[rustfmt::skip]
fn gen_conformance(b: &mut String) -> ah::Result<()> {
    ln!(b, r#"<div id="conformance_list">"#)?;
    ln!(b, r#"  <h1>Conformance</h1>"#)?;
    ln!(b, r#"  <ul>"#)?;
    for class in CONFORMANCE_CLASSES {
        ln!(b, r#"    <li>{class}</li>"#)?;
    }
    ln!(b, r#"  </ul>"#)?;
    ln!(b, r#"</div>"#)?;
    Ok(())
}

#[rustfmt::skip]
fn gen_request_fields(
    b: &mut String,
    request: &Request,
) -> ah::Result<()> {
    let operation = escape(request.operation(), 64);

    ln!(b, r#"<div id="request">"#)?;
    ln!(b, r#"  <h1>{operation}</h1>"#)?;
    if request.is_empty() {
        ln!(b, r#"  <p>No request parameters.</p>"#)?;
    } else {
        ln!(b, r#"  <table id="request_fields">"#)?;
        ln!(b, r#"    <tr>"#)?;
        ln!(b, r#"      <th>parameter</th>"#)?;
        ln!(b, r#"      <th>value</th>"#)?;
        ln!(b, r#"    </tr>"#)?;
        for (name, value) in request.fields() {
            let name = escape(name, 64);
            let value = escape(&value.to_string(), 1024);
            ln!(b, r#"    <tr>"#)?;
            ln!(b, r#"      <td>{name}</td>"#)?;
            ln!(b, r#"      <td>{value}</td>"#)?;
            ln!(b, r#"    </tr>"#)?;
        }
        ln!(b, r#"  </table>"#)?;
    }
    ln!(b, r#"</div>"#)?;
    Ok(())
}

#[rustfmt::skip]
fn gen_page(
    b: &mut String,
    registry: &ReaderRegistry,
    request: &Request,
) -> ah::Result<()> {
    ln!(b, r#"<!DOCTYPE HTML>"#)?;
    ln!(b, r#"<html lang="en">"#)?;
    ln!(b, r#"<head>"#)?;
    ln!(b, r#"  <title>Features service</title>"#)?;
    ln!(b, r#"  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8">"#)?;
    ln!(b, r#"  <meta name="generator" content="kvpreader (Rust variant)">"#)?;
    ln!(b, r#"</head>"#)?;
    ln!(b, r#"<body>"#)?;

    match request.operation() {
        OP_LANDING_PAGE => gen_landing_page(b, registry)?,
        OP_CONFORMANCE => gen_conformance(b)?,
        _ => gen_request_fields(b, request)?,
    }

    ln!(b, r#"</body>"#)?;
    ln!(b, r#"</html>"#)?;
    Ok(())
}

#[derive(PartialEq, Eq, Copy, Clone)]
pub enum GetBody {
    No,
    Yes,
}

#[derive(PartialEq, Eq, Clone)]
pub struct PageGenResult {
    pub body: String,
    pub mime: String,
}

pub struct PageGen<'a> {
    registry: &'a ReaderRegistry,
}

impl<'a> PageGen<'a> {
    pub async fn new(registry: &'a ReaderRegistry) -> ah::Result<Self> {
        Ok(Self { registry })
    }

    pub async fn get(&mut self, request: &Request, get_body: GetBody) -> ah::Result<PageGenResult> {
        let body = match get_body {
            GetBody::Yes => {
                let mut body = String::with_capacity(BODY_PREALLOC);
                gen_page(&mut body, self.registry, request)?;
                body
            }
            GetBody::No => "".to_string(),
        };

        Ok(PageGenResult {
            body,
            mime: MIME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvpreq::{RawParams, decode, ops::builtin_registry};

    #[test]
    fn escape_snips_and_encodes() {
        assert_eq!(escape("<b>", 64), "&lt;b&gt;");
        assert_eq!(escape("abcdef", 3), "abc...");
    }

    #[tokio::test]
    async fn landing_page_lists_operations() {
        let registry = builtin_registry(false).unwrap();
        let schema = registry.resolve("landingpage").unwrap();
        let request = decode(&RawParams::new(), schema).unwrap();

        let mut pagegen = PageGen::new(&registry).await.unwrap();
        let res = pagegen.get(&request, GetBody::Yes).await.unwrap();
        assert_eq!(res.mime, "text/html");
        assert!(res.body.contains("conformance"));
        assert!(res.body.contains("items"));
    }

    #[tokio::test]
    async fn head_request_has_no_body() {
        let registry = builtin_registry(false).unwrap();
        let schema = registry.resolve("conformance").unwrap();
        let request = decode(&RawParams::new(), schema).unwrap();

        let mut pagegen = PageGen::new(&registry).await.unwrap();
        let res = pagegen.get(&request, GetBody::No).await.unwrap();
        assert!(res.body.is_empty());
    }
}

// vim: ts=4 sw=4 expandtab
