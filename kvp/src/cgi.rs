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

use crate::pagegen::{GetBody, PageGen};
use anyhow::{self as ah, format_err as err};
use kvpcfg::Config;
use kvpreq::{DEBUG, RawParams, ReaderRegistry, decode, ops::OP_LANDING_PAGE};
use std::{
    env,
    ffi::OsString,
    io::{self, Stdout, Write as _},
    time::Instant,
};

const MAX_CGIENV_LEN: usize = 1024 * 4;

fn get_cgienv(name: &str) -> ah::Result<OsString> {
    let value = env::var_os(name).unwrap_or_default();
    if value.len() <= MAX_CGIENV_LEN {
        Ok(value)
    } else {
        Err(err!("Environment variable '{name}' is too long."))
    }
}

fn get_cgienv_str(name: &str) -> ah::Result<String> {
    if let Ok(s) = get_cgienv(name)?.into_string() {
        Ok(s)
    } else {
        Err(err!("Environment variable '{name}' is not valid UTF-8."))
    }
}

fn out(f: &mut Stdout, data: &[u8]) {
    f.write_all(data).unwrap();
}

fn outstr(f: &mut Stdout, data: &str) {
    out(f, data.as_bytes());
}

fn response_200_ok(
    body: Option<&[u8]>,
    mime: &str,
    extra_headers: &[String],
    start_stamp: Option<Instant>,
) {
    let mut f = io::stdout();
    outstr(&mut f, &format!("Content-type: {mime}\n"));
    for header in extra_headers {
        outstr(&mut f, &format!("{header}\n"));
    }
    outstr(&mut f, "Status: 200 Ok\n");
    if let Some(start_stamp) = start_stamp {
        let runtime = (Instant::now() - start_stamp).as_micros();
        outstr(&mut f, &format!("X-kvpreader-Cgi-Runtime: {runtime} us\n"));
    }
    outstr(&mut f, "\n");
    if let Some(body) = body {
        out(&mut f, body);
    }
}

fn response_400_bad_request(err: &str) {
    let mut f = io::stdout();
    outstr(&mut f, "Content-type: text/plain\n");
    outstr(&mut f, "Status: 400 Bad Request\n");
    outstr(&mut f, "\n");
    outstr(&mut f, err);
}

fn response_404_not_found(err: &str) {
    let mut f = io::stdout();
    outstr(&mut f, "Content-type: text/plain\n");
    outstr(&mut f, "Status: 404 Not Found\n");
    outstr(&mut f, "\n");
    outstr(&mut f, err);
}

fn response_500_internal_error(err: &str) {
    let mut f = io::stdout();
    outstr(&mut f, "Content-type: text/plain\n");
    outstr(&mut f, "Status: 500 Internal Server Error\n");
    outstr(&mut f, "\n");
    outstr(&mut f, err);
}

/// Map the PATH_INFO to an operation identifier.
///
/// The root path is the landing page. Exactly one path segment selects
/// the operation of that name. Deeper paths are not routed.
fn operation_from_path(path: &str) -> Option<&str> {
    let path = path.trim_matches('/');
    if path.is_empty() {
        Some(OP_LANDING_PAGE)
    } else if path.contains('/') {
        None
    } else {
        Some(path)
    }
}

pub struct Cgi {
    query: String,
    meth: String,
    path: String,
    max_params: usize,
    start_stamp: Option<Instant>,
}

impl Cgi {
    pub async fn new(config: &Config) -> ah::Result<Self> {
        let start_stamp = if DEBUG { Some(Instant::now()) } else { None };

        let query = get_cgienv_str("QUERY_STRING").unwrap_or_default();
        let meth = get_cgienv_str("REQUEST_METHOD")?.trim().to_string();
        let path = get_cgienv_str("PATH_INFO").unwrap_or_default();

        if query.len() > config.limits.max_query_len {
            return Err(err!("QUERY_STRING is too long."));
        }

        Ok(Self {
            query,
            meth,
            path,
            max_params: config.limits.max_params,
            start_stamp,
        })
    }

    pub async fn run(&mut self, registry: &ReaderRegistry, pagegen: &mut PageGen<'_>) {
        let Some(operation) = operation_from_path(&self.path) else {
            response_404_not_found("No resource at this path.");
            return;
        };
        let Some(schema) = registry.resolve(operation) else {
            response_404_not_found(&format!("Unsupported operation: '{operation}'"));
            return;
        };

        let Ok(raw) = RawParams::parse(&self.query) else {
            response_400_bad_request("Invalid QUERY_STRING in URI.");
            return;
        };
        if raw.len() > self.max_params {
            response_400_bad_request("Too many request parameters.");
            return;
        }

        let request = match decode(&raw, schema) {
            Ok(request) => request,
            Err(e) if e.is_request_error() => {
                response_400_bad_request(&format!("{e}"));
                return;
            }
            Err(e) => {
                if DEBUG {
                    response_500_internal_error(&format!("{e:?}"));
                } else {
                    response_500_internal_error("Decoding failed");
                }
                return;
            }
        };

        match &self.meth[..] {
            "HEAD" => match pagegen.get(&request, GetBody::No).await {
                Ok(res) => response_200_ok(None, &res.mime, &[], self.start_stamp),
                Err(e) => {
                    if DEBUG {
                        response_500_internal_error(&format!("{e:?}"));
                    } else {
                        response_500_internal_error("HEAD failed");
                    }
                }
            },
            "GET" => match pagegen.get(&request, GetBody::Yes).await {
                Ok(res) => {
                    response_200_ok(Some(res.body.as_bytes()), &res.mime, &[], self.start_stamp)
                }
                Err(e) => {
                    if DEBUG {
                        response_500_internal_error(&format!("{e:?}"));
                    } else {
                        response_500_internal_error("GET failed");
                    }
                }
            },
            m => {
                response_400_bad_request(&format!("Unsupported REQUEST_METHOD: '{m}'"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_routing() {
        assert_eq!(operation_from_path(""), Some("landingpage"));
        assert_eq!(operation_from_path("/"), Some("landingpage"));
        assert_eq!(operation_from_path("/conformance"), Some("conformance"));
        assert_eq!(operation_from_path("/items/"), Some("items"));
        assert_eq!(operation_from_path("/collections/roads"), None);
    }
}

// vim: ts=4 sw=4 expandtab
