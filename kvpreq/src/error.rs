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

/// Request decoding error.
///
/// `Configuration` only happens while the registry is being populated
/// during startup. The other kinds are request-time errors and map to
/// a "bad request" response at the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Configuration(String),
    MissingParameter(String),
    ParameterFormat {
        name: String,
        value: String,
        expected: &'static str,
    },
    UnknownParameter(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "{msg}"),
            Self::MissingParameter(name) => {
                write!(f, "Missing required parameter '{name}'.")
            }
            Self::ParameterFormat {
                name,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Parameter '{name}' has invalid value '{value}': expected {expected}."
                )
            }
            Self::UnknownParameter(name) => write!(f, "Unknown parameter '{name}'."),
        }
    }
}

impl Error {
    /// Whether this error was caused by the request contents.
    ///
    /// The dispatcher reports these to the client instead of failing
    /// the process.
    pub fn is_request_error(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

// vim: ts=4 sw=4 expandtab
