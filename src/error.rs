// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `deebot_core` library.
//!
//! Errors fall into three groups:
//!
//! - [`ConfigError`]: defects in the built-in command table or model
//!   declarations. These are permanent and are never retried.
//! - Data errors ([`Error::UnknownCommand`], [`Error::InvalidArgs`],
//!   [`Error::MissingField`], [`Error::Parse`]): the caller handed us
//!   something we cannot use.
//! - [`TransportError`]: failures reported by the external transport while
//!   executing a resolved command. This crate never retries them.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The command table or a model declaration is malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No command with this name is registered.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Arguments supplied to a command constructor do not fit the command.
    #[error("invalid arguments for {command}: {message}")]
    InvalidArgs {
        /// The command being constructed.
        command: &'static str,
        /// What was wrong with the arguments.
        message: String,
    },

    /// A required attribute is absent from the device-listing record.
    #[error("missing required device field: {0}")]
    MissingField(&'static str),

    /// The transport failed to execute a command.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A JSON payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Build-time defects in the command registry or the model catalog.
///
/// Cloneable so a failed model load can be cached and reported identically
/// to every caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two command descriptors share the same name.
    #[error("command {0} is registered more than once")]
    DuplicateCommand(&'static str),

    /// Two model declarations share the same device class.
    #[error("model {0} is declared more than once")]
    DuplicateModel(String),

    /// A capability declaration lists the same event twice.
    #[error("event {event} is declared more than once for model {model}")]
    DuplicateEvent {
        /// The model being declared, or `"<anonymous>"` for ad-hoc builders.
        model: String,
        /// The duplicated event name.
        event: &'static str,
    },

    /// The catalog has no fallback declaration.
    #[error("model catalog has no fallback entry")]
    MissingFallback,
}

/// Errors reported by the external transport layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The device did not answer in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The session to the device or broker could not be used.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device answered with an error.
    #[error("command rejected: {0}")]
    Rejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
