// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination. Each
//! failure taxonomy member has a fixed code so scripts can branch on
//! what went wrong.

use std::fmt;

/// Exit codes, one per failure taxonomy member.
pub mod codes {
    /// Server reported a non-OK outcome status
    pub const SERVER_REJECTED: i32 = 4;
    /// Server answered with the wrong response kind
    pub const KIND_MISMATCH: i32 = 5;
    /// Framing, codec, or stream I/O failure mid-exchange
    pub const TRANSPORT: i32 = 6;
    /// Connection or TLS setup failure
    pub const CONNECT: i32 = 10;
    /// Exchange exceeded its time budget
    pub const TIMEOUT: i32 = 11;
    /// Required argument missing
    pub const MISSING_ARGUMENT: i32 = 12;
    /// Argument not in key=value form
    pub const ARGUMENT_FORMAT: i32 = 13;
    /// Rule tree nests past the supported depth
    pub const TREE_TOO_DEEP: i32 = 14;
}

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
