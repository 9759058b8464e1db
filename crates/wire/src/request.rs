// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request envelope sent from the client to an RQE node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{EntryValue, Rq};

/// Request from client to RQE
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// List cluster node status
    Status,

    /// Register a rule-set (uuid absent; the server assigns one)
    AddRq { rq: Rq },

    /// Delete a rule-set by uuid. The server does not verify existence;
    /// deleting an unknown uuid still succeeds.
    DeleteRq { uuid: String },

    /// Test an entry against all registered rule-sets, with a
    /// server-side matching budget in milliseconds
    MatchEntry {
        entry: BTreeMap<String, EntryValue>,
        timeout_ms: i32,
    },
}

impl Request {
    /// Wire tag of this request, for logging and mismatch reporting.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::AddRq { .. } => "AddRq",
            Self::DeleteRq { .. } => "DeleteRq",
            Self::MatchEntry { .. } => "MatchEntry",
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
