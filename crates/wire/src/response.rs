// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response envelope received from an RQE node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Rq;

/// Outcome of an operation as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    Failed { reason: String },
}

impl OutcomeStatus {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Reported status of one cluster node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    Up,
    Down,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("UP"),
            Self::Down => f.write_str("DOWN"),
        }
    }
}

/// One cluster node's status line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub status: NodeStatus,
    pub rq_count: i32,
}

/// Response from RQE to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Cluster node status
    Status {
        status: OutcomeStatus,
        nodes: Vec<NodeInfo>,
    },

    /// Rule-set registered; `uuid` is the server-assigned identifier
    RqAdded {
        status: OutcomeStatus,
        uuid: String,
    },

    /// Rule-set deleted (also returned for uuids the server never had)
    RqDeleted { status: OutcomeStatus },

    /// Rule-sets the entry matched, in server order
    Matches {
        status: OutcomeStatus,
        rqs: Vec<Rq>,
    },
}

impl Response {
    /// Wire tag of this response, for logging and mismatch reporting.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "Status",
            Self::RqAdded { .. } => "RqAdded",
            Self::RqDeleted { .. } => "RqDeleted",
            Self::Matches { .. } => "Matches",
        }
    }

    /// The embedded outcome status, regardless of variant.
    pub const fn status(&self) -> &OutcomeStatus {
        match self {
            Self::Status { status, .. }
            | Self::RqAdded { status, .. }
            | Self::RqDeleted { status }
            | Self::Matches { status, .. } => status,
        }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
