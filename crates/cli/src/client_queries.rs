// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed query and command methods for RqeClient.
//!
//! Each method sends one request kind and accepts exactly the matching
//! response kind; anything else is a `KindMismatch`. A response whose
//! outcome status is not OK is surfaced as `ServerRejected`.

use std::collections::BTreeMap;

use rqe_wire::{EntryValue, NodeInfo, Request, Response, Rq};

use super::{ClientError, RqeClient};

impl RqeClient {
    /// List cluster node status.
    pub async fn cluster_status(&self) -> Result<Vec<NodeInfo>, ClientError> {
        match self.exchange(&Request::Status).await? {
            Response::Status { status, nodes } => {
                Self::accepted(status)?;
                Ok(nodes)
            }
            other => Self::reject("Status", &other),
        }
    }

    /// Register a rule-set; returns the server-assigned uuid.
    pub async fn add_rq(&self, rq: Rq) -> Result<String, ClientError> {
        match self.exchange(&Request::AddRq { rq }).await? {
            Response::RqAdded { status, uuid } => {
                Self::accepted(status)?;
                Ok(uuid)
            }
            other => Self::reject("AddRq", &other),
        }
    }

    /// Delete a rule-set by uuid. Succeeds even if the uuid is unknown
    /// to the server.
    pub async fn delete_rq(&self, uuid: &str) -> Result<(), ClientError> {
        match self.exchange(&Request::DeleteRq { uuid: uuid.to_string() }).await? {
            Response::RqDeleted { status } => Self::accepted(status),
            other => Self::reject("DeleteRq", &other),
        }
    }

    /// Test an entry against all registered rule-sets; returns the
    /// matched rule trees in server order.
    pub async fn match_entry(
        &self,
        entry: BTreeMap<String, EntryValue>,
        timeout_ms: i32,
    ) -> Result<Vec<Rq>, ClientError> {
        match self.exchange(&Request::MatchEntry { entry, timeout_ms }).await? {
            Response::Matches { status, rqs } => {
                Self::accepted(status)?;
                Ok(rqs)
            }
            other => Self::reject("MatchEntry", &other),
        }
    }
}
