// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for talking to an RQE cluster.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod model;
mod request;
mod response;
mod wire;

pub use model::{
    EntryValue, ModelError, Operator, Rq, RqItem, RqItemValue, TypeOptions, MAX_TREE_DEPTH,
};
pub use request::Request;
pub use response::{NodeInfo, NodeStatus, OutcomeStatus, Response};
pub use wire::{decode, encode, read_message, write_message, ProtocolError, MAX_MESSAGE_SIZE};
pub use wire::{read_request, read_response, write_request, write_response};
