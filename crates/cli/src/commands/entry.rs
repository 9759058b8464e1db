// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry command handlers: match an entry against registered rule-sets.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Subcommand;

use rqe_wire::EntryValue;

use crate::client::RqeClient;
use crate::exit_error::{codes, ExitError};
use crate::output::{print_json, print_success_block, render_matches, OutputFormat};

#[derive(Subcommand)]
pub enum EntryCommand {
    /// Send a request to RQE to match your entry with RQs
    #[command(visible_alias = "m")]
    Match {
        /// Entry fields as key=value (values are typed by inference:
        /// boolean, then integer, then string)
        fields: Vec<String>,

        /// Timeout for entry matching on the server, in milliseconds
        #[arg(long = "entry-timeout", visible_alias = "et", default_value_t = 10_000)]
        entry_timeout: i32,
    },
}

pub async fn handle(command: EntryCommand, client: &RqeClient, format: OutputFormat) -> Result<()> {
    match command {
        EntryCommand::Match { fields, entry_timeout } => {
            if fields.is_empty() {
                return Err(ExitError::new(codes::MISSING_ARGUMENT, "Missing entry argument").into());
            }
            let entry = parse_entry_args(&fields)?;

            let rqs = client.match_entry(entry, entry_timeout).await?;
            match format {
                OutputFormat::Json => print_json(&rqs)?,
                OutputFormat::Text => {
                    let rendered = render_matches(&rqs).map_err(|err| {
                        ExitError::new(codes::TREE_TOO_DEEP, err.to_string())
                    })?;
                    print_success_block(&rendered);
                }
            }
        }
    }
    Ok(())
}

/// Parse `key=value` arguments into an entry map, typing each value by
/// inference. Duplicate keys keep the last value.
fn parse_entry_args(args: &[String]) -> Result<BTreeMap<String, EntryValue>, ExitError> {
    let mut entry = BTreeMap::new();
    for kv in args {
        let parts: Vec<&str> = kv.split('=').collect();
        let [key, value] = parts.as_slice() else {
            return Err(ExitError::new(
                codes::ARGUMENT_FORMAT,
                format!("Entry part {kv} not in correct format"),
            ));
        };
        if key.is_empty() {
            return Err(ExitError::new(
                codes::ARGUMENT_FORMAT,
                format!("Entry part {kv} not in correct format"),
            ));
        }
        entry.insert((*key).to_string(), EntryValue::infer(value));
    }
    Ok(entry)
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
