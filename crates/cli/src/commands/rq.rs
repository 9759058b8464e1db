// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RQ command handlers: register and delete rule-sets.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

use rqe_wire::{EntryValue, Operator, Rq, RqItem, TypeOptions};

use crate::client::RqeClient;
use crate::color;
use crate::exit_error::{codes, ExitError};
use crate::output::{print_json, OutputFormat};

#[derive(Subcommand)]
pub enum RqCommand {
    /// Add an RQ built from rule items
    #[command(visible_alias = "a")]
    Add {
        /// Rule items as key[:OPERATOR]=value (operator defaults to EQ;
        /// values are typed by inference, like entry fields)
        items: Vec<String>,

        /// Read a full rule tree as JSON instead of item arguments
        #[arg(long, value_name = "PATH", conflicts_with = "items")]
        file: Option<PathBuf>,

        /// Threshold applied to items using the COUNT operator
        #[arg(long, default_value_t = 0)]
        count: i32,
    },

    /// Delete an RQ by uuid. Does not verify the RQ exists; deleting an
    /// unknown uuid still succeeds.
    #[command(visible_alias = "d")]
    Delete {
        /// uuid of the RQ to delete
        uuid: Option<String>,
    },
}

pub async fn handle(command: RqCommand, client: &RqeClient, format: OutputFormat) -> Result<()> {
    match command {
        RqCommand::Add { items, file, count } => {
            let rq = match file {
                Some(path) => load_rule_file(&path)?,
                None => {
                    if items.is_empty() {
                        return Err(
                            ExitError::new(codes::MISSING_ARGUMENT, "Missing rule items").into()
                        );
                    }
                    let items = items
                        .iter()
                        .map(|arg| parse_rule_arg(arg, count))
                        .collect::<Result<Vec<_>, _>>()?;
                    Rq::new(items)
                }
            };

            let uuid = client.add_rq(rq).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "uuid": uuid }))?,
                OutputFormat::Text => println!("{}", color::success(&format!("uuid {uuid}"))),
            }
        }
        RqCommand::Delete { uuid } => {
            let Some(uuid) = uuid else {
                return Err(ExitError::new(codes::MISSING_ARGUMENT, "Missing uuid argument").into());
            };
            println!("uuid to remove: {uuid}");
            client.delete_rq(&uuid).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "status": "ok" }))?,
                OutputFormat::Text => println!("{}", color::success("Status OK")),
            }
        }
    }
    Ok(())
}

/// Parse one `key[:OPERATOR]=value` rule argument.
///
/// The value is typed by the same inference used for entry fields.
/// `count` is attached only when the operator is COUNT.
fn parse_rule_arg(arg: &str, count: i32) -> Result<RqItem, ExitError> {
    let bad = || {
        ExitError::new(
            codes::ARGUMENT_FORMAT,
            format!("Rule part {arg} not in correct format"),
        )
    };

    let (spec, value) = arg.split_once('=').ok_or_else(bad)?;
    if spec.is_empty() || value.contains('=') {
        return Err(bad());
    }

    let (key, operator) = match spec.split_once(':') {
        Some((key, op)) if !key.is_empty() => {
            let operator = op.parse::<Operator>().map_err(|err| {
                ExitError::new(codes::ARGUMENT_FORMAT, err.to_string())
            })?;
            (key, operator)
        }
        Some(_) => return Err(bad()),
        None => (spec, Operator::Eq),
    };

    let options = if operator == Operator::Count {
        TypeOptions::with_count(operator, count)
    } else {
        TypeOptions::new(operator)
    };
    Ok(RqItem::new(key, EntryValue::infer(value).into(), options))
}

/// Load a full rule tree from a JSON file and bound its depth before it
/// goes anywhere near the wire.
fn load_rule_file(path: &Path) -> Result<Rq, ExitError> {
    let data = std::fs::read(path).map_err(|err| {
        ExitError::new(
            codes::ARGUMENT_FORMAT,
            format!("failed to read rule file {}: {err}", path.display()),
        )
    })?;
    let rq: Rq = serde_json::from_slice(&data).map_err(|err| {
        ExitError::new(
            codes::ARGUMENT_FORMAT,
            format!("invalid rule file {}: {err}", path.display()),
        )
    })?;
    rq.validate_depth()
        .map_err(|err| ExitError::new(codes::TREE_TOO_DEEP, err.to_string()))?;
    Ok(rq)
}

#[cfg(test)]
#[path = "rq_tests.rs"]
mod tests;
