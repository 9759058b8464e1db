// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for command output.

use clap::ValueEnum;
use serde::Serialize;

use rqe_wire::{ModelError, NodeInfo, Operator, Rq, RqItemValue};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print any serializable payload as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render the cluster status table: one row per node, footer with the
/// total RQ count across the cluster.
pub fn render_status_table(nodes: &[NodeInfo]) -> String {
    let name_w = nodes.iter().map(|n| n.name.len()).fold("Node Name".len(), usize::max);
    let status_w =
        nodes.iter().map(|n| n.status.to_string().len()).fold("Status".len(), usize::max);
    let index_w = nodes.len().saturating_sub(1).to_string().len().max(1);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>index_w$}  {:<name_w$}  {:<status_w$}  {}\n",
        "#", "Node Name", "Status", "RQ Count"
    ));

    let mut total: i64 = 0;
    for (index, node) in nodes.iter().enumerate() {
        total += i64::from(node.rq_count);
        out.push_str(&format!(
            "{index:>index_w$}  {:<name_w$}  {:<status_w$}  {}\n",
            node.name,
            node.status.to_string(),
            node.rq_count
        ));
    }

    out.push_str(&format!(
        "{:>index_w$}  {:<name_w$}  {:<status_w$}  {total}\n",
        "", "", "Total"
    ));
    out
}

/// Render matched rule-sets as an indented list: uuid, then each item's
/// key, value, operator, and (for COUNT) its threshold.
///
/// Drives the depth-bounded tree walk, so a tree nesting past the
/// supported depth fails rather than overflowing the stack.
pub fn render_matches(rqs: &[Rq]) -> Result<String, ModelError> {
    let mut out = String::new();
    for rq in rqs {
        match &rq.uuid {
            Some(uuid) => out.push_str(&format!("- {uuid}\n")),
            None => out.push_str("- (unassigned)\n"),
        }
        rq.walk(&mut |depth, item| {
            let pad = "  ".repeat(depth + 1);
            out.push_str(&format!("{pad}- {}\n", item.key));
            let value_pad = "  ".repeat(depth + 2);
            match &item.value {
                RqItemValue::Boolean(b) => out.push_str(&format!("{value_pad}- {b}\n")),
                RqItemValue::Integer(i) => out.push_str(&format!("{value_pad}- {i}\n")),
                RqItemValue::String(s) => out.push_str(&format!("{value_pad}- {s}\n")),
                // Nested sub-items are emitted by the walk itself
                RqItemValue::Nested(_) => {}
            }
            out.push_str(&format!("{value_pad}- {}\n", item.options.operator));
            if item.options.operator == Operator::Count {
                out.push_str(&format!("{value_pad}- {}\n", item.options.count));
            }
        })?;
    }
    Ok(out)
}

/// Print a block of output line by line, colorized green when enabled.
pub fn print_success_block(text: &str) {
    for line in text.lines() {
        println!("{}", crate::color::success(line));
    }
}
