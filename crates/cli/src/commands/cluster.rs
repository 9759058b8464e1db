// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster command handlers

use anyhow::Result;
use clap::Subcommand;

use crate::client::RqeClient;
use crate::color;
use crate::output::{print_json, render_status_table, OutputFormat};

#[derive(Subcommand)]
pub enum ClusterCommand {
    /// Get status for the cluster
    #[command(visible_alias = "s")]
    Status,
}

pub async fn handle(
    command: ClusterCommand,
    client: &RqeClient,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ClusterCommand::Status => {
            let nodes = client.cluster_status().await?;
            match format {
                OutputFormat::Json => print_json(&nodes)?,
                OutputFormat::Text => {
                    let table = render_status_table(&nodes);
                    let mut lines = table.lines();
                    if let Some(heading) = lines.next() {
                        println!("{}", color::header(heading));
                    }
                    for line in lines {
                        println!("{line}");
                    }
                }
            }
        }
    }
    Ok(())
}
