// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// View and cancel scheduled messages.
#[derive(Debug, Parser)]
#[command(name = "agendo", version, about)]
pub struct Cli {
    /// Path to the config file (defaults to agendo/config.toml in the
    /// platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List today's relevant appointments
    List {
        /// Show only rows whose phone number contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Cancel appointments by id
    Cancel {
        /// Appointment ids to cancel
        #[arg(required_unless_present = "all")]
        ids: Vec<i64>,

        /// Cancel every pending appointment currently listed
        #[arg(long, conflicts_with = "ids")]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Keep the list on screen, live-updating on backend changes
    Watch,
}
