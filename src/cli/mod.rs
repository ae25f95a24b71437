//! CLI module - Command-line interface for dramabox
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// dramabox - drama streaming catalog and back-office API
#[derive(Parser)]
#[command(name = "dramabox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create a staff account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Fill the catalog with generated demo dramas
    Seed {
        /// Number of drama series to generate
        #[arg(long, default_value = "20")]
        series: u32,
    },
}

pub use commands::*;
