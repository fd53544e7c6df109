//! CLI module for the gameserver admin API
//!
//! Provides subcommands for running and bootstrapping the service:
//! - `serve`: run the admin API server (default)
//! - `generate-token`: print a fresh admin token

pub mod serve;

use clap::{Parser, Subcommand};

use crate::infrastructure::auth::generate_admin_token;

/// Administrative API for an attack/defense CTF gameserver
#[derive(Parser)]
#[command(name = "ctf-gameserver-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested subcommand, defaulting to `serve`
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the admin API server
    Serve,

    /// Generate a random admin token and print it
    GenerateToken,
}

/// Print a freshly generated admin token
pub fn run_generate_token() {
    println!("{}", generate_admin_token());
}
