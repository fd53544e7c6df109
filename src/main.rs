use clap::Parser;
use ctf_gameserver_admin::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command() {
        Command::Serve => cli::serve::run().await,
        Command::GenerateToken => {
            cli::run_generate_token();
            Ok(())
        }
    }
}
