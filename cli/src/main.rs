//! agent-provision - fetch an agent installer over SFTP and launch it

use agent_provision::cli::Cli;
use agent_provision::output::json::format_error;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let message = format!("{e:#}");
            match format_error(&message) {
                Ok(doc) if json => println!("{doc}"),
                _ => eprintln!("Error: {message}"),
            }
            std::process::exit(1);
        }
    }
}
