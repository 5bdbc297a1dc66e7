use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledger::{Ledger, Replay};
use shared::protocol::ReplayResponse;

#[derive(Parser, Debug)]
#[command(name = "ledger-tools", about = "Offline helpers for the signed ledger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a sequence of inputs and print the ledger after each one.
    Replay {
        /// Starting ledger; entries must be non-zero and share one sign.
        #[arg(long = "from", value_delimiter = ',', allow_negative_numbers = true)]
        seed: Vec<i64>,
        /// Print the same JSON document as `POST /example`.
        #[arg(long)]
        json: bool,
        #[arg(allow_negative_numbers = true, required = true)]
        inputs: Vec<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { seed, json, inputs } => {
            let seed = Ledger::try_from_entries(seed).context("invalid --from ledger")?;
            let replay = Replay::run(seed, &inputs);
            if json {
                let response = ReplayResponse::from(replay);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                for step in &replay.steps {
                    println!(
                        "{:>6}  {:<45} {:?}",
                        step.input,
                        step.action.to_string(),
                        step.ledger.entries()
                    );
                }
                println!("final {:?}", replay.final_ledger.entries());
            }
        }
    }

    Ok(())
}
