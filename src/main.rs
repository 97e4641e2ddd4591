//! memberctl - command-line client for the member registry

use std::io;

use clap::{CommandFactory, Parser};

mod auth;
mod cli;
mod client;
mod config;
mod crypto;
mod error;
mod models;
mod output;
mod session;
mod validation;

use cli::{Cli, Commands, GlobalOptions, MemberCommands};
use client::models::MemberInput;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Route `log` output to stderr; `RUST_LOG` overrides the default level
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email } => cli::login::login(&opts, email).await,
        Commands::Register { name, email, phone } => {
            cli::login::register(&opts, name, email, phone).await
        }
        Commands::Logout => cli::login::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("memberctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Member(member_cmd) => match member_cmd {
            MemberCommands::Me => cli::member::me(&opts).await,
            MemberCommands::UpdateMe {
                name,
                phone,
                dry_run,
            } => cli::member::update_me(&opts, name, phone, dry_run).await,
            MemberCommands::List { limit } => cli::member::list(&opts, limit).await,
            MemberCommands::Get { id } => cli::member::get(&opts, &id).await,
            MemberCommands::Create {
                name,
                email,
                phone,
                dry_run,
            } => {
                let input = MemberInput {
                    name,
                    email,
                    phone_number: phone,
                };
                cli::member::create(&opts, input, dry_run).await
            }
            MemberCommands::Update {
                id,
                name,
                phone,
                dry_run,
            } => cli::member::update(&opts, &id, name, phone, dry_run).await,
            MemberCommands::SetRole { id, role, dry_run } => {
                cli::member::set_role(&opts, &id, role, dry_run).await
            }
            MemberCommands::Delete { id, yes, dry_run } => {
                cli::member::delete(&opts, &id, yes, dry_run).await
            }
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "memberctl", &mut io::stdout());
            Ok(())
        }
    }
}
