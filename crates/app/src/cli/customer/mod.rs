use clap::{Args, Subcommand};

mod create;
mod revoke_token;

#[derive(Debug, Args)]
pub(crate) struct CustomerCommand {
    #[command(subcommand)]
    command: CustomerSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomerSubcommand {
    Create(create::CreateCustomerArgs),
    RevokeToken(revoke_token::RevokeTokenArgs),
}

pub(crate) async fn run(command: CustomerCommand) -> Result<(), String> {
    match command.command {
        CustomerSubcommand::Create(args) => create::run(args).await,
        CustomerSubcommand::RevokeToken(args) => revoke_token::run(args).await,
    }
}
