use clap::{Parser, Subcommand};
use halfdrinks_app::database::{self, Db};

mod customer;
mod db;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "halfdrinks-app", about = "1/2 Drinks operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Seed(seed::SeedArgs),
    Customer(customer::CustomerCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Seed(args) => seed::run(args).await,
            Commands::Customer(command) => customer::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
