use clap::Args;
use halfdrinks_app::auth::{CustomerUuid, NewCustomer, PgAuthService};

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Customer email address
    #[arg(long)]
    email: String,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgAuthService::new(db);

    let customer = service
        .create_customer(NewCustomer {
            uuid: CustomerUuid::new(),
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    let issued = service
        .issue_token(customer.uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_email: {}", customer.email);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("bearer_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
