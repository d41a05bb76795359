use clap::Args;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::Database;
use crate::services::seed_user;

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[arg(long, default_value = "admin", help = "Username to (re)create")]
    pub username: String,

    #[arg(long, default_value = "admin", help = "Password for the account")]
    pub password: String,
}

pub async fn handle(db: &Database, args: SeedArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let user = seed_user(db, &args.username, &args.password).await?;
    output_success(
        output_format,
        &format!("Seeded user '{}'", user.username),
        Some(json!({ "id": user.id, "username": user.username })),
    )
}
