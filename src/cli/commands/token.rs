use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, help = "User id to embed in the token (random when omitted)")]
    pub user_id: Option<Uuid>,

    #[arg(long, default_value = "cli", help = "Display name to embed in the token")]
    pub name: String,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let hours = args.hours.unwrap_or(security.jwt_expiry_hours);
    let claims = Claims::new(args.user_id.unwrap_or_else(Uuid::new_v4), args.name, hours);

    let token = generate_jwt(&claims, &security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            Some(json!({
                "token": token,
                "user_id": claims.sub,
                "name": claims.name,
                "expires_at": claims.exp,
            })),
        ),
        // Bare token so `export PRODUCTS_API_TOKEN=$(products token)` works
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
