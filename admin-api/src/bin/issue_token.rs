//! Mint an admin bearer token for the settings API
//! Run with: cargo run --bin issue-token

use admin_api::config::Config;
use admin_api::middleware::AdminRole;
use admin_api::services::AuthService;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let admin_id = std::env::var("ADMIN_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string());
    let role = match std::env::var("ADMIN_ROLE").as_deref() {
        Ok("admin") => AdminRole::Admin,
        Ok("moderator") => AdminRole::Moderator,
        Ok("super_admin") | Err(_) => AdminRole::SuperAdmin,
        Ok(other) => anyhow::bail!("Unknown ADMIN_ROLE '{}'", other),
    };

    let token = AuthService::new(config.jwt.clone())
        .generate_access_token(&admin_id, &email, role)?;

    eprintln!("Admin:   {} <{}>", admin_id, email);
    eprintln!("Role:    {}", role.as_str());
    eprintln!("Expires: in {} hours", config.jwt.expiry_hours);
    println!("{}", token);

    Ok(())
}
