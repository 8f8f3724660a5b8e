use anyhow::bail;
use clap::Parser;
use clinic_backend::config::init_config;
use clinic_backend::database::pool::create_pool;
use clinic_backend::utils::crypto::hash_password;
use tracing::info;

/// Reset one user's password.
#[derive(Parser, Debug)]
#[command(name = "set-password", about = "Set a user's password by email")]
struct Args {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    init_config()?;
    let pool = create_pool().await?;

    let hash = hash_password(&args.password)
        .map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
    let res = sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
        .bind(hash)
        .bind(&args.email)
        .execute(&pool)
        .await?;

    if res.rows_affected() == 0 {
        bail!("no user with email {}", args.email);
    }
    info!("Password updated for {}", args.email);
    Ok(())
}
