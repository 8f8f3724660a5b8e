use clap::Parser;
use clinic_backend::config::init_config;
use clinic_backend::database::pool::create_pool;
use clinic_backend::services::seed_service::{SeedOptions, SeedService};
use tracing::info;

/// Seed clinic demo data.
#[derive(Parser, Debug)]
#[command(name = "seed-clinic", about = "Seed clinic demo data")]
struct Args {
    /// Drop existing rows before seeding
    #[arg(long)]
    reset: bool,

    /// Number of demo patients
    #[arg(long, default_value_t = 10)]
    patients: i64,

    /// Number of providers
    #[arg(long, default_value_t = 10)]
    providers: i64,

    /// Number of appointments
    #[arg(long, default_value_t = 20)]
    appointments: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    init_config()?;
    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let opts = SeedOptions {
        reset: args.reset,
        patients: args.patients,
        providers: args.providers,
        appointments: args.appointments,
    };
    SeedService::new(pool).run(&opts).await?;

    info!("Seeding complete");
    Ok(())
}
