use brand_catalog::app::bootstrap;
use brand_catalog::infra::config::AppConfig;
use brand_catalog::storage::schema::{BRANDS_TABLE, MODELS_TABLE};
use brand_catalog::storage::seed::{distinct_brand_names, read_seed_file};
use brand_catalog::storage::table_exists;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-db]\n\
         \n\
         Checks configuration, store connectivity and the seed dataset without\n\
         starting the server or writing anything.\n\
         \n\
         Reads env vars (or .env):\n\
           DATABASE_URL, or POSTGRES_USER / POSTGRES_PASSWORD / POSTGRES_DB\n\
           [POSTGRES_HOST, POSTGRES_PORT, SEED_DATA_PATH, BIND_ADDR]\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let skip_db = args.iter().any(|a| a == "--skip-db");

    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    match &config.database.url {
        Some(_) => println!("  DATABASE_URL=<set>"),
        None => println!(
            "  POSTGRES={}@{}:{}/{}",
            config.database.user, config.database.host, config.database.port, config.database.database
        ),
    }
    println!("  SEED_DATA_PATH={}", config.seed_path.display());
    println!("  BIND_ADDR={}", config.bind_addr);

    // Seed dataset (startup refuses to run without it)
    let entries = read_seed_file(&config.seed_path).await?;
    println!(
        "  Seed dataset: {} models across {} brands.",
        entries.len(),
        distinct_brand_names(&entries).len()
    );

    if skip_db {
        println!("> Preflight OK (store checks skipped).");
        return Ok(());
    }

    // Store connectivity
    let pool = bootstrap::connect(&config.database).await?;
    bootstrap::ping(&pool).await?;
    println!("  Store is reachable.");

    for table in [BRANDS_TABLE, MODELS_TABLE] {
        if table_exists(&pool, table).await? {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await?;
            println!("  Table {}: present ({} rows).", table, count);
        } else {
            println!("  Table {}: missing (created on first start).", table);
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
