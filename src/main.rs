use clap::Parser;
use lootradar::cli::commands::{Cli, Commands};
use lootradar::domain::values::canonical_id;
use lootradar::domain::values::transaction_type::TransactionType;
use lootradar::LootRadar;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("LOOTRADAR_DB").unwrap_or_else(|_| "./lootradar.db".into());

    let radar = match LootRadar::new(&db_path) {
        Ok(radar) => radar,
        Err(e) => {
            eprintln!("Error initializing lootradar: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(radar, cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(radar: LootRadar, cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let user = cli.user;
    match cli.command {
        Commands::Scan => {
            let report = radar.scan().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::State => {
            let state = radar.state(&user)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Open { offer_id } => {
            // Offers are cache-only; without a fresh scan there is nothing
            // to open.
            radar.scan().await;
            let outcome = radar.open_offer(&user, &offer_id)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Stats => {
            let stats = radar.player_stats(&user)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::History => {
            let history = radar.claim_history(&user)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Commands::Bonus {
            bonus_type,
            context,
            amount,
        } => {
            let reference = canonical_id::bonus_id(&bonus_type, &context);
            let outcome = radar.add_transaction(
                &user,
                amount,
                TransactionType::Bonus,
                &reference,
                None,
                None,
            )?;
            println!("{outcome:?} ({reference})");
        }
        Commands::Watch { interval_mins } => {
            let interval = std::time::Duration::from_secs(interval_mins * 60);
            loop {
                let report = radar.scan().await;
                println!("{}", serde_json::to_string_pretty(&report)?);
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = tokio::signal::ctrl_c() => {
                        println!("Watch stopped.");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
