use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lootradar", about = "Free-game offer radar with an XP ledger")]
pub struct Cli {
    /// User profile the command acts on
    #[arg(long, default_value = "default", global = true)]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one scan cycle across all sources
    Scan,
    /// Print the full read view (hero, rails, scout) as JSON
    State,
    /// Open (claim) an offer by its canonical id
    Open {
        /// Canonical offer id, e.g. claim:steam:2313010
        offer_id: String,
    },
    /// Show derived player stats (balance, level, streak)
    Stats,
    /// List the claim history
    History,
    /// Credit a one-off bonus, idempotent per (type, context)
    Bonus {
        /// Bonus type, e.g. streak
        bonus_type: String,
        /// Bonus context, e.g. 2025-12-25
        context: String,
        /// XP amount
        #[arg(long, default_value = "50")]
        amount: i64,
    },
    /// Scan on an interval until interrupted
    Watch {
        /// Minutes between scan cycles
        #[arg(long, default_value = "30")]
        interval_mins: u64,
    },
}
