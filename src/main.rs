use anyhow::{Context, Result};
use tracing::{info, warn};

use lemigog::{BondClaim, Ledger, LedgerConfig, RiskClass};

fn main() -> Result<()> {
    let config = LedgerConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        eprintln!("Please check LEMIGOG_* environment variables.");
        e
    })?;

    init_logging(&config)?;

    info!("Starting lemigog node v{}", env!("CARGO_PKG_VERSION"));
    info!(
        lock_duration = config.bond.lock_duration_epochs,
        max_withdrawal_fraction = config.oracle.max_withdrawal_fraction,
        "Ledger configuration loaded"
    );

    let mut ledger = Ledger::with_config(&config)?;
    run_simulation(&mut ledger)?;

    let snapshot = serde_json::to_string_pretty(&ledger.snapshot())
        .context("Failed to serialize ledger snapshot")?;
    println!("{}", snapshot);

    Ok(())
}

fn init_logging(config: &LedgerConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}

/// Launch one LOW risk project, wait out the lock and claim the bond
fn run_simulation(ledger: &mut Ledger) -> Result<()> {
    info!("Simulation start");

    let owner = "0xSatoshi";
    let project_id = ledger
        .deploy_project("Bitcoin 2", owner, 1000.0, RiskClass::Low)?
        .context("Owner identity is burned")?;

    ledger.advance_time(100);

    match ledger.claim_bond(project_id.as_str())? {
        BondClaim::Graduated {
            released,
            new_score,
        } => info!(
            project_id = %project_id,
            released = released,
            new_score = new_score,
            "Project graduated"
        ),
        BondClaim::Premature { epochs_remaining } => warn!(
            project_id = %project_id,
            epochs_remaining = epochs_remaining,
            "Bond still locked at end of simulation"
        ),
    }

    info!(
        treasury = ledger.treasury(),
        epoch = ledger.current_epoch(),
        projects = ledger.project_count(),
        "Simulation end"
    );

    Ok(())
}
