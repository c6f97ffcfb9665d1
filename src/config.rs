use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::Level;

use crate::ledger::{BondSchedule, RugOracle};

/// Configuration for the ledger and the demo node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Collateral and reputation-discount rules
    pub bond: BondConfig,
    /// Rug oracle configuration
    pub oracle: OracleConfig,
    /// Event log configuration
    pub events: EventConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondConfig {
    /// Fraction of liquidity locked for LOW risk launches
    pub low_multiplier: f64,
    /// Fraction of liquidity locked for HIGH risk launches
    pub high_multiplier: f64,
    /// Fraction of liquidity locked for DEGEN launches
    pub degen_multiplier: f64,
    /// Bond discount granted per reputation point
    pub discount_per_point: f64,
    /// Upper bound on the reputation discount
    pub max_discount: f64,
    /// Epochs a bond stays locked after launch
    pub lock_duration_epochs: u64,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            low_multiplier: 0.10,
            high_multiplier: 0.50,
            degen_multiplier: 1.00,
            discount_per_point: 0.01,
            max_discount: 0.50,
            lock_duration_epochs: 90,
        }
    }
}

impl BondConfig {
    /// Convert to the schedule used by the ledger
    pub fn to_schedule(&self) -> BondSchedule {
        BondSchedule {
            low_multiplier: self.low_multiplier,
            high_multiplier: self.high_multiplier,
            degen_multiplier: self.degen_multiplier,
            discount_per_point: self.discount_per_point,
            max_discount: self.max_discount,
            lock_duration: self.lock_duration_epochs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Largest fraction of current liquidity one withdrawal may take
    pub max_withdrawal_fraction: f64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_withdrawal_fraction: 0.10,
        }
    }
}

impl OracleConfig {
    pub fn to_oracle(&self) -> RugOracle {
        RugOracle::new(self.max_withdrawal_fraction)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Entries kept before the oldest are dropped
    pub max_entries: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Level {
        match self.level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        }
    }
}

/// Read and parse an optional environment variable
fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {} value: {}", name, raw))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

impl LedgerConfig {
    /// Load configuration from `LEMIGOG_*` environment variables and validate it
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Bond rules
        if let Some(v) = env_parse("LEMIGOG_BOND_LOW_MULTIPLIER")? {
            config.bond.low_multiplier = v;
        }
        if let Some(v) = env_parse("LEMIGOG_BOND_HIGH_MULTIPLIER")? {
            config.bond.high_multiplier = v;
        }
        if let Some(v) = env_parse("LEMIGOG_BOND_DEGEN_MULTIPLIER")? {
            config.bond.degen_multiplier = v;
        }
        if let Some(v) = env_parse("LEMIGOG_BOND_DISCOUNT_PER_POINT")? {
            config.bond.discount_per_point = v;
        }
        if let Some(v) = env_parse("LEMIGOG_BOND_MAX_DISCOUNT")? {
            config.bond.max_discount = v;
        }
        if let Some(v) = env_parse("LEMIGOG_LOCK_DURATION_EPOCHS")? {
            config.bond.lock_duration_epochs = v;
        }

        // Oracle
        if let Some(v) = env_parse("LEMIGOG_MAX_WITHDRAWAL_FRACTION")? {
            config.oracle.max_withdrawal_fraction = v;
        }

        // Event log
        if let Some(v) = env_parse("LEMIGOG_EVENT_LOG_MAX_ENTRIES")? {
            config.events.max_entries = v;
        }

        // Logging
        if let Ok(level) = env::var("LEMIGOG_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let bond = &self.bond;
        for (name, value) in [
            ("low_multiplier", bond.low_multiplier),
            ("high_multiplier", bond.high_multiplier),
            ("degen_multiplier", bond.degen_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow::anyhow!(
                    "Bond {} must be finite and non-negative (got {})",
                    name,
                    value
                ));
            }
        }

        if bond.low_multiplier > bond.high_multiplier
            || bond.high_multiplier > bond.degen_multiplier
        {
            return Err(anyhow::anyhow!(
                "Bond multipliers must satisfy LOW <= HIGH <= DEGEN (got {}, {}, {})",
                bond.low_multiplier,
                bond.high_multiplier,
                bond.degen_multiplier
            ));
        }

        for (name, value) in [
            ("discount_per_point", bond.discount_per_point),
            ("max_discount", bond.max_discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow::anyhow!(
                    "Bond {} must be within [0, 1] (got {})",
                    name,
                    value
                ));
            }
        }

        if bond.lock_duration_epochs == 0 {
            return Err(anyhow::anyhow!("Lock duration must be non-zero"));
        }

        if !(0.0..=1.0).contains(&self.oracle.max_withdrawal_fraction) {
            return Err(anyhow::anyhow!(
                "Max withdrawal fraction must be within [0, 1] (got {})",
                self.oracle.max_withdrawal_fraction
            ));
        }

        if self.events.max_entries == 0 {
            return Err(anyhow::anyhow!("Event log must keep at least one entry"));
        }

        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown log level: {} (expected error, warn, info, debug or trace)",
                    other
                ))
            }
        }

        Ok(())
    }
}
