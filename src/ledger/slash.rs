//! Slashing
//!
//! A slash confiscates a project's locked bond into the treasury and burns
//! the owner's identity. Each slash is recorded for audit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::ProjectId;

/// Reasons for slashing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlashReason {
    /// A withdrawal exceeded the oracle's allowed share of liquidity
    LiquidityRugPull,

    /// Any other caller-supplied cause
    Other(String),
}

impl SlashReason {
    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            SlashReason::LiquidityRugPull => "Liquidity Rug Pull Detected",
            SlashReason::Other(reason) => reason,
        }
    }
}

impl fmt::Display for SlashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A recorded slash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlashRecord {
    pub project_id: ProjectId,

    /// Owner whose identity was burned
    pub owner: String,

    pub reason: SlashReason,

    /// Bond moved into the treasury
    pub confiscated: f64,

    /// Reputation the owner lost
    pub score_forfeited: u64,

    /// Ledger epoch at the time of the slash
    pub epoch: u64,

    pub slashed_at: DateTime<Utc>,
}

impl SlashRecord {
    pub fn new(
        project_id: ProjectId,
        owner: String,
        reason: SlashReason,
        confiscated: f64,
        score_forfeited: u64,
        epoch: u64,
    ) -> Self {
        Self {
            project_id,
            owner,
            reason,
            confiscated,
            score_forfeited,
            epoch,
            slashed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_description() {
        assert_eq!(
            SlashReason::LiquidityRugPull.description(),
            "Liquidity Rug Pull Detected"
        );
        assert_eq!(
            SlashReason::Other("Governance vote".to_string()).to_string(),
            "Governance vote"
        );
    }
}
