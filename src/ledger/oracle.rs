//! Rug-Condition Oracle
//!
//! A withdrawal-size rule: any single liquidity removal above a fixed share
//! of the current liquidity is a rug pull. Lock timing is not consulted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::Project;

/// Actions the oracle can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerAction {
    RemoveLiquidity,
    ClaimBond,
}

impl LedgerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerAction::RemoveLiquidity => "REMOVE_LIQUIDITY",
            LedgerAction::ClaimBond => "CLAIM_BOND",
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REMOVE_LIQUIDITY" => Ok(LedgerAction::RemoveLiquidity),
            "CLAIM_BOND" => Ok(LedgerAction::ClaimBond),
            other => Err(anyhow::anyhow!("unknown ledger action: {}", other)),
        }
    }
}

/// Deterministic withdrawal-size predicate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RugOracle {
    /// Largest share of current liquidity a single withdrawal may take
    pub max_withdrawal_fraction: f64,
}

impl Default for RugOracle {
    fn default() -> Self {
        Self::new(0.10)
    }
}

impl RugOracle {
    pub fn new(max_withdrawal_fraction: f64) -> Self {
        Self {
            max_withdrawal_fraction,
        }
    }

    /// Largest amount that may leave `project` in one withdrawal
    pub fn allowed_withdrawal(&self, project: &Project) -> f64 {
        project.liquidity * self.max_withdrawal_fraction
    }

    /// True iff `action` on `project` with `amount` is a rug pull.
    /// Exactly the allowed amount is not flagged.
    pub fn is_rug(&self, project: &Project, action: LedgerAction, amount: f64) -> bool {
        match action {
            LedgerAction::RemoveLiquidity => amount > self.allowed_withdrawal(project),
            LedgerAction::ClaimBond => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{ProjectId, ProjectStatus};

    fn pool(liquidity: f64) -> Project {
        Project {
            id: ProjectId::new("0badc0de".to_string()),
            name: "Pool".to_string(),
            owner: "0xOwner".to_string(),
            bond_locked: 10.0,
            liquidity,
            start_epoch: 0,
            lock_duration: 90,
            status: ProjectStatus::Active,
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let oracle = RugOracle::default();
        let project = pool(100.0);

        assert!(!oracle.is_rug(&project, LedgerAction::RemoveLiquidity, 5.0));
        assert!(!oracle.is_rug(&project, LedgerAction::RemoveLiquidity, 10.0));
        assert!(oracle.is_rug(&project, LedgerAction::RemoveLiquidity, 10.01));
        assert!(oracle.is_rug(&project, LedgerAction::RemoveLiquidity, 90.0));
    }

    #[test]
    fn test_claim_never_flagged() {
        let oracle = RugOracle::default();
        assert!(!oracle.is_rug(&pool(100.0), LedgerAction::ClaimBond, 1_000.0));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(
            "REMOVE_LIQUIDITY".parse::<LedgerAction>().unwrap(),
            LedgerAction::RemoveLiquidity
        );
        assert!("ADD_LIQUIDITY".parse::<LedgerAction>().is_err());
    }
}
