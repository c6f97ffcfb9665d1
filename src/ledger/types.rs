//! Ledger Record Types
//!
//! Identities carry an owner's reputation; projects carry a launched pool's
//! locked bond and liquidity. Both are plain records owned by the `Ledger`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of characters of an owner key shown in log output
const SHORT_KEY_LEN: usize = 8;

/// Shorten an owner key for log output
pub fn short_key(pub_key: &str) -> &str {
    match pub_key.char_indices().nth(SHORT_KEY_LEN) {
        Some((idx, _)) => &pub_key[..idx],
        None => pub_key,
    }
}

/// Risk profile declared at launch; selects the collateral multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskClass {
    Low,
    High,
    Degen,
}

impl RiskClass {
    pub const ALL: [RiskClass; 3] = [RiskClass::Low, RiskClass::High, RiskClass::Degen];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Low => "LOW",
            RiskClass::High => "HIGH",
            RiskClass::Degen => "DEGEN",
        }
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskClass::Low),
            "high" => Ok(RiskClass::High),
            "degen" => Ok(RiskClass::Degen),
            other => Err(anyhow::anyhow!("unknown risk class: {}", other)),
        }
    }
}

/// Project lifecycle. `Active` is the only initial state; the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    Graduated,
    Rugged,
}

impl ProjectStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Graduated | ProjectStatus::Rugged)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Graduated => "GRADUATED",
            ProjectStatus::Rugged => "RUGGED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque project identifier (8 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ProjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// An owner's reputation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub pub_key: String,

    /// Reputation points, earned one per unit of bond released at graduation
    pub score: u64,

    /// Set by slashing and never cleared
    pub burned: bool,
}

impl Identity {
    pub fn new(pub_key: String) -> Self {
        Self {
            pub_key,
            score: 0,
            burned: false,
        }
    }

    pub fn can_deploy(&self) -> bool {
        !self.burned
    }
}

/// One launched pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,

    /// Owner's public key (lookup key into the identity table)
    pub owner: String,

    /// Collateral still locked
    pub bond_locked: f64,

    /// Liquidity remaining after approved withdrawals
    pub liquidity: f64,

    pub start_epoch: u64,
    pub lock_duration: u64,
    pub status: ProjectStatus,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Epochs elapsed since launch at `current_epoch`
    pub fn elapsed(&self, current_epoch: u64) -> u64 {
        current_epoch.saturating_sub(self.start_epoch)
    }

    /// Whether the lock period has run out at `current_epoch`
    pub fn is_unlocked(&self, current_epoch: u64) -> bool {
        self.elapsed(current_epoch) >= self.lock_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_key() {
        assert_eq!(short_key("0xHonestBuilderbbbb"), "0xHonest");
        assert_eq!(short_key("0xBad"), "0xBad");
    }

    #[test]
    fn test_risk_class_parse() {
        assert_eq!("degen".parse::<RiskClass>().unwrap(), RiskClass::Degen);
        assert_eq!("HIGH".parse::<RiskClass>().unwrap(), RiskClass::High);
        assert!("yolo".parse::<RiskClass>().is_err());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ProjectStatus::Active.is_terminal());
        assert!(ProjectStatus::Graduated.is_terminal());
        assert!(ProjectStatus::Rugged.is_terminal());
        assert_eq!(ProjectStatus::Rugged.to_string(), "RUGGED");
    }

    #[test]
    fn test_project_unlock() {
        let project = Project {
            id: ProjectId::new("deadbeef".to_string()),
            name: "Test".to_string(),
            owner: "0xOwner".to_string(),
            bond_locked: 10.0,
            liquidity: 100.0,
            start_epoch: 5,
            lock_duration: 90,
            status: ProjectStatus::Active,
        };

        assert!(!project.is_unlocked(94));
        assert!(project.is_unlocked(95));
        assert_eq!(project.elapsed(3), 0);
    }
}
