//! Ledger Events
//!
//! Structured record of every state change, mirrored to `tracing`. The log
//! is bounded; the oldest entries are dropped first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::types::{short_key, ProjectId, RiskClass};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    ProjectDeployed {
        project_id: ProjectId,
        name: String,
        owner: String,
        risk: RiskClass,
        liquidity: f64,
        bond: f64,
    },
    DeploymentRejected {
        name: String,
        owner: String,
    },
    TimeAdvanced {
        from: u64,
        to: u64,
    },
    WithdrawalApproved {
        project_id: ProjectId,
        amount: f64,
        remaining: f64,
    },
    RugDetected {
        project_id: ProjectId,
        amount: f64,
        allowed: f64,
    },
    ProjectSlashed {
        project_id: ProjectId,
        reason: String,
        confiscated: f64,
    },
    IdentityBurned {
        owner: String,
    },
    BondReleased {
        project_id: ProjectId,
        released: f64,
        new_score: u64,
    },
    ClaimPremature {
        project_id: ProjectId,
        epochs_remaining: u64,
    },
}

impl LedgerEvent {
    /// Project this event concerns, if any
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            LedgerEvent::ProjectDeployed { project_id, .. }
            | LedgerEvent::WithdrawalApproved { project_id, .. }
            | LedgerEvent::RugDetected { project_id, .. }
            | LedgerEvent::ProjectSlashed { project_id, .. }
            | LedgerEvent::BondReleased { project_id, .. }
            | LedgerEvent::ClaimPremature { project_id, .. } => Some(project_id),
            LedgerEvent::DeploymentRejected { .. }
            | LedgerEvent::TimeAdvanced { .. }
            | LedgerEvent::IdentityBurned { .. } => None,
        }
    }

    fn trace(&self) {
        match self {
            LedgerEvent::ProjectDeployed {
                project_id,
                name,
                owner,
                risk,
                liquidity,
                bond,
            } => tracing::info!(
                project_id = %project_id,
                name = %name,
                owner = %short_key(owner),
                risk = %risk,
                liquidity = liquidity,
                bond = bond,
                "Project launched"
            ),
            LedgerEvent::DeploymentRejected { name, owner } => tracing::warn!(
                name = %name,
                owner = %short_key(owner),
                "Deployment rejected: identity is burned"
            ),
            LedgerEvent::TimeAdvanced { from, to } => {
                tracing::info!(from = from, to = to, "Epoch advanced")
            }
            LedgerEvent::WithdrawalApproved {
                project_id,
                amount,
                remaining,
            } => tracing::debug!(
                project_id = %project_id,
                amount = amount,
                remaining = remaining,
                "Withdrawal approved"
            ),
            LedgerEvent::RugDetected {
                project_id,
                amount,
                allowed,
            } => tracing::warn!(
                project_id = %project_id,
                amount = amount,
                allowed = allowed,
                "Rug pull detected"
            ),
            LedgerEvent::ProjectSlashed {
                project_id,
                reason,
                confiscated,
            } => tracing::warn!(
                project_id = %project_id,
                reason = %reason,
                confiscated = confiscated,
                "Project slashed"
            ),
            LedgerEvent::IdentityBurned { owner } => {
                tracing::error!(owner = %short_key(owner), "Identity burned")
            }
            LedgerEvent::BondReleased {
                project_id,
                released,
                new_score,
            } => tracing::info!(
                project_id = %project_id,
                released = released,
                new_score = new_score,
                "Bond returned"
            ),
            LedgerEvent::ClaimPremature {
                project_id,
                epochs_remaining,
            } => tracing::debug!(
                project_id = %project_id,
                epochs_remaining = epochs_remaining,
                "Bond still locked"
            ),
        }
    }
}

/// A single event log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub seq: u64,
    pub epoch: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: LedgerEvent,
}

/// Bounded in-memory event log
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventEntry>,
    max_entries: usize,
    next_seq: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl EventLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
            next_seq: 0,
        }
    }

    /// Record an event at `epoch`
    pub fn record(&mut self, epoch: u64, event: LedgerEvent) {
        event.trace();

        self.entries.push_back(EventEntry {
            seq: self.next_seq,
            epoch,
            recorded_at: Utc::now(),
            event,
        });
        self.next_seq += 1;

        // Trim old entries
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventEntry> {
        self.entries.iter()
    }

    /// Most recent entries, newest first
    pub fn recent(&self, count: usize) -> Vec<&EventEntry> {
        self.entries.iter().rev().take(count).collect()
    }

    /// Entries concerning one project, oldest first
    pub fn for_project(&self, project_id: &str) -> Vec<&EventEntry> {
        self.entries
            .iter()
            .filter(|e| e.event.project_id().map(|id| id.as_str()) == Some(project_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = EventLog::new(2);
        for epoch in 0..5 {
            log.record(epoch, LedgerEvent::TimeAdvanced { from: epoch, to: epoch + 1 });
        }

        assert_eq!(log.len(), 2);
        let recent = log.recent(10);
        assert_eq!(recent[0].seq, 4);
        assert_eq!(recent[1].seq, 3);
    }

    #[test]
    fn test_filter_by_project() {
        let mut log = EventLog::default();
        let id = ProjectId::new("cafebabe".to_string());
        log.record(
            0,
            LedgerEvent::ClaimPremature {
                project_id: id.clone(),
                epochs_remaining: 3,
            },
        );
        log.record(0, LedgerEvent::IdentityBurned { owner: "0xOwner".to_string() });

        assert_eq!(log.for_project("cafebabe").len(), 1);
        assert!(log.for_project("00000000").is_empty());
    }
}
