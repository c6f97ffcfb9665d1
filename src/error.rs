//! Ledger Error Kinds
//!
//! Faults a caller can match on. Business outcomes (a rejected deploy, a
//! slashed withdrawal, a premature claim) are values, not errors.

use crate::ledger::{ProjectId, ProjectStatus};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("project {project_id} not found")]
    NotFound { project_id: String },

    #[error("project {project_id} is {status}, expected ACTIVE")]
    InvalidState {
        project_id: ProjectId,
        status: ProjectStatus,
    },

    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: &'static str },

    #[error("liquidity must be finite and non-negative (got {0})")]
    InvalidLiquidity(f64),

    #[error("could not allocate a unique project id after {0} attempts")]
    IdSpaceExhausted(u32),
}

impl LedgerError {
    pub fn not_found(project_id: &str) -> Self {
        LedgerError::NotFound {
            project_id: project_id.to_string(),
        }
    }
}
