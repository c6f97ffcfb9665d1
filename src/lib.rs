//! Lemigog Ledger
//!
//! Bonded project launches with deterministic rug-pull detection, slashing
//! and permanent identity burning.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Demo node (simulation run)
//! ├── config.rs      - Configuration management
//! ├── error.rs       - Ledger error kinds
//! └── ledger/        - Bonded launch ledger
//!     ├── types.rs      - Identity, Project, status and risk enums
//!     ├── bond.rs       - Bond calculation & reputation discount
//!     ├── oracle.rs     - Rug-condition oracle
//!     ├── slash.rs      - Slash reasons & records
//!     ├── events.rs     - Structured event log
//!     ├── ids.rs        - Project identifier generation
//!     └── chain.rs      - Ledger state machine
//! ```

pub mod config;
pub mod error;
pub mod ledger;

// Re-export main types for convenience
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::{
    BondClaim, BondSchedule, EventLog, Identity, Ledger, LedgerAction, LedgerEvent,
    LedgerSnapshot, Project, ProjectId, ProjectStatus, RiskClass, RugOracle, SlashReason,
    SlashRecord, Withdrawal,
};
