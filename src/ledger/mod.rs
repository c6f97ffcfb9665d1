//! Bonded Launch Ledger
//!
//! Projects lock a collateral bond at launch. Oversized liquidity withdrawals
//! are treated as rug pulls: the bond is confiscated into the treasury and
//! the owner's identity is burned for good. Owners who wait out the lock get
//! their bond back plus reputation, which discounts future bonds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ BondSchedule │────►│      Ledger      │◄────│  RugOracle   │
//! │ (collateral) │     │ (state machine)  │     │ (withdrawal  │
//! └──────────────┘     └──────────────────┘     │  size rule)  │
//!                         │            │        └──────────────┘
//!                         ▼            ▼
//!                 ┌──────────────┐ ┌──────────────┐
//!                 │ SlashRecord  │ │  EventLog    │
//!                 │ (audit)      │ │ (narration)  │
//!                 └──────────────┘ └──────────────┘
//! ```
//!
//! ## Project Lifecycle
//!
//! - `ACTIVE` on deployment
//! - `ACTIVE -> GRADUATED` when the bond is claimed after the lock expires
//! - `ACTIVE -> RUGGED` when a withdrawal is flagged and the project is slashed
//! - No transition leaves `GRADUATED` or `RUGGED`

mod bond;
mod chain;
mod events;
mod ids;
mod oracle;
mod slash;
mod types;

pub use bond::BondSchedule;
pub use chain::{BondClaim, Ledger, LedgerSnapshot, Withdrawal};
pub use events::{EventEntry, EventLog, LedgerEvent};
pub use ids::{IdGenerator, MAX_ID_ATTEMPTS, PROJECT_ID_LEN};
pub use oracle::{LedgerAction, RugOracle};
pub use slash::{SlashReason, SlashRecord};
pub use types::{short_key, Identity, Project, ProjectId, ProjectStatus, RiskClass};
