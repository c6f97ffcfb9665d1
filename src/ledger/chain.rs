//! Ledger - Main State Machine
//!
//! Owns the treasury, the epoch counter, every project and every identity.
//! All mutation goes through `&mut self`, so a withdrawal and the slash it
//! triggers always happen together and a project is slashed at most once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LedgerConfig;
use crate::error::LedgerError;

use super::bond::BondSchedule;
use super::events::{EventLog, LedgerEvent};
use super::ids::{IdGenerator, MAX_ID_ATTEMPTS};
use super::oracle::{LedgerAction, RugOracle};
use super::slash::{SlashReason, SlashRecord};
use super::types::{Identity, Project, ProjectId, ProjectStatus, RiskClass};

/// Result of a liquidity withdrawal
#[derive(Debug, Clone, PartialEq)]
pub enum Withdrawal {
    /// Liquidity was removed
    Approved { remaining: f64 },
    /// The oracle flagged the withdrawal; nothing was removed and the project was slashed
    Slashed(SlashRecord),
}

impl Withdrawal {
    pub fn is_approved(&self) -> bool {
        matches!(self, Withdrawal::Approved { .. })
    }
}

/// Result of a bond claim on an active project
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BondClaim {
    /// Lock expired: bond released, project graduated
    Graduated { released: f64, new_score: u64 },
    /// Lock still running; nothing changed
    Premature { epochs_remaining: u64 },
}

impl BondClaim {
    pub fn is_graduated(&self) -> bool {
        matches!(self, BondClaim::Graduated { .. })
    }
}

/// Serializable copy of ledger state, ordered for stable output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub treasury: f64,
    pub current_epoch: u64,
    pub projects: Vec<Project>,
    pub identities: Vec<Identity>,
    pub slashes: Vec<SlashRecord>,
}

/// In-memory authority over projects, identities and the treasury
#[derive(Debug, Clone)]
pub struct Ledger {
    treasury: f64,
    current_epoch: u64,
    projects: HashMap<ProjectId, Project>,
    identities: HashMap<String, Identity>,
    slashes: Vec<SlashRecord>,
    events: EventLog,
    schedule: BondSchedule,
    oracle: RugOracle,
    ids: IdGenerator,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::from_validated(&LedgerConfig::default())
    }

    /// Build a ledger from `config`, rejecting configurations that fail `validate()`
    pub fn with_config(config: &LedgerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &LedgerConfig) -> Self {
        Self {
            treasury: 0.0,
            current_epoch: 0,
            projects: HashMap::new(),
            identities: HashMap::new(),
            slashes: Vec::new(),
            events: EventLog::new(config.events.max_entries),
            schedule: config.bond.to_schedule(),
            oracle: config.oracle.to_oracle(),
            ids: IdGenerator::new(),
        }
    }

    // Queries

    pub fn treasury(&self) -> f64 {
        self.treasury
    }

    pub fn current_epoch(&self) -> u64 {
        self.current_epoch
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.get(project_id)
    }

    pub fn identity(&self, pub_key: &str) -> Option<&Identity> {
        self.identities.get(pub_key)
    }

    /// Projects launched by `owner`, oldest first
    pub fn projects_by_owner(&self, owner: &str) -> Vec<&Project> {
        let mut projects: Vec<&Project> =
            self.projects.values().filter(|p| p.owner == owner).collect();
        projects.sort_by(|a, b| a.start_epoch.cmp(&b.start_epoch).then_with(|| a.id.cmp(&b.id)));
        projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn slash_history(&self) -> &[SlashRecord] {
        &self.slashes
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by(|a, b| a.id.cmp(&b.id));

        let mut identities: Vec<Identity> = self.identities.values().cloned().collect();
        identities.sort_by(|a, b| a.pub_key.cmp(&b.pub_key));

        LedgerSnapshot {
            treasury: self.treasury,
            current_epoch: self.current_epoch,
            projects,
            identities,
            slashes: self.slashes.clone(),
        }
    }

    // Operations

    /// Identity for `pub_key`, created with score 0 if absent
    pub fn get_or_create_identity(&mut self, pub_key: &str) -> &Identity {
        self.identities
            .entry(pub_key.to_string())
            .or_insert_with(|| Identity::new(pub_key.to_string()))
    }

    /// Base bond for `liquidity` at `risk`, before any reputation discount
    pub fn calculate_bond(&self, liquidity: f64, risk: RiskClass) -> f64 {
        self.schedule.calculate_bond(liquidity, risk)
    }

    /// Launch a project. `Ok(None)` means the owner is burned and nothing was created.
    pub fn deploy_project(
        &mut self,
        name: &str,
        owner: &str,
        liquidity: f64,
        risk: RiskClass,
    ) -> Result<Option<ProjectId>, LedgerError> {
        if !liquidity.is_finite() || liquidity < 0.0 {
            return Err(LedgerError::InvalidLiquidity(liquidity));
        }

        let (can_deploy, score) = {
            let identity = self.get_or_create_identity(owner);
            (identity.can_deploy(), identity.score)
        };

        if !can_deploy {
            self.events.record(
                self.current_epoch,
                LedgerEvent::DeploymentRejected {
                    name: name.to_string(),
                    owner: owner.to_string(),
                },
            );
            return Ok(None);
        }

        let bond = self.schedule.discounted_bond(liquidity, risk, score);

        let projects = &self.projects;
        let project_id = self
            .ids
            .next_unique(name, |candidate| projects.contains_key(candidate))
            .ok_or(LedgerError::IdSpaceExhausted(MAX_ID_ATTEMPTS))?;

        let project = Project {
            id: project_id.clone(),
            name: name.to_string(),
            owner: owner.to_string(),
            bond_locked: bond,
            liquidity,
            start_epoch: self.current_epoch,
            lock_duration: self.schedule.lock_duration,
            status: ProjectStatus::Active,
        };
        self.projects.insert(project_id.clone(), project);

        self.events.record(
            self.current_epoch,
            LedgerEvent::ProjectDeployed {
                project_id: project_id.clone(),
                name: name.to_string(),
                owner: owner.to_string(),
                risk,
                liquidity,
                bond,
            },
        );

        Ok(Some(project_id))
    }

    /// Move the clock forward by `epochs`; returns the new epoch
    pub fn advance_time(&mut self, epochs: u64) -> u64 {
        let from = self.current_epoch;
        self.current_epoch = from.saturating_add(epochs);
        self.events.record(
            self.current_epoch,
            LedgerEvent::TimeAdvanced {
                from,
                to: self.current_epoch,
            },
        );
        self.current_epoch
    }

    /// Whether `action` with `amount` on the project is a rug pull. Unknown projects never are.
    pub fn check_rug_conditions(
        &self,
        project_id: &str,
        action: LedgerAction,
        amount: f64,
    ) -> bool {
        self.projects
            .get(project_id)
            .map_or(false, |project| self.oracle.is_rug(project, action, amount))
    }

    /// Confiscate the bond and burn the owner. `Ok(None)` if the project was already rugged.
    pub fn slash(
        &mut self,
        project_id: &str,
        reason: SlashReason,
    ) -> Result<Option<SlashRecord>, LedgerError> {
        let epoch = self.current_epoch;
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| LedgerError::not_found(project_id))?;

        match project.status {
            ProjectStatus::Active => {}
            ProjectStatus::Rugged => return Ok(None),
            ProjectStatus::Graduated => {
                return Err(LedgerError::InvalidState {
                    project_id: project.id.clone(),
                    status: project.status,
                })
            }
        }

        let confiscated = project.bond_locked;
        project.bond_locked = 0.0;
        project.status = ProjectStatus::Rugged;
        let id = project.id.clone();
        let owner = project.owner.clone();

        self.treasury += confiscated;

        let identity = self
            .identities
            .entry(owner.clone())
            .or_insert_with(|| Identity::new(owner.clone()));
        let score_forfeited = identity.score;
        identity.burned = true;
        identity.score = 0;

        let record = SlashRecord::new(
            id.clone(),
            owner.clone(),
            reason,
            confiscated,
            score_forfeited,
            epoch,
        );
        self.slashes.push(record.clone());

        self.events.record(
            epoch,
            LedgerEvent::ProjectSlashed {
                project_id: id,
                reason: record.reason.to_string(),
                confiscated,
            },
        );
        self.events.record(epoch, LedgerEvent::IdentityBurned { owner });

        Ok(Some(record))
    }

    /// Remove liquidity, or slash the project if the oracle flags the amount
    pub fn withdraw_liquidity(
        &mut self,
        project_id: &str,
        amount: f64,
    ) -> Result<Withdrawal, LedgerError> {
        let project = self
            .projects
            .get(project_id)
            .ok_or_else(|| LedgerError::not_found(project_id))?;

        if !project.is_active() {
            return Err(LedgerError::InvalidState {
                project_id: project.id.clone(),
                status: project.status,
            });
        }

        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: "withdrawal must be finite and non-negative",
            });
        }

        let id = project.id.clone();
        let liquidity = project.liquidity;
        let allowed = self.oracle.allowed_withdrawal(project);

        if self.check_rug_conditions(project_id, LedgerAction::RemoveLiquidity, amount) {
            self.events.record(
                self.current_epoch,
                LedgerEvent::RugDetected {
                    project_id: id.clone(),
                    amount,
                    allowed,
                },
            );

            return match self.slash(project_id, SlashReason::LiquidityRugPull)? {
                Some(record) => Ok(Withdrawal::Slashed(record)),
                None => Err(LedgerError::InvalidState {
                    project_id: id,
                    status: ProjectStatus::Rugged,
                }),
            };
        }

        if amount > liquidity {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: "withdrawal exceeds remaining liquidity",
            });
        }

        let remaining = liquidity - amount;
        if let Some(project) = self.projects.get_mut(project_id) {
            project.liquidity = remaining;
        }

        self.events.record(
            self.current_epoch,
            LedgerEvent::WithdrawalApproved {
                project_id: id,
                amount,
                remaining,
            },
        );

        Ok(Withdrawal::Approved { remaining })
    }

    /// Release the bond once the lock has expired
    pub fn claim_bond(&mut self, project_id: &str) -> Result<BondClaim, LedgerError> {
        let epoch = self.current_epoch;
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| LedgerError::not_found(project_id))?;

        if !project.is_active() {
            return Err(LedgerError::InvalidState {
                project_id: project.id.clone(),
                status: project.status,
            });
        }

        if !project.is_unlocked(epoch) {
            let epochs_remaining = project.lock_duration - project.elapsed(epoch);
            let id = project.id.clone();
            self.events.record(
                epoch,
                LedgerEvent::ClaimPremature {
                    project_id: id,
                    epochs_remaining,
                },
            );
            return Ok(BondClaim::Premature { epochs_remaining });
        }

        let released = project.bond_locked;
        project.bond_locked = 0.0;
        project.status = ProjectStatus::Graduated;
        let id = project.id.clone();
        let owner = project.owner.clone();

        // One reputation point per whole unit of bond
        let identity = self
            .identities
            .entry(owner.clone())
            .or_insert_with(|| Identity::new(owner));
        identity.score = identity.score.saturating_add(released as u64);
        let new_score = identity.score;

        self.events.record(
            epoch,
            LedgerEvent::BondReleased {
                project_id: id,
                released,
                new_score,
            },
        );

        Ok(BondClaim::Graduated {
            released,
            new_score,
        })
    }
}
