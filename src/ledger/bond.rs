//! Bond Calculation
//!
//! Collateral is a fixed fraction of launch liquidity, chosen by risk class.
//! Owners with reputation get a multiplicative discount, capped by the
//! schedule's `max_discount`.

use serde::{Deserialize, Serialize};

use super::types::RiskClass;

/// Collateral rules applied at deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSchedule {
    pub low_multiplier: f64,
    pub high_multiplier: f64,
    pub degen_multiplier: f64,

    /// Discount per reputation point
    pub discount_per_point: f64,

    /// Discount ceiling (0.5 = at most half the bond is waived)
    pub max_discount: f64,

    /// Epochs the bond stays locked
    pub lock_duration: u64,
}

impl Default for BondSchedule {
    fn default() -> Self {
        Self {
            low_multiplier: 0.10,
            high_multiplier: 0.50,
            degen_multiplier: 1.00,
            discount_per_point: 0.01,
            max_discount: 0.50,
            lock_duration: 90,
        }
    }
}

impl BondSchedule {
    pub fn multiplier(&self, risk: RiskClass) -> f64 {
        match risk {
            RiskClass::Low => self.low_multiplier,
            RiskClass::High => self.high_multiplier,
            RiskClass::Degen => self.degen_multiplier,
        }
    }

    /// Base bond before any reputation discount
    pub fn calculate_bond(&self, liquidity: f64, risk: RiskClass) -> f64 {
        liquidity * self.multiplier(risk)
    }

    /// Discount fraction earned by `score`, clamped to `max_discount`
    pub fn reputation_discount(&self, score: u64) -> f64 {
        (score as f64 * self.discount_per_point).min(self.max_discount)
    }

    /// Bond actually locked for an owner with `score`
    pub fn discounted_bond(&self, liquidity: f64, risk: RiskClass, score: u64) -> f64 {
        self.calculate_bond(liquidity, risk) * (1.0 - self.reputation_discount(score))
    }
}
