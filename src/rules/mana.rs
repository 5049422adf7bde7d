//! Mana ledger collaborator.
//!
//! The engine does not do mana accounting itself. Play rules consult
//! whatever ledger the host installs on the board, and the host debits
//! it after a card is successfully played from hand.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SideMap};

/// Read/spend access to each side's mana.
pub trait ManaLedger: std::fmt::Debug {
    /// Mana currently available to a side.
    fn available(&self, side: Side) -> i64;

    /// Spend mana. Returns false (and spends nothing) if the side
    /// cannot afford it.
    fn spend(&mut self, side: Side, amount: i64) -> bool;
}

/// Simple per-side mana pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    mana: SideMap<i64>,
}

impl ManaPool {
    /// Create a pool with the same amount for both sides.
    #[must_use]
    pub fn new(starting: i64) -> Self {
        Self {
            mana: SideMap::with_value(starting),
        }
    }

    /// Set a side's mana directly (e.g. refill at turn start).
    pub fn set(&mut self, side: Side, amount: i64) {
        self.mana[side] = amount;
    }

    pub fn gain(&mut self, side: Side, amount: i64) {
        self.mana[side] += amount;
    }
}

impl ManaLedger for ManaPool {
    fn available(&self, side: Side) -> i64 {
        self.mana[side]
    }

    fn spend(&mut self, side: Side, amount: i64) -> bool {
        if amount > self.mana[side] {
            return false;
        }
        self.mana[side] -= amount;
        true
    }
}
