//! System: an aggregate of substrates plus a scalar energy counter.
//!
//! Membership is fixed when the system is built. State updates address
//! members by [`SubstrateId`]; ids that do not belong to the system are
//! ignored.

use crate::substrate::{Stateful, Substrate, SubstrateSnapshot};
use crate::types::SubstrateId;
use tracing::debug;

/// A collection of substrates and the total energy they hold.
#[derive(Debug, Clone)]
pub struct System {
    substrates: Vec<Substrate>,
    energy: f64,
}

impl System {
    pub fn new(substrates: impl IntoIterator<Item = Substrate>, total_energy: f64) -> Self {
        Self {
            substrates: substrates.into_iter().collect(),
            energy: total_energy,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.energy
    }

    /// Add `amount` (of either sign) to the total energy.
    pub fn update_energy(&mut self, amount: f64) {
        self.energy += amount;
    }

    /// Overwrite the state of every member with this id.
    ///
    /// A substrate that is not a member is left alone.
    pub fn update_state(&mut self, substrate: &SubstrateId, new_state: impl Into<String>) {
        let new_state = new_state.into();
        let mut updated = 0usize;
        for member in self.substrates.iter_mut().filter(|s| s.id() == *substrate) {
            member.set_state(new_state.clone());
            updated += 1;
        }
        if updated == 0 {
            debug!("Ignoring state update for non-member {}", substrate);
        }
    }

    pub fn substrates(&self) -> &[Substrate] {
        &self.substrates
    }

    pub fn substrate(&self, id: &SubstrateId) -> Option<&Substrate> {
        self.substrates.iter().find(|s| s.id() == *id)
    }

    pub fn substrate_mut(&mut self, id: &SubstrateId) -> Option<&mut Substrate> {
        self.substrates.iter_mut().find(|s| s.id() == *id)
    }

    pub fn contains(&self, id: &SubstrateId) -> bool {
        self.substrate(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.substrates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substrates.is_empty()
    }

    pub fn snapshot(&self) -> Vec<SubstrateSnapshot> {
        self.substrates.iter().map(Substrate::snapshot).collect()
    }
}
