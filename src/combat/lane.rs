//! The combat lane: both sides' slot paths and their distances.

use rustc_hash::FxHashMap;

use crate::core::{Side, SideMap, SlotId};

/// Precomputed 1-vs-1 lane topology.
///
/// Each path runs from a side's deployment slot to its combat slot. A
/// slot's distance is how many steps it sits from its own path's combat
/// slot (0 for the combat slot itself). Nothing here changes after
/// construction.
#[derive(Clone, Debug)]
pub struct CombatLane {
    paths: SideMap<Vec<SlotId>>,
    distances: FxHashMap<SlotId, u32>,
}

impl CombatLane {
    /// Build a lane from two ordered paths, combat slot last.
    pub fn new(player_path: Vec<SlotId>, enemy_path: Vec<SlotId>) -> Self {
        let mut distances = FxHashMap::default();
        for path in [&player_path, &enemy_path] {
            let last = path.len().saturating_sub(1);
            for (i, &slot) in path.iter().enumerate() {
                distances.insert(slot, (last - i) as u32);
            }
        }

        Self {
            paths: SideMap::from_pair(player_path, enemy_path),
            distances,
        }
    }

    /// A side's path, deployment end first.
    #[must_use]
    pub fn path(&self, side: Side) -> &[SlotId] {
        &self.paths[side]
    }

    /// The slot at the far end of a side's path.
    #[must_use]
    pub fn combat_slot(&self, side: Side) -> Option<SlotId> {
        self.paths[side].last().copied()
    }

    /// Steps from a slot to its path's combat slot.
    #[must_use]
    pub fn distance(&self, slot: SlotId) -> Option<u32> {
        self.distances.get(&slot).copied()
    }
}
