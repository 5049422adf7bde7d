//! Engine and board configuration.
//!
//! Configuration is handed to the engine fully formed:
//! - `ZoneConfig`: one zone (kind, side, capacity)
//! - `BoardLayout`: the zones a board is built from
//! - `EngineConfig`: tunables (hand size, lane length, phase timers)
//!
//! Nothing here touches the filesystem; loading is the host's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::zones::ZoneKind;

/// Configuration for a single zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// What the zone is used for.
    pub kind: ZoneKind,

    /// Owning side.
    pub side: Side,

    /// Number of slots. Fixed for the lifetime of the board.
    pub capacity: usize,
}

impl ZoneConfig {
    /// Create a new zone configuration.
    pub fn new(kind: ZoneKind, side: Side, capacity: usize) -> Self {
        Self {
            kind,
            side,
            capacity,
        }
    }
}

/// The set of zones a board is built from.
///
/// Order matters only for `ZoneId` assignment: zone `i` in the layout
/// becomes `ZoneId(i)` on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub zones: Vec<ZoneConfig>,
}

impl BoardLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone (builder pattern).
    #[must_use]
    pub fn with_zone(mut self, kind: ZoneKind, side: Side, capacity: usize) -> Self {
        self.zones.push(ZoneConfig::new(kind, side, capacity));
        self
    }

    /// The standard two-sided lane board.
    ///
    /// Each side gets a hand, one deployment slot, `advance_slots`
    /// advance positions and one combat slot.
    pub fn standard(config: &EngineConfig) -> Self {
        let mut layout = Self::new();
        for side in Side::ALL {
            layout = layout
                .with_zone(ZoneKind::Hand, side, config.hand_capacity)
                .with_zone(ZoneKind::Deployment, side, 1)
                .with_zone(ZoneKind::Advance, side, config.advance_slots)
                .with_zone(ZoneKind::Combat, side, 1);
        }
        layout
    }

    /// Get a zone config by kind and side.
    #[must_use]
    pub fn get_zone(&self, kind: ZoneKind, side: Side) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.kind == kind && z.side == side)
    }
}

/// Engine tunables.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use lane_ccg::core::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_hand_capacity(7)
///     .with_movement_delay(Duration::ZERO);
///
/// assert_eq!(config.hand_capacity, 7);
/// assert_eq!(config.starting_health, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Slots in each side's hand zone.
    pub hand_capacity: usize,

    /// Advance positions between deployment and combat.
    pub advance_slots: usize,

    /// Health each side starts with.
    pub starting_health: i64,

    /// Wait after lane advancement before leaving the movement phase.
    pub movement_delay: Duration,

    /// How long the combat phase lasts before self-advancing.
    pub combat_duration: Duration,

    /// How long the enemy turn lasts before returning to draw.
    pub enemy_turn_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_capacity: 10,
            advance_slots: 2,
            starting_health: 20,
            movement_delay: Duration::from_millis(500),
            combat_duration: Duration::from_millis(1000),
            enemy_turn_duration: Duration::from_millis(1000),
        }
    }
}

impl EngineConfig {
    /// Config with every phase timer at zero, so timed phases finish as
    /// soon as they are entered. Handy for tests and headless simulation.
    pub fn instant() -> Self {
        Self::default()
            .with_movement_delay(Duration::ZERO)
            .with_combat_duration(Duration::ZERO)
            .with_enemy_turn_duration(Duration::ZERO)
    }

    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_advance_slots(mut self, slots: usize) -> Self {
        self.advance_slots = slots;
        self
    }

    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    #[must_use]
    pub fn with_movement_delay(mut self, delay: Duration) -> Self {
        self.movement_delay = delay;
        self
    }

    #[must_use]
    pub fn with_combat_duration(mut self, duration: Duration) -> Self {
        self.combat_duration = duration;
        self
    }

    #[must_use]
    pub fn with_enemy_turn_duration(mut self, duration: Duration) -> Self {
        self.enemy_turn_duration = duration;
        self
    }
}
