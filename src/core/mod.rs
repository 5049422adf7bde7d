//! Core types: identifiers, sides, configuration, errors, events, RNG.

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod rng;
pub mod side;

pub use config::{BoardLayout, EngineConfig, ZoneConfig};
pub use error::{BoardError, DrawError, EffectError, MoveDenial, SpawnError};
pub use events::{EventQueue, GameEvent};
pub use ids::{CardHandle, SlotId, ZoneId};
pub use rng::GameRng;
pub use side::{Side, SideMap};
