//! Zone and slot topology.
//!
//! Zones are configured per board (see `BoardLayout`), not hardcoded.
//! The `Board` owns every zone and slot; these types are the read-only
//! views it hands out.

mod slot;
mod zone;

pub use slot::Slot;
pub use zone::{Zone, ZoneKind};
