//! Lane combat.
//!
//! Resolution is a pure computation: `CombatSystem::resolve` reads the
//! board and returns a `CombatResult`. Health changes only when the
//! result is applied.

mod context;
mod lane;
mod rules;
mod system;
mod targeting;

pub use context::{CombatContext, CombatResult, HitEvent, HitTarget};
pub use lane::CombatLane;
pub use rules::CombatRule;
pub use system::CombatSystem;
pub use targeting::find_enemy_in_range;
