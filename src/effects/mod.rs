//! Effect system for card actions.
//!
//! Effects are step pipelines:
//! - `Effect` / `EffectStep`: what to target and which action to run
//! - `TargetType`, `TargetingMode`, `TargetCount`, `TargetFilter`: how
//!   targets are gathered
//! - `SubEffect`: the atomic action (`DealDamage`, `Heal`, `Destroy`,
//!   `Draw`, `BuffStat`, or a custom implementation)
//! - `EffectContext`: the game state and whiteboard one resolution uses
//! - `EffectResolver`: runs the pipeline, awaiting a
//!   `ManualTargetHandler` where a step needs a choice

mod context;
mod effect;
mod filter;
mod resolver;
mod sub_effect;
mod targeting;
mod whiteboard;

pub use context::EffectContext;
pub use effect::{Effect, EffectStep};
pub use filter::TargetFilter;
pub use resolver::{EffectOutcome, EffectResolver, ManualTargetHandler};
pub use sub_effect::{BuffStat, DealDamage, Destroy, Draw, Heal, SubEffect};
pub use targeting::{Target, TargetCount, TargetType, TargetingMode};
pub use whiteboard::{Whiteboard, WhiteboardValue};
