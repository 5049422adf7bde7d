//! Effect definitions.
//!
//! An `Effect` is an ordered list of `EffectStep`s. Each step gathers its
//! targets, optionally stores them on the whiteboard, then runs one
//! `SubEffect` against them. Definitions are immutable and shared; all
//! per-resolution state lives in `EffectContext`.

use std::sync::Arc;

use super::filter::TargetFilter;
use super::sub_effect::SubEffect;
use super::targeting::{TargetCount, TargetType, TargetingMode};

/// One step of an effect.
#[derive(Clone, Debug)]
pub struct EffectStep {
    pub target_type: TargetType,
    pub mode: TargetingMode,
    pub count: TargetCount,
    /// AND-combined.
    pub filters: Vec<TargetFilter>,
    pub sub_effect: Arc<dyn SubEffect>,
    /// A failing optional step is skipped instead of aborting the effect.
    pub optional: bool,
    /// Whiteboard key the gathered targets are written to.
    pub store_as: Option<String>,
}

impl EffectStep {
    /// A step that needs no targets.
    pub fn new(sub_effect: impl SubEffect + 'static) -> Self {
        Self {
            target_type: TargetType::None,
            mode: TargetingMode::All,
            count: TargetCount::All,
            filters: Vec::new(),
            sub_effect: Arc::new(sub_effect),
            optional: false,
            store_as: None,
        }
    }

    /// Set what the step targets and how it chooses.
    #[must_use]
    pub fn targeting(mut self, target_type: TargetType, mode: TargetingMode) -> Self {
        self.target_type = target_type;
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn count(mut self, count: TargetCount) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn store_as(mut self, key: impl Into<String>) -> Self {
        self.store_as = Some(key.into());
        self
    }
}

/// A reusable card action.
#[derive(Clone, Debug)]
pub struct Effect {
    pub name: String,
    pub steps: Vec<EffectStep>,
}

impl Effect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: EffectStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
