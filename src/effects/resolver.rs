//! Effect resolution.
//!
//! `EffectResolver::execute` runs an effect's steps in order against one
//! `EffectContext`. A failing step aborts the effect unless it is marked
//! optional; a step that cancels the context stops it. Nothing already
//! applied is rolled back.
//!
//! Cards brought to zero health by a step are removed from play as soon
//! as that step finishes, so later steps never see them.
//!
//! Manual targeting is the one suspend point: the resolver awaits the
//! installed `ManualTargetHandler` and resumes with its answer. A handler
//! that gives up fails that step's targeting, which is not the same as
//! cancelling the effect.

use async_trait::async_trait;
use tracing::debug;

use super::context::EffectContext;
use super::effect::{Effect, EffectStep};
use super::targeting::{Target, TargetCount, TargetType, TargetingMode};
use super::whiteboard::WhiteboardValue;
use crate::core::EffectError;

/// Supplies targets for `TargetingMode::Manual` steps.
#[async_trait(?Send)]
pub trait ManualTargetHandler {
    /// Choose `required` targets out of `valid`.
    ///
    /// `None` means the selection was abandoned.
    async fn select_targets(
        &self,
        step: &EffectStep,
        valid: &[Target],
        required: usize,
        ctx: &EffectContext<'_>,
    ) -> Option<Vec<Target>>;
}

/// How a resolution ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// Every step ran or was skipped as optional.
    Completed { steps_run: usize },
    /// A required step failed; later steps did not run.
    Aborted { step: usize, error: EffectError },
    /// The context was cancelled during `step`.
    Cancelled { step: usize, reason: String },
}

impl EffectOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, EffectOutcome::Completed { .. })
    }
}

/// Runs effects.
#[derive(Default)]
pub struct EffectResolver {
    handler: Option<Box<dyn ManualTargetHandler>>,
}

impl std::fmt::Debug for EffectResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectResolver")
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl EffectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_handler(mut self, handler: impl ManualTargetHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Resolve `effect` to completion, failure or cancellation.
    pub async fn execute(&self, effect: &Effect, ctx: &mut EffectContext<'_>) -> EffectOutcome {
        let mut steps_run = 0;

        for (index, step) in effect.steps.iter().enumerate() {
            if let Some(reason) = ctx.cancel_reason() {
                return EffectOutcome::Cancelled { step: index, reason: reason.to_string() };
            }

            match self.run_step(step, ctx).await {
                Ok(()) => steps_run += 1,
                Err(error) if step.optional => {
                    debug!(effect = %effect.name, step = index, %error, "optional step skipped");
                }
                Err(error) => {
                    debug!(effect = %effect.name, step = index, %error, "effect aborted");
                    return EffectOutcome::Aborted { step: index, error };
                }
            }

            if let Some(reason) = ctx.cancel_reason() {
                return EffectOutcome::Cancelled { step: index, reason: reason.to_string() };
            }
        }

        EffectOutcome::Completed { steps_run }
    }

    async fn run_step(&self, step: &EffectStep, ctx: &mut EffectContext<'_>) -> Result<(), EffectError> {
        ctx.targets.clear();

        let targets = self.gather(step, ctx).await?;
        if let Some(key) = &step.store_as {
            ctx.whiteboard.set(key.clone(), WhiteboardValue::Targets(targets.clone()));
        }
        debug!(action = step.sub_effect.name(), targets = targets.len(), "running step");

        ctx.targets = targets.clone();
        let result = step.sub_effect.execute(ctx, &targets);

        // Anything the step left at zero health leaves play before the next step.
        let defeated = ctx.board.clear_defeated();
        if !defeated.is_empty() {
            debug!(removed = defeated.len(), "defeated cards cleared after step");
        }
        result
    }

    async fn gather(&self, step: &EffectStep, ctx: &mut EffectContext<'_>) -> Result<Vec<Target>, EffectError> {
        if step.target_type == TargetType::None {
            return Ok(Vec::new());
        }

        match &step.mode {
            TargetingMode::Self_ => {
                let target = match step.target_type {
                    TargetType::Player => Target::Player(ctx.owner),
                    _ => Target::Card(ctx.source.ok_or(EffectError::MissingSource)?),
                };
                Self::single(step, ctx, target)
            }
            TargetingMode::Source => {
                let source = ctx.source.ok_or(EffectError::MissingSource)?;
                if ctx.board.card(source).is_none() {
                    return Err(EffectError::MissingSource);
                }
                Self::single(step, ctx, Target::Card(source))
            }
            TargetingMode::FromWhiteboard(key) => {
                let stored = ctx
                    .whiteboard
                    .get_targets(key)
                    .ok_or_else(|| EffectError::MissingWhiteboardTargets(key.clone()))?;
                let valid: Vec<Target> = stored.into_iter().filter(|t| Self::is_valid(step, ctx, t)).collect();
                Self::take(step.count, valid)
            }
            TargetingMode::All => Ok(Self::valid_candidates(step, ctx)),
            TargetingMode::Random => {
                let mut valid = Self::valid_candidates(step, ctx);
                ctx.rng.shuffle(&mut valid);
                Self::take(step.count, valid)
            }
            TargetingMode::Manual => self.select_manually(step, &*ctx).await,
        }
    }

    async fn select_manually(&self, step: &EffectStep, ctx: &EffectContext<'_>) -> Result<Vec<Target>, EffectError> {
        let handler = self.handler.as_ref().ok_or(EffectError::NoSelectionHandler)?;
        let valid = Self::valid_candidates(step, ctx);
        let required = match step.count {
            TargetCount::Exactly(n) => n,
            TargetCount::All => valid.len(),
        };
        if valid.len() < required {
            return Err(EffectError::NotEnoughTargets { required, found: valid.len() });
        }

        let chosen = handler
            .select_targets(step, &valid, required, ctx)
            .await
            .ok_or(EffectError::SelectionCancelled)?;

        let mut accepted: Vec<Target> = Vec::with_capacity(required);
        for target in chosen {
            if valid.contains(&target) && !accepted.contains(&target) {
                accepted.push(target);
            }
        }
        if accepted.len() < required {
            return Err(EffectError::NotEnoughTargets { required, found: accepted.len() });
        }
        accepted.truncate(required);
        Ok(accepted)
    }

    fn is_valid(step: &EffectStep, ctx: &EffectContext<'_>, target: &Target) -> bool {
        step.target_type.matches(target, ctx.board) && step.filters.iter().all(|f| f.matches(target, ctx))
    }

    fn valid_candidates(step: &EffectStep, ctx: &EffectContext<'_>) -> Vec<Target> {
        step.target_type
            .candidates(ctx.board)
            .into_iter()
            .filter(|t| Self::is_valid(step, ctx, t))
            .collect()
    }

    fn single(step: &EffectStep, ctx: &EffectContext<'_>, target: Target) -> Result<Vec<Target>, EffectError> {
        if Self::is_valid(step, ctx, &target) {
            Ok(vec![target])
        } else {
            Err(EffectError::NoValidTargets)
        }
    }

    /// Apply the step's count; an empty selection fails unless the count is `All`.
    fn take(count: TargetCount, mut targets: Vec<Target>) -> Result<Vec<Target>, EffectError> {
        if targets.is_empty() && count != TargetCount::All {
            return Err(EffectError::NoValidTargets);
        }
        targets.truncate(count.limit(targets.len()));
        Ok(targets)
    }
}
