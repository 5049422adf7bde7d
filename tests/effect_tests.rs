//! Effect pipeline integration tests.
//!
//! Resolution is async because manual targeting awaits a handler; the
//! tests drive it on a current-thread tokio runtime.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use async_trait::async_trait;

use lane_ccg::cards::{CardDefinition, CardId, CardType, Deck, Stat};
use lane_ccg::combat::CombatRule;
use lane_ccg::core::{EffectError, EngineConfig, GameEvent, Side};
use lane_ccg::effects::{
    BuffStat, DealDamage, Destroy, Draw, Effect, EffectContext, EffectOutcome, EffectResolver,
    EffectStep, Heal, ManualTargetHandler, SubEffect, Target, TargetCount, TargetFilter, TargetType,
    TargetingMode, WhiteboardValue,
};
use lane_ccg::zones::ZoneKind;
use lane_ccg::{Battle, BattleBuilder, CardHandle};

fn creature(name: &str, power: i64, health: i64) -> Arc<CardDefinition> {
    Arc::new(CardDefinition::new(CardId::new(1), name, CardType::Creature).with_stats(power, health, 1))
}

fn battle() -> Battle {
    let deck = Deck::from_cards((0..4).map(|_| creature("Recruit", 1, 1)));
    BattleBuilder::new()
        .config(EngineConfig::instant())
        .deck(Side::Player, deck)
        .build(5)
        .unwrap()
}

fn spawn(battle: &mut Battle, def: &Arc<CardDefinition>, kind: ZoneKind, side: Side) -> CardHandle {
    battle.board.try_spawn_card(def, kind, side, None).unwrap()
}

/// Picks the first `required` valid targets.
struct PickFirst;

#[async_trait(?Send)]
impl ManualTargetHandler for PickFirst {
    async fn select_targets(
        &self,
        _step: &EffectStep,
        valid: &[Target],
        required: usize,
        _ctx: &EffectContext<'_>,
    ) -> Option<Vec<Target>> {
        Some(valid.iter().take(required).copied().collect())
    }
}

/// Abandons every selection.
struct Walkaway;

#[async_trait(?Send)]
impl ManualTargetHandler for Walkaway {
    async fn select_targets(
        &self,
        _step: &EffectStep,
        _valid: &[Target],
        _required: usize,
        _ctx: &EffectContext<'_>,
    ) -> Option<Vec<Target>> {
        None
    }
}

/// Counts how often it runs; cancels the resolution when asked to.
#[derive(Debug, Default)]
struct Probe {
    runs: Cell<usize>,
    cancel: bool,
}

impl SubEffect for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, _targets: &[Target]) -> Result<(), EffectError> {
        self.runs.set(self.runs.get() + 1);
        if self.cancel {
            ctx.cancel("probe cancelled");
        }
        Ok(())
    }
}

/// Test that an All step hits every hostile creature and reports the total.
#[tokio::test]
async fn test_damage_all_hostile_creatures() {
    let mut battle = battle();
    let a = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);
    let b = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Advance, Side::Enemy);
    let ours = spawn(&mut battle, &creature("Knight", 1, 5), ZoneKind::Combat, Side::Player);

    let effect = Effect::new("Fireball").with_step(
        EffectStep::new(DealDamage::new(2).store_total("dealt"))
            .targeting(TargetType::Creature, TargetingMode::All)
            .with_filter(TargetFilter::Hostile),
    );

    let mut ctx = battle.effect_context(Some(ours), Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 1 });
    assert_eq!(ctx.whiteboard.get_int("dealt"), 4);
    assert_eq!(ctx.targets.len(), 2);
    drop(ctx);

    assert_eq!(battle.board.card(a).unwrap().health, 3);
    assert_eq!(battle.board.card(b).unwrap().health, 3);
    assert_eq!(battle.board.card(ours).unwrap().health, 5);
}

/// Test that All with nothing to hit still succeeds.
#[tokio::test]
async fn test_all_with_no_candidates_succeeds() {
    let mut battle = battle();
    let effect = Effect::new("Quake").with_step(
        EffectStep::new(DealDamage::new(1)).targeting(TargetType::Creature, TargetingMode::All),
    );

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 1 });
}

/// Test that a failed required step stops the effect and an optional one does not.
#[tokio::test]
async fn test_required_and_optional_failures() {
    let mut battle = battle();
    let probe = Arc::new(Probe::default());

    let failing = || {
        EffectStep::new(DealDamage::new(1))
            .targeting(TargetType::Creature, TargetingMode::Random)
            .count(TargetCount::Exactly(1))
    };
    let mut probe_step = EffectStep::new(Heal::new(0));
    probe_step.sub_effect = probe.clone();

    let required = Effect::new("Strict").with_step(failing()).with_step(probe_step.clone());
    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&required, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Aborted { step: 0, error: EffectError::NoValidTargets });
    assert_eq!(probe.runs.get(), 0);

    let lenient = Effect::new("Lenient").with_step(failing().optional()).with_step(probe_step);
    let outcome = EffectResolver::new().execute(&lenient, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 1 });
    assert_eq!(probe.runs.get(), 1);
}

/// Test manual targeting with and without a handler.
#[tokio::test]
async fn test_manual_targeting() {
    let mut battle = battle();
    let first = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Advance, Side::Enemy);
    spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);

    let effect = Effect::new("Smite").with_step(
        EffectStep::new(Destroy::new())
            .targeting(TargetType::Creature, TargetingMode::Manual)
            .count(TargetCount::Exactly(1)),
    );

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Aborted { step: 0, error: EffectError::NoSelectionHandler });

    // Abandoning the choice fails targeting; it does not cancel the effect.
    let outcome = EffectResolver::new().with_handler(Walkaway).execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Aborted { step: 0, error: EffectError::SelectionCancelled });
    assert!(!ctx.is_cancelled());

    let outcome = EffectResolver::new().with_handler(PickFirst).execute(&effect, &mut ctx).await;
    assert!(outcome.is_completed());
    drop(ctx);
    assert!(battle.board.card(first).is_none());
}

/// Test that a manual step needing more targets than exist fails up front.
#[tokio::test]
async fn test_manual_not_enough_targets() {
    let mut battle = battle();
    spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);

    let effect = Effect::new("Chain").with_step(
        EffectStep::new(DealDamage::new(1))
            .targeting(TargetType::Creature, TargetingMode::Manual)
            .count(TargetCount::Exactly(2)),
    );

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().with_handler(PickFirst).execute(&effect, &mut ctx).await;
    assert_eq!(
        outcome,
        EffectOutcome::Aborted { step: 0, error: EffectError::NotEnoughTargets { required: 2, found: 1 } }
    );
}

/// Test "draw two, then discard one of them" through the whiteboard.
#[tokio::test]
async fn test_draw_then_discard_from_whiteboard() {
    let mut battle = battle();
    let effect = Effect::new("Rummage")
        .with_step(EffectStep::new(Draw::new(2).store_drawn("drawn")))
        .with_step(
            EffectStep::new(Destroy::new().store_destroyed("discarded"))
                .targeting(TargetType::Card, TargetingMode::FromWhiteboard("drawn".to_string()))
                .count(TargetCount::Exactly(1)),
        );

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 2 });

    let drawn = ctx.whiteboard.get_targets("drawn").unwrap();
    let discarded = ctx.whiteboard.get_targets("discarded").unwrap();
    assert_eq!(drawn.len(), 2);
    assert_eq!(discarded, vec![drawn[0]]);
    drop(ctx);

    assert_eq!(battle.hand(Side::Player).len(), 1);
    assert_eq!(battle.player(Side::Player).deck.len(), 2);
}

/// Test reading targets from a missing or mistyped key.
#[tokio::test]
async fn test_from_whiteboard_failures() {
    let mut battle = battle();
    let step = EffectStep::new(Destroy::new())
        .targeting(TargetType::Card, TargetingMode::FromWhiteboard("picked".to_string()))
        .count(TargetCount::Exactly(1));
    let effect = Effect::new("Follow-up").with_step(step);

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(
        outcome,
        EffectOutcome::Aborted { step: 0, error: EffectError::MissingWhiteboardTargets("picked".to_string()) }
    );

    ctx.whiteboard.set("picked", WhiteboardValue::Int(3));
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Aborted { step: 0, error: EffectError::NoValidTargets });
}

/// Test that a step can cancel the rest of the effect without undoing itself.
#[tokio::test]
async fn test_cancellation_stops_later_steps() {
    let mut battle = battle();
    let cancel = Arc::new(Probe { runs: Cell::new(0), cancel: true });
    let after = Arc::new(Probe::default());

    let mut first = EffectStep::new(Heal::new(0));
    first.sub_effect = cancel.clone();
    let mut second = EffectStep::new(Heal::new(0));
    second.sub_effect = after.clone();

    let effect = Effect::new("Fizzle")
        .with_step(EffectStep::new(DealDamage::new(2)).targeting(TargetType::Player, TargetingMode::All).with_filter(TargetFilter::Hostile))
        .with_step(first)
        .with_step(second);

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Cancelled { step: 1, reason: "probe cancelled".to_string() });
    drop(ctx);

    assert_eq!(cancel.runs.get(), 1);
    assert_eq!(after.runs.get(), 0);
    assert_eq!(battle.player(Side::Enemy).health, 18);
}

/// Test that Creature targeting excludes other card types.
#[tokio::test]
async fn test_creature_is_narrower_than_card() {
    let mut battle = battle();
    let wall = Arc::new(CardDefinition::new(CardId::new(2), "Wall", CardType::Object).with_stats(0, 3, 0));
    let wall = spawn(&mut battle, &wall, ZoneKind::Advance, Side::Enemy);
    let orc = spawn(&mut battle, &creature("Orc", 1, 3), ZoneKind::Combat, Side::Enemy);

    let by_type = |target_type: TargetType| {
        Effect::new("Sweep").with_step(
            EffectStep::new(DealDamage::new(1))
                .targeting(target_type, TargetingMode::All)
                .with_filter(TargetFilter::InZone(ZoneKind::Advance))
                .store_as("hit"),
        )
    };

    let mut ctx = battle.effect_context(None, Side::Player);
    EffectResolver::new().execute(&by_type(TargetType::Creature), &mut ctx).await;
    assert_eq!(ctx.whiteboard.get_targets("hit"), Some(vec![]));

    EffectResolver::new().execute(&by_type(TargetType::Card), &mut ctx).await;
    assert_eq!(ctx.whiteboard.get_targets("hit"), Some(vec![Target::Card(wall)]));
    drop(ctx);

    assert_eq!(battle.board.card(orc).unwrap().health, 3);
}

/// Test Self and Source targeting and the power floor.
#[tokio::test]
async fn test_self_source_and_buffs() {
    let mut battle = battle();
    let source = spawn(&mut battle, &creature("Cleric", 2, 3), ZoneKind::Combat, Side::Player);
    battle.players[Side::Player].health = 10;
    battle.board.card_mut(source).unwrap().take_damage(2);

    let effect = Effect::new("Blessing")
        .with_step(EffectStep::new(Heal::new(4).store_total("healed")).targeting(TargetType::Player, TargetingMode::Self_))
        .with_step(EffectStep::new(BuffStat::new(Stat::Power, -5)).targeting(TargetType::Creature, TargetingMode::Source))
        .with_step(EffectStep::new(BuffStat::new(Stat::Health, 1)).targeting(TargetType::Card, TargetingMode::Self_));

    let mut ctx = battle.effect_context(Some(source), Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 3 });
    assert_eq!(ctx.whiteboard.get_int("healed"), 4);
    drop(ctx);

    let card = battle.board.card(source).unwrap();
    assert_eq!(card.power, 0);
    assert_eq!(card.health, 2);
    assert_eq!(battle.player(Side::Player).health, 14);

    let orphan = Effect::new("Echo")
        .with_step(EffectStep::new(Destroy::new()).targeting(TargetType::Card, TargetingMode::Source));
    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&orphan, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Aborted { step: 0, error: EffectError::MissingSource });
}

/// Test that a card an effect kills leaves play and stops fighting.
#[tokio::test]
async fn test_lethal_effect_removes_card() {
    let mut battle = battle();
    let orc = Arc::new(
        CardDefinition::new(CardId::new(3), "Orc", CardType::Creature)
            .with_stats(3, 2, 1)
            .with_combat_rule(CombatRule::Melee),
    );
    let orc = spawn(&mut battle, &orc, ZoneKind::Combat, Side::Enemy);
    let slot = battle.board.card(orc).unwrap().slot;
    battle.board.drain_events();

    let effect = Effect::new("Fireball")
        .with_step(
            EffectStep::new(DealDamage::new(5))
                .targeting(TargetType::Creature, TargetingMode::All)
                .with_filter(TargetFilter::Hostile),
        )
        .with_step(
            EffectStep::new(DealDamage::new(1))
                .targeting(TargetType::Creature, TargetingMode::All)
                .with_filter(TargetFilter::Hostile)
                .store_as("second"),
        );

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert_eq!(outcome, EffectOutcome::Completed { steps_run: 2 });
    assert_eq!(ctx.whiteboard.get_targets("second"), Some(vec![]));
    drop(ctx);

    assert!(battle.board.card(orc).is_none());
    assert!(battle.board.slot(slot.unwrap()).unwrap().is_empty());
    assert!(battle
        .board
        .drain_events()
        .contains(&GameEvent::CardDestroyed { card: orc, slot }));

    let players = battle.players.clone();
    let result = battle.board.begin_main_combat(&players, false).unwrap();
    assert!(result.is_empty());
}

/// Test that a lethal health debuff also removes the card.
#[tokio::test]
async fn test_lethal_debuff_removes_card() {
    let mut battle = battle();
    let target = spawn(&mut battle, &creature("Squire", 1, 2), ZoneKind::Advance, Side::Enemy);

    let effect = Effect::new("Wither").with_step(
        EffectStep::new(BuffStat::new(Stat::Health, -2))
            .targeting(TargetType::Creature, TargetingMode::All)
            .with_filter(TargetFilter::Hostile),
    );

    let mut ctx = battle.effect_context(None, Side::Player);
    assert!(EffectResolver::new().execute(&effect, &mut ctx).await.is_completed());
    drop(ctx);
    assert!(battle.board.card(target).is_none());
}

/// Test that a batch keeps going past targets that no longer exist.
#[test]
fn test_batch_with_stale_targets() {
    let mut battle = battle();
    let live = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);
    let gone = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Advance, Side::Enemy);
    battle.board.destroy_card(gone);

    let damage = DealDamage::new(2).store_total("dealt");
    let mut ctx = battle.effect_context(None, Side::Player);

    let mixed = [Target::Card(gone), Target::Card(live)];
    assert_eq!(damage.execute(&mut ctx, &mixed), Ok(()));
    assert_eq!(ctx.whiteboard.get_int("dealt"), 2);

    let stale = [Target::Card(gone), Target::Card(CardHandle(404))];
    assert_eq!(
        damage.execute(&mut ctx, &stale),
        Err(EffectError::AllTargetsFailed { action: "deal damage" })
    );
    assert_eq!(
        Destroy::new().execute(&mut ctx, &stale),
        Err(EffectError::AllTargetsFailed { action: "destroy" })
    );
    drop(ctx);

    assert_eq!(battle.board.card(live).unwrap().health, 3);
}

/// Test that non-positive damage changes nothing and still succeeds.
#[tokio::test]
async fn test_non_positive_damage_is_noop() {
    let mut battle = battle();
    let orc = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);

    for amount in [0, -2] {
        let effect = Effect::new("Fizzle").with_step(
            EffectStep::new(DealDamage::new(amount).store_total("dealt"))
                .targeting(TargetType::Card, TargetingMode::All)
                .with_filter(TargetFilter::Hostile),
        );
        let mut ctx = battle.effect_context(None, Side::Player);
        let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
        assert_eq!(outcome, EffectOutcome::Completed { steps_run: 1 });
        assert_eq!(ctx.whiteboard.get_int("dealt"), 0);
    }

    assert_eq!(battle.board.card(orc).unwrap().health, 5);
    assert_eq!(battle.player(Side::Enemy).health, 20);
}

/// Records the context's target list as seen from inside a step.
#[derive(Debug, Default)]
struct Witness {
    seen: RefCell<Vec<Target>>,
}

impl SubEffect for Witness {
    fn name(&self) -> &'static str {
        "witness"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, _targets: &[Target]) -> Result<(), EffectError> {
        *self.seen.borrow_mut() = ctx.targets.clone();
        Ok(())
    }
}

/// Test that a step sees its own targets on the context while it runs.
#[tokio::test]
async fn test_context_targets_visible_during_step() {
    let mut battle = battle();
    let orc = spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Combat, Side::Enemy);
    let witness = Arc::new(Witness::default());

    let mut step = EffectStep::new(Heal::new(0))
        .targeting(TargetType::Creature, TargetingMode::All)
        .with_filter(TargetFilter::Hostile);
    step.sub_effect = witness.clone();

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&Effect::new("Scry").with_step(step), &mut ctx).await;
    assert!(outcome.is_completed());
    assert_eq!(*witness.seen.borrow(), vec![Target::Card(orc)]);
}

/// Test that random selection is driven by the battle seed.
#[tokio::test]
async fn test_random_targeting_is_seeded() {
    async fn pick(seed: u64) -> Vec<Target> {
        let mut battle = BattleBuilder::new().build(seed).unwrap();
        for _ in 0..4 {
            spawn(&mut battle, &creature("Orc", 1, 5), ZoneKind::Hand, Side::Enemy);
        }
        let effect = Effect::new("Chaos").with_step(
            EffectStep::new(DealDamage::new(1))
                .targeting(TargetType::Creature, TargetingMode::Random)
                .count(TargetCount::Exactly(2))
                .store_as("picked"),
        );
        let mut ctx = battle.effect_context(None, Side::Enemy);
        EffectResolver::new().execute(&effect, &mut ctx).await;
        ctx.whiteboard.get_targets("picked").unwrap()
    }

    let first = pick(99).await;
    assert_eq!(first.len(), 2);
    assert_eq!(first, pick(99).await);
}

/// Test that draw reports partial success and fails only when nothing was drawn.
#[tokio::test]
async fn test_draw_partial_success() {
    let mut battle = battle();
    let effect = Effect::new("Greed").with_step(EffectStep::new(Draw::new(10).store_drawn("drawn")));

    let mut ctx = battle.effect_context(None, Side::Player);
    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert!(outcome.is_completed());
    assert_eq!(ctx.whiteboard.get_targets("drawn").map(|d| d.len()), Some(4));

    let outcome = EffectResolver::new().execute(&effect, &mut ctx).await;
    assert!(matches!(
        outcome,
        EffectOutcome::Aborted { step: 0, error: EffectError::Draw(_) }
    ));
}
