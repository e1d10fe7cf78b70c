//! Turn sequencing and action resolution.
//!
//! The [`BattleEngine`] is the authoritative reducer for
//! [`BattleState`]: it selects the next combatant to act, applies condition
//! ticks, resolves submitted intents and detects the end of the battle.
//! Hosts construct it as a short-lived view over the state and the event
//! queue they own.
//!
//! Action resolution is two-phase: `submit_attack`/`submit_skill` apply the
//! full effect of one action and return; [`BattleEngine::advance_turn`] is
//! the explicit continuation the host invokes once it considers the action
//! resolved. A headless harness calls it immediately; a presentation layer
//! may delay it for pacing.

mod errors;

pub use errors::ActionError;

use crate::combat::check_hit;
use crate::env::{BattleEnv, compute_seed};
use crate::event::{BattleEvent, EventQueue};
use crate::intent::ActionIntent;
use crate::skill::{EffectKind, SkillState, TargetShape};
use crate::state::{BattleState, CombatantId, Outcome, Side};

/// Result of advancing the turn machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnProgress {
    /// A combatant's turn has begun; the engine awaits its action.
    Acting(CombatantId),

    /// The battle is over; no further turns will be taken.
    Finished(Outcome),
}

/// Battle engine that owns turn order, action resolution and victory
/// detection.
///
/// All state mutation flows through this type; queries go through
/// [`BattleState`] directly.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    events: &'a mut EventQueue,
}

impl<'a> BattleEngine<'a> {
    /// Creates an engine view over the given state and event queue.
    pub fn new(state: &'a mut BattleState, events: &'a mut EventQueue) -> Self {
        Self { state, events }
    }

    // ========================================================================
    // Turn Machine
    // ========================================================================

    /// Advances to the next combatant whose turn it is.
    ///
    /// Checks for a defeated roster first; otherwise selects the first
    /// living member of the active side that has not acted this round,
    /// switching sides (and resetting the acted flags of the fresh side)
    /// when the current side is spent. The round counter increments every
    /// time the turn switches back to the player side.
    ///
    /// Beginning a turn applies the combatant's condition ticks; a
    /// combatant killed by its own conditions never acts and selection
    /// continues with the next candidate.
    ///
    /// Once the battle is over this is a no-op reporting the outcome.
    pub fn advance_turn(&mut self) -> TurnProgress {
        loop {
            if let Some(outcome) = self.check_battle_over() {
                return TurnProgress::Finished(outcome);
            }

            let side = self.state.turn.active_side;
            let index = match self.state.rosters.side(side).first_ready_index() {
                Some(index) => index,
                None => {
                    let fresh = side.opponent();
                    self.state.turn.active_side = fresh;
                    if fresh == Side::Player {
                        self.state.turn.round += 1;
                    }
                    let roster = self.state.rosters.side_mut(fresh);
                    roster.reset_acted();
                    match roster.first_living_index() {
                        Some(index) => index,
                        // Fully dead roster; the terminal check at the top
                        // of the loop names the winner.
                        None => continue,
                    }
                }
            };

            self.state.turn.active_index = index;
            if let Some(id) = self.begin_turn(side, index) {
                return TurnProgress::Acting(id);
            }
            // Died to its own condition ticks; keep selecting.
        }
    }

    /// Begins the turn of the combatant at `index` on `side`: emits the
    /// turn-start event and applies condition ticks. Returns the id if the
    /// combatant survived its ticks.
    fn begin_turn(&mut self, side: Side, index: usize) -> Option<CombatantId> {
        let combatant = self
            .state
            .rosters
            .side_mut(side)
            .get_mut(index)
            .expect("turn selection only yields valid roster slots");
        debug_assert!(combatant.is_alive(), "selected a dead combatant as active");

        self.events.push(BattleEvent::TurnStarted {
            combatant: combatant.id,
        });
        combatant.tick_conditions(self.events);
        combatant.is_alive().then_some(combatant.id)
    }

    fn check_battle_over(&mut self) -> Option<Outcome> {
        if self.state.outcome != Outcome::InProgress {
            return Some(self.state.outcome);
        }

        let (outcome, winner) = if self.state.rosters.side(Side::Player).is_defeated() {
            (Outcome::EnemyWon, Side::Enemy)
        } else if self.state.rosters.side(Side::Enemy).is_defeated() {
            (Outcome::PlayerWon, Side::Player)
        } else {
            return None;
        };

        self.state.outcome = outcome;
        self.events.push(BattleEvent::BattleEnded { winner });
        Some(outcome)
    }

    // ========================================================================
    // Action Resolution
    // ========================================================================

    /// Applies a declared intent for the active combatant.
    pub fn resolve_intent(
        &mut self,
        env: &BattleEnv<'_>,
        actor: CombatantId,
        intent: &ActionIntent,
    ) -> Result<(), ActionError> {
        match intent {
            ActionIntent::Attack { target } => self.submit_attack(env, actor, *target),
            ActionIntent::CastSkill { skill, target } => {
                self.submit_skill(env, actor, *skill, *target)
            }
        }
    }

    /// Plain weapon attack: flat strength damage on a successful hit roll.
    ///
    /// The attacker consumes its action whether the attack lands or not.
    pub fn submit_attack(
        &mut self,
        env: &BattleEnv<'_>,
        actor: CombatantId,
        target: CombatantId,
    ) -> Result<(), ActionError> {
        self.validate_actor(actor)?;

        let defender = self
            .state
            .rosters
            .combatant(target)
            .ok_or(ActionError::InvalidTarget { target })?;
        if defender.is_dead {
            return Err(ActionError::InvalidTarget { target });
        }
        let dodge = defender.derived.dodge;

        let attacker = self.state.active_combatant();
        let damage = attacker.stats.strength.max(0) as u32;
        let hit_ratio = attacker.derived.hit_ratio;

        let roll = self.roll(env, actor, 0);
        if check_hit(env.config.attack_hit_chance, hit_ratio, dodge, roll) {
            let defender = self
                .state
                .rosters
                .combatant_mut(target)
                .expect("target validated above");
            defender.apply_damage(damage, self.events);
        }

        self.finish_action();
        Ok(())
    }

    /// Casts a bound skill.
    ///
    /// Mana is spent exactly once, regardless of how many targets the skill
    /// ends up affecting. Single-target healing retargets to the living
    /// ally with the lowest health percentage (roster order breaks ties);
    /// area skills affect every living member of the resolved side. Damage
    /// skills roll per target; healing never misses. Attached damage-type
    /// conditions need their own infliction roll, while conditions carried
    /// by healing skills apply unconditionally.
    pub fn submit_skill(
        &mut self,
        env: &BattleEnv<'_>,
        actor: CombatantId,
        skill_index: usize,
        target: CombatantId,
    ) -> Result<(), ActionError> {
        self.validate_actor(actor)?;

        let caster = self.state.active_combatant();
        let caster_side = caster.side;
        let hit_ratio = caster.derived.hit_ratio;
        let skill: SkillState = caster
            .skill(skill_index)
            .cloned()
            .ok_or(ActionError::UnknownSkill { index: skill_index })?;
        let cost = skill.mana_cost();
        if cost > caster.mp.current {
            return Err(ActionError::InsufficientMana {
                cost,
                available: caster.mp.current,
            });
        }

        let targets = self.resolve_targets(&skill, caster_side, target)?;

        // From here on the intent is accepted and the action resolves fully.
        let side = self.state.turn.active_side;
        let index = self.state.turn.active_index;
        self.state
            .rosters
            .side_mut(side)
            .get_mut(index)
            .expect("actor validated above")
            .spend_mana(cost, self.events);

        let mut context = 0u32;
        for target_id in targets {
            match skill.def.kind {
                EffectKind::Damage => {
                    let Some(defender) = self.state.rosters.combatant(target_id) else {
                        continue;
                    };
                    if defender.is_dead {
                        continue;
                    }
                    let dodge = defender.derived.dodge;

                    let roll = self.roll(env, actor, context);
                    context += 1;
                    if !check_hit(skill.def.chance_to_hit, hit_ratio, dodge, roll) {
                        continue;
                    }

                    self.state
                        .rosters
                        .combatant_mut(target_id)
                        .expect("looked up above")
                        .apply_damage(skill.power, self.events);

                    if let Some(bound) = &skill.condition
                        && bound.def.kind == EffectKind::Damage
                    {
                        let roll = self.roll(env, actor, context);
                        context += 1;
                        if check_hit(bound.def.hit_ratio, hit_ratio, dodge, roll) {
                            self.state
                                .rosters
                                .combatant_mut(target_id)
                                .expect("looked up above")
                                .inflict_condition(bound, self.events);
                        }
                    }
                }
                EffectKind::Healing => {
                    let Some(member) = self.state.rosters.combatant_mut(target_id) else {
                        continue;
                    };
                    member.apply_heal(skill.power, self.events);
                    if let Some(bound) = &skill.condition {
                        member.inflict_condition(bound, self.events);
                    }
                }
            }
        }

        self.finish_action();
        Ok(())
    }

    /// Resolves the concrete target list for a cast per the skill's shape.
    fn resolve_targets(
        &self,
        skill: &SkillState,
        caster_side: Side,
        target: CombatantId,
    ) -> Result<Vec<CombatantId>, ActionError> {
        match (skill.def.target_shape, skill.def.kind) {
            // The supplied target is discarded: heal whoever needs it most.
            (TargetShape::Single, EffectKind::Healing) => {
                Ok(vec![self.lowest_health_ally(caster_side)])
            }
            (TargetShape::Single, EffectKind::Damage) => {
                let defender = self
                    .state
                    .rosters
                    .combatant(target)
                    .ok_or(ActionError::InvalidTarget { target })?;
                if defender.is_dead {
                    return Err(ActionError::InvalidTarget { target });
                }
                Ok(vec![target])
            }
            (TargetShape::All, kind) => {
                let side = if kind == EffectKind::Healing {
                    caster_side
                } else {
                    let defender = self
                        .state
                        .rosters
                        .combatant(target)
                        .ok_or(ActionError::InvalidTarget { target })?;
                    if defender.is_dead {
                        return Err(ActionError::InvalidTarget { target });
                    }
                    defender.side
                };
                Ok(self.state.living_members(side))
            }
        }
    }

    /// Living roster-mate with the lowest health percentage; ties broken by
    /// roster order, first match wins.
    fn lowest_health_ally(&self, side: Side) -> CombatantId {
        let mut chosen: Option<(CombatantId, f32)> = None;
        for member in self.state.rosters.side(side).living() {
            let percent = member.hp.percent();
            if chosen.is_none_or(|(_, best)| percent < best) {
                chosen = Some((member.id, percent));
            }
        }
        chosen
            .expect("the acting combatant is alive, so its side has a living member")
            .0
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn validate_actor(&self, actor: CombatantId) -> Result<(), ActionError> {
        if self.state.is_over() {
            return Err(ActionError::TerminalState);
        }
        let active = self.state.active_combatant();
        if active.id != actor || active.has_acted || active.is_dead {
            return Err(ActionError::InvalidTurn {
                actor,
                active: active.id,
            });
        }
        Ok(())
    }

    /// Consumes the active combatant's action and bumps the nonce.
    fn finish_action(&mut self) {
        let side = self.state.turn.active_side;
        let index = self.state.turn.active_index;
        if let Some(active) = self.state.rosters.side_mut(side).get_mut(index) {
            active.has_acted = true;
        }
        self.state.turn.nonce += 1;
    }

    fn roll(&self, env: &BattleEnv<'_>, actor: CombatantId, context: u32) -> u32 {
        let seed = compute_seed(self.state.seed, self.state.turn.nonce, actor.0, context);
        env.rng.roll_d100(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::RngOracle;
    use crate::skill::{ConditionDef, SkillDef};
    use crate::state::{BattleSetup, CombatantSpec};
    use crate::stats::{BaseStats, Formula, StatKind};
    use std::sync::Mutex;

    /// Oracle returning a fixed roll for every check.
    struct FixedRoll(u32);

    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0 - 1
        }

        fn roll_d100(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    /// Oracle returning a scripted sequence of rolls.
    struct SequenceRoll(Mutex<Vec<u32>>);

    impl SequenceRoll {
        fn new(rolls: &[u32]) -> Self {
            let mut rolls: Vec<u32> = rolls.to_vec();
            rolls.reverse();
            Self(Mutex::new(rolls))
        }
    }

    impl RngOracle for SequenceRoll {
        fn next_u32(&self, seed: u64) -> u32 {
            self.roll_d100(seed) - 1
        }

        fn roll_d100(&self, _seed: u64) -> u32 {
            self.0
                .lock()
                .unwrap()
                .pop()
                .expect("test script ran out of rolls")
        }
    }

    const ALWAYS_HIT: FixedRoll = FixedRoll(1);
    const ALWAYS_MISS: FixedRoll = FixedRoll(100);

    fn spec(name: &str) -> CombatantSpec {
        CombatantSpec {
            name: name.into(),
            stats: BaseStats::default(),
            skills: Vec::new(),
        }
    }

    fn heal_skill(shape: TargetShape, cost: u32) -> SkillDef {
        SkillDef {
            name: "Heal".into(),
            kind: EffectKind::Healing,
            target_shape: shape,
            chance_to_hit: 0,
            mana_cost: cost,
            power: Formula::CasterStat {
                stat: StatKind::Intelligence,
                percent: 200,
            },
            condition: None,
        }
    }

    fn fireball() -> SkillDef {
        SkillDef {
            name: "Fireball".into(),
            kind: EffectKind::Damage,
            target_shape: TargetShape::Single,
            chance_to_hit: 80,
            mana_cost: 5,
            power: Formula::Sum(vec![
                Formula::Constant(2),
                Formula::CasterStat {
                    stat: StatKind::Intelligence,
                    percent: 100,
                },
            ]),
            condition: Some(ConditionDef {
                name: "Burning".into(),
                kind: EffectKind::Damage,
                hit_ratio: 70,
                duration: 3,
                power: Formula::Constant(2),
            }),
        }
    }

    fn duel() -> BattleState {
        let setup = BattleSetup {
            player: vec![spec("hero")],
            enemy: vec![spec("goblin")],
        };
        BattleState::initialize(&setup, 42).unwrap()
    }

    fn env<'a>(config: &'a BattleConfig, rng: &'a dyn RngOracle) -> BattleEnv<'a> {
        BattleEnv::new(config, rng)
    }

    #[test]
    fn first_advance_begins_with_first_player_member() {
        let mut state = duel();
        let mut events = EventQueue::new();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(0)));
        assert_eq!(
            events.drain(),
            vec![BattleEvent::TurnStarted {
                combatant: CombatantId(0)
            }]
        );
    }

    #[test]
    fn attack_applies_strength_damage_on_hit() {
        let mut state = duel();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        engine
            .submit_attack(&env(&config, &ALWAYS_HIT), CombatantId(0), CombatantId(1))
            .unwrap();

        let goblin = state.combatant(CombatantId(1)).unwrap();
        assert_eq!(goblin.hp.current, 15); // 25 - strength 10
        assert!(state.combatant(CombatantId(0)).unwrap().has_acted);
    }

    #[test]
    fn missed_attack_still_consumes_the_action() {
        let mut state = duel();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        engine
            .submit_attack(&env(&config, &ALWAYS_MISS), CombatantId(0), CombatantId(1))
            .unwrap();

        assert_eq!(state.combatant(CombatantId(1)).unwrap().hp.current, 25);
        assert!(state.combatant(CombatantId(0)).unwrap().has_acted);
    }

    #[test]
    fn round_increments_once_per_full_cycle() {
        let mut state = duel();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);
        let e = env(&config, &ALWAYS_MISS);

        assert_eq!(engine.state.turn.round, 1);

        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(0)));
        engine
            .submit_attack(&e, CombatantId(0), CombatantId(1))
            .unwrap();

        // switch to enemy side: round unchanged
        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(1)));
        assert_eq!(engine.state.turn.round, 1);
        engine
            .submit_attack(&e, CombatantId(1), CombatantId(0))
            .unwrap();

        // switch back to player side: round increments, acted flags reset
        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(0)));
        assert_eq!(state.turn.round, 2);
        assert!(!state.combatant(CombatantId(0)).unwrap().has_acted);
    }

    #[test]
    fn dead_members_are_skipped_by_turn_selection() {
        let setup = BattleSetup {
            player: vec![spec("a"), spec("b"), spec("c")],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();

        state
            .rosters
            .combatant_mut(CombatantId(1))
            .unwrap()
            .apply_damage(999, &mut events);

        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);
        let e = env(&config, &ALWAYS_MISS);

        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(0)));
        engine
            .submit_attack(&e, CombatantId(0), CombatantId(3))
            .unwrap();

        // member #1 is dead and must be skipped in favor of #2
        assert_eq!(engine.advance_turn(), TurnProgress::Acting(CombatantId(2)));
    }

    #[test]
    fn area_heal_spends_mana_exactly_once() {
        let mut healer = spec("cleric");
        healer.skills = vec![heal_skill(TargetShape::All, 5)];
        let setup = BattleSetup {
            player: vec![healer, spec("a"), spec("b"), spec("c")],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        engine
            .submit_skill(
                &env(&config, &ALWAYS_HIT),
                CombatantId(0),
                0,
                CombatantId(0),
            )
            .unwrap();

        let caster = state.combatant(CombatantId(0)).unwrap();
        assert_eq!(caster.mp.current, caster.mp.max - 5);
    }

    #[test]
    fn single_heal_retargets_to_lowest_health_ally() {
        let mut healer = spec("cleric");
        healer.skills = vec![heal_skill(TargetShape::Single, 5)];
        let setup = BattleSetup {
            player: vec![healer, spec("a"), spec("b")],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();

        // percentages: healer 1.0, a 0.4 (10/25), b 0.72 (18/25)
        state
            .rosters
            .combatant_mut(CombatantId(1))
            .unwrap()
            .apply_damage(15, &mut events);
        state
            .rosters
            .combatant_mut(CombatantId(2))
            .unwrap()
            .apply_damage(7, &mut events);

        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        // the UI-selected target (the enemy!) is discarded by retargeting
        engine
            .submit_skill(
                &env(&config, &ALWAYS_HIT),
                CombatantId(0),
                0,
                CombatantId(3),
            )
            .unwrap();

        // heal power: 2 × int = 20, clamped to max
        assert_eq!(state.combatant(CombatantId(1)).unwrap().hp.current, 25);
        assert_eq!(state.combatant(CombatantId(2)).unwrap().hp.current, 18);
    }

    #[test]
    fn damage_skill_inflicts_condition_on_separate_roll() {
        let mut mage = spec("mage");
        mage.skills = vec![fireball()];
        let setup = BattleSetup {
            player: vec![mage],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        // first roll: skill hits; second roll: condition check misses
        let rng = SequenceRoll::new(&[1, 100]);
        engine
            .submit_skill(&env(&config, &rng), CombatantId(0), 0, CombatantId(1))
            .unwrap();

        let target = state.combatant(CombatantId(1)).unwrap();
        assert_eq!(target.hp.current, 25 - 12); // power 2 + int 10
        assert!(!target.has_condition("Burning"));

        // next round: both rolls land
        let mut events = EventQueue::new();
        let mut engine = BattleEngine::new(&mut state, &mut events);
        engine.advance_turn(); // enemy turn
        engine
            .submit_attack(&env(&config, &ALWAYS_MISS), CombatantId(1), CombatantId(0))
            .unwrap();
        engine.advance_turn(); // player again
        let rng = SequenceRoll::new(&[1, 1]);
        engine
            .submit_skill(&env(&config, &rng), CombatantId(0), 0, CombatantId(1))
            .unwrap();
        assert!(
            state
                .combatant(CombatantId(1))
                .unwrap()
                .has_condition("Burning")
        );
    }

    #[test]
    fn condition_ticks_at_the_start_of_its_owners_turn() {
        let mut mage = spec("mage");
        mage.skills = vec![fireball()];
        let setup = BattleSetup {
            player: vec![mage],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        engine
            .submit_skill(
                &env(&config, &ALWAYS_HIT),
                CombatantId(0),
                0,
                CombatantId(1),
            )
            .unwrap();
        let hp_after_cast = state.combatant(CombatantId(1)).unwrap().hp.current;

        let mut engine = BattleEngine::new(&mut state, &mut events);
        engine.advance_turn(); // enemy turn begins: Burning ticks for 2

        assert_eq!(
            state.combatant(CombatantId(1)).unwrap().hp.current,
            hp_after_cast - 2
        );
        assert_eq!(
            state
                .combatant(CombatantId(1))
                .unwrap()
                .conditions
                .first()
                .unwrap()
                .remaining,
            2
        );
    }

    #[test]
    fn death_by_tick_skips_the_turn_and_can_end_the_battle() {
        let mut state = duel();
        let mut events = EventQueue::new();

        // wound the goblin, then plant a lethal burn directly
        let goblin = state.rosters.combatant_mut(CombatantId(1)).unwrap();
        goblin.apply_damage(24, &mut events);
        goblin.inflict_condition(
            &crate::skill::BoundCondition {
                def: ConditionDef {
                    name: "Burning".into(),
                    kind: EffectKind::Damage,
                    hit_ratio: 100,
                    duration: 3,
                    power: Formula::Constant(2),
                },
                power: 2,
            },
            &mut events,
        );

        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);
        let e = env(&config, &ALWAYS_MISS);

        engine.advance_turn();
        engine
            .submit_attack(&e, CombatantId(0), CombatantId(1))
            .unwrap();

        // the goblin's turn begins, the burn kills it, the battle ends
        assert_eq!(
            engine.advance_turn(),
            TurnProgress::Finished(Outcome::PlayerWon)
        );
        assert!(state.is_over());
        assert!(
            events
                .drain()
                .contains(&BattleEvent::BattleEnded {
                    winner: Side::Player
                })
        );
    }

    #[test]
    fn terminal_battle_rejects_further_actions() {
        let mut state = duel();
        let mut events = EventQueue::new();
        state
            .rosters
            .combatant_mut(CombatantId(1))
            .unwrap()
            .apply_damage(999, &mut events);

        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        assert_eq!(
            engine.advance_turn(),
            TurnProgress::Finished(Outcome::PlayerWon)
        );
        assert_eq!(
            engine.submit_attack(&env(&config, &ALWAYS_HIT), CombatantId(0), CombatantId(1)),
            Err(ActionError::TerminalState)
        );

        // repeated advancement keeps reporting the outcome without
        // re-emitting the end event
        events.drain();
        let mut engine = BattleEngine::new(&mut state, &mut events);
        assert_eq!(
            engine.advance_turn(),
            TurnProgress::Finished(Outcome::PlayerWon)
        );
        assert!(events.is_empty());
    }

    #[test]
    fn wrong_actor_is_rejected_without_side_effects() {
        let mut state = duel();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        let err = engine
            .submit_attack(&env(&config, &ALWAYS_HIT), CombatantId(1), CombatantId(0))
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidTurn {
                actor: CombatantId(1),
                active: CombatantId(0),
            }
        );
        assert_eq!(state.combatant(CombatantId(0)).unwrap().hp.current, 25);
        assert_eq!(state.turn.nonce, 0);
    }

    #[test]
    fn insufficient_mana_is_rejected_not_downgraded() {
        let mut mage = spec("mage");
        mage.skills = vec![heal_skill(TargetShape::Single, 999)];
        let setup = BattleSetup {
            player: vec![mage],
            enemy: vec![spec("x")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();
        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        let err = engine
            .submit_skill(
                &env(&config, &ALWAYS_HIT),
                CombatantId(0),
                0,
                CombatantId(0),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientMana {
                cost: 999,
                available: 40,
            }
        );
        assert!(!state.combatant(CombatantId(0)).unwrap().has_acted);
        assert_eq!(state.combatant(CombatantId(0)).unwrap().mp.current, 40);
    }

    #[test]
    fn attacking_a_dead_target_is_invalid() {
        let setup = BattleSetup {
            player: vec![spec("hero")],
            enemy: vec![spec("a"), spec("b")],
        };
        let mut state = BattleState::initialize(&setup, 0).unwrap();
        let mut events = EventQueue::new();
        state
            .rosters
            .combatant_mut(CombatantId(1))
            .unwrap()
            .apply_damage(999, &mut events);

        let config = BattleConfig::default();
        let mut engine = BattleEngine::new(&mut state, &mut events);

        engine.advance_turn();
        assert_eq!(
            engine.submit_attack(&env(&config, &ALWAYS_HIT), CombatantId(0), CombatantId(1)),
            Err(ActionError::InvalidTarget {
                target: CombatantId(1)
            })
        );
    }

    #[test]
    fn player_defeat_is_symmetric() {
        let mut state = duel();
        let mut events = EventQueue::new();
        state
            .rosters
            .combatant_mut(CombatantId(0))
            .unwrap()
            .apply_damage(999, &mut events);

        let mut engine = BattleEngine::new(&mut state, &mut events);
        assert_eq!(
            engine.advance_turn(),
            TurnProgress::Finished(Outcome::EnemyWon)
        );
    }
}
