//! The battle session: one encounter from start to terminal state.

use crate::battle::event::{BattleEvent, TerminalSignal, VictoryRewards};
use crate::battle::state::BattleState;
use crate::combat::{
    Actor, EnemyAction, choose_enemy_action, determine_first_actor, player_attack_damage,
};
use crate::combatant::{
    CombatantInstance, CombatantTemplate, InvalidCombatant, PlayerProgressState, ResourceMeter,
    ReturnLocation,
};
use crate::config::BattleConfig;
use crate::env::{ItemOracle, RngOracle, compute_seed};
use crate::loot::roll_drops;

/// Primary roll of an action: damage variance or enemy action choice.
const CTX_PRIMARY: u32 = 0;

/// Result of requesting an action from the session.
///
/// `Ignored` is the silent-recovery path: the request arrived while the
/// session was inactive, the turn belonged to the other side, or a
/// continuation was still pending. Nothing was mutated.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Applied(Vec<BattleEvent>),
    Ignored,
}

impl ActionOutcome {
    pub fn was_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Events produced by the action, empty if it was ignored.
    pub fn events(&self) -> &[BattleEvent] {
        match self {
            Self::Applied(events) => events,
            Self::Ignored => &[],
        }
    }
}

/// A continuation the session expects its driver to resume.
///
/// Cosmetic pauses are not game logic. The session parks what should happen
/// next here and the runtime resumes it after its configured delay; headless
/// tests resume immediately.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingResolution {
    /// The enemy owes an action; resume via [`BattleSession::resolve_enemy_turn`].
    EnemyResolve,
    /// The battle ended; deliver the signal via [`BattleSession::take_teardown`].
    Teardown(TerminalSignal),
}

/// One active encounter between the player and a spawned enemy.
///
/// The session owns the enemy instance and borrows the persistent player
/// state per call. All mutation goes through the three action entry points,
/// each of which checks turn ownership first and reports an ignored action
/// instead of failing.
#[derive(Clone, Debug)]
pub struct BattleSession {
    enemy: CombatantInstance,
    state: BattleState,
    active: bool,
    pending: Option<PendingResolution>,
    return_location: ReturnLocation,
    config: BattleConfig,
    seed: u64,
    nonce: u64,
}

impl BattleSession {
    /// Start a battle against an enemy spawned from `template`.
    ///
    /// Validates and instantiates the enemy, decides turn order from the
    /// speed stats, and returns the session together with the initial event
    /// stream (battle initialized, vitals, whose turn it is). If the enemy
    /// is faster, an [`PendingResolution::EnemyResolve`] continuation is
    /// parked immediately.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCombatant`] if the template fails validation; no
    /// session exists in that case.
    pub fn start(
        template: &CombatantTemplate,
        player: &PlayerProgressState,
        config: BattleConfig,
        seed: u64,
    ) -> Result<(Self, Vec<BattleEvent>), InvalidCombatant> {
        let enemy = template.instantiate()?;

        let mut session = Self {
            state: BattleState::Start,
            active: true,
            pending: None,
            return_location: player.return_location.clone(),
            config,
            seed,
            nonce: 0,
            enemy,
        };

        let mut events = vec![
            BattleEvent::Started {
                player_name: player.name.clone(),
                enemy_name: session.enemy.name().to_owned(),
            },
            session.enemy_health_event(),
            Self::player_vitals_event(player),
        ];

        let player_speed = player.speed.max(0) as u32;
        match determine_first_actor(player_speed, session.enemy.stats().speed) {
            Actor::Player => {
                session.state = BattleState::PlayerTurn;
                events.push(BattleEvent::InputEnabled(true));
                events.push(BattleEvent::Log("Your turn!".into()));
            }
            Actor::Enemy => {
                session.state = BattleState::EnemyTurn;
                session.pending = Some(PendingResolution::EnemyResolve);
                events.push(BattleEvent::InputEnabled(false));
                events.push(BattleEvent::Log("Enemy's turn!".into()));
            }
        }

        Ok((session, events))
    }

    /// Resolve a player basic attack.
    ///
    /// Ignored unless the session is active, it is the player's turn, and no
    /// continuation is pending. Applies variance-scaled damage to the enemy
    /// and transitions to `Victory` or hands the turn to the enemy.
    pub fn player_attack(
        &mut self,
        player: &PlayerProgressState,
        rng: &(impl RngOracle + ?Sized),
        items: &(impl ItemOracle + ?Sized),
    ) -> ActionOutcome {
        if !self.active || self.state != BattleState::PlayerTurn || self.pending.is_some() {
            return ActionOutcome::Ignored;
        }

        let multiplier = rng.range(
            self.roll_seed(Actor::Player, CTX_PRIMARY),
            self.config.variance_min,
            self.config.variance_max,
        );
        let raw = player_attack_damage(player.attack.max(0) as u32, multiplier);
        let actual = self.enemy.apply_damage(raw);

        let mut events = vec![
            BattleEvent::Log(format!("You attack for {actual} damage!")),
            self.enemy_health_event(),
        ];

        if self.enemy.is_defeated() {
            self.finish_victory(rng, items, &mut events);
        } else {
            self.state = BattleState::EnemyTurn;
            self.pending = Some(PendingResolution::EnemyResolve);
            events.push(BattleEvent::InputEnabled(false));
            events.push(BattleEvent::Log("Enemy's turn...".into()));
        }

        self.nonce += 1;
        ActionOutcome::Applied(events)
    }

    /// Resolve the enemy's turn after the driver's pause.
    ///
    /// Ignored unless an enemy continuation is pending. Chooses between the
    /// basic and special attack, damages the player's persistent health
    /// (damage, then defeat check, then transition, atomically), and either
    /// ends in `Defeat` or returns the turn to the player.
    pub fn resolve_enemy_turn(
        &mut self,
        player: &mut PlayerProgressState,
        rng: &(impl RngOracle + ?Sized),
    ) -> ActionOutcome {
        if !self.active
            || self.state != BattleState::EnemyTurn
            || self.pending != Some(PendingResolution::EnemyResolve)
        {
            return ActionOutcome::Ignored;
        }
        self.pending = None;

        let roll = rng.roll_percent(self.roll_seed(Actor::Enemy, CTX_PRIMARY));
        let special = self.enemy.special();
        let (damage, label) = match choose_enemy_action(special.chance, roll) {
            EnemyAction::Special => (special.damage, special.name.clone()),
            EnemyAction::Basic => (self.enemy.stats().attack, "Attack".to_owned()),
        };

        let actual = player.apply_damage(damage);

        let mut events = vec![
            BattleEvent::Log(format!(
                "{} uses {} for {} damage!",
                self.enemy.name(),
                label,
                actual
            )),
            Self::player_vitals_event(player),
        ];

        if player.is_defeated() {
            self.state = BattleState::Defeat;
            self.active = false;
            self.pending = Some(PendingResolution::Teardown(TerminalSignal::GameOver));
            events.push(BattleEvent::InputEnabled(false));
            events.push(BattleEvent::Log("Defeat! You were defeated...".into()));
        } else {
            self.state = BattleState::PlayerTurn;
            events.push(BattleEvent::InputEnabled(true));
            events.push(BattleEvent::Log("Your turn!".into()));
        }

        self.nonce += 1;
        ActionOutcome::Applied(events)
    }

    /// Abort the session by fleeing.
    ///
    /// Legal only during the player's turn of an active session; in
    /// particular it is refused while an enemy continuation is pending. No
    /// trade is resolved.
    pub fn attempt_flee(&mut self) -> ActionOutcome {
        if !self.active || self.state != BattleState::PlayerTurn || self.pending.is_some() {
            return ActionOutcome::Ignored;
        }

        self.state = BattleState::Fled;
        self.active = false;
        self.pending = Some(PendingResolution::Teardown(TerminalSignal::Fled {
            return_location: self.return_location.clone(),
        }));

        ActionOutcome::Applied(vec![
            BattleEvent::InputEnabled(false),
            BattleEvent::Log("You fled from the battle!".into()),
        ])
    }

    fn finish_victory(
        &mut self,
        rng: &(impl RngOracle + ?Sized),
        items: &(impl ItemOracle + ?Sized),
        events: &mut Vec<BattleEvent>,
    ) {
        self.state = BattleState::Victory;
        self.active = false;

        let rewards = VictoryRewards {
            experience: self.enemy.experience_reward(),
            gold: self.enemy.gold_reward(),
            items: roll_drops(self.enemy.loot(), items, rng, self.seed, self.nonce),
        };

        events.push(BattleEvent::InputEnabled(false));
        events.push(BattleEvent::Log(format!(
            "Victory! Gained {} XP!",
            rewards.experience
        )));
        events.push(BattleEvent::RewardsGranted(rewards));

        self.pending = Some(PendingResolution::Teardown(TerminalSignal::Victory {
            return_location: self.return_location.clone(),
        }));
    }

    /// Consume a parked teardown signal, if the battle has ended.
    pub fn take_teardown(&mut self) -> Option<TerminalSignal> {
        match self.pending.take() {
            Some(PendingResolution::Teardown(signal)) => Some(signal),
            other => {
                self.pending = other;
                None
            }
        }
    }

    fn roll_seed(&self, actor: Actor, context: u32) -> u64 {
        compute_seed(self.seed, self.nonce, actor.id(), context)
    }

    fn enemy_health_event(&self) -> BattleEvent {
        BattleEvent::EnemyHealthChanged {
            health: ResourceMeter::new(self.enemy.current_health(), self.enemy.stats().max_health),
        }
    }

    fn player_vitals_event(player: &PlayerProgressState) -> BattleEvent {
        BattleEvent::PlayerVitalsChanged {
            health: player.health,
            mana: player.mana,
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<&PendingResolution> {
        self.pending.as_ref()
    }

    pub fn enemy(&self) -> &CombatantInstance {
        &self.enemy
    }

    pub fn return_location(&self) -> &ReturnLocation {
        &self.return_location
    }
}
