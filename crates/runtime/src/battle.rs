//! Battle driving: applies player actions and resumes scheduled
//! continuations.
//!
//! The driver is the only code that touches an active [`BattleSession`]. It
//! forwards each resolved action's events to the presentation and
//! progression collaborators, mirrors them onto the event bus, and resumes
//! the session's pending continuation after the configured pause. Pauses
//! are presentation pacing only; zeroing them changes nothing about the
//! outcome.

use std::sync::Arc;
use std::time::Duration;

use battle_core::{
    ActionOutcome, BattleEvent, BattleSession, CombatantTemplate, ItemOracle, PcgRng,
    PendingResolution, PlayerProgressState, TerminalSignal,
};
use battle_content::PacingTuning;
use tokio::time::sleep;

use crate::api::{PresentationSink, ProgressionSink, Result};
use crate::events::{Event, EventBus};
use crate::presentation::BattleLog;
use crate::runtime::RuntimeConfig;

pub(crate) struct BattleDriver {
    session: BattleSession,
    rng: PcgRng,
    items: Arc<dyn ItemOracle>,
    pacing: PacingTuning,
    log: BattleLog,
    bus: EventBus,
    presentation: Arc<dyn PresentationSink>,
    progression: Arc<dyn ProgressionSink>,
    finished: Option<TerminalSignal>,
}

impl BattleDriver {
    /// Start a battle and dispatch its initial events.
    ///
    /// If the enemy is faster, the pending enemy turn stays parked until the
    /// runtime settles it.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn start(
        template: &CombatantTemplate,
        player: &PlayerProgressState,
        config: &RuntimeConfig,
        seed: u64,
        items: Arc<dyn ItemOracle>,
        bus: EventBus,
        presentation: Arc<dyn PresentationSink>,
        progression: Arc<dyn ProgressionSink>,
    ) -> Result<Self> {
        let (session, events) = BattleSession::start(template, player, config.battle.clone(), seed)?;

        let mut driver = Self {
            session,
            rng: PcgRng,
            items,
            pacing: config.pacing,
            log: BattleLog::new(config.log_capacity),
            bus,
            presentation,
            progression,
            finished: None,
        };
        driver.dispatch(&events);
        Ok(driver)
    }

    /// Apply a player attack. Returns false if the session ignored it.
    pub(crate) fn player_attack(&mut self, player: &PlayerProgressState) -> bool {
        let outcome = self
            .session
            .player_attack(player, &self.rng, self.items.as_ref());
        self.apply("attack", outcome)
    }

    /// Attempt to flee. Returns false if the session ignored it.
    pub(crate) fn attempt_flee(&mut self) -> bool {
        let outcome = self.session.attempt_flee();
        self.apply("flee", outcome)
    }

    /// Resume pending continuations until the session owes nothing more.
    ///
    /// An enemy turn is resolved after the enemy-turn pause; a teardown
    /// waits out the outcome pause and records the terminal signal for the
    /// runtime to collect via [`BattleDriver::take_finished`].
    pub(crate) async fn run_pending(&mut self, player: &mut PlayerProgressState) {
        loop {
            match self.session.pending().cloned() {
                Some(PendingResolution::EnemyResolve) => {
                    sleep(Duration::from_millis(self.pacing.enemy_turn_delay_ms)).await;
                    let outcome = self.session.resolve_enemy_turn(player, &self.rng);
                    self.apply("enemy turn", outcome);
                }
                Some(PendingResolution::Teardown(signal)) => {
                    sleep(self.teardown_delay(&signal)).await;
                    let signal = self
                        .session
                        .take_teardown()
                        .expect("teardown was pending a moment ago");
                    self.finished = Some(signal);
                    return;
                }
                None => return,
            }
        }
    }

    fn teardown_delay(&self, signal: &TerminalSignal) -> Duration {
        let millis = match signal {
            TerminalSignal::Victory { .. } => self.pacing.victory_delay_ms,
            TerminalSignal::GameOver => self.pacing.defeat_delay_ms,
            // Fleeing aborts the session immediately.
            TerminalSignal::Fled { .. } => 0,
        };
        Duration::from_millis(millis)
    }

    fn apply(&mut self, action: &str, outcome: ActionOutcome) -> bool {
        match outcome {
            ActionOutcome::Applied(events) => {
                self.dispatch(&events);
                true
            }
            ActionOutcome::Ignored => {
                tracing::debug!(
                    action,
                    state = %self.session.state(),
                    "battle action ignored"
                );
                false
            }
        }
    }

    fn dispatch(&mut self, events: &[BattleEvent]) {
        for event in events {
            match event {
                BattleEvent::Started {
                    player_name,
                    enemy_name,
                } => {
                    tracing::info!(player = %player_name, enemy = %enemy_name, "battle started");
                    self.presentation.battle_started(player_name, enemy_name);
                }
                BattleEvent::Log(line) => {
                    self.log.push(line.clone());
                    self.presentation.log_line(line);
                }
                BattleEvent::PlayerVitalsChanged { health, mana } => {
                    self.presentation.player_vitals(*health, *mana);
                }
                BattleEvent::EnemyHealthChanged { health } => {
                    self.presentation.enemy_health(*health);
                }
                BattleEvent::InputEnabled(enabled) => {
                    self.presentation.input_enabled(*enabled);
                }
                BattleEvent::RewardsGranted(rewards) => {
                    self.progression.grant_rewards(rewards);
                }
                // The terminal event is published by the runtime once the
                // teardown pause has elapsed.
                BattleEvent::Terminal(_) => {}
            }
            self.bus.publish(Event::Battle(event.clone()));
        }
    }

    /// Collect the terminal signal once the battle has wound down.
    pub(crate) fn take_finished(&mut self) -> Option<TerminalSignal> {
        self.finished.take()
    }

    pub(crate) fn session(&self) -> &BattleSession {
        &self.session
    }

    pub(crate) fn log(&self) -> &BattleLog {
        &self.log
    }
}
