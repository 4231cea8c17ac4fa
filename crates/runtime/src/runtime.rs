//! Runtime orchestrator and builder.
//!
//! [`Runtime`] wires the content catalogs, collaborator sinks, event bus,
//! overworld encounter tracking, and the active battle into one API. It is
//! the single terminal path for battles: whatever the outcome, teardown
//! resets the encounter counter before control returns to the overworld.

use std::sync::Arc;

use battle_core::{
    BattleConfig, BattleEvent, BattleState, CombatantTemplate, EncounterConfig, ItemDefinition,
    ItemOracle, PlayerProgressState, ReturnLocation, TerminalSignal, WorldPosition, compute_seed,
};
use battle_content::{ContentFactory, GameTuning, PacingTuning};

use crate::api::{
    NullOverworld, NullPresentation, NullProgression, OverworldSink, PlayerActionProvider,
    PlayerCommand, PresentationSink, ProgressionSink, Result, RuntimeError,
};
use crate::battle::BattleDriver;
use crate::events::{EncounterEvent, Event, EventBus, Topic};
use crate::handoff::EncounterHandoff;
use crate::oracle::ItemOracleImpl;
use crate::overworld::OverworldDriver;
use crate::presentation::BattleLog;

/// Seed derivation contexts for the runtime's sub-systems.
const SEED_CTX_BATTLE: u32 = 0;
const SEED_CTX_TRACKER: u32 = 1;

/// Actor id used for draws that belong to no combatant.
const SYSTEM_ACTOR: u32 = u32::MAX;

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub encounter: EncounterConfig,
    pub pacing: PacingTuning,
    pub step_distance: f32,
    pub log_capacity: usize,
}

impl RuntimeConfig {
    /// Zero every presentation pause. Outcomes are unaffected; headless
    /// and test execution use this to fast-forward battles.
    pub fn instant_pacing(mut self) -> Self {
        self.pacing = PacingTuning {
            enemy_turn_delay_ms: 0,
            victory_delay_ms: 0,
            defeat_delay_ms: 0,
        };
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from(GameTuning::default())
    }
}

impl From<GameTuning> for RuntimeConfig {
    fn from(tuning: GameTuning) -> Self {
        Self {
            battle: tuning.battle,
            encounter: tuning.encounter,
            pacing: tuning.pacing,
            step_distance: tuning.overworld.step_distance,
            log_capacity: BattleLog::DEFAULT_CAPACITY,
        }
    }
}

/// Orchestrates overworld encounter tracking and active battles.
pub struct Runtime {
    config: RuntimeConfig,
    player: PlayerProgressState,
    enemy_ids: Vec<String>,
    enemy_templates: Vec<CombatantTemplate>,
    items: Arc<ItemOracleImpl>,
    bus: EventBus,
    presentation: Arc<dyn PresentationSink>,
    progression: Arc<dyn ProgressionSink>,
    overworld_sink: Arc<dyn OverworldSink>,
    overworld: OverworldDriver,
    battle: Option<BattleDriver>,
    last_outcome: Option<TerminalSignal>,
    current_scene: String,
    base_seed: u64,
    battles_started: u64,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    /// Feed a player movement update from the overworld.
    ///
    /// Counts steps, runs the encounter check, and on a trigger selects the
    /// enemy, records the return location, and starts the battle. Returns
    /// true when a battle started. Movement during an active battle is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::Encounter`] when the trigger fires
    /// against an unusable enemy pool or dangling loot data; no battle is
    /// started in that case.
    pub async fn track_movement(&mut self, position: WorldPosition) -> Result<bool> {
        if self.battle.is_some() {
            return Ok(false);
        }

        if !self.overworld.track_movement(position) {
            return Ok(false);
        }

        let (enemy_id, template) = {
            let rng = *self.overworld.rng();
            let template = self.overworld.tracker_mut().select_enemy(
                &self.enemy_templates,
                self.items.as_ref(),
                &rng,
            )?;
            let index = self
                .enemy_templates
                .iter()
                .position(|candidate| std::ptr::eq(candidate, template))
                .expect("selected template comes from the pool");
            (self.enemy_ids[index].clone(), template.clone())
        };

        self.player.return_location = ReturnLocation::new(self.current_scene.clone(), position);
        self.bus.publish(Event::Encounter(EncounterEvent::Triggered {
            enemy_id: enemy_id.clone(),
        }));

        let handoff = EncounterHandoff::new(enemy_id, template, self.player.return_location.clone());
        self.start_encounter(handoff).await?;
        Ok(true)
    }

    /// Start a battle against a catalog enemy directly, bypassing the
    /// random trigger. Used by scripted sequences and tests.
    pub async fn start_battle(&mut self, enemy_id: &str) -> Result<()> {
        let index = self
            .enemy_ids
            .iter()
            .position(|id| id == enemy_id)
            .ok_or_else(|| RuntimeError::UnknownEnemy(enemy_id.to_owned()))?;

        let handoff = EncounterHandoff::new(
            enemy_id,
            self.enemy_templates[index].clone(),
            self.player.return_location.clone(),
        );
        self.start_encounter(handoff).await
    }

    /// Start a battle from a handoff snapshot.
    pub async fn start_encounter(&mut self, handoff: EncounterHandoff) -> Result<()> {
        let seed = compute_seed(
            self.base_seed,
            self.battles_started,
            SYSTEM_ACTOR,
            SEED_CTX_BATTLE,
        );
        self.battles_started += 1;

        let driver = BattleDriver::start(
            &handoff.template,
            &self.player,
            &self.config,
            seed,
            Arc::clone(&self.items) as Arc<dyn ItemOracle + 'static>,
            self.bus.clone(),
            self.presentation.clone(),
            self.progression.clone(),
        )?;
        self.battle = Some(driver);

        // The enemy may own the first turn.
        self.settle().await;
        Ok(())
    }

    /// Issue a player attack. Returns false if there is no battle or the
    /// session ignored the action.
    pub async fn player_attack(&mut self) -> Result<bool> {
        let applied = match self.battle.as_mut() {
            Some(driver) => driver.player_attack(&self.player),
            None => false,
        };
        self.settle().await;
        Ok(applied)
    }

    /// Attempt to flee the active battle. Returns false if there is no
    /// battle or the session refused (wrong turn, pending enemy action).
    pub async fn attempt_flee(&mut self) -> Result<bool> {
        let applied = match self.battle.as_mut() {
            Some(driver) => driver.attempt_flee(),
            None => false,
        };
        self.settle().await;
        Ok(applied)
    }

    /// Drive the active battle to its end using `provider` for player
    /// intent. Returns the terminal signal.
    pub async fn run_battle(
        &mut self,
        provider: &dyn PlayerActionProvider,
    ) -> Result<Option<TerminalSignal>> {
        loop {
            let Some(driver) = self.battle.as_ref() else {
                break;
            };
            let command = provider.next_command(driver.session()).await;
            match command {
                PlayerCommand::Attack => self.player_attack().await?,
                PlayerCommand::Flee => self.attempt_flee().await?,
            };
        }
        Ok(self.last_outcome.clone())
    }

    /// Resume whatever the active battle owes: a pending enemy turn, then
    /// possibly a teardown. This is the only terminal path; every outcome
    /// resets the encounter counter before the overworld hears about it.
    async fn settle(&mut self) {
        let Some(driver) = self.battle.as_mut() else {
            return;
        };

        driver.run_pending(&mut self.player).await;

        if let Some(signal) = driver.take_finished() {
            self.battle = None;
            self.overworld.reset();
            self.bus
                .publish(Event::Encounter(EncounterEvent::CounterReset));

            tracing::info!(?signal, "battle ended");
            self.overworld_sink.battle_ended(&signal);
            self.bus
                .publish(Event::Battle(BattleEvent::Terminal(signal.clone())));
            self.last_outcome = Some(signal);
        }
    }

    /// Subscribe to a bus topic.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn player(&self) -> &PlayerProgressState {
        &self.player
    }

    /// Mutable access for the progression collaborator (rewards, leveling).
    pub fn player_mut(&mut self) -> &mut PlayerProgressState {
        &mut self.player
    }

    /// State of the active battle, if one is running.
    pub fn battle_state(&self) -> Option<BattleState> {
        self.battle.as_ref().map(|driver| driver.session().state())
    }

    /// Battle log of the active battle, if one is running.
    pub fn battle_log(&self) -> Option<&BattleLog> {
        self.battle.as_ref().map(BattleDriver::log)
    }

    /// Steps walked since the last battle.
    pub fn encounter_steps(&self) -> u32 {
        self.overworld.steps()
    }

    /// Terminal signal of the most recently finished battle.
    pub fn last_outcome(&self) -> Option<&TerminalSignal> {
        self.last_outcome.as_ref()
    }
}

/// Builder assembling a [`Runtime`] from content, sinks, and tuning.
pub struct RuntimeBuilder {
    tuning: GameTuning,
    enemies: Vec<(String, CombatantTemplate)>,
    items: Vec<(String, ItemDefinition)>,
    player: PlayerProgressState,
    seed: Option<u64>,
    scene: String,
    origin: WorldPosition,
    instant_pacing: bool,
    presentation: Option<Arc<dyn PresentationSink>>,
    progression: Option<Arc<dyn ProgressionSink>>,
    overworld_sink: Option<Arc<dyn OverworldSink>>,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self {
            tuning: GameTuning::default(),
            enemies: Vec::new(),
            items: Vec::new(),
            player: PlayerProgressState::default(),
            seed: None,
            scene: "Overworld".into(),
            origin: WorldPosition::default(),
            instant_pacing: false,
            presentation: None,
            progression: None,
            overworld_sink: None,
        }
    }
}

impl RuntimeBuilder {
    /// Load tuning and both catalogs from a content factory.
    pub fn with_content(mut self, factory: &ContentFactory) -> Result<Self> {
        self.tuning = factory.load_tuning()?;
        self.enemies = factory.load_enemies()?;
        self.items = factory.load_items()?;
        Ok(self)
    }

    pub fn with_tuning(mut self, tuning: GameTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_enemies(mut self, enemies: Vec<(String, CombatantTemplate)>) -> Self {
        self.enemies = enemies;
        self
    }

    pub fn with_items(mut self, items: Vec<(String, ItemDefinition)>) -> Self {
        self.items = items;
        self
    }

    pub fn with_player(mut self, player: PlayerProgressState) -> Self {
        self.player = player;
        self
    }

    /// Fix the base seed; battles and encounter checks replay exactly.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = scene.into();
        self
    }

    pub fn with_origin(mut self, origin: WorldPosition) -> Self {
        self.origin = origin;
        self
    }

    /// Zero all presentation pauses (headless/test execution).
    pub fn with_instant_pacing(mut self) -> Self {
        self.instant_pacing = true;
        self
    }

    pub fn with_presentation(mut self, sink: Arc<dyn PresentationSink>) -> Self {
        self.presentation = Some(sink);
        self
    }

    pub fn with_progression(mut self, sink: Arc<dyn ProgressionSink>) -> Self {
        self.progression = Some(sink);
        self
    }

    pub fn with_overworld(mut self, sink: Arc<dyn OverworldSink>) -> Self {
        self.overworld_sink = Some(sink);
        self
    }

    pub fn build(self) -> Runtime {
        let mut config = RuntimeConfig::from(self.tuning);
        if self.instant_pacing {
            config = config.instant_pacing();
        }

        let base_seed = self.seed.unwrap_or_else(rand::random);

        let (enemy_ids, enemy_templates) = self.enemies.into_iter().unzip();

        let presentation = self.presentation.unwrap_or_else(|| {
            tracing::debug!("no presentation collaborator configured; notifications skipped");
            Arc::new(NullPresentation)
        });
        let progression = self.progression.unwrap_or_else(|| {
            tracing::debug!("no progression collaborator configured; rewards only logged");
            Arc::new(NullProgression)
        });
        let overworld_sink = self.overworld_sink.unwrap_or_else(|| {
            tracing::debug!("no overworld collaborator configured; terminal signals only logged");
            Arc::new(NullOverworld)
        });

        let overworld = OverworldDriver::new(
            config.encounter,
            compute_seed(base_seed, 0, SYSTEM_ACTOR, SEED_CTX_TRACKER),
            config.step_distance,
            self.origin,
        );

        Runtime {
            config,
            player: self.player,
            enemy_ids,
            enemy_templates,
            items: Arc::new(ItemOracleImpl::from_catalog(self.items)),
            bus: EventBus::new(),
            presentation,
            progression,
            overworld_sink,
            overworld,
            battle: None,
            last_outcome: None,
            current_scene: self.scene,
            base_seed,
            battles_started: 0,
        }
    }
}
