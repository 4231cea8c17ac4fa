//! End-to-end battle flows through the runtime.

use std::sync::{Arc, Mutex};

use battle_core::{
    BattleState, CombatantTemplate, PlayerProgressState, TerminalSignal, VictoryRewards,
    WorldPosition,
};
use battle_content::{GameTuning, PacingTuning};
use battle_runtime::{
    AttackProvider, EncounterEvent, Event, OverworldSink, PlayerCommand, PresentationSink,
    ProgressionSink, Runtime, RuntimeError, ScriptedProvider, Topic,
};

#[derive(Default)]
struct RecordingProgression {
    rewards: Mutex<Vec<VictoryRewards>>,
}

impl ProgressionSink for RecordingProgression {
    fn grant_rewards(&self, rewards: &VictoryRewards) {
        self.rewards.lock().unwrap().push(rewards.clone());
    }
}

#[derive(Default)]
struct RecordingOverworld {
    signals: Mutex<Vec<TerminalSignal>>,
}

impl OverworldSink for RecordingOverworld {
    fn battle_ended(&self, signal: &TerminalSignal) {
        self.signals.lock().unwrap().push(signal.clone());
    }
}

#[derive(Default)]
struct RecordingPresentation {
    lines: Mutex<Vec<String>>,
}

impl PresentationSink for RecordingPresentation {
    fn log_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_owned());
    }
}

fn weak_enemy() -> (String, CombatantTemplate) {
    (
        "training_dummy".to_owned(),
        CombatantTemplate::builder()
            .name("Training Dummy")
            .max_health(1)
            .attack(0)
            .defense(0)
            .speed(0)
            .rewards(30, 15)
            .special(0, 0, "None")
            .build(),
    )
}

fn lethal_enemy() -> (String, CombatantTemplate) {
    (
        "boss".to_owned(),
        CombatantTemplate::builder()
            .name("Dread Sovereign")
            .max_health(500)
            .attack(40)
            .speed(99)
            .special(100, 5000, "Annihilate")
            .build(),
    )
}

#[tokio::test]
async fn battle_runs_to_victory_and_notifies_collaborators() {
    let progression = Arc::new(RecordingProgression::default());
    let overworld = Arc::new(RecordingOverworld::default());
    let presentation = Arc::new(RecordingPresentation::default());

    let mut runtime = Runtime::builder()
        .with_enemies(vec![weak_enemy()])
        .with_seed(7)
        .with_instant_pacing()
        .with_progression(progression.clone())
        .with_overworld(overworld.clone())
        .with_presentation(presentation.clone())
        .build();

    runtime.start_battle("training_dummy").await.unwrap();
    let outcome = runtime.run_battle(&AttackProvider).await.unwrap();

    assert!(matches!(outcome, Some(TerminalSignal::Victory { .. })));
    assert!(runtime.battle_state().is_none());

    let rewards = progression.rewards.lock().unwrap();
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0].experience, 30);
    assert_eq!(rewards[0].gold, 15);

    let signals = overworld.signals.lock().unwrap();
    assert!(matches!(signals.as_slice(), [TerminalSignal::Victory { .. }]));

    let lines = presentation.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.starts_with("Victory!")));
}

#[tokio::test]
async fn faster_lethal_enemy_defeats_the_player_unprompted() {
    let mut runtime = Runtime::builder()
        .with_enemies(vec![lethal_enemy()])
        .with_seed(3)
        .with_instant_pacing()
        .build();

    // The enemy owns the first turn; starting the battle settles it.
    runtime.start_battle("boss").await.unwrap();

    assert_eq!(runtime.player().health.current, 0);
    assert!(runtime.battle_state().is_none());
    assert!(matches!(
        runtime.last_outcome(),
        Some(TerminalSignal::GameOver)
    ));
}

#[tokio::test]
async fn fleeing_ends_the_session_without_a_trade() {
    let mut runtime = Runtime::builder()
        .with_enemies(vec![(
            "goblin".to_owned(),
            CombatantTemplate::builder().name("Goblin").speed(2).build(),
        )])
        .with_seed(11)
        .with_instant_pacing()
        .build();

    runtime.start_battle("goblin").await.unwrap();
    let outcome = runtime
        .run_battle(&ScriptedProvider::new([PlayerCommand::Flee]))
        .await
        .unwrap();

    assert!(matches!(outcome, Some(TerminalSignal::Fled { .. })));
    // No trade was resolved on the way out.
    assert_eq!(runtime.player().health.current, 100);
}

#[tokio::test]
async fn unknown_enemy_id_is_rejected() {
    let mut runtime = Runtime::builder().with_instant_pacing().build();
    let err = runtime.start_battle("nonexistent").await.unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownEnemy(id) if id == "nonexistent"));
}

#[tokio::test]
async fn movement_triggers_a_forced_encounter() {
    let mut tuning = GameTuning::default();
    tuning.encounter.encounter_chance = 0;
    tuning.pacing = PacingTuning {
        enemy_turn_delay_ms: 0,
        victory_delay_ms: 0,
        defeat_delay_ms: 0,
    };

    let mut runtime = Runtime::builder()
        .with_enemies(vec![weak_enemy()])
        .with_tuning(tuning)
        .with_scene("MeadowScene")
        .with_seed(5)
        .build();

    let mut triggered_at = None;
    for step in 1..=40u32 {
        let position = WorldPosition::new(step as f32 * 0.6, 0.0);
        if runtime.track_movement(position).await.unwrap() {
            triggered_at = Some(step);
            break;
        }
    }

    // Chance 0 still hits the forced cap at max_steps.
    let step = triggered_at.expect("forced encounter never triggered");
    assert!((15..=18).contains(&step), "triggered at step {step}");
    assert_eq!(runtime.battle_state(), Some(BattleState::PlayerTurn));

    // The return location was captured at the trigger point.
    let outcome = runtime.run_battle(&AttackProvider).await.unwrap();
    match outcome {
        Some(TerminalSignal::Victory { return_location }) => {
            assert_eq!(return_location.scene, "MeadowScene");
            assert_eq!(return_location.position.x, step as f32 * 0.6);
        }
        other => panic!("expected victory, got {other:?}"),
    }
}

#[tokio::test]
async fn encounter_counter_resets_on_every_terminal() {
    let mut runtime = Runtime::builder()
        .with_enemies(vec![weak_enemy(), lethal_enemy()])
        .with_seed(13)
        .with_instant_pacing()
        .build();

    // Accumulate steps, then end battles three different ways.
    for step in 1..=3u32 {
        runtime
            .track_movement(WorldPosition::new(step as f32, 0.0))
            .await
            .unwrap();
    }
    assert_eq!(runtime.encounter_steps(), 3);

    // Victory
    runtime.start_battle("training_dummy").await.unwrap();
    runtime.run_battle(&AttackProvider).await.unwrap();
    assert_eq!(runtime.encounter_steps(), 0);

    // Flee
    for step in 1..=3u32 {
        runtime
            .track_movement(WorldPosition::new(step as f32 * 10.0, 5.0))
            .await
            .unwrap();
    }
    assert_eq!(runtime.encounter_steps(), 3);
    runtime.start_battle("training_dummy").await.unwrap();
    runtime
        .run_battle(&ScriptedProvider::new([PlayerCommand::Flee]))
        .await
        .unwrap();
    assert_eq!(runtime.encounter_steps(), 0);

    // Defeat
    for step in 1..=3u32 {
        runtime
            .track_movement(WorldPosition::new(step as f32 * 100.0, 50.0))
            .await
            .unwrap();
    }
    assert_eq!(runtime.encounter_steps(), 3);
    runtime.start_battle("boss").await.unwrap();
    assert!(matches!(
        runtime.last_outcome(),
        Some(TerminalSignal::GameOver)
    ));
    assert_eq!(runtime.encounter_steps(), 0);
}

#[tokio::test]
async fn empty_enemy_pool_aborts_the_trigger() {
    let mut tuning = GameTuning::default();
    tuning.encounter.encounter_chance = 100;

    let mut runtime = Runtime::builder()
        .with_tuning(tuning)
        .with_seed(17)
        .with_instant_pacing()
        .build();

    let mut result = Ok(false);
    for step in 1..=20u32 {
        result = runtime
            .track_movement(WorldPosition::new(step as f32, 0.0))
            .await;
        if result.is_err() {
            break;
        }
    }

    assert!(matches!(result, Err(RuntimeError::Encounter(_))));
    // No battle started against undefined enemy data.
    assert!(runtime.battle_state().is_none());
}

#[tokio::test]
async fn bus_broadcasts_battle_and_encounter_events() {
    let mut runtime = Runtime::builder()
        .with_enemies(vec![weak_enemy()])
        .with_seed(19)
        .with_instant_pacing()
        .build();

    let mut battle_rx = runtime.subscribe(Topic::Battle);
    let mut encounter_rx = runtime.subscribe(Topic::Encounter);

    runtime.start_battle("training_dummy").await.unwrap();
    runtime.run_battle(&AttackProvider).await.unwrap();

    let first = battle_rx.try_recv().unwrap();
    assert!(matches!(
        first,
        Event::Battle(battle_core::BattleEvent::Started { .. })
    ));

    let mut saw_reset = false;
    while let Ok(event) = encounter_rx.try_recv() {
        if matches!(event, Event::Encounter(EncounterEvent::CounterReset)) {
            saw_reset = true;
        }
    }
    assert!(saw_reset);
}

#[tokio::test]
async fn degraded_mode_without_collaborators_still_completes() {
    let mut runtime = Runtime::builder()
        .with_enemies(vec![weak_enemy()])
        .with_seed(23)
        .with_instant_pacing()
        .build();

    runtime.start_battle("training_dummy").await.unwrap();
    let outcome = runtime.run_battle(&AttackProvider).await.unwrap();
    assert!(matches!(outcome, Some(TerminalSignal::Victory { .. })));
}

#[tokio::test]
async fn handoff_snapshot_survives_a_trip_through_disk() {
    use battle_runtime::EncounterHandoff;

    let (_, template) = weak_enemy();
    let handoff = EncounterHandoff::new(
        "training_dummy",
        template,
        battle_core::ReturnLocation::default(),
    );

    let path = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(path.path(), handoff.to_bytes().unwrap()).unwrap();
    let restored = EncounterHandoff::from_bytes(&std::fs::read(path.path()).unwrap()).unwrap();
    assert_eq!(restored, handoff);

    // A battle starts cleanly from the restored snapshot.
    let mut runtime = Runtime::builder()
        .with_seed(31)
        .with_instant_pacing()
        .build();
    runtime.start_encounter(restored).await.unwrap();
    let outcome = runtime.run_battle(&AttackProvider).await.unwrap();
    assert!(matches!(outcome, Some(TerminalSignal::Victory { .. })));
}

#[tokio::test]
async fn runtime_boots_from_shipped_content() {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let factory = battle_content::ContentFactory::new(data_dir);

    let mut runtime = Runtime::builder()
        .with_content(&factory)
        .unwrap()
        .with_seed(29)
        .with_instant_pacing()
        .build();

    runtime.start_battle("slime").await.unwrap();
    let outcome = runtime.run_battle(&AttackProvider).await.unwrap();
    assert!(matches!(outcome, Some(TerminalSignal::Victory { .. })));
}

#[tokio::test]
async fn fixed_seed_replays_identically() {
    async fn run_once() -> (Option<TerminalSignal>, u32) {
        let mut runtime = Runtime::builder()
            .with_enemies(vec![(
                "goblin".to_owned(),
                CombatantTemplate::builder()
                    .name("Goblin")
                    .max_health(50)
                    .attack(8)
                    .defense(3)
                    .speed(5)
                    .special(30, 15, "Power Attack")
                    .build(),
            )])
            .with_player(PlayerProgressState::default())
            .with_seed(4242)
            .with_instant_pacing()
            .build();

        runtime.start_battle("goblin").await.unwrap();
        let outcome = runtime.run_battle(&AttackProvider).await.unwrap();
        (outcome, runtime.player().health.current)
    }

    let (first_outcome, first_health) = run_once().await;
    let (second_outcome, second_health) = run_once().await;

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first_health, second_health);
}
