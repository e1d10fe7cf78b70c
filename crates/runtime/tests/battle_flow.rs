//! End-to-end battles through the runtime: AI autonomy, the player input
//! path, event feeds and determinism.

use std::path::PathBuf;
use std::sync::Arc;

use battle_core::{
    ActionError, ActionIntent, BattleEvent, BattleSetup, CombatantId, CombatantSpec, Outcome, Side,
};
use battle_content::ContentFactory;
use runtime::{
    BattleRuntime, RandomPolicy, RuntimeError, RuntimeHandle, ScriptedProvider, TurnReport,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../battle/content/data")
}

fn demo_setup() -> BattleSetup {
    ContentFactory::load_dir(&content_dir())
        .expect("bundled content loads")
        .setup(&["warrior", "mage", "cleric"], &["goblin", "orc_brute", "shaman"])
        .expect("demo parties resolve")
}

fn plain_duel() -> BattleSetup {
    BattleSetup {
        player: vec![CombatantSpec {
            name: "hero".into(),
            stats: Default::default(),
            skills: Vec::new(),
        }],
        enemy: vec![CombatantSpec {
            name: "goblin".into(),
            stats: Default::default(),
            skills: Vec::new(),
        }],
    }
}

/// Drives a player-side battle by always attacking the first living enemy.
async fn drive_player_with_attacks(handle: &RuntimeHandle) -> runtime::Result<Side> {
    let mut report = handle.advance().await?;
    for _ in 0..500 {
        match report {
            TurnReport::Finished { winner } => return Ok(winner),
            TurnReport::AwaitingInput(actor) => {
                let state = handle.state().await?;
                let target = state.living_members(Side::Enemy)[0];
                report = handle.submit_attack(actor, target).await?;
            }
        }
    }
    panic!("battle failed to terminate");
}

#[tokio::test]
async fn ai_vs_ai_battle_runs_to_termination() {
    init_tracing();

    let rt = BattleRuntime::builder(demo_setup())
        .seed(0xBA77)
        .provider(Side::Player, Arc::new(RandomPolicy::seeded(1)))
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(2)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let report = handle.advance().await.unwrap();
    let TurnReport::Finished { winner } = report else {
        panic!("fully provider-driven battles finish in one advance");
    };

    let state = handle.state().await.unwrap();
    assert!(state.is_over());
    assert_eq!(state.outcome().winner(), Some(winner));
    // the losing roster is wiped out, the winning one is not
    assert!(state.living_members(winner.opponent()).is_empty());
    assert!(!state.living_members(winner).is_empty());
    assert!(state.turn.round >= 1);

    rt.shutdown().await;
}

#[tokio::test]
async fn identical_seeds_replay_identically() {
    init_tracing();

    let mut snapshots = Vec::new();
    for _ in 0..2 {
        let rt = BattleRuntime::builder(demo_setup())
            .seed(7)
            .provider(Side::Player, Arc::new(RandomPolicy::seeded(100)))
            .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(200)))
            .build()
            .unwrap();
        let handle = rt.handle();
        handle.advance().await.unwrap();
        snapshots.push(handle.state().await.unwrap());
        rt.shutdown().await;
    }

    assert_eq!(snapshots[0], snapshots[1]);
}

#[tokio::test]
async fn player_side_awaits_input_and_is_driven_by_submissions() {
    init_tracing();

    let rt = BattleRuntime::builder(plain_duel())
        .seed(3)
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(5)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let report = handle.advance().await.unwrap();
    assert_eq!(report, TurnReport::AwaitingInput(CombatantId(0)));

    // repeated advancement is idempotent while awaiting input
    let report = handle.advance().await.unwrap();
    assert_eq!(report, TurnReport::AwaitingInput(CombatantId(0)));

    let winner = drive_player_with_attacks(&handle).await.unwrap();
    assert!(matches!(winner, Side::Player | Side::Enemy));

    rt.shutdown().await;
}

#[tokio::test]
async fn submissions_for_the_wrong_combatant_are_invalid_turn() {
    init_tracing();

    let rt = BattleRuntime::builder(plain_duel())
        .seed(9)
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(5)))
        .build()
        .unwrap();
    let handle = rt.handle();

    handle.advance().await.unwrap();
    let err = handle
        .submit_attack(CombatantId(1), CombatantId(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Action(ActionError::InvalidTurn { .. })
    ));

    // the awaited combatant can still act afterwards
    let report = handle
        .submit_attack(CombatantId(0), CombatantId(1))
        .await
        .unwrap();
    assert_ne!(report, TurnReport::AwaitingInput(CombatantId(1)));

    rt.shutdown().await;
}

#[tokio::test]
async fn finished_battles_reject_mutation_and_stay_finished() {
    init_tracing();

    let rt = BattleRuntime::builder(plain_duel())
        .seed(11)
        .provider(Side::Player, Arc::new(RandomPolicy::seeded(21)))
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(22)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let TurnReport::Finished { winner } = handle.advance().await.unwrap() else {
        panic!("expected a finished battle");
    };

    let err = handle
        .submit_attack(CombatantId(0), CombatantId(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Action(ActionError::TerminalState)
    ));

    // advancing a finished battle keeps reporting the same outcome
    assert_eq!(
        handle.advance().await.unwrap(),
        TurnReport::Finished { winner }
    );

    rt.shutdown().await;
}

#[tokio::test]
async fn event_feed_is_ordered_and_ends_with_the_outcome() {
    init_tracing();

    let rt = BattleRuntime::builder(demo_setup())
        .seed(0xFEED)
        .event_capacity(4096)
        .provider(Side::Player, Arc::new(RandomPolicy::seeded(31)))
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(32)))
        .build()
        .unwrap();
    let handle = rt.handle();
    let mut feed = handle.subscribe();

    let TurnReport::Finished { winner } = handle.advance().await.unwrap() else {
        panic!("expected a finished battle");
    };

    let mut events = Vec::new();
    while let Ok(event) = feed.try_recv() {
        events.push(event);
    }

    assert!(matches!(
        events.first(),
        Some(BattleEvent::TurnStarted {
            combatant: CombatantId(0)
        })
    ));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded { winner })
    );

    // every member of the losing side died exactly once
    let state = handle.state().await.unwrap();
    let losers = state.rosters.side(winner.opponent()).len();
    let deaths_of_losers = events
        .iter()
        .filter(|event| {
            matches!(event, BattleEvent::CombatantDied { combatant }
                if state.combatant(*combatant).map(|c| c.side) == Some(winner.opponent()))
        })
        .count();
    assert_eq!(deaths_of_losers, losers);

    rt.shutdown().await;
}

#[tokio::test]
async fn scripted_provider_drives_a_side_to_completion() {
    init_tracing();

    let script = std::iter::repeat(ActionIntent::Attack {
        target: CombatantId(1),
    })
    .take(200);
    let rt = BattleRuntime::builder(plain_duel())
        .seed(17)
        .provider(Side::Player, Arc::new(ScriptedProvider::new(script)))
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(3)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let report = handle.advance().await.unwrap();
    assert!(matches!(report, TurnReport::Finished { .. }));

    rt.shutdown().await;
}

#[tokio::test]
async fn player_skill_submissions_flow_through_the_handle() {
    init_tracing();

    let factory = ContentFactory::load_dir(&content_dir()).unwrap();
    let setup = BattleSetup {
        player: vec![factory.spec("cleric").unwrap()],
        enemy: vec![factory.spec("goblin").unwrap()],
    };
    let rt = BattleRuntime::builder(setup)
        .seed(19)
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(23)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let report = handle.advance().await.unwrap();
    assert_eq!(report, TurnReport::AwaitingInput(CombatantId(0)));

    // cast Heal (index 0); single-target healing retargets to own side
    let mp_before = handle.state().await.unwrap().combatant(CombatantId(0)).unwrap().mp.current;
    handle
        .submit_skill(CombatantId(0), 0, CombatantId(1))
        .await
        .unwrap();

    let state = handle.state().await.unwrap();
    let cleric = state.combatant(CombatantId(0)).unwrap();
    assert_eq!(cleric.mp.current, mp_before - 5);
    // the nominal enemy target was never healed (or otherwise touched)
    let goblin = state.combatant(CombatantId(1)).unwrap();
    assert_eq!(goblin.hp.current, goblin.hp.max);

    rt.shutdown().await;
}

#[tokio::test]
async fn outcome_matches_full_roster_death() {
    init_tracing();

    // a brute squad against one default hero: the player side must lose
    let factory = ContentFactory::load_dir(&content_dir()).unwrap();
    let setup = BattleSetup {
        player: vec![CombatantSpec {
            name: "hero".into(),
            stats: Default::default(),
            skills: Vec::new(),
        }],
        enemy: vec![
            factory.spec("orc_brute").unwrap(),
            factory.spec("orc_brute").unwrap(),
            factory.spec("orc_brute").unwrap(),
        ],
    };

    let rt = BattleRuntime::builder(setup)
        .seed(13)
        .provider(Side::Enemy, Arc::new(RandomPolicy::seeded(41)))
        .build()
        .unwrap();
    let handle = rt.handle();

    let winner = drive_player_with_attacks(&handle).await.unwrap();
    let state = handle.state().await.unwrap();

    match winner {
        Side::Enemy => {
            assert_eq!(state.outcome(), Outcome::EnemyWon);
            assert!(state.living_members(Side::Player).is_empty());
        }
        Side::Player => {
            assert_eq!(state.outcome(), Outcome::PlayerWon);
            assert!(state.living_members(Side::Enemy).is_empty());
        }
    }

    rt.shutdown().await;
}
