//! Full headless matches: determinism, invariants and final standings

use syntax_smash::ai::Difficulty;
use syntax_smash::core::{Entrant, MatchConfig};
use syntax_smash::fighter::CombatEventType;
use syntax_smash::roster::load_roster;
use syntax_smash::simulation::{HeadlessMatch, MatchPhase};

fn duel_config(seed: u64, time_limit_ms: f32) -> MatchConfig {
    MatchConfig {
        seed,
        time_limit_ms,
        entrants: vec![
            Entrant::cpu("Rust", Difficulty::Expert),
            Entrant::cpu("JavaScript", Difficulty::Easy),
        ],
        ..Default::default()
    }
}

#[test]
fn test_same_seed_same_match() {
    let run = |seed| {
        HeadlessMatch::from_config(duel_config(seed, 20_000.0))
            .unwrap()
            .run_to_end()
    };
    assert_eq!(run(5), run(5));
    assert_eq!(run(5).seed, 5);
}

#[test]
fn test_invariants_hold_every_frame() {
    let config = MatchConfig {
        time_limit_ms: 30_000.0,
        ..MatchConfig::load("data/match.toml").unwrap()
    };
    let starting = config.starting_stocks;
    let mut m = HeadlessMatch::from_config(config).unwrap();
    assert_eq!(m.phase(), MatchPhase::Ready);

    while !m.is_finished() {
        m.run_frame();
        for fighter in m.arena.iter() {
            assert!(fighter.damage() >= 0.0);
            assert!(fighter.stocks() <= starting);
            assert!(fighter.position.x.is_finite() && fighter.position.y.is_finite());
        }
        for pending in m.pending_respawns() {
            assert!(!m.arena.get(pending.fighter).unwrap().is_active());
        }
    }
    assert!(m.time() <= 30_000.0 + m.config.frame_ms);
}

#[test]
fn test_finished_match_is_frozen() {
    let mut m = HeadlessMatch::from_config(duel_config(8, 1_000.0)).unwrap();
    let summary = m.run_to_end();
    let frames = m.frame();
    assert!(m.run_frame().is_empty());
    assert_eq!(m.frame(), frames);
    assert_eq!(m.summary(), summary);
}

#[test]
fn test_placements_are_a_permutation() {
    let config = MatchConfig::load("data/match.toml").unwrap();
    let count = config.entrants.len();
    let summary = HeadlessMatch::from_config(config).unwrap().run_to_end();

    let mut placements: Vec<u32> = summary.results.iter().map(|r| r.placement).collect();
    placements.sort();
    assert_eq!(placements, (1..=count as u32).collect::<Vec<_>>());

    for pair in summary.results.windows(2) {
        assert!(pair[0].placement < pair[1].placement);
    }
    if let Some(winner) = summary.winner {
        assert_eq!(summary.results[0].id, winner);
        assert!(!summary.timed_out);
    }
}

#[test]
fn test_summary_counts_match_log() {
    let mut m = HeadlessMatch::from_config(duel_config(21, 60_000.0)).unwrap();
    let summary = m.run_to_end();
    let log = m.log();
    let hits = log.count_matching(|e| matches!(e, CombatEventType::Hit { .. }));
    let kos = log.count_matching(|e| matches!(e, CombatEventType::Knockout { .. }));
    assert_eq!(summary.total_hits, hits);
    assert_eq!(summary.total_knockouts, kos);
    assert_eq!(
        log.count_matching(|e| matches!(e, CombatEventType::MatchEnded)),
        1
    );

    let lost: u32 = summary
        .results
        .iter()
        .map(|r| m.config.starting_stocks - r.stocks)
        .sum();
    assert_eq!(lost as usize, kos);
}

#[test]
fn test_human_slot_follows_injected_input() {
    let mut human = Entrant::cpu("Python", Difficulty::Normal);
    human.is_human = true;
    let config = MatchConfig {
        time_limit_ms: 2_000.0,
        entrants: vec![human, Entrant::cpu("C", Difficulty::Beginner)],
        ..Default::default()
    };
    let mut m = HeadlessMatch::from_config(config).unwrap();
    assert_eq!(m.controllers().len(), 1);

    let id = m.arena.ids()[0];
    let start_x = m.arena.get(id).unwrap().position.x;
    for _ in 0..30 {
        m.set_human_input(id, syntax_smash::fighter::FighterInput::moving(-1.0));
        m.run_frame();
    }
    assert!(m.arena.get(id).unwrap().position.x < start_x);
}

#[test]
fn test_roster_file_loads_for_matches() {
    let roster = load_roster("data/roster.toml").unwrap();
    let config = MatchConfig::load("data/match.toml").unwrap();
    for entrant in &config.entrants {
        assert!(roster.get(&entrant.character).is_some(), "{} missing", entrant.character);
    }
    let summary = HeadlessMatch::new(
        MatchConfig {
            time_limit_ms: 5_000.0,
            ..config
        },
        &roster,
    )
    .unwrap()
    .run_to_end();
    assert_eq!(summary.results.len(), 4);
}
