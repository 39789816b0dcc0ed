//! End-to-end runs through the wave controller, driven the way the TUI
//! drives it: one event in, one descriptor out.

use desktop_defender::data::{Catalog, Difficulty};
use desktop_defender::game::{
    compute_rank, ControllerOutput, Outcome, Phase, PlayerEvent, WaveAdvance, WaveController,
    WAVE_CAP,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn controller() -> WaveController {
    WaveController::new(Catalog::builtin().expect("builtin catalog is valid"))
}

#[test]
fn easy_run_matches_the_reference_trace() {
    let mut ctl = controller();
    ctl.set_difficulty(Difficulty::Easy);

    // Wave 1: ransomware, restore from backup (correct).
    let started = ctl.begin_round("ransomware").unwrap();
    assert_eq!(started.threat_name, "Ransomware Lock");
    assert_eq!(started.hint, "Files are locked and a ransom note appears.");
    let result = ctl.submit_action("restoreBackup").unwrap();
    assert!(result.was_correct);
    assert_eq!(ctl.session().score, 10);
    assert_eq!(ctl.session().streak, 1);
    assert_eq!(ctl.session().health, 100);

    // Wave 2: brute force, change password (correct, streak bonus kicks in).
    ctl.advance_wave().unwrap();
    ctl.begin_round("bruteforce").unwrap();
    let result = ctl.submit_action("changePassword").unwrap();
    assert!(result.was_correct);
    assert!(result.streak_bonus);
    assert_eq!(ctl.session().score, 25);
    assert_eq!(ctl.session().streak, 2);

    // Wave 3: phishing, anti-malware scan (incorrect).
    ctl.advance_wave().unwrap();
    ctl.begin_round("phishing").unwrap();
    let result = ctl.submit_action("antiMalware").unwrap();
    assert!(!result.was_correct);
    assert_eq!(
        result.correct_action_labels,
        vec![
            "Report & Delete suspicious email".to_string(),
            "Staff training refresher".to_string(),
        ]
    );
    assert_eq!(ctl.session().health, 85);
    assert_eq!(ctl.session().streak, 0);
    assert_eq!(ctl.session().score, 25);
}

#[test]
fn full_run_through_the_event_interface() {
    let mut ctl = controller();
    let mut rng = StdRng::seed_from_u64(42);

    for wave in 1..=WAVE_CAP {
        let started = match ctl.apply(PlayerEvent::StartGame, &mut rng).unwrap() {
            ControllerOutput::WaveStarted(started) => started,
            other => panic!("expected a wave start, got {other:?}"),
        };

        // Answer with the threat's first correct action, straight from
        // the catalog, so the whole run is a perfect streak.
        let answer = ctl
            .catalog()
            .find_threat(&started.threat_id)
            .unwrap()
            .correct_actions[0]
            .clone();
        match ctl.apply(PlayerEvent::SubmitAction(answer), &mut rng).unwrap() {
            ControllerOutput::RoundResult(result) => assert!(result.was_correct),
            other => panic!("expected a round result, got {other:?}"),
        }

        match ctl.apply(PlayerEvent::AdvanceWave, &mut rng).unwrap() {
            ControllerOutput::WaveAdvance(WaveAdvance::Continue { wave: next }) => {
                assert!(wave < WAVE_CAP);
                assert_eq!(next, wave + 1);
            }
            ControllerOutput::WaveAdvance(WaveAdvance::Ended(ended)) => {
                assert_eq!(wave, WAVE_CAP);
                assert!(ended.won);
                // Perfect run: 10 + 5 * 15.
                assert_eq!(ended.final_score, 85);
                assert_eq!(ended.rank, "Incident Responder");
            }
            other => panic!("expected a wave advance, got {other:?}"),
        }
    }
    assert_eq!(ctl.phase(), Phase::GameOver(Outcome::Won));

    // Reset brings the run back to a playable baseline.
    ctl.apply(PlayerEvent::Reset, &mut rng).unwrap();
    assert_eq!(ctl.phase(), Phase::AwaitingThreat);
    assert_eq!(ctl.session().health, 100);
    assert_eq!(ctl.session().wave, 1);
    assert!(matches!(
        ctl.apply(PlayerEvent::StartGame, &mut rng).unwrap(),
        ControllerOutput::WaveStarted(_)
    ));
}

#[test]
fn standard_difficulty_loses_faster() {
    let mut ctl = controller();
    let mut rng = StdRng::seed_from_u64(7);
    ctl.apply(PlayerEvent::SetDifficulty(Difficulty::Standard), &mut rng)
        .unwrap();

    // Five straight unknown answers drain 100 health.
    for _ in 0..5 {
        ctl.apply(PlayerEvent::StartGame, &mut rng).unwrap();
        ctl.apply(
            PlayerEvent::SubmitAction("panicAndUnplugMonitor".to_string()),
            &mut rng,
        )
        .unwrap();
        match ctl.apply(PlayerEvent::AdvanceWave, &mut rng).unwrap() {
            ControllerOutput::WaveAdvance(WaveAdvance::Ended(ended)) => {
                assert!(!ended.won);
                assert_eq!(ended.final_score, 0);
                assert_eq!(ended.rank, "Trainee Technician");
                assert_eq!(ctl.phase(), Phase::GameOver(Outcome::Lost));
                return;
            }
            _ => {}
        }
    }
    panic!("run should have ended in a loss after five misses");
}

#[test]
fn rank_thresholds() {
    assert_eq!(compute_rank(90), "Chief Analyst");
    assert_eq!(compute_rank(70), "Incident Responder");
    assert_eq!(compute_rank(50), "Junior Analyst");
    assert_eq!(compute_rank(49), "Trainee Technician");
}
