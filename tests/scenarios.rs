//! End-to-end play-throughs driven by the manual scheduler

use moving_bears::bears::{Bear, DataUnavailable, fallback_roster};
use moving_bears::consts::{BOUNCE_MAX, BOUNCE_MIN};
use moving_bears::platform::ManualScheduler;
use moving_bears::sim::{ClickOutcome, Game, GamePhase, MSG_NO_BEARS, MSG_TIMEOUT};

fn bears(ids: &[u32]) -> Vec<Bear> {
    ids.iter()
        .map(|&id| Bear::new(id, &format!("Bear {id}"), 10, &[]))
        .collect()
}

fn seeded(ids: &[u32]) -> Game<ManualScheduler> {
    let mut game = Game::new(ManualScheduler::new(), 2024);
    assert!(game.load_roster(Ok(bears(ids))));
    game
}

#[test]
fn scenario_a_three_bears_in_order_wins() {
    let mut game = seeded(&[1, 2, 3]);
    game.start().unwrap();

    game.step_frame();
    assert_eq!(game.on_click(1), ClickOutcome::Advanced { next_index: 1 });
    game.step_frame();
    game.step_second();
    assert_eq!(game.on_click(2), ClickOutcome::Advanced { next_index: 2 });
    game.step_frame();
    assert_eq!(game.on_click(3), ClickOutcome::Won);

    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.session().expected_click_index, 3);
    assert!(game.scheduler().pending_frames().is_empty());
    assert!(game.scheduler().active_intervals().is_empty());
}

#[test]
fn scenario_b_wrong_bear_first_loses() {
    let mut game = seeded(&[1, 2]);
    game.start().unwrap();

    game.on_click(2);
    assert_eq!(game.phase(), GamePhase::Lost);
    let message = &game.session().message;
    assert!(message.contains("clicked bear 2"));
    assert!(message.contains("should have clicked bear 1"));
}

#[test]
fn scenario_c_empty_roster_cannot_start() {
    let mut game = seeded(&[]);
    assert!(game.start().is_err());
    assert_eq!(game.phase(), GamePhase::Waiting);
    assert_eq!(game.session().message, MSG_NO_BEARS);
}

#[test]
fn scenario_d_thirty_seconds_without_clicks_loses() {
    let mut game = seeded(&[1, 2, 3, 4]);
    game.start().unwrap();

    for second in 0..30 {
        assert_eq!(game.phase(), GamePhase::Playing, "lost early at {second}s");
        for _ in 0..60 {
            game.step_frame();
        }
        game.step_second();
    }

    assert_eq!(game.phase(), GamePhase::Lost);
    assert_eq!(game.session().message, MSG_TIMEOUT);
    assert_eq!(game.session().time_remaining, 0);
    assert!(!game.step_frame());
}

#[test]
fn bears_stay_inside_margins_through_a_long_round() {
    let mut game = seeded(&[1, 2, 3, 4, 5, 6]);
    game.start().unwrap();
    for _ in 0..5000 {
        assert!(game.step_frame());
        for e in game.pool().iter() {
            assert!((BOUNCE_MIN..=BOUNCE_MAX).contains(&e.pos.x));
            assert!((BOUNCE_MIN..=BOUNCE_MAX).contains(&e.pos.y));
        }
    }
}

#[test]
fn clicked_bears_freeze_while_others_move() {
    let mut game = seeded(&[1, 2]);
    game.start().unwrap();
    game.on_click(1);
    let frozen = game.pool().get(1).unwrap().pos;
    for _ in 0..100 {
        game.step_frame();
    }
    assert_eq!(game.pool().get(1).unwrap().pos, frozen);
    assert!(game.pool().get(1).unwrap().clicked);
}

#[test]
fn restart_after_loss_uses_fallback_when_offline() {
    let mut game = seeded(&[10, 20]);
    game.start().unwrap();
    game.on_click(20);
    assert_eq!(game.phase(), GamePhase::Lost);

    let mut offline = || -> Result<Vec<Bear>, DataUnavailable> { Err(DataUnavailable::Status(502)) };
    game.restart_with(&mut offline);
    assert_eq!(game.phase(), GamePhase::Waiting);
    assert!(game.session().message.is_empty());
    assert_eq!(game.pool().len(), fallback_roster().len());

    // Second play-through on the fallback roster
    game.start().unwrap();
    for id in 1..=4 {
        game.step_frame();
        game.on_click(id);
    }
    assert_eq!(game.phase(), GamePhase::Won);
}

#[test]
fn no_schedules_leak_across_play_throughs() {
    let mut game = seeded(&[1, 2]);
    for _ in 0..5 {
        game.start().unwrap();
        game.step_frame();
        game.step_second();
        assert_eq!(game.scheduler().active_intervals().len(), 1);
        assert_eq!(game.scheduler().pending_frames().len(), 1);
        game.on_click(2);
        game.restart();
        assert!(game.scheduler().active_intervals().is_empty());
        assert!(game.scheduler().pending_frames().is_empty());
    }
    assert_eq!(game.scheduler().cleared_intervals(), 5);
}
