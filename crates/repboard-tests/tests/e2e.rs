//! End-to-end board lifecycle tests.
//!
//! Each test initializes a fresh board, registers members, and drives it
//! through votes, decay, and admin operations via the public API only.

use std::sync::Arc;

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::traits::DecayCalculator;
use repboard_core::types::Identity;
use repboard_decay::DecayEngine;
use repboard_engine::{Board, BoardInit, BoardSettings, StaticHoldings};
use repboard_tests::helpers::*;

#[test]
fn e2e_initialize_vote_and_cooldown() {
    let holdings = Arc::new(StaticHoldings::new());
    let init = BoardInit {
        admin: admin(),
        required_token: token(),
        min_token_balance: 1_000,
        role_thresholds: vec![100, 500, 1_000],
    };
    let (board, ev) =
        Board::initialize(init, BoardSettings::default(), holdings.clone(), T0).unwrap();
    assert_eq!(
        ev,
        BoardEvent::BoardInitialized {
            admin: admin(),
            required_token: token(),
            min_token_balance: 1_000,
        }
    );

    let voter = id("voter");
    let target = id("target");
    assert_eq!(
        board.register_identity(voter, T0).unwrap(),
        BoardEvent::UserInitialized { wallet: voter }
    );
    board.register_identity(target, T0).unwrap();
    holdings.set_balance(token(), voter, 5_000);

    let receipt = board.vote(voter, target, true, T0 + 5).unwrap();
    assert_eq!(receipt.new_reputation, 1);
    assert_eq!(
        receipt.events,
        vec![BoardEvent::VoteCast {
            voter,
            target,
            is_upvote: true,
            new_reputation: 1,
        }]
    );

    assert_eq!(
        board.vote(voter, target, true, T0 + 6),
        Err(BoardError::CooldownActive {
            remaining_secs: DAY - 1
        })
    );
    assert_eq!(board.points(&target), Some(1));
    assert_eq!(board.member_count(), 2);
}

#[test]
fn e2e_register_twice_fails() {
    let h = Harness::new(BoardSettings::default());
    let a = h.member("a", 0);
    assert_eq!(
        h.board.register_identity(a, T0 + 1),
        Err(BoardError::AlreadyRegistered(a))
    );
    assert_eq!(h.board.member_count(), 1);
    assert_eq!(h.board.user(&a).unwrap().last_activity, T0);
}

#[test]
fn e2e_climb_through_all_roles() {
    let h = Harness::new(BoardSettings::default());
    let voters = h.members("v", 1_000);
    let star = h.member("star", 0);

    let mut unlocked = Vec::new();
    for v in &voters {
        let r = h.board.vote(*v, star, true, T0).unwrap();
        if let Some(level) = r.role_unlocked {
            unlocked.push((level, r.new_reputation));
        }
    }
    assert_eq!(unlocked, vec![(0, 100), (1, 500), (2, 1_000)]);

    let user = h.board.user(&star).unwrap();
    assert_eq!(user.reputation_points, 1_000);
    assert!(user.has_role(0) && user.has_role(1) && user.has_role(2));
    assert_eq!(h.board.leaderboard()[0].wallet, star);
}

#[test]
fn e2e_downvotes_floor_at_zero() {
    let h = Harness::new(BoardSettings::default());
    let voters = h.members("v", 3);
    let t = h.member("t", 0);

    h.board.vote(voters[0], t, true, T0).unwrap();
    let r = h.board.vote(voters[1], t, false, T0).unwrap();
    assert_eq!(r.new_reputation, 0);
    let r = h.board.vote(voters[2], t, false, T0).unwrap();
    assert_eq!(r.new_reputation, 0);
    assert!(h.board.leaderboard().is_empty());
}

#[test]
fn e2e_balance_checked_at_call_time() {
    let h = Harness::new(BoardSettings::default());
    let v = h.member("v", MIN_BALANCE);
    let t = h.member("t", 0);

    h.holdings.set_balance(token(), v, MIN_BALANCE - 1);
    assert_eq!(
        h.board.vote(v, t, true, T0),
        Err(BoardError::InsufficientTokenBalance {
            have: MIN_BALANCE - 1,
            need: MIN_BALANCE,
        })
    );
    assert_eq!(h.board.points(&t), Some(0));
    assert_eq!(h.board.voter(&v).unwrap().total_votes_cast, 0);

    h.holdings.set_balance(token(), v, MIN_BALANCE);
    assert_eq!(h.board.vote(v, t, true, T0).unwrap().new_reputation, 1);
    assert_eq!(h.board.voter(&v).unwrap().total_votes_cast, 1);
}

#[test]
fn e2e_unregistered_parties_not_found() {
    let h = Harness::new(BoardSettings::default());
    let v = h.member("v", 5 * MIN_BALANCE);
    let ghost = id("ghost");
    assert_eq!(
        h.board.vote(v, ghost, true, T0),
        Err(BoardError::NotFound(ghost))
    );
    assert_eq!(
        h.board.vote(ghost, v, true, T0),
        Err(BoardError::NotFound(ghost))
    );
}

#[test]
fn e2e_weekly_decay_cycle() {
    let h = Harness::new(BoardSettings::default());
    let voters = h.members("v", 50);
    let a = h.member("a", 0);
    for v in &voters {
        h.board.vote(*v, a, true, T0).unwrap();
    }

    assert!(matches!(
        h.board.apply_decay(T0 + DAY),
        Err(BoardError::DecayTooEarly { .. })
    ));

    // 50 -> 45 -> 40 -> 36
    let engine = DecayEngine::new();
    let mut expected = 50;
    for week in 1..=3 {
        let now = T0 + week * WEEK;
        let ev = h.board.apply_decay(now).unwrap();
        assert_eq!(
            ev,
            BoardEvent::DecayApplied {
                timestamp: now,
                decay_rate: 1_000,
            }
        );
        expected = engine.decayed_points(expected, 1_000).unwrap();
        assert_eq!(h.board.points(&a), Some(expected));
        assert_eq!(h.board.config().last_decay_timestamp, now);
    }
    assert_eq!(expected, 36);
}

#[test]
fn e2e_late_decay_applies_once() {
    let h = Harness::new(BoardSettings::default());
    let voters = h.members("v", 10);
    let a = h.member("a", 0);
    for v in &voters {
        h.board.vote(*v, a, true, T0).unwrap();
    }
    // Three periods late still decays a single step.
    h.board.apply_decay(T0 + 3 * WEEK).unwrap();
    assert_eq!(h.board.points(&a), Some(9));
    assert_eq!(h.board.next_decay_at(), T0 + 4 * WEEK);
}

#[test]
fn e2e_admin_reset_then_rebuild_scores() {
    let h = Harness::new(BoardSettings::default());
    let voters = h.members("v", 5);
    let a = h.member("a", 0);
    for v in &voters {
        h.board.vote(*v, a, true, T0).unwrap();
    }

    assert_eq!(
        h.board.reset_all_scores(a),
        Err(BoardError::UnauthorizedAdmin)
    );
    assert_eq!(h.board.points(&a), Some(5));

    h.board.reset_all_scores(admin()).unwrap();
    assert_eq!(h.board.points(&a), Some(0));
    assert!(h.board.leaderboard().is_empty());

    let r = h.board.vote(voters[0], a, true, T0 + DAY).unwrap();
    assert_eq!(r.new_reputation, 1);
    assert_eq!(h.board.leaderboard().len(), 1);
}

#[test]
fn e2e_thresholds_update_flow() {
    let h = Harness::new(BoardSettings::default());
    h.board
        .set_role_thresholds(admin(), vec![50, 250, 750])
        .unwrap();
    assert_eq!(h.board.role_thresholds(), vec![50, 250, 750]);

    assert!(matches!(
        h.board.set_role_thresholds(admin(), vec![500, 100]),
        Err(BoardError::InvalidRoleThreshold(_))
    ));
    assert_eq!(h.board.role_thresholds(), vec![50, 250, 750]);

    let voters = h.members("v", 50);
    let a = h.member("a", 0);
    let mut unlocks = 0;
    for v in &voters {
        if h.board.vote(*v, a, true, T0).unwrap().role_unlocked == Some(0) {
            unlocks += 1;
        }
    }
    assert_eq!(unlocks, 1);
}

#[test]
fn e2e_leaderboard_capacity_respected() {
    let settings = BoardSettings {
        leaderboard_capacity: 3,
        ..BoardSettings::default()
    };
    let h = Harness::new(settings);
    let voters = h.members("v", 6);
    let targets: Vec<Identity> = (0..5).map(|i| h.member(&format!("t{i}"), 0)).collect();

    // t{i} receives i + 1 votes.
    for (i, t) in targets.iter().enumerate() {
        for v in &voters[..=i] {
            h.board.vote(*v, *t, true, T0).unwrap();
        }
    }

    let lb = h.board.leaderboard();
    assert_eq!(lb.len(), 3);
    assert_ordered(&lb);
    let top: Vec<u64> = lb.iter().map(|e| e.points).collect();
    assert_eq!(top, vec![5, 4, 3]);

    let mut all = voters.clone();
    all.extend(targets);
    assert_eq!(lb, h.expected_leaderboard(&all));
}

#[test]
fn e2e_config_snapshot_serializes() {
    let h = Harness::new(BoardSettings::default());
    h.members("v", 2);
    let config = h.board.config();
    assert_eq!(config.admin, admin());
    assert_eq!(config.total_members, 2);
    assert_eq!(config.role_thresholds, THRESHOLDS.to_vec());

    let json = serde_json::to_string(&config).unwrap();
    let back: repboard_core::types::BoardConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
