use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    Board, CellState, GameError, OpenRun, Position, ShipLayout, ShotOutcome, Targeting,
    TargetingState,
};

/// Open 10x10 model with `ships` marked as known decks and `skips` ruled out.
fn model(ships: &[Position], skips: &[Position]) -> Board {
    let mut board = Board::new(10).unwrap();
    for &(x, y) in ships {
        board.set(x, y, CellState::Ship).unwrap();
    }
    for &(x, y) in skips {
        board.set(x, y, CellState::Skip).unwrap();
    }
    board
}

fn engine(model: Board, last_damage: Option<Position>) -> Targeting {
    Targeting::from_state(TargetingState {
        model,
        last_shot_position: None,
        last_damage_position: last_damage,
        pending_shot_index: None,
    })
}

#[test]
fn test_detect_next_shot() {
    let h4 = [(4, 5), (5, 5), (6, 5), (7, 5)];
    let v3 = [(2, 5), (2, 6), (2, 7)];
    let cases: Vec<(Board, Position, Position)> = vec![
        (model(&h4, &[]), (4, 5), (8, 5)),
        (model(&h4, &[(8, 5)]), (4, 5), (3, 5)),
        (model(&[(8, 1), (9, 1), (10, 1)], &[]), (10, 1), (7, 1)),
        (model(&[(8, 10), (9, 10), (10, 10)], &[]), (8, 10), (7, 10)),
        (model(&v3, &[]), (2, 5), (2, 8)),
        (model(&v3, &[(2, 8)]), (2, 5), (2, 4)),
        (model(&[(2, 5)], &[]), (2, 5), (2, 6)),
        (model(&[(2, 5)], &[(2, 6)]), (2, 5), (2, 4)),
        (model(&[(2, 5)], &[(2, 4), (2, 6)]), (2, 5), (3, 5)),
        (model(&[(2, 5)], &[(2, 4), (2, 6), (3, 5)]), (2, 5), (1, 5)),
    ];

    for (board, last_damage, expected) in cases {
        let mut t = engine(board, Some(last_damage));
        let found = t.detect_next_ship_cell().unwrap();
        assert_eq!(found, Some(expected), "probing from {:?}", last_damage);
        let idx = t.pending_shot_index().unwrap();
        assert_eq!(t.model().from_linear_index(idx).unwrap(), expected);
    }
}

#[test]
fn test_ship_layout() {
    let t = engine(model(&[(4, 5), (5, 5)], &[]), None);
    assert_eq!(t.ship_layout((4, 5)), ShipLayout::Horizontal);
    let t = engine(model(&[(4, 5), (4, 6)], &[]), None);
    assert_eq!(t.ship_layout((4, 6)), ShipLayout::Vertical);
    // diagonal decks say nothing about the axis
    let t = engine(model(&[(4, 5), (5, 6)], &[]), None);
    assert_eq!(t.ship_layout((4, 5)), ShipLayout::Unknown);
}

#[test]
fn test_dead_end_leaves_no_pending_shot() {
    let mut board = model(&[(1, 1)], &[]);
    board.set(2, 1, CellState::Miss).unwrap();
    board.set(1, 2, CellState::Miss).unwrap();
    let mut t = engine(board, Some((1, 1)));
    assert_eq!(t.detect_next_ship_cell().unwrap(), None);
    assert_eq!(t.pending_shot_index(), None);
}

#[test]
fn test_target_stays_on_row() {
    // (4,5) hit, vertical neighbours already missed
    let mut board = model(&[(4, 5)], &[]);
    board.set(4, 4, CellState::Miss).unwrap();
    board.set(4, 6, CellState::Miss).unwrap();
    let mut t = engine(board.clone(), Some((4, 5)));
    assert_eq!(t.detect_next_ship_cell().unwrap(), Some((5, 5)));

    // once (5,5) is a known deck and (6,5) missed, go the other way
    board.set(5, 5, CellState::Ship).unwrap();
    board.set(6, 5, CellState::Miss).unwrap();
    let mut t = engine(board, Some((5, 5)));
    assert_eq!(t.detect_next_ship_cell().unwrap(), Some((3, 5)));
}

#[rustfmt::skip]
const ENEMY_FIELD: [u8; 100] = [
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 1, 1, 1, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 0, 0, 0, 0, 1, 1, 1,
];

#[rustfmt::skip]
const ENEMY_FIELD_CLEANED: [u8; 100] = [
    1, 5, 0, 0, 0, 0, 0, 0, 5, 1,
    1, 5, 0, 0, 0, 0, 0, 0, 5, 1,
    1, 5, 0, 0, 0, 0, 0, 0, 5, 1,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    0, 0, 5, 1, 1, 1, 1, 5, 0, 0,
    0, 0, 5, 5, 5, 5, 5, 5, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    5, 5, 5, 5, 0, 0, 5, 5, 5, 5,
    1, 1, 1, 5, 0, 0, 5, 1, 1, 1,
];

#[test]
fn test_mark_sunk_surroundings() {
    let mut t = engine(Board::from_codes(10, &ENEMY_FIELD).unwrap(), None);
    for pos in [(5, 5), (1, 1), (10, 1), (1, 10), (9, 10)] {
        t.mark_sunk_surroundings(pos).unwrap();
    }
    assert_eq!(t.model(), &Board::from_codes(10, &ENEMY_FIELD_CLEANED).unwrap());
}

#[test]
fn test_sink_cleanup_keeps_known_cells() {
    let mut board = model(&[(4, 5), (5, 5), (6, 5), (7, 5)], &[]);
    board.set(3, 5, CellState::Miss).unwrap();
    board.set(8, 6, CellState::Hit).unwrap();
    let mut t = engine(board, None);
    t.mark_sunk_surroundings((6, 5)).unwrap();

    let m = t.model();
    assert_eq!(m.get(3, 5).unwrap(), CellState::Miss);
    assert_eq!(m.get(8, 6).unwrap(), CellState::Hit);
    for x in 3..=8 {
        for y in [4, 6] {
            if (x, y) != (8, 6) {
                assert_eq!(m.get(x, y).unwrap(), CellState::Skip, "({}, {})", x, y);
            }
        }
    }
    assert_eq!(m.get(8, 5).unwrap(), CellState::Skip);
    assert_eq!(m.count(CellState::Skip), 12);
    assert_eq!(m.count(CellState::Ship), 4);
}

#[test]
fn test_open_runs_midpoints() {
    let mut board = Board::new(5).unwrap();
    for (pos, _) in Board::new(5).unwrap().iter() {
        if pos.1 != 3 || pos.0 == 5 {
            board.set(pos.0, pos.1, CellState::Miss).unwrap();
        }
    }
    let t = engine(board, None);
    let runs = t.open_runs();
    assert_eq!(
        runs[0],
        OpenRun {
            midpoint: (3, 3),
            length: 4
        }
    );
    // the four one-cell column runs
    assert_eq!(runs.len(), 5);
    assert!(runs[1..].iter().all(|r| r.length == 1));
}

#[test]
fn test_even_run_midpoint_leans_late() {
    let mut board = Board::new(4).unwrap();
    for (pos, _) in Board::new(4).unwrap().iter() {
        if pos.1 != 1 {
            board.set(pos.0, pos.1, CellState::Miss).unwrap();
        }
    }
    let t = engine(board, None);
    // run 1..=4: 4 - floor(3 / 2) = 3
    assert_eq!(t.open_runs()[0].midpoint, (3, 1));
}

#[test]
fn test_hunt_single_run_is_deterministic() {
    let mut board = Board::new(5).unwrap();
    for (pos, _) in Board::new(5).unwrap().iter() {
        if pos.1 != 3 || pos.0 == 5 {
            board.set(pos.0, pos.1, CellState::Miss).unwrap();
        }
    }
    for seed in 0..16 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut t = engine(board.clone(), None);
        assert_eq!(t.choose_shot(&mut rng).unwrap(), (3, 3));
        assert_eq!(t.last_shot_position(), Some((3, 3)));
    }
}

#[test]
fn test_hunt_with_nothing_left() {
    let mut board = Board::new(2).unwrap();
    for (pos, _) in Board::new(2).unwrap().iter() {
        board.set(pos.0, pos.1, CellState::Miss).unwrap();
    }
    let mut rng = SmallRng::seed_from_u64(0);
    let mut t = engine(board, None);
    assert_eq!(t.choose_shot(&mut rng).unwrap_err(), GameError::NoTargetsLeft);
}

#[test]
fn test_first_hunt_shot_is_a_board_midpoint() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut t = Targeting::new(10).unwrap();
    let (x, y) = t.choose_shot(&mut rng).unwrap();
    // every row and column is one open run of ten; midpoint is cell 6
    assert!(x == 6 || y == 6, "({}, {})", x, y);
}

#[test]
fn test_reply_cycle() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut t = Targeting::new(10).unwrap();

    let first = t.choose_shot(&mut rng).unwrap();
    assert!(!t.process_enemy_reply(ShotOutcome::Hit).unwrap());
    assert_eq!(t.model().at(first), Some(CellState::Ship));
    assert_eq!(t.last_damage_position(), Some(first));
    assert!(t.pending_shot_index().is_some());

    let second = t.choose_shot(&mut rng).unwrap();
    assert_eq!(t.pending_shot_index(), None);
    let dist = first.0.abs_diff(second.0) + first.1.abs_diff(second.1);
    assert_eq!(dist, 1, "{:?} then {:?}", first, second);

    assert!(t.process_enemy_reply(ShotOutcome::Kill).unwrap());
    assert_eq!(t.last_damage_position(), None);
    assert_eq!(t.pending_shot_index(), None);
    for deck in [first, second] {
        for n in t.model().neighbours(deck) {
            let state = t.model().at(n).unwrap();
            assert!(matches!(state, CellState::Ship | CellState::Skip));
        }
    }
}

#[test]
fn test_miss_while_targeting_reprobes() {
    let mut board = model(&[(5, 5)], &[]);
    board.set(5, 6, CellState::Empty).unwrap();
    let mut t = Targeting::from_state(TargetingState {
        model: board,
        last_shot_position: Some((5, 6)),
        last_damage_position: Some((5, 5)),
        pending_shot_index: None,
    });
    t.process_enemy_reply(ShotOutcome::Miss).unwrap();
    assert_eq!(t.model().get(5, 6).unwrap(), CellState::Miss);
    let idx = t.pending_shot_index().unwrap();
    assert_eq!(t.model().from_linear_index(idx).unwrap(), (5, 4));
}

#[test]
fn test_reply_without_shot_is_ignored() {
    let mut t = Targeting::new(10).unwrap();
    assert!(!t.process_enemy_reply(ShotOutcome::Kill).unwrap());
    assert_eq!(t.model().count(CellState::Empty), 100);

    let mut rng = SmallRng::seed_from_u64(2);
    t.choose_shot(&mut rng).unwrap();
    t.reset_last_shot();
    assert!(!t.process_enemy_reply(ShotOutcome::Hit).unwrap());
    assert_eq!(t.model().count(CellState::Empty), 100);
}

#[test]
fn test_repeated_kill_is_not_counted() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut t = Targeting::new(10).unwrap();
    let shot = t.choose_shot(&mut rng).unwrap();
    assert!(t.process_enemy_reply(ShotOutcome::Kill).unwrap());
    let after_first = t.model().clone();
    assert!(!t.process_enemy_reply(ShotOutcome::Kill).unwrap());
    assert_eq!(t.model(), &after_first);
    assert_eq!(t.model().at(shot), Some(CellState::Ship));
}
