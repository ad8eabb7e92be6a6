use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{CellState, Game, GameStatus, ShotOutcome, DEFAULT_SHIPS};

/// `shooter` fires at `target` until it misses or wins. Returns shots fired.
fn volley(shooter: &mut Game, target: &mut Game, rng: &mut SmallRng) -> usize {
    let mut shots = 0;
    loop {
        let pos = shooter.choose_shot(rng).unwrap();
        assert_eq!(
            shooter.opponent_board().at(pos),
            Some(CellState::Empty),
            "engine fired at an explored cell {:?}",
            pos
        );
        let outcome = target.handle_enemy_shot(pos).unwrap();
        shooter.process_enemy_reply(outcome).unwrap();
        shots += 1;
        if outcome == ShotOutcome::Miss || shooter.is_victory() {
            return shots;
        }
    }
}

#[test]
fn test_ai_vs_ai_game() {
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g1 = Game::with_defaults(&mut rng).unwrap();
        let mut g2 = Game::with_defaults(&mut rng).unwrap();

        let (mut shots1, mut shots2) = (0, 0);
        while !g1.is_end_game() && !g2.is_end_game() {
            shots1 += volley(&mut g1, &mut g2, &mut rng);
            if g1.is_victory() {
                break;
            }
            shots2 += volley(&mut g2, &mut g1, &mut rng);
            assert!(shots1 <= 100 && shots2 <= 100, "game took too many shots");
        }

        let (winner, loser) = if g1.is_victory() { (&g1, &g2) } else { (&g2, &g1) };
        assert_eq!(winner.status(), GameStatus::Won);
        assert_eq!(loser.status(), GameStatus::Lost);
        assert_eq!(loser.sunk_ship_count(), DEFAULT_SHIPS.len());
        assert_eq!(
            winner.sunk_ship_count(),
            DEFAULT_SHIPS.len() - winner.ships_remaining()
        );
    }
}

#[test]
fn test_engine_sinks_a_lone_two_decker() {
    // enemy two-decker at (4,5)-(5,5)
    let mut field = vec![CellState::Empty; 100];
    field[43] = CellState::Ship;
    field[44] = CellState::Ship;
    let mut rng = SmallRng::seed_from_u64(21);
    let mut enemy = Game::start_new_game(10, Some(&[2]), Some(field), &mut rng).unwrap();
    let mut me = Game::start_new_game(10, Some(&[2]), None, &mut rng).unwrap();

    let mut shots = 0;
    let mut hit_at = None;
    while !me.is_victory() {
        let pos = me.choose_shot(&mut rng).unwrap();
        let outcome = enemy.handle_enemy_shot(pos).unwrap();
        me.process_enemy_reply(outcome).unwrap();
        shots += 1;
        if let Some(first) = hit_at {
            // after the first hit every probe stays next to the damaged deck
            let (fx, fy): (usize, usize) = first;
            assert_eq!(fx.abs_diff(pos.0) + fy.abs_diff(pos.1), 1, "{:?}", pos);
        } else if outcome == ShotOutcome::Hit {
            hit_at = Some(pos);
        }
        assert!(shots <= 100);
    }
    assert_eq!(enemy.ships_remaining(), 0);
    // cells around the sunk ship are ruled out
    for pos in [(3, 5), (6, 5), (4, 4), (5, 6)] {
        assert_ne!(me.opponent_board().at(pos), Some(CellState::Empty), "{:?}", pos);
    }
}
