use rand::{rngs::SmallRng, SeedableRng};
use seabattle::prelude::*;
use serde_json::json;

/// Upper bound on shots per side; a correct engine needs at most size².
const MAX_SHOTS: usize = 200;

/// Let `shooter` keep firing at `target` until it misses or wins.
fn volley(shooter: &mut Game, target: &mut Game, rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut shots = 0;
    loop {
        let pos = shooter.choose_shot(rng)?;
        let outcome = target.handle_enemy_shot(pos)?;
        shooter.process_enemy_reply(outcome)?;
        shots += 1;
        if outcome == ShotOutcome::Miss || shooter.is_victory() {
            return Ok(shots);
        }
    }
}

fn main() -> anyhow::Result<()> {
    seabattle::init_logging_with(log::LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut g1 = Game::with_defaults(&mut rng1)?;
    let mut g2 = Game::with_defaults(&mut rng2)?;

    let (mut shots1, mut shots2) = (0, 0);
    while !g1.is_end_game() && !g2.is_end_game() {
        shots1 += volley(&mut g1, &mut g2, &mut rng1)?;
        if g1.is_victory() {
            break;
        }
        shots2 += volley(&mut g2, &mut g1, &mut rng2)?;
        if shots1 > MAX_SHOTS || shots2 > MAX_SHOTS {
            anyhow::bail!("game did not finish within {} shots", MAX_SHOTS);
        }
    }

    let winner = match (g1.status(), g2.status()) {
        (GameStatus::Won, _) | (_, GameStatus::Lost) => Some("player1"),
        (GameStatus::Lost, _) | (_, GameStatus::Won) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": {"status": format!("{:?}", g1.status()), "shots": shots1},
        "player2": {"status": format!("{:?}", g2.status()), "shots": shots2},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
