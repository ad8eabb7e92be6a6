#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::prelude::*;
#[cfg(feature = "std")]
use seabattle::{generate_field, DEFAULT_BOARD_SIZE, DEFAULT_SHIPS};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the engine in the terminal.
    Play {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Name columns by number instead of by letter")]
        numbers: bool,
        #[arg(long, help = "Let the engine fire first")]
        engine_first: bool,
    },
    /// Print a random fleet layout and exit.
    Layout {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            size,
            seed,
            numbers,
            engine_first,
        } => {
            let mut rng = make_rng(seed);
            let game = Game::start_new_game(size, None, None, &mut rng)?;
            game.log_fields();
            let lines = BufReader::new(tokio::io::stdin()).lines();
            run_game(game, rng, lines, numbers, engine_first).await?;
        }
        Commands::Layout { size, seed } => {
            let mut rng = make_rng(seed);
            let board = generate_field(size, &DEFAULT_SHIPS, &mut rng)?;
            println!("{}", board);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, msg: &str) -> anyhow::Result<String> {
    println!("{}", msg);
    match lines.next_line().await? {
        Some(line) => Ok(line.trim().to_lowercase()),
        None => Err(anyhow::anyhow!("input closed")),
    }
}

#[cfg(feature = "std")]
async fn run_game(
    mut game: Game,
    mut rng: SmallRng,
    mut lines: Lines<BufReader<Stdin>>,
    numbers: bool,
    engine_first: bool,
) -> anyhow::Result<()> {
    let mut my_turn = engine_first;
    println!("Ships: {:?}. Replies to my shots: hit, kill, miss or repeat.", game.ships());

    while !game.is_end_game() {
        if my_turn {
            let shot = game.choose_shot(&mut rng)?;
            let outcome = loop {
                let msg = format!("My shot: {}", format_position(shot, numbers));
                let reply = prompt(&mut lines, &msg).await?;
                if reply == "repeat" {
                    continue;
                }
                match reply.parse::<ShotOutcome>() {
                    Ok(outcome) => break outcome,
                    Err(e) => println!("{}: {}", e, reply),
                }
            };
            game.process_enemy_reply(outcome)?;
            if outcome == ShotOutcome::Miss {
                my_turn = false;
            }
        } else {
            let line = prompt(&mut lines, "Your shot:").await?;
            let outcome = match game.handle_enemy_utterance(&line) {
                Ok(outcome) => outcome,
                Err(GameError::Parse(e)) => {
                    println!("{}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            println!("{}", outcome);
            if outcome == ShotOutcome::Miss {
                my_turn = true;
            }
        }
    }

    game.log_fields();
    match game.status() {
        GameStatus::Won => println!("I won: all your ships are sunk."),
        GameStatus::Lost => println!("You won: all my ships are sunk."),
        GameStatus::InProgress => {}
    }
    Ok(())
}
