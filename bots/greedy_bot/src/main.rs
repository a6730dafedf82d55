use clap::Parser;
use gridgames::gomoku::GomokuGame;
use gridgames::{Coord, GameConfig, PlayTurnResponse, Seat, Session, Snapshot};
use gridgames_bot_utils::{explore_turns, initialize_logging, Bot, ExploredTurn};
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use tracing::debug;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    debug!(seed, "Starting greedy bot");
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot { rng }.run()
}

struct GreedyBot {
    rng: StdRng,
}

/// Keeps every candidate with the highest score.
fn top_choices<T, S: Ord>(candidates: impl IntoIterator<Item = T>, score: impl Fn(&T) -> S) -> Vec<T> {
    let mut top_choices = Vec::new();
    let mut top_score = None;
    for candidate in candidates {
        let s = Some(score(&candidate));
        match s.cmp(&top_score) {
            std::cmp::Ordering::Less => {}
            std::cmp::Ordering::Equal => top_choices.push(candidate),
            std::cmp::Ordering::Greater => {
                top_choices = vec![candidate];
                top_score = s;
            }
        }
    }
    top_choices
}

/// Winning beats blocking the opponent's win, which beats the longest own run.
fn gomoku_score(game: &GomokuGame, at: Coord) -> (bool, bool, usize) {
    let me = game.current_player();
    (
        game.evaluate_win(at, me),
        game.evaluate_win(at, me.opponent()),
        game.board().longest_run(at, me),
    )
}

/// Each capture counts double, so a promotion never outweighs one.
fn checkers_score(turn: &ExploredTurn) -> usize {
    turn.num_captures() * 2 + usize::from(turn.promotes())
}

impl Bot for GreedyBot {
    fn new_game(&mut self, config: &GameConfig, seat: Seat) {
        debug!(?config, ?seat, "New game");
    }

    fn play_turn(&mut self, snapshot: Snapshot) -> PlayTurnResponse {
        let session = Session::from_snapshot(&snapshot);
        let path = match &session {
            Session::Checkers(_) => {
                let choices = top_choices(explore_turns(&session), checkers_score);
                choices
                    .choose(&mut self.rng)
                    .map(|turn| turn.path.clone())
            }
            Session::Gomoku(game) => {
                let choices = top_choices(game.board().empty_cells(), |&at| gomoku_score(game, at));
                choices.choose(&mut self.rng).map(|&at| vec![at])
            }
        };
        debug!(?path, "Chose turn");
        PlayTurnResponse(path.unwrap_or_default())
    }
}
