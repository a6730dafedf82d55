use gridgames::{Okay, Outcome, PlayTurnResponse, Request, Seat, Session};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::error::IllegalMove;
use crate::player::Player;
use crate::recording::Recorder;
use crate::turn::execute_turn;
use crate::MatchConfig;

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    /// A gomoku board filled up without a winner.
    Tie,
    TurnLimitReached,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WonByPlayer { player_idx } => write!(f, "Won by player {}", player_idx + 1),
            GameResult::Tie => write!(f, "Tie"),
            GameResult::TurnLimitReached => write!(f, "Turn limit reached"),
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                write!(f, "Illegal move by player {}: {}", player_idx + 1, err)
            }
        }
    }
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
    config: &MatchConfig,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Randomly decide who moves first
    let seats = {
        let mut arr = [Seat::First, Seat::Second];
        arr.shuffle(rng);
        arr
    };
    let mut players = [player_1, player_2];

    // Inform the players about the new game, so that they can reset their state
    for (player, seat) in players.iter_mut().zip(seats) {
        let _: Okay = player.perform_request(
            recorder,
            &Request::NewGame {
                config: config.game,
                seat,
            },
        )?;
    }

    let mut session = Session::new(&config.game);
    let game_result = play_turns(&mut players, seats, &mut session, config.max_turns, recorder)?;

    if let Some(rec) = recorder {
        rec.write_game_recording(&config.game, &game_result.to_string())?;
    }
    Ok(game_result)
}

fn play_turns(
    players: &mut [&mut Player; 2],
    seats: [Seat; 2],
    session: &mut Session,
    max_turns: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let player_idx = |seat: Seat| if seats[0] == seat { 0 } else { 1 };

    let mut num_turns = 0;
    while let Some(seat) = session.current_seat() {
        if num_turns >= max_turns {
            return Ok(GameResult::TurnLimitReached);
        }
        let current_player_idx = player_idx(seat);
        let req = Request::PlayTurn {
            snapshot: session.snapshot(),
        };
        let response: PlayTurnResponse =
            players[current_player_idx].perform_request(recorder, &req)?;
        if let Err(err) = execute_turn(session, &response) {
            return Ok(GameResult::IllegalMoveByPlayer {
                player_idx: current_player_idx,
                err,
            });
        }
        trace!("After turn {}:\n{}", num_turns + 1, session);
        num_turns += 1;
    }

    // Report who won
    Ok(match session.outcome() {
        Some(Outcome::Winner(seat)) => GameResult::WonByPlayer {
            player_idx: player_idx(seat),
        },
        Some(Outcome::Draw) | None => GameResult::Tie,
    })
}
