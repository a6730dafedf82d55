use gridgames::{PlayTurnResponse, Session};

use crate::error::IllegalMove;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Normal,
    GameEnded,
}

/// Applies the activations of one turn.
///
/// Either the whole turn is applied, or the session is left as it was.
pub fn execute_turn(
    session: &mut Session,
    response: &PlayTurnResponse,
) -> Result<TurnOutcome, IllegalMove> {
    if response.0.is_empty() {
        return Err(IllegalMove::EmptyTurn);
    }
    let mut scratch = session.clone();
    let mut turn_ended = false;
    for (activation_idx, &at) in response.0.iter().enumerate() {
        if turn_ended {
            return Err(IllegalMove::ActivationAfterTurnEnded { activation_idx });
        }
        let activation = scratch
            .on_cell_activated(at)
            .map_err(|err| IllegalMove::Rejected {
                activation_idx,
                at,
                err,
            })?;
        turn_ended = activation.ends_turn();
    }
    if !turn_ended {
        return Err(IllegalMove::TurnNotCompleted);
    }

    *session = scratch;
    if session.is_terminal() {
        Ok(TurnOutcome::GameEnded)
    } else {
        Ok(TurnOutcome::Normal)
    }
}
