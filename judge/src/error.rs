use gridgames::{Coord, IllegalActivation};

#[derive(Debug)]
/// Error type for one turn.
pub enum IllegalMove {
    EmptyTurn,
    Rejected {
        activation_idx: usize,
        at: Coord,
        err: IllegalActivation,
    },
    /// The turn was already over, but the response contained more cells.
    ActivationAfterTurnEnded { activation_idx: usize },
    /// The response ended before the turn did, e.g. after only selecting a
    /// piece or in the middle of a chain jump.
    TurnNotCompleted,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::Rejected { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::EmptyTurn => write!(f, "Tried to play a turn without activating any cell"),
            IllegalMove::Rejected {
                activation_idx,
                at,
                err: _,
            } => write!(
                f,
                "Activation #{} (of cell {}) was rejected",
                activation_idx + 1,
                at
            ),
            IllegalMove::ActivationAfterTurnEnded { activation_idx } => write!(
                f,
                "The turn ended before activation #{}, but more cells were activated",
                activation_idx + 1
            ),
            IllegalMove::TurnNotCompleted => {
                write!(f, "The activations ended before the turn was complete")
            }
        }
    }
}
