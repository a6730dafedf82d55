use gridgames::checkers::{CheckersEvent, Phase};
use gridgames::{Activation, Coord, PlayTurnResponse, Session, Snapshot};

/// A complete turn, i.e. a sequence of activations after which the other
/// side is to move (or the game is over).
#[derive(Clone, Debug)]
pub struct ExploredTurn {
    pub path: Vec<Coord>,
    /// One entry per activation in `path`.
    pub activations: Vec<Activation>,
    /// The session after the turn.
    pub after: Session,
}

impl ExploredTurn {
    fn start(session: &Session) -> Self {
        Self {
            path: Vec::new(),
            activations: Vec::new(),
            after: session.clone(),
        }
    }

    /// Returns `None` if the activation is rejected.
    fn then_activate(&self, at: Coord) -> Option<Self> {
        let mut next = self.clone();
        let activation = next.after.on_cell_activated(at).ok()?;
        next.path.push(at);
        next.activations.push(activation);
        Some(next)
    }

    fn is_complete(&self) -> bool {
        self.activations
            .last()
            .is_some_and(|activation| activation.ends_turn())
    }

    /// How many pieces were captured during the turn. Always 0 for gomoku.
    pub fn num_captures(&self) -> usize {
        self.activations
            .iter()
            .filter(|activation| {
                matches!(
                    activation,
                    Activation::Checkers(CheckersEvent::Moved { outcome, .. })
                        if outcome.captured.is_some()
                )
            })
            .count()
    }

    /// Whether a checkers man was crowned during the turn.
    pub fn promotes(&self) -> bool {
        self.activations.iter().any(|activation| {
            matches!(
                activation,
                Activation::Checkers(CheckersEvent::Moved { outcome, .. }) if outcome.promoted
            )
        })
    }
}

/// All complete turns the side to move can play.
pub fn legal_turns(snapshot: &Snapshot) -> Vec<PlayTurnResponse> {
    explore_turns(&Session::from_snapshot(snapshot))
        .into_iter()
        .map(|turn| PlayTurnResponse(turn.path))
        .collect()
}

/// Like [`legal_turns`], but also reports what each turn does.
///
/// Checkers turns include every way of continuing a chain jump and, unless
/// captures are forced, every point at which it can be ended early.
pub fn explore_turns(session: &Session) -> Vec<ExploredTurn> {
    let mut turns = Vec::new();
    if session.is_terminal() {
        return turns;
    }
    let start = ExploredTurn::start(session);
    match session {
        Session::Checkers(game) => {
            if let Phase::PieceSelected { chain: true, .. } = game.phase() {
                continue_chain(&start, &mut turns);
                return turns;
            }
            for from in game.board().pieces(game.current_player()) {
                // Clicking the selected piece again would deselect it
                let selected = if game.selection() == Some(from) {
                    Some(start.clone())
                } else {
                    start.then_activate(from)
                };
                let Some(selected) = selected else {
                    continue;
                };
                for to in selected.after.legal_destinations() {
                    if let Some(turn) = selected.then_activate(to) {
                        complete(turn, &mut turns);
                    }
                }
            }
        }
        Session::Gomoku(game) => {
            turns.extend(
                game.board()
                    .empty_cells()
                    .filter_map(|at| start.then_activate(at)),
            );
        }
    }
    turns
}

fn complete(turn: ExploredTurn, turns: &mut Vec<ExploredTurn>) {
    if turn.is_complete() {
        turns.push(turn);
    } else {
        continue_chain(&turn, turns);
    }
}

fn continue_chain(turn: &ExploredTurn, turns: &mut Vec<ExploredTurn>) {
    let Some(at) = turn.after.selection() else {
        return;
    };
    for to in turn.after.legal_destinations() {
        if let Some(next) = turn.then_activate(to) {
            complete(next, turns);
        }
    }
    // Stopping the chain here; rejected when captures are forced
    if let Some(stop) = turn.then_activate(at) {
        turns.push(stop);
    }
}
