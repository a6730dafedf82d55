mod legal_turns;
pub use legal_turns::*;

use gridgames::{GameConfig, Okay, PlayTurnResponse, Request, Seat, Snapshot};
use tracing::debug;

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, config: &GameConfig, seat: Seat);
    fn play_turn(&mut self, snapshot: Snapshot) -> PlayTurnResponse;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { config, seat } => {
                    debug!(?config, ?seat, "New game");
                    self.new_game(&config, seat);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn { snapshot } => {
                    serde_json::to_writer(&mut stdout, &self.play_turn(snapshot))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}

/// Sets up logging for a bot. Logs go to stderr, since stdout is reserved
/// for talking to the judge.
pub fn initialize_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
