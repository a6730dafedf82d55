use clap::Parser;
use gridgames::{GameConfig, PlayTurnResponse, Seat, Snapshot};
use gridgames_bot_utils::{legal_turns, Bot};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _config: &GameConfig, _seat: Seat) {}

    fn play_turn(&mut self, snapshot: Snapshot) -> PlayTurnResponse {
        // An empty turn only happens when there is nothing to play, and the
        // judge will reject it.
        legal_turns(&snapshot)
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or(PlayTurnResponse(vec![]))
    }
}
