use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use gridgames::GameConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Writes one JSON file per game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    /// Both messages are JSON as sent over the wire. Anything that does not
    /// parse is kept as a plain string.
    pub fn store_request(&mut self, player: &str, request: &str, response: &str) {
        let parse = |json: &str| {
            serde_json::from_str(json).unwrap_or_else(|_| Value::String(String::from(json)))
        };
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: parse(request),
            response: parse(response),
        });
    }

    /// Writes the requests stored since the last call and returns the path
    /// of the new file.
    pub fn write_game_recording(
        &mut self,
        config: &GameConfig,
        result: &str,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let recording = GameRecording {
            config: *config,
            result: String::from(result),
            requests: std::mem::take(&mut self.requests),
        };
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub config: GameConfig,
    pub result: String,
    pub requests: Vec<RequestToPlayer>,
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: Value,
    pub response: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recordings_are_numbered_json_files() {
        let directory = std::env::temp_dir().join("judge_recordings_are_numbered_json_files");
        std::fs::create_dir_all(&directory).unwrap();
        let mut recorder = Recorder::new(directory.clone()).unwrap();

        recorder.store_request("alice", r#"{"type":"Bye"}"#, "not json");
        let first = recorder
            .write_game_recording(&GameConfig::default(), "Tie")
            .unwrap();
        let second = recorder
            .write_game_recording(&GameConfig::default(), "Tie")
            .unwrap();
        assert_eq!(first, directory.join("game_000001.json"));
        assert_eq!(second, directory.join("game_000002.json"));

        let recording: GameRecording =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(recording.requests.len(), 1);
        assert_eq!(recording.requests[0].request["type"], "Bye");
        assert_eq!(recording.requests[0].response, Value::from("not json"));
        let recording: GameRecording =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert!(recording.requests.is_empty());

        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let directory = std::env::temp_dir().join("judge_missing_directory_is_an_error");
        assert!(Recorder::new(directory).is_err());
    }
}
