use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use gridgames::Request;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::recording::Recorder;

/// How to start a bot, as read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The program and its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        let config: PlayerConfig = serde_json::from_str(&json)
            .with_context(|| format!("Could not parse player config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

pub struct Player {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let Some((program, args)) = config.cmd.split_first() else {
            anyhow::bail!("Player {} has an empty cmd", config.nick);
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start player {}", config.nick))?;

        let stdin = child.stdin.take().context("Could not access stdin")?;
        let stdout = child.stdout.take().context("Could not access stdout")?;
        Ok(Self {
            name: config.nick.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Player {} closed its stdout", self.name);
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", player = &self.name, response = %serialized_response);
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!(
                "Player {} sent an invalid response: {}",
                self.name, serialized_response
            )
        })?;

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req_json.trim_end(), serialized_response);
        }
        self.buf.clear();
        Ok(response)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        // The bot is expected to exit on its own after this
        let bye = serde_json::to_string(&Request::Bye).map(|mut json| {
            json.push('\n');
            json
        });
        let sent = bye.map_err(anyhow::Error::from).and_then(|json| {
            self.stdin.write_all(json.as_bytes())?;
            self.stdin.flush()?;
            Ok(())
        });
        if let Err(err) = sent {
            warn!(player = &self.name, "Could not say bye: {}", err);
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
