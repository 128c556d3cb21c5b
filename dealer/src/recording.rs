use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use nines::TurnRecord;
use serde::{Deserialize, Serialize};

/// One entry in a game transcript.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordedEvent {
    Reveal { seat: String, col: usize, row: usize },
    Turn { seat: String, record: TurnRecord },
    Out { seat: String },
}

/// Collects the events of a game and writes them out as JSON, one file
/// per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    events: Vec<RecordedEvent>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            events: Vec::new(),
        })
    }

    pub fn record(&mut self, event: RecordedEvent) {
        self.events.push(event);
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.events))?;
        self.num += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recordings_land_in_numbered_files() {
        let directory = std::env::temp_dir().join(format!(
            "nines-recording-test-{}-{}",
            std::process::id(),
            line!()
        ));
        std::fs::create_dir_all(&directory).unwrap();

        let mut recorder = Recorder::new(directory.clone()).unwrap();
        recorder.record(RecordedEvent::Reveal {
            seat: "alice".to_string(),
            col: 0,
            row: 2,
        });
        recorder.record(RecordedEvent::Out {
            seat: "alice".to_string(),
        });
        recorder.write_game_recording().unwrap();
        recorder.write_game_recording().unwrap();

        let first = std::fs::read_to_string(directory.join("game_000001.json")).unwrap();
        let events: Vec<RecordedEvent> = serde_json::from_str(&first).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], RecordedEvent::Reveal { seat, col: 0, row: 2 } if seat == "alice"));
        assert!(matches!(&events[1], RecordedEvent::Out { seat } if seat == "alice"));

        // The first write drained the buffer, so the second file is empty.
        let second = std::fs::read_to_string(directory.join("game_000002.json")).unwrap();
        let events: Vec<RecordedEvent> = serde_json::from_str(&second).unwrap();
        assert!(events.is_empty());

        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let directory = std::env::temp_dir().join("nines-recording-test-no-such-dir");
        assert!(Recorder::new(directory).is_err());
    }
}
