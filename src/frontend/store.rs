use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "best_score.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Record {
    best: u32,
}

#[derive(Debug, Clone)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    /// Store under `dir`, or the platform data directory when `None`.
    pub fn new(dir: Option<PathBuf>) -> io::Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "flappy-tui")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "no home directory"))?,
        };
        Ok(Self::at(dir.join(FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable records count as zero.
    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!("could not read {}: {e}", self.path.display());
                return 0;
            }
        };
        match serde_json::from_str::<Record>(&text) {
            Ok(record) => record.best,
            Err(e) => {
                warn!("ignoring corrupt best score in {}: {e}", self.path.display());
                0
            }
        }
    }

    pub fn save(&self, best: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Record { best })?;
        fs::write(&self.path, text)
    }
}
