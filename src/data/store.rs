//! Where assignments live between the bot that writes them and the round that reads them.
//! `DirectoryStore` mirrors the on-disk layout (`team_data.json`, `1.json` .. `5.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::data::assignment::{Assignment, TeamData};

pub const TEAM_DATA_FILE: &str = "team_data.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse json '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no assignment recorded for round {0}")]
    MissingRound(u32),
    #[error("no team data loaded")]
    MissingTeamData,
}

pub trait AssignmentStore {
    fn load_team_data(&self) -> Result<TeamData, StoreError>;
    fn read_round(&self, round: u32) -> Result<Assignment, StoreError>;
    fn write_round(&mut self, round: u32, assignment: &Assignment) -> Result<(), StoreError>;
}

impl<S: AssignmentStore + ?Sized> AssignmentStore for &mut S {
    fn load_team_data(&self) -> Result<TeamData, StoreError> {
        (**self).load_team_data()
    }

    fn read_round(&self, round: u32) -> Result<Assignment, StoreError> {
        (**self).read_round(round)
    }

    fn write_round(&mut self, round: u32, assignment: &Assignment) -> Result<(), StoreError> {
        (**self).write_round(round, assignment)
    }
}

/// JSON files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn round_path(&self, round: u32) -> PathBuf {
        self.dir.join(format!("{round}.json"))
    }

    pub fn write_team_data(&self, team_data: &TeamData) -> Result<(), StoreError> {
        write_json(&self.dir.join(TEAM_DATA_FILE), team_data)
    }
}

impl AssignmentStore for DirectoryStore {
    fn load_team_data(&self) -> Result<TeamData, StoreError> {
        read_json(&self.dir.join(TEAM_DATA_FILE))
    }

    fn read_round(&self, round: u32) -> Result<Assignment, StoreError> {
        let path = self.round_path(round);
        if !path.exists() {
            return Err(StoreError::MissingRound(round));
        }
        read_json(&path)
    }

    fn write_round(&mut self, round: u32, assignment: &Assignment) -> Result<(), StoreError> {
        write_json(&self.round_path(round), assignment)
    }
}

/// In-process store; nothing touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    team_data: Option<TeamData>,
    rounds: BTreeMap<u32, Assignment>,
}

impl MemoryStore {
    pub fn new(team_data: TeamData) -> Self {
        Self {
            team_data: Some(team_data),
            rounds: BTreeMap::new(),
        }
    }

    pub fn with_round(mut self, round: u32, assignment: Assignment) -> Self {
        self.rounds.insert(round, assignment);
        self
    }

    pub fn rounds(&self) -> &BTreeMap<u32, Assignment> {
        &self.rounds
    }
}

impl AssignmentStore for MemoryStore {
    fn load_team_data(&self) -> Result<TeamData, StoreError> {
        self.team_data.clone().ok_or(StoreError::MissingTeamData)
    }

    fn read_round(&self, round: u32) -> Result<Assignment, StoreError> {
        self.rounds
            .get(&round)
            .cloned()
            .ok_or(StoreError::MissingRound(round))
    }

    fn write_round(&mut self, round: u32, assignment: &Assignment) -> Result<(), StoreError> {
        self.rounds.insert(round, assignment.clone());
        Ok(())
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let payload = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, payload).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
