//! Saved-projects store.
//!
//! # Responsibility
//! - Own the in-memory list of saved project snapshots.
//! - Mirror every mutation to one named slot of a `KeyValueStore`.
//!
//! # Invariants
//! - The whole list is rewritten on every add/remove; there is no partial write.
//! - Load never fails: absent or undecodable data reads as an empty list.
//! - A failed write is reported but does not roll back the in-memory list.

use crate::model::project::{ProjectId, ProjectSnapshot, ProjectSummary};
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use crate::repo::project_codec::{decode_projects, encode_projects};
use log::{info, warn};

/// Slot key holding the encoded project list.
pub const PROJECTS_SLOT_KEY: &str = "savedProjects";

/// Saved-projects list backed by a key-value slot.
pub struct ProjectStore<S: KeyValueStore> {
    backend: S,
    projects: Vec<ProjectSnapshot>,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Creates an empty, not yet loaded store.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            projects: Vec::new(),
        }
    }

    /// Creates a store and loads the persisted list.
    pub fn open(backend: S) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Reloads the list from the backend and returns a copy of it.
    pub fn load(&mut self) -> Vec<ProjectSnapshot> {
        self.projects = match self.backend.read_slot(PROJECTS_SLOT_KEY) {
            Ok(Some(bytes)) => match decode_projects(&bytes) {
                Ok(projects) => {
                    info!(
                        "event=projects_load module=store status=ok count={}",
                        projects.len()
                    );
                    projects
                }
                Err(err) => {
                    warn!(
                        "event=projects_load module=store status=error error_code=decode_failed bytes={} error={}",
                        bytes.len(),
                        err
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=projects_load module=store status=ok count=0 slot=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=projects_load module=store status=error error_code=read_failed error={}",
                    err
                );
                Vec::new()
            }
        };
        self.projects.clone()
    }

    /// Replaces the full list and persists it.
    pub fn save(&mut self, projects: Vec<ProjectSnapshot>) -> RepoResult<()> {
        self.projects = projects;
        self.persist()
    }

    /// Appends one snapshot and persists the list.
    ///
    /// # Errors
    /// - `InvalidData` when the snapshot is invalid or its id is already
    ///   stored; the list is left unchanged.
    /// - Backend errors from the write; the snapshot stays in memory.
    pub fn add(&mut self, snapshot: ProjectSnapshot) -> RepoResult<()> {
        snapshot
            .validate()
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        if self.get(snapshot.id).is_some() {
            return Err(RepoError::InvalidData(format!(
                "project {} is already saved",
                snapshot.id
            )));
        }
        self.projects.push(snapshot);
        self.persist()
    }

    /// Removes one snapshot by id and persists the list.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown.
    pub fn remove(&mut self, id: ProjectId) -> RepoResult<bool> {
        let Some(index) = self.projects.iter().position(|project| project.id == id) else {
            return Ok(false);
        };
        self.projects.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Current in-memory list in saved order.
    pub fn projects(&self) -> &[ProjectSnapshot] {
        &self.projects
    }

    pub fn get(&self, id: ProjectId) -> Option<&ProjectSnapshot> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Gallery entries in saved order.
    pub fn summaries(&self) -> Vec<ProjectSummary> {
        self.projects.iter().map(ProjectSnapshot::summary).collect()
    }

    fn persist(&self) -> RepoResult<()> {
        let result = encode_projects(&self.projects)
            .and_then(|bytes| self.backend.write_slot(PROJECTS_SLOT_KEY, &bytes));
        match &result {
            Ok(()) => info!(
                "event=projects_save module=store status=ok count={}",
                self.projects.len()
            ),
            Err(err) => warn!(
                "event=projects_save module=store status=error count={} error={}",
                self.projects.len(),
                err
            ),
        }
        result
    }
}
