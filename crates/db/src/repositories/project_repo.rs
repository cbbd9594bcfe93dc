//! Repository for the project collection.

use std::sync::Arc;

use showcase_core::project::{
    filter_by_member, find_duplicate, DuplicateKey, NewProject, ProjectRecord, UpdateProject,
};
use showcase_core::types::ProjectId;

use crate::keys;
use crate::store::{read_json, write_json, KeyValueStore, StoreError};

/// Result of [`ProjectRepo::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The record was inserted at the head of the collection.
    Added(ProjectRecord),
    /// An existing record already has the same `(name, creator, member)`
    /// triple; nothing was written.
    Duplicate(ProjectId),
}

/// In-memory project collection mirrored to the store.
///
/// The collection is newest-first. Every mutation rewrites the whole
/// collection under [`keys::PROJECTS`]; the in-memory copy only changes
/// once that write succeeds.
pub struct ProjectRepo {
    store: Arc<dyn KeyValueStore>,
    projects: Vec<ProjectRecord>,
}

impl ProjectRepo {
    /// Load the collection. Absent or malformed data yields an empty one.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let projects: Vec<ProjectRecord> = read_json(store.as_ref(), keys::PROJECTS)
            .await?
            .unwrap_or_default();
        tracing::debug!(count = projects.len(), "Loaded project collection");
        Ok(Self { store, projects })
    }

    /// Insert a new record at the head unless it duplicates an existing one.
    pub async fn add(&mut self, input: NewProject) -> Result<AddOutcome, StoreError> {
        let key = DuplicateKey::new(&input.name, &input.creator, &input.member_email);
        if let Some(existing) = self.find_duplicate(&key, None) {
            tracing::info!(existing_id = %existing.id, "Rejected duplicate project");
            return Ok(AddOutcome::Duplicate(existing.id.clone()));
        }

        let mut id = ProjectId::generate();
        while self.get(&id).is_some() {
            id = ProjectId::generate();
        }
        let record = ProjectRecord::from_new(input, id, chrono::Utc::now());

        let mut next = Vec::with_capacity(self.projects.len() + 1);
        next.push(record.clone());
        next.extend(self.projects.iter().cloned());
        self.commit(next).await?;

        tracing::info!(id = %record.id, member = %record.member_email, "Added project");
        Ok(AddOutcome::Added(record))
    }

    /// Merge `input` into the record with `id`.
    ///
    /// Returns `None` without writing anything if no such record exists.
    pub async fn update(
        &mut self,
        id: &ProjectId,
        input: UpdateProject,
    ) -> Result<Option<ProjectRecord>, StoreError> {
        let Some(index) = self.projects.iter().position(|p| &p.id == id) else {
            tracing::debug!(%id, "Ignoring update of unknown project");
            return Ok(None);
        };

        let mut next = self.projects.clone();
        next[index].apply(input);
        let updated = next[index].clone();
        self.commit(next).await?;

        tracing::info!(%id, "Updated project");
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns `true` if one was removed;
    /// deleting an absent id is a no-op.
    pub async fn delete(&mut self, id: &ProjectId) -> Result<bool, StoreError> {
        if self.get(id).is_none() {
            tracing::debug!(%id, "Ignoring delete of unknown project");
            return Ok(false);
        }

        let next: Vec<_> = self
            .projects
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        self.commit(next).await?;

        tracing::info!(%id, "Deleted project");
        Ok(true)
    }

    /// The full collection, newest first.
    pub fn list_all(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Records owned by `member_id` (case-insensitive). Empty for an empty id.
    pub fn list_by_member(&self, member_id: &str) -> Vec<&ProjectRecord> {
        filter_by_member(&self.projects, member_id)
    }

    pub fn get(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// A record matching `key`, ignoring the record with id `excluding`.
    pub fn find_duplicate(
        &self,
        key: &DuplicateKey,
        excluding: Option<&ProjectId>,
    ) -> Option<&ProjectRecord> {
        find_duplicate(&self.projects, key, excluding)
    }

    async fn commit(&mut self, next: Vec<ProjectRecord>) -> Result<(), StoreError> {
        write_json(self.store.as_ref(), keys::PROJECTS, &next).await?;
        self.projects = next;
        Ok(())
    }
}
