//! Repository for the cached verified member.

use showcase_core::member::Member;

use crate::keys;
use crate::store::{read_json, write_json, KeyValueStore, StoreError};

/// Caches the last verified member so verification survives a restart.
pub struct MemberRepo;

impl MemberRepo {
    pub async fn load(store: &dyn KeyValueStore) -> Result<Option<Member>, StoreError> {
        read_json(store, keys::MEMBER).await
    }

    pub async fn save(store: &dyn KeyValueStore, member: &Member) -> Result<(), StoreError> {
        write_json(store, keys::MEMBER, member).await
    }

    pub async fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(keys::MEMBER).await
    }
}
