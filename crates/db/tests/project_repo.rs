//! Integration tests for the project repository.
//!
//! Exercises the collection invariants against the in-memory and file
//! stores:
//! - newest-first insertion and the duplicate rule
//! - update preserving identity and submission time
//! - idempotent delete
//! - member partitioning
//! - persistence across reloads

use std::sync::Arc;

use assert_matches::assert_matches;
use showcase_core::project::{NewProject, UpdateProject};
use showcase_core::types::ProjectId;
use showcase_db::keys;
use showcase_db::repositories::{AddOutcome, ProjectRepo};
use showcase_db::{FileStore, KeyValueStore, MemoryStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, creator: &str, member: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        creator: creator.to_string(),
        link: format!("https://github.com/{creator}/{name}"),
        description: format!("{name} description"),
        image: None,
        member_email: member.to_string(),
    }
}

async fn empty_repo() -> (Arc<dyn KeyValueStore>, ProjectRepo) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repo = ProjectRepo::load(Arc::clone(&store)).await.unwrap();
    (store, repo)
}

async fn add_ok(repo: &mut ProjectRepo, input: NewProject) -> ProjectId {
    match repo.add(input).await.unwrap() {
        AddOutcome::Added(record) => record.id,
        other => panic!("expected Added, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_from_empty_store_yields_empty_collection() {
    let (_, repo) = empty_repo().await;
    assert!(repo.list_all().is_empty());
}

#[tokio::test]
async fn load_ignores_malformed_collection() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set(keys::PROJECTS, "{\"oops\": true}").await.unwrap();

    let repo = ProjectRepo::load(store).await.unwrap();
    assert!(repo.list_all().is_empty());
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[tokio::test]
async fn distinct_adds_are_all_kept_newest_first() {
    let (_, mut repo) = empty_repo().await;

    let names = ["alpha", "beta", "gamma", "delta"];
    for name in names {
        add_ok(&mut repo, new_project(name, "A", "a@x.com")).await;
    }

    let listed: Vec<_> = repo.list_all().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(listed, vec!["delta", "gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn same_name_for_different_members_is_not_a_duplicate() {
    let (_, mut repo) = empty_repo().await;

    add_ok(&mut repo, new_project("Foo", "A", "a@x.com")).await;
    add_ok(&mut repo, new_project("Foo", "A", "b@y.com")).await;

    assert_eq!(repo.list_all().len(), 2);
}

#[tokio::test]
async fn case_insensitive_duplicate_is_rejected() {
    let (_, mut repo) = empty_repo().await;
    let first = add_ok(&mut repo, new_project("Foo", "A", "a@x.com")).await;

    let outcome = repo
        .add(new_project("FOO", "a", "A@X.COM"))
        .await
        .unwrap();

    assert_matches!(outcome, AddOutcome::Duplicate(id) if id == first);
    assert_eq!(repo.list_all().len(), 1);
}

#[tokio::test]
async fn added_records_get_unique_ids_and_normalized_owner() {
    let (_, mut repo) = empty_repo().await;
    let a = add_ok(&mut repo, new_project("one", "A", "A@X.com")).await;
    let b = add_ok(&mut repo, new_project("two", "A", "A@X.com")).await;

    assert_ne!(a, b);
    assert_eq!(repo.get(&a).unwrap().member_email, "a@x.com");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_preserves_id_timestamp_and_position() {
    let (_, mut repo) = empty_repo().await;
    let older = add_ok(&mut repo, new_project("older", "A", "a@x.com")).await;
    add_ok(&mut repo, new_project("newer", "A", "a@x.com")).await;
    let submitted_at = repo.get(&older).unwrap().submitted_at;

    let updated = repo
        .update(
            &older,
            UpdateProject {
                name: Some("renamed".into()),
                description: Some("new text".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("record exists");

    assert_eq!(updated.id, older);
    assert_eq!(updated.submitted_at, submitted_at);
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.creator, "A");

    let all = repo.list_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all.iter().filter(|p| p.id == older).count(), 1);
    assert_eq!(all[1].id, older);
}

#[tokio::test]
async fn update_of_unknown_id_is_a_silent_no_op() {
    let (store, mut repo) = empty_repo().await;

    let result = repo
        .update(&ProjectId::from("missing"), UpdateProject::default())
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(store.get(keys::PROJECTS).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_twice_removes_at_most_one() {
    let (_, mut repo) = empty_repo().await;
    let id = add_ok(&mut repo, new_project("Foo", "A", "a@x.com")).await;
    add_ok(&mut repo, new_project("Bar", "A", "a@x.com")).await;

    assert!(repo.delete(&id).await.unwrap());
    assert!(!repo.delete(&id).await.unwrap());
    assert_eq!(repo.list_all().len(), 1);
    assert!(repo.get(&id).is_none());
}

// ---------------------------------------------------------------------------
// Member partitioning
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_by_member_matches_owner_case_insensitively() {
    let (_, mut repo) = empty_repo().await;
    add_ok(&mut repo, new_project("one", "A", "a@x.com")).await;
    add_ok(&mut repo, new_project("two", "B", "b@y.com")).await;
    add_ok(&mut repo, new_project("three", "A", "a@x.com")).await;

    let mine: Vec<_> = repo
        .list_by_member("A@X.COM")
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(mine, vec!["three", "one"]);

    let expected: Vec<_> = repo
        .list_all()
        .iter()
        .filter(|p| p.member_email.eq_ignore_ascii_case("a@x.com"))
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(mine, expected);

    assert!(repo.list_by_member("nobody@z.com").is_empty());
    assert!(repo.list_by_member("").is_empty());
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_mutation_is_visible_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).await.unwrap());
    let mut repo = ProjectRepo::load(Arc::clone(&store)).await.unwrap();
    let keep = add_ok(&mut repo, new_project("keep", "A", "a@x.com")).await;
    let drop_me = add_ok(&mut repo, new_project("drop", "A", "a@x.com")).await;
    repo.update(
        &keep,
        UpdateProject {
            link: Some("https://example.com/keep".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.delete(&drop_me).await.unwrap();
    drop(repo);
    drop(store);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).await.unwrap());
    let reloaded = ProjectRepo::load(store).await.unwrap();
    let all = reloaded.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, keep);
    assert_eq!(all[0].link, "https://example.com/keep");
}
