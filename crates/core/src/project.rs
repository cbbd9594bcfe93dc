//! Project records, their DTOs, and the collection-level rules.
//!
//! A project record is one submitted listing. The collection is ordered
//! newest-first and is deduplicated on the case-insensitive
//! `(name, creator, member)` triple.

use serde::{Deserialize, Serialize};

use crate::member::normalize_email;
use crate::types::{ProjectId, Timestamp};

/// Host substring that marks a project as GitHub-hosted.
pub const GITHUB_HOST: &str = "github.com";

/// Entity name used in not-found errors.
pub const ENTITY_PROJECT: &str = "Project";

/// A single stored project listing.
///
/// Field names are camelCase on the wire and in the store so collections
/// written by the browser client load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub creator: String,
    pub link: String,
    pub description: String,
    /// `data:<mime>;base64,<payload>` URL, if an image was attached.
    #[serde(default)]
    pub image: Option<String>,
    pub submitted_at: Timestamp,
    /// Owning member identifier (lower-case email). Empty for records
    /// submitted before membership gating existed.
    #[serde(default)]
    pub member_email: String,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub creator: String,
    pub link: String,
    pub description: String,
    pub image: Option<String>,
    pub member_email: String,
}

/// DTO for updating an existing project. All fields are optional; only
/// `Some` values replace the stored ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub creator: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Normalized `(name, creator, member)` triple used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    name: String,
    creator: String,
    member: String,
}

impl DuplicateKey {
    pub fn new(name: &str, creator: &str, member: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            creator: creator.trim().to_lowercase(),
            member: normalize_email(member),
        }
    }
}

impl ProjectRecord {
    /// Build a record from a creation DTO with a freshly assigned id.
    pub fn from_new(input: NewProject, id: ProjectId, submitted_at: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            creator: input.creator,
            link: input.link,
            description: input.description,
            image: input.image,
            submitted_at,
            member_email: normalize_email(&input.member_email),
        }
    }

    /// Merge an update into this record. The id, submission time and owner
    /// are never touched.
    pub fn apply(&mut self, update: UpdateProject) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(creator) = update.creator {
            self.creator = creator;
        }
        if let Some(link) = update.link {
            self.link = link;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::new(&self.name, &self.creator, &self.member_email)
    }

    /// Whether the record is owned by `member_id` (case-insensitive).
    pub fn is_owned_by(&self, member_id: &str) -> bool {
        let member_id = normalize_email(member_id);
        !member_id.is_empty() && normalize_email(&self.member_email) == member_id
    }

    pub fn is_github_project(&self) -> bool {
        is_github_link(&self.link)
    }
}

/// Whether `link` points at GitHub.
pub fn is_github_link(link: &str) -> bool {
    link.to_lowercase().contains(GITHUB_HOST)
}

/// Records owned by `member_id`, in collection order.
///
/// An empty or whitespace-only member id owns nothing.
pub fn filter_by_member<'a>(
    projects: &'a [ProjectRecord],
    member_id: &str,
) -> Vec<&'a ProjectRecord> {
    projects.iter().filter(|p| p.is_owned_by(member_id)).collect()
}

/// Find a record matching `key`, skipping the record with id `excluding`.
pub fn find_duplicate<'a>(
    projects: &'a [ProjectRecord],
    key: &DuplicateKey,
    excluding: Option<&ProjectId>,
) -> Option<&'a ProjectRecord> {
    projects
        .iter()
        .filter(|p| excluding.map_or(true, |id| &p.id != id))
        .find(|p| &p.duplicate_key() == key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, creator: &str, member: &str) -> ProjectRecord {
        ProjectRecord {
            id: ProjectId::from(id),
            name: name.into(),
            creator: creator.into(),
            link: "https://example.com".into(),
            description: "d".into(),
            image: None,
            submitted_at: chrono::Utc::now(),
            member_email: member.into(),
        }
    }

    #[test]
    fn duplicate_key_ignores_case_and_padding() {
        assert_eq!(
            DuplicateKey::new(" Foo ", "A", "A@X.com"),
            DuplicateKey::new("foo", "a", "a@x.com")
        );
    }

    #[test]
    fn duplicate_key_distinguishes_members() {
        assert_ne!(
            DuplicateKey::new("Foo", "A", "a@x.com"),
            DuplicateKey::new("Foo", "A", "b@x.com")
        );
    }

    #[test]
    fn find_duplicate_skips_excluded_record() {
        let projects = vec![record("1", "Foo", "A", "a@x.com")];
        let key = DuplicateKey::new("foo", "a", "a@x.com");

        assert!(find_duplicate(&projects, &key, None).is_some());
        assert!(find_duplicate(&projects, &key, Some(&ProjectId::from("1"))).is_none());
    }

    #[test]
    fn filter_by_member_is_case_insensitive() {
        let projects = vec![
            record("1", "Foo", "A", "a@x.com"),
            record("2", "Bar", "B", "b@y.com"),
            record("3", "Baz", "A", "A@X.COM"),
        ];
        let owned: Vec<_> = filter_by_member(&projects, "A@x.com")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(owned, vec!["1", "3"]);
    }

    #[test]
    fn empty_member_owns_nothing() {
        let projects = vec![record("1", "Legacy", "A", "")];
        assert!(filter_by_member(&projects, "").is_empty());
        assert!(filter_by_member(&projects, "   ").is_empty());
    }

    #[test]
    fn apply_keeps_identity_and_timestamp() {
        let mut rec = record("1", "Foo", "A", "a@x.com");
        let submitted_at = rec.submitted_at;
        rec.apply(UpdateProject {
            name: Some("Renamed".into()),
            image: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        });

        assert_eq!(rec.id.as_str(), "1");
        assert_eq!(rec.submitted_at, submitted_at);
        assert_eq!(rec.name, "Renamed");
        assert_eq!(rec.creator, "A");
        assert_eq!(rec.member_email, "a@x.com");
        assert!(rec.image.is_some());
    }

    #[test]
    fn github_link_detection() {
        assert!(is_github_link("https://GitHub.com/a/foo"));
        assert!(!is_github_link("https://gitlab.com/a/foo"));
    }

    #[test]
    fn loads_legacy_record_without_owner_or_image() {
        let json = r#"{
            "id": "1712345678901",
            "name": "Foo",
            "creator": "A",
            "link": "https://github.com/a/foo",
            "description": "d",
            "submittedAt": "2024-04-05T10:00:00.000Z"
        }"#;
        let rec: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.member_email, "");
        assert!(rec.image.is_none());
    }
}
