//! Gallery and portal view models.
//!
//! Pure functions of (collection, current member, language). The front end
//! renders these as card grids; nothing here knows about markup.

use serde::Serialize;

use crate::member::Member;
use crate::preferences::Language;
use crate::project::{filter_by_member, ProjectRecord};
use crate::types::ProjectId;

/// One project card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: ProjectId,
    pub name: String,
    pub creator: String,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    /// Submission date formatted for the active language.
    pub submitted_on: String,
    pub is_github: bool,
    /// Edit/delete controls; present in the portal view only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<CardActions>,
}

/// Controls attached to a portal card, keyed by record id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardActions {
    pub edit: ProjectId,
    pub delete: ProjectId,
}

/// Public view of every project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub language: Language,
    pub direction: &'static str,
    pub empty: bool,
    pub cards: Vec<ProjectCard>,
}

/// Counters shown above the portal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    pub total_projects: usize,
    pub github_projects: usize,
}

/// Member-scoped view with edit/delete controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalView {
    pub language: Language,
    pub direction: &'static str,
    pub member: Option<Member>,
    pub stats: PortalStats,
    pub empty: bool,
    pub cards: Vec<ProjectCard>,
}

fn card(project: &ProjectRecord, language: Language, with_actions: bool) -> ProjectCard {
    ProjectCard {
        id: project.id.clone(),
        name: project.name.clone(),
        creator: project.creator.clone(),
        description: project.description.clone(),
        link: project.link.clone(),
        image: project.image.clone(),
        submitted_on: language.format_date(project.submitted_at),
        is_github: project.is_github_project(),
        actions: with_actions.then(|| CardActions {
            edit: project.id.clone(),
            delete: project.id.clone(),
        }),
    }
}

/// Render the public gallery: every record, in collection order.
pub fn render_gallery(projects: &[ProjectRecord], language: Language) -> GalleryView {
    let cards: Vec<_> = projects
        .iter()
        .map(|p| card(p, language, false))
        .collect();

    GalleryView {
        language,
        direction: language.direction(),
        empty: cards.is_empty(),
        cards,
    }
}

/// Render the member portal: records owned by `member`, with controls.
///
/// Without a verified member the portal is empty.
pub fn render_portal(
    projects: &[ProjectRecord],
    member: Option<&Member>,
    language: Language,
) -> PortalView {
    let owned = member
        .map(|m| filter_by_member(projects, m.id()))
        .unwrap_or_default();

    let stats = PortalStats {
        total_projects: owned.len(),
        github_projects: owned.iter().filter(|p| p.is_github_project()).count(),
    };

    let cards: Vec<_> = owned
        .into_iter()
        .map(|p| card(p, language, true))
        .collect();

    PortalView {
        language,
        direction: language.direction(),
        member: member.cloned(),
        stats,
        empty: cards.is_empty(),
        cards,
    }
}
