//! Portfolio project model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Primary image reference.
    pub image: Option<String>,
    /// Slideshow image URLs, in display order.
    pub images: Vec<String>,
    pub tags: Vec<String>,
    /// Source repository URL.
    pub github: Option<String>,
    /// Live demo URL.
    pub live: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub github: Option<String>,
    pub live: Option<String>,
}
