//! # Slide Mixes
//!
//! A mix is a titled, ordered list of slide page URLs. This module holds the
//! entity, its field validation, and the storage seam (`MixStore`) with an
//! in-memory implementation.

use crate::constants::{MAX_MIX_URLS, MAX_TITLE_LENGTH};
use crate::matcher::{split_lines, SlideUrlMatcher};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const BLANK_TITLE: &str = "can't be blank";
pub const INVALID_URLS: &str = "include invalid URL(s)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideMix {
    pub id: Uuid,
    pub title: String,
    pub urls_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SlideMix {
    /// The slide URLs in presentation order.
    pub fn urls(&self) -> Vec<&str> {
        split_lines(&self.urls_text)
    }
}

/// User-supplied fields for creating or updating a mix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub urls_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every violation found in a draft, in field order.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}", format_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

pub fn too_long_title() -> String {
    format!("is too long (maximum is {MAX_TITLE_LENGTH} characters)")
}

pub fn too_many_urls() -> String {
    format!("includes more than {MAX_MIX_URLS} URLs")
}

impl MixDraft {
    pub fn new(title: impl Into<String>, urls_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            urls_text: urls_text.into(),
        }
    }

    /// Checks every field and collects all violations.
    pub fn validate(&self, matcher: &SlideUrlMatcher) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", BLANK_TITLE);
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            errors.add("title", too_long_title());
        }

        let report = matcher.check_list(&self.urls_text);
        if report.has_invalid {
            errors.add("urls_text", INVALID_URLS);
        }
        if report.too_many {
            errors.add("urls_text", too_many_urls());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Error, Debug)]
pub enum MixError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Mix not found: {0}")]
    NotFound(String),
}

/// Persistence for mixes. Drafts are validated before they reach a store.
#[async_trait]
pub trait MixStore: Send + Sync {
    async fn create(&self, draft: MixDraft) -> Result<SlideMix, MixError>;
    async fn find(&self, id: Uuid) -> Result<Option<SlideMix>, MixError>;
    async fn update(&self, id: Uuid, draft: MixDraft) -> Result<Option<SlideMix>, MixError>;
    /// Newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<SlideMix>, MixError>;
}

/// `MixStore` kept in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryMixStore {
    mixes: RwLock<Vec<SlideMix>>,
}

impl MemoryMixStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MixStore for MemoryMixStore {
    async fn create(&self, draft: MixDraft) -> Result<SlideMix, MixError> {
        let now = Utc::now();
        let mix = SlideMix {
            id: Uuid::new_v4(),
            title: draft.title,
            urls_text: draft.urls_text,
            created_at: now,
            updated_at: now,
        };
        self.mixes.write().await.push(mix.clone());
        Ok(mix)
    }

    async fn find(&self, id: Uuid) -> Result<Option<SlideMix>, MixError> {
        Ok(self.mixes.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn update(&self, id: Uuid, draft: MixDraft) -> Result<Option<SlideMix>, MixError> {
        let mut mixes = self.mixes.write().await;
        let Some(mix) = mixes.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        mix.title = draft.title;
        mix.urls_text = draft.urls_text;
        mix.updated_at = Utc::now();
        Ok(Some(mix.clone()))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SlideMix>, MixError> {
        let mixes = self.mixes.read().await;
        let mut recent: Vec<SlideMix> = mixes.iter().rev().cloned().collect();
        // Stable sort keeps later insertions first among equal timestamps.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}
