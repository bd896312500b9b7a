//! Event classifier
//!
//! Decides which counter family and key an inbound tracking event
//! increments. Rejections happen here, before any store write, so a
//! malformed event never causes a partial increment.

use serde::Deserialize;
use uuid::Uuid;

use crate::store::ArticleStore;
use crate::types::MetricUpdate;

/// Inbound tracking event as posted by the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Direct article reference; takes precedence over `slug`.
    #[serde(rename = "entityId", default)]
    pub entity_id: Option<Uuid>,
    #[serde(default)]
    pub slug: Option<String>,
    /// UI element label for click tracking; ignored for views/shares.
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    View,
    Click,
    Share,
}

/// Classification failures. Both are client errors and reject the event
/// with no counter mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// Invalid combination: click without a tag, or view/share without any
    /// article reference.
    InvalidShape,
    /// A reference was given but did not resolve (unknown slug).
    InvalidReference,
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::InvalidShape => {
                write!(f, "invalid tracking event (click requires tag, view/share requires a reference)")
            }
            ClassifyError::InvalidReference => write!(f, "unknown article reference"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Route a tracking event to the counter it increments.
///
/// - `click` + `tag` → tag click counter; any article reference is ignored
/// - `view`/`share` → article counter, resolving `slug` through the article
///   catalog when no direct id is given
pub fn classify(event: &TrackEvent, articles: &ArticleStore) -> Result<MetricUpdate, ClassifyError> {
    match event.kind {
        EventKind::Click => match event.tag.as_deref() {
            Some(tag) if !tag.trim().is_empty() => Ok(MetricUpdate::Click {
                tag: tag.to_string(),
            }),
            _ => Err(ClassifyError::InvalidShape),
        },
        EventKind::View | EventKind::Share => {
            let article_id = match (event.entity_id, event.slug.as_deref()) {
                (Some(id), _) => id,
                (None, Some(slug)) => articles
                    .resolve_slug(slug)
                    .ok_or(ClassifyError::InvalidReference)?,
                (None, None) => return Err(ClassifyError::InvalidShape),
            };

            Ok(match event.kind {
                EventKind::View => MetricUpdate::View { article_id },
                _ => MetricUpdate::Share { article_id },
            })
        }
    }
}
