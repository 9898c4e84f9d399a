//! Decorative animations and team photos

use crate::utils::config::{AnimationSettings, TeamMember};
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Lottie animation JSON per tab, fetched once at startup
#[derive(Debug, Clone, Default)]
pub struct Animations {
    by_tab: HashMap<String, String>,
}

impl Animations {
    /// No animations at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tab: &str, json: String) {
        self.by_tab.insert(tab.to_string(), json);
    }

    /// Animation JSON for a tab, if it was fetched
    pub fn get(&self, tab: &str) -> Option<&str> {
        self.by_tab.get(tab).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tab.is_empty()
    }
}

/// Fetch every configured animation.
///
/// Any failure drops that animation and the page renders without it.
pub async fn fetch_animations(settings: &AnimationSettings) -> Animations {
    let mut animations = Animations::none();
    if !settings.enabled {
        return animations;
    }

    let client = match Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            debug!(error = %e, "animation client unavailable");
            return animations;
        }
    };

    for (tab, url) in settings.urls() {
        match fetch_one(&client, url).await {
            Ok(json) => animations.insert(tab, json),
            Err(e) => debug!(tab, url, error = %e, "animation fetch failed"),
        }
    }

    info!(count = animations.len(), "animations ready");
    animations
}

async fn fetch_one(client: &Client, url: &str) -> reqwest::Result<String> {
    let value: serde_json::Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(value.to_string())
}

/// A team photo read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Read a member's photo, `None` when it is not configured or unreadable
pub async fn load_photo(member: &TeamMember) -> Option<Photo> {
    let path = member.photo.as_deref()?;
    let bytes = tokio::fs::read(path).await.ok()?;
    Some(Photo {
        content_type: image_content_type(path),
        bytes,
    })
}

fn image_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
