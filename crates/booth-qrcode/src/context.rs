//! Per-event capture context handed in by the host.

use std::collections::HashMap;
use std::path::PathBuf;

/// Everything the host knows about the current event: the captured photo
/// (absent on wait screens before any capture), the session counters,
/// and an optional externally supplied share URL. Created fresh for each
/// lifecycle event and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct CaptureContext {
    pub picture_path: Option<PathBuf>,
    pub counters: HashMap<String, i64>,
    pub share_url: Option<String>,
}

impl CaptureContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the captured photo path.
    pub fn with_picture(mut self, path: impl Into<PathBuf>) -> Self {
        self.picture_path = Some(path.into());
        self
    }

    /// Builder: set one session counter.
    pub fn with_counter(mut self, name: impl Into<String>, value: i64) -> Self {
        self.counters.insert(name.into(), value);
        self
    }

    /// Builder: set the externally supplied share URL.
    pub fn with_share_url(mut self, url: impl Into<String>) -> Self {
        self.share_url = Some(url.into());
        self
    }

    /// The template variable set for this event: every counter by name,
    /// plus `picture` (photo file name, when a photo exists) and `url`
    /// (empty string when no share URL was supplied). The reserved names
    /// win over identically named counters.
    pub fn template_vars(&self) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = self
            .counters
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();

        if let Some(name) = self
            .picture_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
        {
            vars.insert("picture".into(), name.to_string());
        }
        vars.insert("url".into(), self.share_url.clone().unwrap_or_default());

        vars
    }
}
