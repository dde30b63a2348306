//! Profile metadata served at `/metadata`.
//!
//! The profile itself is loaded from `config/profile.ron`; the file list
//! section is computed per request from the service's base URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version advertised in the metadata document.
pub const METADATA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherLink {
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub other: Option<Vec<OtherLink>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub avatar: Option<String>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileListFormat {
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    pub url: String,
    pub format: FileListFormat,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub version: String,
    pub profile: Profile,
    pub file_list: FileList,
}

/// Profile settings read from `config/profile.ron`.
///
/// `website` and the docs link default to the service base URL when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_true")]
    pub link_api_docs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Vibe Racer".to_string(),
            avatar: Some("https://avatars.githubusercontent.com/u/583231?v=4".to_string()),
            github: Some("vibe-racer".to_string()),
            linkedin: Some("https://www.linkedin.com/".to_string()),
            email: Some("viberacer@example.com".to_string()),
            twitter: Some("@vibe_racer".to_string()),
            website: None,
            link_api_docs: true,
        }
    }
}

impl ProfileConfig {
    /// Load from the given RON file, falling back to `Default` on any error.
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match ron::from_str::<ProfileConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse {:?}: {} — using default profile", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::debug!("Could not read {:?} ({}), using default profile", path, e);
                Self::default()
            }
        }
    }

    /// Build the metadata document for a service reachable at `base`.
    pub fn to_metadata(&self, base: &str, now: DateTime<Utc>) -> ProfileMetadata {
        let base = base.trim_end_matches('/');

        let other = if self.link_api_docs {
            Some(vec![OtherLink {
                platform: "Docs".to_string(),
                url: format!("{}/docs", base),
                label: Some("API Docs".to_string()),
            }])
        } else {
            None
        };

        ProfileMetadata {
            version: METADATA_VERSION.to_string(),
            profile: Profile {
                name: self.name.clone(),
                avatar: self.avatar.clone(),
                contact: Some(Contact {
                    github: self.github.clone(),
                    linkedin: self.linkedin.clone(),
                    email: self.email.clone(),
                    twitter: self.twitter.clone(),
                    website: Some(self.website.clone().unwrap_or_else(|| base.to_string())),
                    other,
                }),
            },
            file_list: FileList {
                url: format!("{}/notes", base),
                format: FileListFormat::Json,
                last_updated: Some(now),
            },
        }
    }
}
