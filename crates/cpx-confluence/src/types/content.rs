//! Confluence content types.

use serde::Deserialize;

/// Confluence content item as returned with
/// `expand=space,history,history.lastUpdated,body.storage`.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    /// Content ID.
    pub id: String,
    /// Content title.
    #[serde(default)]
    pub title: String,
    /// Owning space.
    #[serde(default)]
    pub space: Option<Space>,
    /// Creation and modification history.
    #[serde(default)]
    pub history: Option<History>,
    /// Content body.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Content {
    /// Storage-format markup, empty if the body was not expanded.
    #[must_use]
    pub fn storage_value(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }

    /// Relative web UI link.
    #[must_use]
    pub fn webui(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.webui.as_deref())
    }
}

/// Space reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    /// Space key.
    pub key: String,
}

/// Content history.
#[derive(Debug, Clone, Deserialize)]
pub struct History {
    /// Creation timestamp.
    #[serde(rename = "createdDate", default)]
    pub created_date: Option<String>,
    /// Author of the first version.
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<User>,
    /// Latest version info.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<LastUpdated>,
}

/// Latest version of a content item.
#[derive(Debug, Clone, Deserialize)]
pub struct LastUpdated {
    /// Modification timestamp.
    #[serde(default)]
    pub when: Option<String>,
    /// Author of the modification.
    #[serde(default)]
    pub by: Option<User>,
}

/// Confluence user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Name shown in the UI.
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Content body.
#[derive(Debug, Clone, Deserialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    /// XHTML content in Confluence storage format.
    pub value: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
}
