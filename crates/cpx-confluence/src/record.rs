//! Output row built from a Confluence content item.

use serde::Serialize;

use crate::beautify::html_to_text;
use crate::types::{Content, User};

/// One row of the `confluence_pages` table.
///
/// Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub id: String,
    pub created_date: String,
    pub last_updated_date: String,
    pub title: String,
    pub creator: String,
    pub last_modifier: String,
    pub url: String,
    pub space: String,
    pub text: String,
}

impl PageRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 9] = [
        "id",
        "created_date",
        "last_updated_date",
        "title",
        "creator",
        "last_modifier",
        "url",
        "space",
        "text",
    ];

    /// Build a record from a content item.
    ///
    /// `base_url` is prefixed to the item's relative web UI link. Fields the
    /// server did not return become empty strings.
    #[must_use]
    pub fn from_content(content: Content, base_url: &str, beautify: bool) -> Self {
        let markup = content.storage_value();
        let text = if beautify {
            html_to_text(markup)
        } else {
            markup.to_owned()
        };
        let url = content
            .webui()
            .map(|webui| format!("{base_url}{webui}"))
            .unwrap_or_default();

        let history = content.history;
        let created_date = history
            .as_ref()
            .and_then(|h| h.created_date.clone())
            .unwrap_or_default();
        let creator = display_name(history.as_ref().and_then(|h| h.created_by.as_ref()));
        let last_updated = history.and_then(|h| h.last_updated);
        let last_updated_date = last_updated
            .as_ref()
            .and_then(|l| l.when.clone())
            .unwrap_or_default();
        let last_modifier = display_name(last_updated.as_ref().and_then(|l| l.by.as_ref()));

        Self {
            id: content.id,
            created_date,
            last_updated_date,
            title: content.title,
            creator,
            last_modifier,
            url,
            space: content.space.map(|s| s.key).unwrap_or_default(),
            text,
        }
    }
}

fn display_name(user: Option<&User>) -> String {
    user.and_then(|u| u.display_name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_content() -> Content {
        serde_json::from_value(serde_json::json!({
            "id": "98310",
            "type": "page",
            "title": "Release notes",
            "space": {"key": "ENG"},
            "history": {
                "createdDate": "2023-04-01T09:15:00.000Z",
                "createdBy": {"displayName": "Ada Lovelace"},
                "lastUpdated": {
                    "when": "2024-02-10T17:42:11.123Z",
                    "by": {"displayName": "Grace Hopper"}
                }
            },
            "body": {"storage": {"value": "<p>Hello <b>world</b></p>", "representation": "storage"}},
            "_links": {"webui": "/spaces/ENG/pages/98310/Release+notes"}
        }))
        .unwrap()
    }

    #[test]
    fn test_from_content_maps_all_columns() {
        let record = PageRecord::from_content(
            sample_content(),
            "https://acme.atlassian.net/wiki",
            false,
        );
        assert_eq!(
            record,
            PageRecord {
                id: "98310".to_owned(),
                created_date: "2023-04-01T09:15:00.000Z".to_owned(),
                last_updated_date: "2024-02-10T17:42:11.123Z".to_owned(),
                title: "Release notes".to_owned(),
                creator: "Ada Lovelace".to_owned(),
                last_modifier: "Grace Hopper".to_owned(),
                url: "https://acme.atlassian.net/wiki/spaces/ENG/pages/98310/Release+notes"
                    .to_owned(),
                space: "ENG".to_owned(),
                text: "<p>Hello <b>world</b></p>".to_owned(),
            }
        );
    }

    #[test]
    fn test_from_content_beautified() {
        let record = PageRecord::from_content(sample_content(), "https://c.example.com", true);
        assert_eq!(record.text, "Hello world");
    }

    #[test]
    fn test_missing_optional_fields_are_empty() {
        let content: Content =
            serde_json::from_value(serde_json::json!({"id": "1", "title": "Bare"})).unwrap();
        let record = PageRecord::from_content(content, "https://c.example.com", true);
        assert_eq!(record.id, "1");
        assert_eq!(record.title, "Bare");
        assert_eq!(record.url, "");
        assert_eq!(record.space, "");
        assert_eq!(record.creator, "");
        assert_eq!(record.last_modifier, "");
        assert_eq!(record.text, "");
    }
}
