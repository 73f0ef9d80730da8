use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::{Result, StoreError};

/// Index of the selected entry, `None` when nothing is selected.
pub type Selection = Option<usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,            // Display name, never empty
    pub url: String,             // Always starts with http:// or https://
    pub created: DateTime<Utc>,
    /// Advisory only. Nothing tracks whether the opened page is still alive.
    pub running: bool,
}

impl Entry {
    pub fn new(name: &str, url: &str) -> Result<Self> {
        let name = name.trim();
        let url = url.trim();

        if name.is_empty() {
            return Err(StoreError::Validation { field: "name" });
        }
        if url.is_empty() {
            return Err(StoreError::Validation { field: "url" });
        }

        Ok(Self {
            name: name.to_string(),
            url: normalize_url(url),
            created: Utc::now(),
            running: false,
        })
    }
}

pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Which toolbar actions are available for a given selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    pub can_start: bool,
    pub can_configure: bool,
}

impl Toolbar {
    pub fn for_selection(selected: Selection) -> Self {
        let any = selected.is_some();
        Self {
            can_start: any,
            can_configure: any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn other_schemes_are_prefixed_anyway() {
        assert_eq!(normalize_url("ftp://host"), "https://ftp://host");
    }

    #[test]
    fn new_trims_and_normalizes() {
        let entry = Entry::new("  Router  ", " 192.168.1.1 ").unwrap();
        assert_eq!(entry.name, "Router");
        assert_eq!(entry.url, "https://192.168.1.1");
        assert!(!entry.running);
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert!(matches!(
            Entry::new("", "x.com"),
            Err(StoreError::Validation { field: "name" })
        ));
        assert!(matches!(
            Entry::new("Name", "   "),
            Err(StoreError::Validation { field: "url" })
        ));
    }

    #[test]
    fn serializes_with_iso_timestamp() {
        let mut entry = Entry::new("A", "a.com").unwrap();
        entry.created = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "A");
        assert_eq!(json["url"], "https://a.com");
        assert_eq!(json["created"], "2024-03-01T10:00:00Z");
        assert_eq!(json["running"], false);
    }

    #[test]
    fn accepts_millisecond_timestamps() {
        let raw = r#"{"name":"A","url":"https://a.com","created":"2024-03-01T10:00:00.123Z","running":false}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.created.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn toolbar_follows_selection() {
        assert_eq!(
            Toolbar::for_selection(None),
            Toolbar { can_start: false, can_configure: false }
        );
        assert!(Toolbar::for_selection(Some(0)).can_start);
    }
}
