use crate::publisher::PublisherEntity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const LIST_VERSION: &str = "0.1";
pub const LIST_NAME: &str = "IPTC - Verified Publishers";
pub const LIST_DOWNLOAD_URL: &str =
    "https://www.iptc.org/verified-news-publishers-list/verified-news-publishers-list.json";
pub const LIST_DESCRIPTION: &str =
    "International Press Telecommunications Council (IPTC) - Origin Verified News Publishers List";
pub const LIST_WEBSITE: &str = "https://iptc.org/verified-news-publishers-list/";
pub const LIST_LOGO_ICON: &str = "data:image/svg+xml;base64,PD94bWwgdmVyc2lvbj0iMS4wIiBlbmNvZGluZz0iVVRGLTgiPz48c3ZnIGlkPSJMYXllcl8yIiB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAxNiAxNiI+PGRlZnM+PHN0eWxlPi5jbHMtMXtmaWxsOiM0MThiODM7fS5jbHMtMSwuY2xzLTIsLmNscy0zLC5jbHMtNHtzdHJva2Utd2lkdGg6MHB4O30uY2xzLTJ7ZmlsbDojYTUzY2JlO30uY2xzLTN7ZmlsbDojNWE5M2YzO30uY2xzLTR7ZmlsbDojZmZmO308L3N0eWxlPjwvZGVmcz48ZyBpZD0iT1ZQIj48cGF0aCBjbGFzcz0iY2xzLTIiIGQ9Ik04LDE2YzQuNDIsMCw4LTMuNTgsOC04LDAtMi4yLS44OS00LjE4LTIuMzItNS42M0wyLjg5LDE0LjE1YzEuMzksMS4xNSwzLjE3LDEuODUsNS4xMSwxLjg1WiIvPjxwYXRoIGNsYXNzPSJjbHMtMSIgZD0iTTEzLjgyLDIuNTFjLTEuNDYtMS41NS0zLjUzLTIuNTEtNS44Mi0yLjUxQzQuNzksMCwyLjAzLDEuODkuNzUsNC42MWw2LjA2LDUuNTUsNy4wMS03LjY1WiIvPjxwYXRoIGNsYXNzPSJjbHMtMyIgZD0iTS44Myw0LjQ1Yy0uNTMsMS4wNy0uODMsMi4yNy0uODMsMy41NSwwLDIuNTUsMS4xOSw0LjgxLDMuMDQsNi4yOGwzLjg5LTQuMjRMLjgzLDQuNDVaIi8+PHBvbHlnb24gaWQ9IkNoZWNrbWFyayIgY2xhc3M9ImNscy00IiBwb2ludHM9IjYuODYgMTEuMjggMy45NCA4LjM2IDUuMDQgNy4yNSA2LjgxIDkuMDEgMTAuNTUgNC45MyAxMS43IDUuOTkgNi44NiAxMS4yOCIvPjwvZz48L3N2Zz4=";

/// The JSON key directory document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDirectory {
    pub version: String,
    pub name: String,
    pub download_url: String,
    pub description: String,
    pub website: String,
    pub logo_icon: String,
    pub last_updated: String,
    pub entities: Vec<PublisherEntity>,
}

impl OutputDirectory {
    /// An empty list stamped with `generated_at`
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            version: LIST_VERSION.to_string(),
            name: LIST_NAME.to_string(),
            download_url: LIST_DOWNLOAD_URL.to_string(),
            description: LIST_DESCRIPTION.to_string(),
            website: LIST_WEBSITE.to_string(),
            logo_icon: LIST_LOGO_ICON.to_string(),
            last_updated: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            entities: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: PublisherEntity) {
        self.entities.push(entity);
    }

    pub fn key_count(&self) -> usize {
        self.entities.iter().map(|e| e.keys().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_fields_and_order() {
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let list = OutputDirectory::new(generated_at);
        assert_eq!(list.last_updated, "2026-10-18T10:00:00.000Z");
        assert!(list.logo_icon.starts_with("data:image/svg+xml;base64,"));

        let json = serde_json::to_string_pretty(&list).unwrap();
        let positions: Vec<usize> = [
            "\"version\"",
            "\"name\"",
            "\"download_url\"",
            "\"description\"",
            "\"website\"",
            "\"logo_icon\"",
            "\"last_updated\"",
            "\"entities\"",
        ]
        .iter()
        .map(|field| json.find(field).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(list.key_count(), 0);
    }
}
