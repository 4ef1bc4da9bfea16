use crate::cert::KeyRecord;
use crate::utils::errors::{read_file, ListError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Jwks {
    pub keys: Vec<KeyRecord>,
}

/// A publisher as it appears in the JSON list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherEntity {
    pub display_name: String,
    pub contact: String,
    #[serde(rename = "isCA")]
    pub is_ca: bool,
    pub jwks: Jwks,
}

impl PublisherEntity {
    /// Load a publisher's `entity.json`, keeping only the listed fields
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_json(&content, path)
    }

    /// Parse and validate metadata text; `path` is used for error reporting
    pub fn from_json(content: &str, path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| ListError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Object(fields) = value else {
            return Err(ListError::Parse {
                path: path.to_path_buf(),
                source: <serde_json::Error as serde::de::Error>::custom("expected a JSON object"),
            });
        };

        let string_field = |field: &'static str| {
            fields
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ListError::Validation {
                    path: path.to_path_buf(),
                    field,
                    expected: "string",
                })
        };

        let display_name = string_field("display_name")?;
        let contact = string_field("contact")?;
        let is_ca = fields
            .get("isCA")
            .and_then(Value::as_bool)
            .ok_or_else(|| ListError::Validation {
                path: path.to_path_buf(),
                field: "isCA",
                expected: "boolean",
            })?;

        Ok(Self {
            display_name,
            contact,
            is_ca,
            jwks: Jwks::default(),
        })
    }

    pub fn add_key(&mut self, key: KeyRecord) {
        self.jwks.keys.push(key);
    }

    pub fn keys(&self) -> &[KeyRecord] {
        &self.jwks.keys
    }
}

impl fmt::Display for PublisherEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}>{}",
            self.display_name,
            self.contact,
            if self.is_ca { " (CA)" } else { "" }
        )
    }
}
