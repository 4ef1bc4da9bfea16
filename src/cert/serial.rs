use std::fmt;

/// Certificate serial number, normalized to continuous lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber {
    hex: String,
}

impl SerialNumber {
    /// Create a SerialNumber from report text, dropping colons and whitespace
    pub fn new(raw: &str) -> Self {
        let hex = raw
            .chars()
            .filter(|c| *c != ':' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self { hex }
    }

    /// Get the raw hex format (no colons)
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Get the colon-separated hex format (e.g., "3b:fc:2e:b1...")
    pub fn as_colon_hex(&self) -> String {
        self.hex
            .chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}
