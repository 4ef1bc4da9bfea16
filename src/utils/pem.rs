use base64::{engine::general_purpose, Engine as _};

const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";
const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";
const PEM_LINE_WIDTH: usize = 64;

/// A certificate file exactly as it was read from disk
#[derive(Debug, Clone)]
pub struct PemCertificate {
    pem_data: String,
}

impl PemCertificate {
    pub fn new(pem_data: String) -> Self {
        Self { pem_data }
    }

    /// Get the raw PEM data, untouched
    pub fn pem_data(&self) -> &str {
        &self.pem_data
    }

    /// The bare base64 payload used for `x5c` entries
    pub fn flattened(&self) -> String {
        flatten_pem(&self.pem_data)
    }

    /// Decode the payload to DER bytes
    pub fn der_bytes(&self) -> std::result::Result<Vec<u8>, String> {
        let payload = self.flattened();
        if payload.is_empty() {
            return Err("No certificate data found in PEM".to_string());
        }
        general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| format!("Base64 decode error: {e}"))
    }
}

/// Strip the certificate delimiters and every line break
pub fn flatten_pem(pem_data: &str) -> String {
    pem_data
        .replace(BEGIN_CERTIFICATE, "")
        .replace(END_CERTIFICATE, "")
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect()
}

/// Fold a flattened payload back into a PEM block with 64-column lines
pub fn wrap_pem(payload: &str) -> String {
    let mut pem = String::with_capacity(payload.len() + payload.len() / PEM_LINE_WIDTH + 64);
    pem.push_str(BEGIN_CERTIFICATE);
    pem.push('\n');
    for line in payload.as_bytes().chunks(PEM_LINE_WIDTH) {
        // base64 is ASCII so byte chunks are always valid UTF-8
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(END_CERTIFICATE);
    pem.push('\n');
    pem
}
