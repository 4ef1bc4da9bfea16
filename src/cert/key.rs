use crate::cert::decoder::parse_certificate;
use crate::cert::CertificateInfo;
use crate::utils::errors::{ListError, Result};
use crate::utils::pem::PemCertificate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// JWK key type, c.f. RFC 7518 section 6.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyType {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "oct")]
    Oct,
}

impl KeyType {
    /// Classify a public key algorithm name as printed in a certificate report
    pub fn from_algorithm(algorithm: &str) -> Option<Self> {
        let alg = algorithm.to_lowercase();
        if alg.contains("rsa") {
            Some(Self::Rsa)
        } else if alg.contains("ec") {
            Some(Self::Ec)
        } else if alg.contains("25519") {
            Some(Self::Oct)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ec => "EC",
            Self::Oct => "oct",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a publisher's `jwks.keys`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRecord {
    pub kty: KeyType,
    pub x5c: Vec<String>,
}

pub struct KeyEncoder;

impl KeyEncoder {
    /// Build the key record for one certificate file
    pub fn encode(path: &Path, pem: &PemCertificate, info: &CertificateInfo) -> Result<KeyRecord> {
        let algorithm = info.public_key_algorithm.as_deref().unwrap_or_default();
        let kty =
            KeyType::from_algorithm(algorithm).ok_or_else(|| ListError::UnsupportedAlgorithm {
                path: path.to_path_buf(),
                algorithm: algorithm.to_string(),
            })?;

        let der = pem
            .der_bytes()
            .map_err(|reason| ListError::InvalidCertificate {
                path: path.to_path_buf(),
                reason,
            })?;
        parse_certificate(path, &der)?;

        tracing::debug!(
            "{} fingerprint (SHA-256): {}",
            path.display(),
            hex::encode(Sha256::digest(&der))
        );

        Ok(KeyRecord {
            kty,
            x5c: vec![pem.flattened()],
        })
    }
}
