use crate::cert::decoder::CertificateDecoder;
use crate::cert::SerialNumber;
use crate::utils::errors::Result;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static SUBJECT: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Subject: (.+)"));
static ISSUER: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Issuer: (.+)"));
static NOT_BEFORE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Not Before: (.+)"));
static NOT_AFTER: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Not After : (.+)"));
static SERIAL: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Serial Number:\s+([0-9A-Fa-f:\s]+)"));
static PUBLIC_KEY_ALGORITHM: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"Public Key Algorithm: (.+)"));
static KEY_USAGE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"X509v3 Key Usage:[\s\S]*?\n\s+(.+)"));
static EXTENDED_KEY_USAGE: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"X509v3 Extended Key Usage:[\s\S]*?\n\s+(.+)"));
static BASIC_CONSTRAINTS: LazyLock<Regex> =
    LazyLock::new(|| label_regex(r"X509v3 Basic Constraints:[\s\S]*?\n\s+(.+)"));

fn label_regex(pattern: &str) -> Regex {
    // Patterns are compile-time constants
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid report pattern {pattern}: {e}"))
}

/// Fields extracted from a certificate text report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateInfo {
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
    pub serial: Option<SerialNumber>,
    pub public_key_algorithm: Option<String>,
    pub key_usage: Vec<String>,
    pub key_usage_critical: bool,
    pub extended_key_usage: Option<String>,
    pub basic_constraints: Option<String>,
    pub basic_constraints_critical: bool,
}

impl CertificateInfo {
    /// Decode the certificate at `path` and extract its fields
    pub fn inspect(decoder: &dyn CertificateDecoder, path: &Path) -> Result<Self> {
        let report = decoder.decode(path)?;
        Ok(Self::from_report(&report))
    }

    /// Extract fields from an `openssl x509 -text` style report.
    ///
    /// Labels missing from the report are left unset.
    pub fn from_report(report: &str) -> Self {
        let (key_usage, key_usage_critical) = match block(&KEY_USAGE, report) {
            Some((value, critical)) => (
                value.split(',').map(|usage| usage.trim().to_string()).collect(),
                critical,
            ),
            None => (Vec::new(), false),
        };
        let (basic_constraints, basic_constraints_critical) =
            match block(&BASIC_CONSTRAINTS, report) {
                Some((value, critical)) => (Some(value), critical),
                None => (None, false),
            };

        Self {
            subject: capture(&SUBJECT, report),
            issuer: capture(&ISSUER, report),
            not_before: capture(&NOT_BEFORE, report),
            not_after: capture(&NOT_AFTER, report),
            serial: SERIAL
                .captures(report)
                .map(|caps| SerialNumber::new(&caps[1])),
            public_key_algorithm: capture(&PUBLIC_KEY_ALGORITHM, report),
            key_usage,
            key_usage_critical,
            extended_key_usage: block(&EXTENDED_KEY_USAGE, report).map(|(value, _)| value),
            basic_constraints,
            basic_constraints_critical,
        }
    }

    pub fn is_ca(&self) -> bool {
        self.basic_constraints
            .as_deref()
            .is_some_and(|bc| bc.contains("CA:TRUE"))
    }
}

fn capture(re: &Regex, report: &str) -> Option<String> {
    re.captures(report).map(|caps| caps[1].trim().to_string())
}

/// Value of an extension block plus whether its header is marked critical
fn block(re: &Regex, report: &str) -> Option<(String, bool)> {
    re.captures(report).map(|caps| {
        let critical = caps[0].contains("critical");
        (caps[1].trim().to_string(), critical)
    })
}

impl fmt::Display for CertificateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unset = "-";
        write!(
            f,
            "Subject: {}, Issuer: {}, Serial: {}, Algorithm: {}, Expires: {}",
            self.subject.as_deref().unwrap_or(unset),
            self.issuer.as_deref().unwrap_or(unset),
            self.serial
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| unset.to_string()),
            self.public_key_algorithm.as_deref().unwrap_or(unset),
            self.not_after.as_deref().unwrap_or(unset),
        )
    }
}
