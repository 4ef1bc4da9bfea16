use crate::cert::SerialNumber;
use crate::utils::errors::{ListError, Result};
use crate::utils::pem::PemCertificate;
use chrono::DateTime;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::Runtime;
use x509_parser::prelude::*;

pub const DEFAULT_OPENSSL_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a certificate file into a human-readable text report
pub trait CertificateDecoder {
    fn decode(&self, path: &Path) -> Result<String>;
}

/// Decodes certificates with `openssl x509 -text -noout`
#[derive(Debug)]
pub struct OpensslDecoder {
    binary: PathBuf,
    timeout: Duration,
    runtime: Runtime,
}

impl OpensslDecoder {
    pub fn new(binary: PathBuf, timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ListError::ExternalTool(format!("Failed to start runtime: {e}")))?;
        Ok(Self {
            binary,
            timeout,
            runtime,
        })
    }

    /// Find the openssl executable in PATH
    pub fn locate(timeout: Duration) -> Result<Self> {
        let binary = which::which("openssl").map_err(|_| {
            ListError::ExternalTool(
                "openssl command not found in PATH. Install OpenSSL or use --decoder native"
                    .to_string(),
            )
        })?;
        tracing::debug!("Using openssl at {}", binary.display());
        Self::new(binary, timeout)
    }
}

impl CertificateDecoder for OpensslDecoder {
    fn decode(&self, path: &Path) -> Result<String> {
        tracing::trace!("Executing: openssl x509 -in {} -text -noout", path.display());

        let output = self.runtime.block_on(async {
            let mut command = Command::new(&self.binary);
            command
                .arg("x509")
                .arg("-in")
                .arg(path)
                .args(["-text", "-noout"])
                .stdin(Stdio::null())
                .kill_on_drop(true);
            tokio::time::timeout(self.timeout, command.output()).await
        });

        let output = match output {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ListError::ExternalTool(format!(
                    "Failed to execute openssl command: {e}"
                )))
            }
            Err(_) => {
                return Err(ListError::ExternalTool(format!(
                    "openssl timed out after {}s on {}",
                    self.timeout.as_secs(),
                    path.display()
                )))
            }
        };

        if !output.status.success() {
            return Err(ListError::ExternalTool(format!(
                "Error executing openssl on {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse exactly one DER certificate, rejecting anything left over
pub(crate) fn parse_certificate<'a>(path: &Path, der: &'a [u8]) -> Result<X509Certificate<'a>> {
    let (rest, cert) = X509Certificate::from_der(der).map_err(|e| ListError::InvalidCertificate {
        path: path.to_path_buf(),
        reason: format!("DER parsing error: {e}"),
    })?;
    if !rest.is_empty() {
        return Err(ListError::InvalidCertificate {
            path: path.to_path_buf(),
            reason: "trailing data after certificate".to_string(),
        });
    }
    Ok(cert)
}

/// Decodes certificates in-process with x509-parser, rendering the same
/// labeled layout as openssl
#[derive(Debug, Clone, Default)]
pub struct NativeDecoder;

impl NativeDecoder {
    pub fn render(pem: &PemCertificate, path: &Path) -> Result<String> {
        let der = pem
            .der_bytes()
            .map_err(|reason| ListError::InvalidCertificate {
                path: path.to_path_buf(),
                reason,
            })?;
        let cert = parse_certificate(path, &der)?;

        let mut report = String::new();
        write_report(&mut report, &cert).map_err(|e| ListError::InvalidCertificate {
            path: path.to_path_buf(),
            reason: format!("could not render report: {e}"),
        })?;
        Ok(report)
    }
}

impl CertificateDecoder for NativeDecoder {
    fn decode(&self, path: &Path) -> Result<String> {
        let pem_data = fs::read_to_string(path).map_err(|e| {
            ListError::ExternalTool(format!("Could not read {}: {e}", path.display()))
        })?;
        Self::render(&PemCertificate::new(pem_data), path)
    }
}

fn write_report(out: &mut String, cert: &X509Certificate) -> fmt::Result {
    let serial = SerialNumber::new(&hex::encode(cert.serial.to_bytes_be()));

    writeln!(out, "Certificate:")?;
    writeln!(out, "    Data:")?;
    writeln!(out, "        Serial Number:")?;
    writeln!(out, "            {}", serial.as_colon_hex())?;
    writeln!(out, "        Issuer: {}", cert.issuer())?;
    writeln!(out, "        Validity")?;
    if let Some(not_before) = format_time(cert.validity().not_before.timestamp()) {
        writeln!(out, "            Not Before: {not_before}")?;
    }
    if let Some(not_after) = format_time(cert.validity().not_after.timestamp()) {
        writeln!(out, "            Not After : {not_after}")?;
    }
    writeln!(out, "        Subject: {}", cert.subject())?;
    writeln!(out, "        Subject Public Key Info:")?;
    writeln!(
        out,
        "            Public Key Algorithm: {}",
        algorithm_name(&cert.public_key().algorithm.algorithm.to_id_string())
    )?;

    let extensions = cert.extensions();
    if !extensions.is_empty() {
        writeln!(out, "        X509v3 extensions:")?;
    }
    for ext in extensions {
        let critical = if ext.critical { " critical" } else { "" };
        match ext.parsed_extension() {
            ParsedExtension::KeyUsage(ku) => {
                writeln!(out, "            X509v3 Key Usage:{critical}")?;
                writeln!(out, "                {}", key_usage_names(ku).join(", "))?;
            }
            ParsedExtension::ExtendedKeyUsage(eku) => {
                writeln!(out, "            X509v3 Extended Key Usage:{critical}")?;
                writeln!(
                    out,
                    "                {}",
                    extended_key_usage_names(eku).join(", ")
                )?;
            }
            ParsedExtension::BasicConstraints(bc) => {
                writeln!(out, "            X509v3 Basic Constraints:{critical}")?;
                write!(out, "                CA:{}", if bc.ca { "TRUE" } else { "FALSE" })?;
                if let Some(path_len) = bc.path_len_constraint {
                    write!(out, ", pathlen:{path_len}")?;
                }
                writeln!(out)?;
            }
            _ => {}
        }
    }

    Ok(())
}

fn format_time(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%b %e %H:%M:%S %Y GMT").to_string())
}

/// Map a public key algorithm OID to the short name openssl prints
fn algorithm_name(oid: &str) -> String {
    match oid {
        "1.2.840.113549.1.1.1" => "rsaEncryption".to_string(),
        "1.2.840.113549.1.1.10" => "rsassaPss".to_string(),
        "1.2.840.10045.2.1" => "id-ecPublicKey".to_string(),
        "1.3.101.110" => "X25519".to_string(),
        "1.3.101.111" => "X448".to_string(),
        "1.3.101.112" => "ED25519".to_string(),
        "1.3.101.113" => "ED448".to_string(),
        "1.2.840.10040.4.1" => "dsaEncryption".to_string(),
        other => other.to_string(),
    }
}

fn key_usage_names(ku: &KeyUsage) -> Vec<&'static str> {
    let mut names = Vec::new();
    if ku.digital_signature() {
        names.push("Digital Signature");
    }
    if ku.non_repudiation() {
        names.push("Non Repudiation");
    }
    if ku.key_encipherment() {
        names.push("Key Encipherment");
    }
    if ku.data_encipherment() {
        names.push("Data Encipherment");
    }
    if ku.key_agreement() {
        names.push("Key Agreement");
    }
    if ku.key_cert_sign() {
        names.push("Certificate Sign");
    }
    if ku.crl_sign() {
        names.push("CRL Sign");
    }
    if ku.encipher_only() {
        names.push("Encipher Only");
    }
    if ku.decipher_only() {
        names.push("Decipher Only");
    }
    names
}

fn extended_key_usage_names(eku: &ExtendedKeyUsage) -> Vec<String> {
    let mut names = Vec::new();
    if eku.any {
        names.push("Any Extended Key Usage".to_string());
    }
    if eku.server_auth {
        names.push("TLS Web Server Authentication".to_string());
    }
    if eku.client_auth {
        names.push("TLS Web Client Authentication".to_string());
    }
    if eku.code_signing {
        names.push("Code Signing".to_string());
    }
    if eku.email_protection {
        names.push("E-mail Protection".to_string());
    }
    if eku.time_stamping {
        names.push("Time Stamping".to_string());
    }
    if eku.ocsp_signing {
        names.push("OCSP Signing".to_string());
    }
    names.extend(eku.other.iter().map(|oid| oid.to_id_string()));
    names
}
