use crate::cert::{CertificateDecoder, CertificateInfo, KeyEncoder};
use crate::publisher::{OutputDirectory, PublisherEntity};
use crate::utils::errors::{read_file, Result};
use crate::utils::paths::ListPaths;
use crate::utils::pem::PemCertificate;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Both artifacts of a run, fully built in memory
#[derive(Debug, Clone)]
pub struct GeneratedLists {
    pub bundle: String,
    pub directory: OutputDirectory,
}

/// Walks the publishers tree and assembles the PEM bundle and JSON directory
pub struct ListBuilder<'a> {
    paths: &'a ListPaths,
    decoder: &'a dyn CertificateDecoder,
}

impl<'a> ListBuilder<'a> {
    pub fn new(paths: &'a ListPaths, decoder: &'a dyn CertificateDecoder) -> Self {
        Self { paths, decoder }
    }

    /// Build both lists. The first failing publisher or certificate aborts the run.
    pub fn build(&self, generated_at: DateTime<Utc>) -> Result<GeneratedLists> {
        let mut bundle = String::new();
        let mut directory = OutputDirectory::new(generated_at);

        for publisher_dir in self.paths.publisher_dirs()? {
            let entity = self.build_publisher(&publisher_dir, &mut bundle)?;
            tracing::info!(
                "Added publisher {} with {} key(s)",
                entity,
                entity.keys().len()
            );
            directory.add_entity(entity);
        }

        Ok(GeneratedLists { bundle, directory })
    }

    fn build_publisher(&self, publisher_dir: &Path, bundle: &mut String) -> Result<PublisherEntity> {
        let mut entity = PublisherEntity::load(&ListPaths::entity_file(publisher_dir))?;

        for cert_file in ListPaths::certificate_files(publisher_dir)? {
            let info = CertificateInfo::inspect(self.decoder, &cert_file)?;
            tracing::info!("Parsing {}", cert_file.display());
            tracing::debug!("{}: {:#?}", cert_file.display(), info);

            if info.is_ca() != entity.is_ca {
                tracing::warn!(
                    "{} basic constraints ({}) disagree with isCA={} for {}",
                    cert_file.display(),
                    info.basic_constraints.as_deref().unwrap_or("unset"),
                    entity.is_ca,
                    entity.display_name
                );
            }

            let pem = PemCertificate::new(read_file(&cert_file)?);
            let key = KeyEncoder::encode(&cert_file, &pem, &info)?;

            bundle.push_str(pem.pem_data());
            bundle.push('\n');
            entity.add_key(key);
        }

        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::{KeyType, NativeDecoder};
    use crate::utils::errors::ListError;
    use crate::utils::paths::DEFAULT_OUTPUT_NAME;
    use crate::utils::pem::flatten_pem;
    use chrono::TimeZone;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(name: &str) -> String {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        fs::read_to_string(path).unwrap()
    }

    fn add_publisher(root: &Path, dir: &str, entity: &str, certs: &[(&str, &str)]) {
        let publisher = root.join("Publishers").join(dir);
        fs::create_dir_all(&publisher).unwrap();
        fs::write(publisher.join("entity.json"), entity).unwrap();
        for (name, fixture_name) in certs {
            fs::write(publisher.join(name), fixture(fixture_name)).unwrap();
        }
    }

    fn build(root: &Path) -> Result<GeneratedLists> {
        let paths = ListPaths::new(root, root, DEFAULT_OUTPUT_NAME);
        let generated_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        ListBuilder::new(&paths, &NativeDecoder).build(generated_at)
    }

    #[test]
    fn test_multiple_keys_per_publisher() {
        let tmp = TempDir::new().unwrap();
        add_publisher(
            tmp.path(),
            "globe",
            r#"{"display_name":"Globe","contact":"c@globe.test","isCA":true}"#,
            &[("b-ed.pem", "ed25519.pem"), ("a-ec.pem", "ec.pem")],
        );

        let lists = build(tmp.path()).unwrap();
        let entity = &lists.directory.entities[0];
        let kinds: Vec<KeyType> = entity.keys().iter().map(|k| k.kty).collect();
        assert_eq!(kinds, vec![KeyType::Ec, KeyType::Oct]);
        assert_eq!(entity.keys()[1].x5c[0], flatten_pem(&fixture("ed25519.pem")));
        assert_eq!(
            lists.bundle,
            format!("{}\n{}\n", fixture("ec.pem"), fixture("ed25519.pem"))
        );
        assert_eq!(lists.directory.last_updated, "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_publisher_without_certificates() {
        let tmp = TempDir::new().unwrap();
        add_publisher(
            tmp.path(),
            "empty",
            r#"{"display_name":"Empty","contact":"e@empty.test","isCA":false}"#,
            &[],
        );

        let lists = build(tmp.path()).unwrap();
        assert_eq!(lists.directory.entities.len(), 1);
        assert!(lists.directory.entities[0].keys().is_empty());
        assert!(lists.bundle.is_empty());
    }

    #[test]
    fn test_unsupported_algorithm_aborts() {
        let tmp = TempDir::new().unwrap();
        add_publisher(
            tmp.path(),
            "legacy",
            r#"{"display_name":"Legacy","contact":"l@legacy.test","isCA":true}"#,
            &[("legacy.pem", "dsa.pem")],
        );

        let err = build(tmp.path()).unwrap_err();
        match err {
            ListError::UnsupportedAlgorithm { path, algorithm } => {
                assert!(path.ends_with("legacy.pem"));
                assert_eq!(algorithm, "dsaEncryption");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_entity_file_aborts() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Publishers/orphan")).unwrap();
        match build(tmp.path()).unwrap_err() {
            ListError::Read { path, .. } => assert!(path.ends_with("orphan/entity.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_with_two_certificates_aborts() {
        let tmp = TempDir::new().unwrap();
        add_publisher(
            tmp.path(),
            "acme",
            r#"{"display_name":"Acme","contact":"a@acme.test","isCA":false}"#,
            &[],
        );
        let chain = format!("{}{}", fixture("ed25519.pem"), fixture("ec.pem"));
        fs::write(tmp.path().join("Publishers/acme/chain.pem"), chain).unwrap();

        match build(tmp.path()).unwrap_err() {
            ListError::InvalidCertificate { path, reason } => {
                assert!(path.ends_with("chain.pem"));
                assert_eq!(reason, "trailing data after certificate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_publisher_is_listed() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real-acme");
        fs::create_dir_all(&real).unwrap();
        fs::create_dir_all(tmp.path().join("Publishers")).unwrap();
        fs::write(
            real.join("entity.json"),
            r#"{"display_name":"Acme","contact":"a@acme.test","isCA":false}"#,
        )
        .unwrap();
        fs::write(real.join("cert.pem"), fixture("rsa.pem")).unwrap();
        std::os::unix::fs::symlink("../real-acme", tmp.path().join("Publishers/acme")).unwrap();

        let lists = build(tmp.path()).unwrap();
        assert_eq!(lists.directory.entities.len(), 1);
        assert_eq!(lists.directory.entities[0].keys()[0].kty, KeyType::Rsa);
        assert_eq!(lists.bundle, format!("{}\n", fixture("rsa.pem")));
    }
}
