#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const OUTPUT_NAME: &str = "verified-news-publishers-list";

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read fixture {}: {e}", path.display()))
}

/// A scratch publishers tree plus a separate output directory
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub out: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("repo");
        let out = tmp.path().join("out");
        fs::create_dir_all(root.join("Publishers")).expect("create publishers dir");
        fs::create_dir_all(&out).expect("create output dir");
        Self {
            _tmp: tmp,
            root,
            out,
        }
    }

    pub fn publisher(&self, dir: &str, entity: &Value, certs: &[(&str, &str)]) -> PathBuf {
        let publisher = self.root.join("Publishers").join(dir);
        fs::create_dir_all(&publisher).expect("create publisher dir");
        fs::write(
            publisher.join("entity.json"),
            serde_json::to_string_pretty(entity).expect("serialize entity"),
        )
        .expect("write entity");
        for (file, fixture_name) in certs {
            fs::write(publisher.join(file), fixture(fixture_name)).expect("write certificate");
        }
        publisher
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("verified-publishers-list");
        cmd.env_remove("VNPL_ROOT")
            .env_remove("VNPL_OUTPUT_DIR")
            .env_remove("VNPL_OUTPUT_NAME")
            .env_remove("VNPL_DECODER")
            .arg("--root")
            .arg(&self.root)
            .arg("--output-dir")
            .arg(&self.out);
        cmd
    }

    pub fn pem_path(&self) -> PathBuf {
        self.out.join(format!("{OUTPUT_NAME}.pem"))
    }

    pub fn json_path(&self) -> PathBuf {
        self.out.join(format!("{OUTPUT_NAME}.json"))
    }

    pub fn read_json(&self) -> Value {
        let text = fs::read_to_string(self.json_path()).expect("read json list");
        serde_json::from_str(&text).expect("valid json list")
    }

    pub fn read_pem(&self) -> String {
        fs::read_to_string(self.pem_path()).expect("read pem list")
    }
}

pub fn flattened(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .collect::<String>()
}
