use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join(".teamdesk")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// A `teamdesk` invocation rooted at this project.
    pub fn teamdesk(&self) -> Command {
        let mut cmd = Command::cargo_bin("teamdesk").expect("binary");
        cmd.env("TEAMDESK_ROOT", self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn login(&self) {
        self.teamdesk()
            .args(["login", "--username", "admin", "--password", "admin"])
            .assert()
            .success();
    }

    /// Run with `--json` and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .teamdesk()
            .arg("--json")
            .args(args)
            .output()
            .expect("run teamdesk");
        serde_json::from_slice(&output.stdout).expect("json envelope")
    }

    pub fn read_lines(&self, file: &str) -> Vec<serde_json::Value> {
        let path = self.data_dir().join(file);
        let contents = fs::read_to_string(path).unwrap_or_default();
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }
}
