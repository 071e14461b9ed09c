//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use auto_commit_msg::config::{Config, Secret};
use git2::{Oid, Repository, Signature};
use serde_json::{Value, json};

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Config pointing at `base_url` with a resolved test key.
pub fn test_config(base_url: &str, trace: bool) -> Config {
    let mut config = Config::default();
    config.trace = trace;
    config.provider.base_url = base_url.to_string();
    config.provider.api_key = "TEST_API_KEY".to_string();
    config.provider.secret = Secret::new("sk-test");
    config.diff.short_model = "small-model".to_string();
    config.diff.long_model = "large-model".to_string();
    config.diff.threshold = 200;
    config
}

/// A chat completion body with one choice per text.
pub fn completion_body(texts: &[&str]) -> Value {
    let choices: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "index": i,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": text}
            })
        })
        .collect();
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "test",
        "choices": choices
    })
}

/// A test git repository with helpers to commit and stage files.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new repository with one initial commit containing `README.md`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        let test_repo = Self { dir, repo };
        test_repo.write("README.md", "# test\n");
        test_repo.stage("README.md");
        test_repo.commit("chore: initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the commit message file git would pass to the hook.
    pub fn commit_msg_file(&self) -> PathBuf {
        self.dir.path().join(".git").join("COMMIT_EDITMSG")
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file in the working tree without staging it.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Add a working tree file to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write and stage in one go.
    pub fn stage_file(&self, name: &str, content: &str) {
        self.write(name, content);
        self.stage(name);
    }

    /// Commit the current index. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }
}

/// `n` numbered lines, each ending in a newline.
pub fn lines(n: usize) -> String {
    (0..n).map(|i| format!("line {i}\n")).collect()
}
