//! Common test utilities and helpers
//!
//! Real repositories built with git2 inside temporary directories: a bare
//! "remote" seeded with one commit, plus helpers to commit and inspect.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

pub const BRANCH: &str = "main";

/// Temporary root holding a bare remote and any number of clones
pub struct GitFixture {
    root: TempDir,
}

impl GitFixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Bare repository named `<name>.git` seeded with a README commit on
    /// `main`. Returns the URL (a local path) to clone from.
    pub fn seeded_remote(&self, name: &str) -> String {
        let bare_path = self.path().join(format!("{}.git", name));
        let mut bare_options = RepositoryInitOptions::new();
        bare_options.bare(true).initial_head(BRANCH);
        Repository::init_opts(&bare_path, &bare_options).expect("Failed to init bare repo");

        let seed_path = self.path().join(format!("{}-seed", name));
        let seed = init_repo(&seed_path);
        write_file(&seed_path, "README.md", "# seed\n");
        commit_all(&seed, "initial commit");

        let url = bare_path.display().to_string();
        let mut remote = seed.remote("origin", &url).expect("Failed to add remote");
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", BRANCH);
        remote
            .push(&[refspec.as_str()], None)
            .expect("Failed to seed remote");

        url
    }

    /// Plain working repository on `main` without commits or remotes
    pub fn empty_repo(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        init_repo(&path);
        path
    }

    /// Working repository with one committed file, no remotes
    pub fn committed_repo(&self, name: &str) -> PathBuf {
        let path = self.empty_repo(name);
        let repo = Repository::open(&path).expect("Failed to open repo");
        write_file(&path, "tracked.txt", "v1\n");
        commit_all(&repo, "initial commit");
        path
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_repo(path: &Path) -> Repository {
    let mut options = RepositoryInitOptions::new();
    options.initial_head(BRANCH);
    Repository::init_opts(path, &options).expect("Failed to init repo")
}

pub fn write_file(repo_path: &Path, name: &str, content: &str) -> PathBuf {
    let path = repo_path.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// Stage everything (deletions included) and commit on top of HEAD
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .expect("Failed to add files");
    index.update_all(["*"].iter(), None).expect("Failed to update index");
    index.write().expect("Failed to write index");

    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let signature = Signature::now("Fixture", "fixture@example.com").expect("signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("Failed to commit")
}

/// Tip of `refs/heads/main` in the repository at `path` (bare or not)
pub fn branch_tip(path: &Path) -> Oid {
    let repo = Repository::open(path).expect("Failed to open repo");
    repo.refname_to_id(&format!("refs/heads/{}", BRANCH))
        .expect("branch has no tip")
}

pub fn head_message(path: &Path) -> String {
    let repo = Repository::open(path).expect("Failed to open repo");
    let commit = repo.head().unwrap().peel_to_commit().unwrap();
    commit.message().unwrap_or_default().to_string()
}
