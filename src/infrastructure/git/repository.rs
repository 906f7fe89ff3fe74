use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use git2::{
    build::{CheckoutBuilder, RepoBuilder},
    Commit, Direction, ErrorCode, FetchOptions, IndexAddOption, Oid, PushOptions,
    Repository as Git2Repository, ResetType, Signature, Status, StatusOptions,
};
use thiserror::Error;

use super::callbacks::remote_callbacks;
use crate::domain::value_objects::basic_auth::BasicAuth;
use crate::domain::value_objects::file_status::{ChangeState, FileStatus};

/// Git repository operations related errors
#[derive(Debug, Error)]
pub enum GitRepositoryError {
    #[error("repository does not exist at {0}")]
    RepositoryNotFound(String),

    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    #[error("remote branch not found: {0}")]
    BranchNotFound(String),

    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    #[error("branch '{0}' has no commits yet")]
    NoCommits(String),

    #[error("non-fast-forward: local branch '{0}' has diverged from its remote")]
    NonFastForward(String),

    #[error("push rejected: {0}")]
    PushRejected(String),

    #[error("operation interrupted")]
    Interrupted,

    #[error("{}", .0.message())]
    Git2Error(#[from] git2::Error),

    #[error("{0}")]
    IoError(#[from] std::io::Error),
}

/// Result of a synchronization step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Updated,
    UpToDate,
}

/// Wrapper around git2::Repository with the workflow operations
pub struct GitRepository {
    repo: Git2Repository,
    path: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .field("repo", &"<git2::Repository>")
            .finish()
    }
}

impl GitRepository {
    /// Open the repository whose working tree is `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GitRepositoryError> {
        let path_buf = path.as_ref().to_path_buf();

        if !path_buf.exists() {
            return Err(GitRepositoryError::RepositoryNotFound(
                path_buf.display().to_string(),
            ));
        }

        let repo = Git2Repository::open(&path_buf)?;
        Ok(Self {
            repo,
            path: path_buf,
        })
    }

    /// Clone `url` into `target_path`, which must not exist or be empty
    pub fn clone_from<P: AsRef<Path>>(
        url: &str,
        target_path: P,
        auth: &BasicAuth,
        interrupt: &AtomicBool,
    ) -> Result<Self, GitRepositoryError> {
        ensure_not_interrupted(interrupt)?;
        let target_path = target_path.as_ref().to_path_buf();

        if let Some(parent) = target_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(auth, interrupt));

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);

        tracing::info!(url, path = %target_path.display(), "cloning repository");
        let repo = builder
            .clone(url, &target_path)
            .map_err(|e| transfer_error(e, interrupt))?;

        Ok(Self {
            repo,
            path: target_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First URL configured for `remote_name`, empty when it is not UTF-8
    pub fn remote_url(&self, remote_name: &str) -> Result<String, GitRepositoryError> {
        let remote = self.find_remote(remote_name)?;
        Ok(remote.url().unwrap_or_default().to_string())
    }

    /// Short name of the checked-out branch, also for a branch without commits
    pub fn current_branch(&self) -> Result<String, GitRepositoryError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head_ref = self.repo.find_reference("HEAD")?;
                let target = head_ref
                    .symbolic_target()
                    .ok_or(GitRepositoryError::DetachedHead)?;
                return Ok(target.trim_start_matches("refs/heads/").to_string());
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Err(GitRepositoryError::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(GitRepositoryError::DetachedHead)
    }

    /// Fetch with the configured refspecs.
    ///
    /// Up to date when no remote-tracking ref moved.
    pub fn fetch(
        &self,
        remote_name: &str,
        auth: &BasicAuth,
        interrupt: &AtomicBool,
    ) -> Result<SyncStatus, GitRepositoryError> {
        ensure_not_interrupted(interrupt)?;
        let mut remote = self.find_remote(remote_name)?;
        let before = self.tracking_refs(remote_name)?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(auth, interrupt));

        let configured: [&str; 0] = [];
        remote
            .fetch(&configured, Some(&mut fetch_options), None)
            .map_err(|e| transfer_error(e, interrupt))?;

        let after = self.tracking_refs(remote_name)?;
        tracing::debug!(remote = remote_name, refs = after.len(), "fetched");

        Ok(if before == after {
            SyncStatus::UpToDate
        } else {
            SyncStatus::Updated
        })
    }

    /// Fetch, then fast-forward the current branch to its remote counterpart
    pub fn pull(
        &self,
        remote_name: &str,
        auth: &BasicAuth,
        interrupt: &AtomicBool,
    ) -> Result<SyncStatus, GitRepositoryError> {
        let branch = self.current_branch()?;
        self.fetch(remote_name, auth, interrupt)?;

        let tracking_name = format!("refs/remotes/{}/{}", remote_name, branch);
        let tracking = self
            .repo
            .find_reference(&tracking_name)
            .map_err(|_| {
                GitRepositoryError::BranchNotFound(format!("{}/{}", remote_name, branch))
            })?;
        let incoming = self.repo.reference_to_annotated_commit(&tracking)?;
        let (analysis, _) = self.repo.merge_analysis(&[&incoming])?;

        if analysis.is_up_to_date() {
            return Ok(SyncStatus::UpToDate);
        }

        let local_name = format!("refs/heads/{}", branch);
        let target = self.repo.find_object(incoming.id(), None)?;

        if analysis.is_unborn() {
            // HEAD already points at the branch symbolically
            self.repo
                .checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
            self.repo
                .reference(&local_name, incoming.id(), false, "pull: initial checkout")?;
            return Ok(SyncStatus::Updated);
        }

        if !analysis.is_fast_forward() {
            return Err(GitRepositoryError::NonFastForward(branch));
        }

        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
        let mut local = self.repo.find_reference(&local_name)?;
        local.set_target(incoming.id(), "pull: fast-forward")?;

        tracing::debug!(branch = %branch, target = %incoming.id(), "fast-forwarded");
        Ok(SyncStatus::Updated)
    }

    /// Push the current branch to the same name on `remote_name`.
    ///
    /// Up to date when the remote already advertises the local tip.
    pub fn push(
        &self,
        remote_name: &str,
        auth: &BasicAuth,
        interrupt: &AtomicBool,
    ) -> Result<SyncStatus, GitRepositoryError> {
        ensure_not_interrupted(interrupt)?;
        let branch = self.current_branch()?;
        let local_name = format!("refs/heads/{}", branch);
        let local_tip = self
            .repo
            .refname_to_id(&local_name)
            .map_err(|_| GitRepositoryError::NoCommits(branch.clone()))?;

        let mut remote = self.find_remote(remote_name)?;

        {
            let connection = remote
                .connect_auth(Direction::Push, Some(remote_callbacks(auth, interrupt)), None)
                .map_err(|e| transfer_error(e, interrupt))?;
            let remote_tip = connection
                .list()?
                .iter()
                .find(|head| head.name() == local_name)
                .map(|head| head.oid());

            if remote_tip == Some(local_tip) {
                return Ok(SyncStatus::UpToDate);
            }
        }

        let mut rejected = Vec::new();
        {
            let mut callbacks = remote_callbacks(auth, interrupt);
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    rejected.push(format!("{} ({})", refname, message));
                }
                Ok(())
            });

            let mut push_options = PushOptions::new();
            push_options.remote_callbacks(callbacks);

            let refspec = format!("{0}:{0}", local_name);
            remote
                .push(&[refspec.as_str()], Some(&mut push_options))
                .map_err(|e| transfer_error(e, interrupt))?;
        }

        if !rejected.is_empty() {
            return Err(GitRepositoryError::PushRejected(rejected.join(", ")));
        }

        tracing::debug!(branch = %branch, tip = %local_tip, "pushed");
        Ok(SyncStatus::Updated)
    }

    /// Changed paths, untracked ones included, ignored ones excluded
    pub fn file_statuses(&self) -> Result<Vec<FileStatus>, GitRepositoryError> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let files = statuses
            .iter()
            .filter_map(|entry| {
                let path = entry.path()?.to_string();
                let status = entry.status();
                let file = FileStatus::new(path, index_state(status), worktree_state(status));
                (file.index != ChangeState::Clean || file.worktree != ChangeState::Clean)
                    .then_some(file)
            })
            .collect();

        Ok(files)
    }

    /// Stage every change in the working tree, deletions included
    pub fn stage_all(&self) -> Result<(), GitRepositoryError> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    /// Commit the index on top of HEAD, or as the root commit on an unborn branch
    pub fn commit(
        &self,
        message: &str,
        author_name: &str,
        author_email: &str,
    ) -> Result<Oid, GitRepositoryError> {
        let signature = Signature::now(author_name, author_email)?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid)
    }

    /// Discard index and worktree changes to tracked files
    pub fn reset_hard(&self) -> Result<(), GitRepositoryError> {
        let head = match self.head_commit()? {
            Some(commit) => commit,
            None => return Err(GitRepositoryError::NoCommits(self.current_branch()?)),
        };
        self.repo.reset(head.as_object(), ResetType::Hard, None)?;
        Ok(())
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>, GitRepositoryError> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_remote(&self, remote_name: &str) -> Result<git2::Remote<'_>, GitRepositoryError> {
        self.repo
            .find_remote(remote_name)
            .map_err(|_| GitRepositoryError::RemoteNotFound(remote_name.to_string()))
    }

    fn tracking_refs(
        &self,
        remote_name: &str,
    ) -> Result<BTreeMap<String, Oid>, GitRepositoryError> {
        let mut refs = BTreeMap::new();
        for reference in self
            .repo
            .references_glob(&format!("refs/remotes/{}/*", remote_name))?
        {
            let reference = reference?;
            // symbolic refs such as <remote>/HEAD have no direct target
            if let (Some(name), Some(oid)) = (reference.name(), reference.target()) {
                refs.insert(name.to_string(), oid);
            }
        }
        Ok(refs)
    }
}

fn ensure_not_interrupted(interrupt: &AtomicBool) -> Result<(), GitRepositoryError> {
    if interrupt.load(Ordering::SeqCst) {
        return Err(GitRepositoryError::Interrupted);
    }
    Ok(())
}

fn transfer_error(error: git2::Error, interrupt: &AtomicBool) -> GitRepositoryError {
    if interrupt.load(Ordering::SeqCst) {
        GitRepositoryError::Interrupted
    } else {
        error.into()
    }
}

fn index_state(status: Status) -> ChangeState {
    let staged = Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE;
    if status.intersects(staged) {
        ChangeState::Changed
    } else {
        ChangeState::Clean
    }
}

fn worktree_state(status: Status) -> ChangeState {
    let changed = Status::WT_MODIFIED
        | Status::WT_DELETED
        | Status::WT_RENAMED
        | Status::WT_TYPECHANGE
        | Status::CONFLICTED;
    if status.contains(Status::WT_NEW) {
        ChangeState::Untracked
    } else if status.intersects(changed) {
        ChangeState::Changed
    } else {
        ChangeState::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepository) {
        let temp_dir = TempDir::new().unwrap();
        Git2Repository::init(temp_dir.path()).unwrap();
        let repo = GitRepository::open(temp_dir.path()).unwrap();
        (temp_dir, repo)
    }

    fn status_of<'a>(files: &'a [FileStatus], path: &str) -> &'a FileStatus {
        files.iter().find(|f| f.path == path).unwrap()
    }

    #[test]
    fn test_open_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let result = GitRepository::open(temp_dir.path().join("nonexistent"));
        assert!(matches!(
            result.unwrap_err(),
            GitRepositoryError::RepositoryNotFound(_)
        ));
    }

    #[test]
    fn test_open_plain_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            GitRepository::open(temp_dir.path()).unwrap_err(),
            GitRepositoryError::Git2Error(_)
        ));
    }

    #[test]
    fn test_stage_and_commit_on_unborn_branch() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let files = repo.file_statuses().unwrap();
        assert_eq!(status_of(&files, "a.txt").worktree, ChangeState::Untracked);

        repo.stage_all().unwrap();
        let files = repo.file_statuses().unwrap();
        assert_eq!(status_of(&files, "a.txt").index, ChangeState::Changed);
        assert_eq!(status_of(&files, "a.txt").worktree, ChangeState::Clean);

        let oid = repo.commit("first", "Tester", "tester@example.com").unwrap();
        assert!(repo.file_statuses().unwrap().is_empty());

        let commit = repo.repo.find_commit(oid).unwrap();
        assert_eq!(commit.parent_count(), 0);
        assert_eq!(commit.author().name(), Some("Tester"));
    }

    #[test]
    fn test_stage_all_records_deletions() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("gone.txt"), "x").unwrap();
        repo.stage_all().unwrap();
        repo.commit("add", "Tester", "tester@example.com").unwrap();

        fs::remove_file(dir.path().join("gone.txt")).unwrap();
        let files = repo.file_statuses().unwrap();
        assert_eq!(status_of(&files, "gone.txt").worktree, ChangeState::Changed);

        repo.stage_all().unwrap();
        let files = repo.file_statuses().unwrap();
        assert_eq!(status_of(&files, "gone.txt").index, ChangeState::Changed);
        assert_eq!(status_of(&files, "gone.txt").worktree, ChangeState::Clean);
    }

    #[test]
    fn test_reset_hard_keeps_untracked() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("tracked.txt"), "v1").unwrap();
        repo.stage_all().unwrap();
        repo.commit("init", "Tester", "tester@example.com").unwrap();

        fs::write(dir.path().join("tracked.txt"), "v2").unwrap();
        fs::write(dir.path().join("new.txt"), "n").unwrap();
        repo.reset_hard().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("tracked.txt")).unwrap(), "v1");
        let files = repo.file_statuses().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_untracked());
    }

    #[test]
    fn test_reset_hard_without_commits() {
        let (_dir, repo) = init_repo();
        assert!(matches!(
            repo.reset_hard().unwrap_err(),
            GitRepositoryError::NoCommits(_)
        ));
    }

    #[test]
    fn test_current_branch_on_unborn_head() {
        let (_dir, repo) = init_repo();
        let branch = repo.current_branch().unwrap();
        assert!(!branch.is_empty());
        assert!(!branch.starts_with("refs/"));
    }

    #[test]
    fn test_missing_remote() {
        let (_dir, repo) = init_repo();
        let err = repo.remote_url("origin").unwrap_err();
        assert_eq!(err.to_string(), "remote not found: origin");

        let interrupt = AtomicBool::new(false);
        let err = repo
            .fetch("origin", &BasicAuth::default(), &interrupt)
            .unwrap_err();
        assert!(matches!(err, GitRepositoryError::RemoteNotFound(_)));
    }

    #[test]
    fn test_interrupted_before_transfer() {
        let (_dir, repo) = init_repo();
        let interrupt = AtomicBool::new(true);
        assert!(matches!(
            repo.fetch("origin", &BasicAuth::default(), &interrupt)
                .unwrap_err(),
            GitRepositoryError::Interrupted
        ));
    }
}
