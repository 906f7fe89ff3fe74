use std::path::{Path, PathBuf};

/// Directory name used when nothing usable can be derived from the URL
pub const FALLBACK_NAME: &str = "repository";

/// Highest numeric suffix tried before falling back to a timestamp
const MAX_SUFFIX: u32 = 99;

/// Last path component of a clone URL, without a trailing `.git`.
///
/// Works for both `https://host/org/repo.git` and `git@host:org/repo.git`.
pub fn repository_name(url: &str) -> String {
    let trimmed = url.strip_suffix(".git").unwrap_or(url);
    let separator = match (trimmed.rfind('/'), trimmed.rfind(':')) {
        (Some(slash), Some(colon)) => Some(slash.max(colon)),
        (slash, colon) => slash.or(colon),
    };

    match separator {
        Some(index) if index + 1 < trimmed.len() => trimmed[index + 1..].to_string(),
        _ => FALLBACK_NAME.to_string(),
    }
}

/// Picks a destination directory for a new clone that does not collide with
/// anything already on disk
#[derive(Debug, Clone)]
pub struct CloneTargetResolver {
    parent: PathBuf,
}

impl CloneTargetResolver {
    pub fn new(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: parent.into(),
        }
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// An explicit non-empty target is returned verbatim without any checks.
    /// Otherwise the first free of `<name>`, `<name>-2` .. `<name>-99`, then
    /// `<name>-<unix timestamp>`.
    pub fn resolve(&self, url: &str, target_dir: &str) -> PathBuf {
        if !target_dir.is_empty() {
            return PathBuf::from(target_dir);
        }

        let name = repository_name(url);
        let candidate = self.parent.join(&name);
        if !candidate.exists() {
            tracing::debug!(path = %candidate.display(), "resolved clone target");
            return candidate;
        }

        for suffix in 2..=MAX_SUFFIX {
            let candidate = self.parent.join(format!("{}-{}", name, suffix));
            if !candidate.exists() {
                tracing::debug!(path = %candidate.display(), "resolved clone target");
                return candidate;
            }
        }

        let candidate = self
            .parent
            .join(format!("{}-{}", name, chrono::Utc::now().timestamp()));
        tracing::debug!(path = %candidate.display(), "numeric suffixes exhausted, using timestamp");
        candidate
    }
}
