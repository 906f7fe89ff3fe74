use serde::Serialize;
use std::fmt::Write as _;

use crate::domain::value_objects::file_status::FileStatus;

/// Changed paths split into three disjoint buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub modified: Vec<String>,
    pub staged: Vec<String>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    /// Partition changed paths with priority untracked > staged > modified.
    ///
    /// A path with index changes counts as staged only while its worktree is
    /// clean; further unstaged edits move it to modified.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a FileStatus>) -> Self {
        let mut report = Self::default();

        for file in files {
            if file.is_untracked() {
                report.untracked.push(file.path.clone());
            } else if file.is_staged() && !file.is_worktree_modified() {
                report.staged.push(file.path.clone());
            } else if file.is_worktree_modified() {
                report.modified.push(file.path.clone());
            }
        }

        report
    }

    pub fn total(&self) -> usize {
        self.modified.len() + self.staged.len() + self.untracked.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Repository Status:\n\n");
        let sections = [
            ("Modified", &self.modified),
            ("Staged", &self.staged),
            ("Untracked", &self.untracked),
        ];

        for (i, (title, files)) in sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{} ({}):", title, files.len());
            if files.is_empty() {
                out.push_str("  (none)\n");
            }
            for file in files.iter() {
                let _ = writeln!(out, "  • {}", file);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::file_status::ChangeState::{Changed, Clean, Untracked};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<FileStatus> {
        vec![
            FileStatus::new("new.txt", Clean, Untracked),
            FileStatus::new("added.txt", Changed, Clean),
            FileStatus::new("edited.txt", Clean, Changed),
            FileStatus::new("both.txt", Changed, Changed),
        ]
    }

    #[test]
    fn test_partition_priority() {
        let report = StatusReport::from_files(&sample());
        assert_eq!(report.untracked, vec!["new.txt"]);
        assert_eq!(report.staged, vec!["added.txt"]);
        assert_eq!(report.modified, vec!["edited.txt", "both.txt"]);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_render_format() {
        let report = StatusReport::from_files(&sample());
        let expected = "Repository Status:\n\n\
                        Modified (2):\n  • edited.txt\n  • both.txt\n\n\
                        Staged (1):\n  • added.txt\n\n\
                        Untracked (1):\n  • new.txt\n";
        assert_eq!(report.render(), expected);
    }

    #[test]
    fn test_render_empty_buckets() {
        let report = StatusReport::default();
        let expected = "Repository Status:\n\n\
                        Modified (0):\n  (none)\n\n\
                        Staged (0):\n  (none)\n\n\
                        Untracked (0):\n  (none)\n";
        assert_eq!(report.render(), expected);
    }
}
