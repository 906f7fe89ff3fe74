/// State of one side (index or worktree) of a changed path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeState {
    Clean,
    Changed,
    /// Only meaningful on the worktree side
    Untracked,
}

/// Engine-neutral status of one changed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: String,
    pub index: ChangeState,
    pub worktree: ChangeState,
}

impl FileStatus {
    pub fn new(path: impl Into<String>, index: ChangeState, worktree: ChangeState) -> Self {
        Self {
            path: path.into(),
            index,
            worktree,
        }
    }

    pub fn is_untracked(&self) -> bool {
        self.worktree == ChangeState::Untracked
    }

    /// Has a change recorded in the index
    pub fn is_staged(&self) -> bool {
        self.index == ChangeState::Changed
    }

    /// Tracked file with unstaged worktree changes
    pub fn is_worktree_modified(&self) -> bool {
        self.worktree == ChangeState::Changed
    }

    /// Anything `stage` would pick up
    pub fn needs_staging(&self) -> bool {
        self.worktree != ChangeState::Clean
    }
}
