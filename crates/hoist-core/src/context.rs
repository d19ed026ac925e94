//! Ambient pipeline context: commit, ref and runner OS.
//!
//! The context is read once from the process environment and then passed
//! explicitly to whatever needs it, so tests can construct one directly.

use std::fmt;

const TAG_PREFIX: &str = "refs/tags/";
const BRANCH_PREFIX: &str = "refs/heads/";
const MASTER_REF: &str = "refs/heads/master";

/// Read-only view of the CI environment for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineContext {
    /// Commit being built (`GITHUB_SHA`).
    pub sha: Option<String>,
    /// Ref being built (`GITHUB_REF`).
    pub git_ref: GitRef,
    /// Runner operating system (`RUNNER_OS`).
    pub os: HostOs,
}

impl PipelineContext {
    /// Build the context from the real process environment.
    pub fn from_env() -> Self {
        // arch-lint: allow(no-silent-result-drop) reason="unset or non-unicode variables are treated as absent context"
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            sha: non_empty("GITHUB_SHA"),
            // arch-lint: allow(no-silent-result-drop) reason="no ref means the run is not tied to a branch or tag"
            git_ref: GitRef::new(non_empty("GITHUB_REF").unwrap_or_default()),
            os: non_empty("RUNNER_OS")
                .map(|os| HostOs::parse(&os))
                // arch-lint: allow(no-silent-result-drop) reason="outside a runner the build host OS is the runner OS"
                .unwrap_or_else(HostOs::current),
        }
    }
}

// ── Git ref ──

/// A version-control ref string such as `refs/heads/main`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitRef(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Tag,
    MasterBranch,
    OtherBranch,
    None,
}

impl GitRef {
    pub fn new(git_ref: impl Into<String>) -> Self {
        Self(git_ref.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> RefKind {
        let r = self.0.as_str();
        if r.starts_with(TAG_PREFIX) {
            RefKind::Tag
        } else if r == MASTER_REF {
            RefKind::MasterBranch
        } else if r.starts_with(BRANCH_PREFIX) {
            RefKind::OtherBranch
        } else {
            RefKind::None
        }
    }

    pub fn is_tag(&self) -> bool {
        self.kind() == RefKind::Tag
    }

    pub fn is_master_branch(&self) -> bool {
        self.kind() == RefKind::MasterBranch
    }

    pub fn is_other_branch(&self) -> bool {
        self.kind() == RefKind::OtherBranch
    }

    /// Tag or branch name without the `refs/...` prefix.
    pub fn short_name(&self) -> Option<&str> {
        match self.kind() {
            RefKind::Tag => self.0.strip_prefix(TAG_PREFIX),
            RefKind::MasterBranch | RefKind::OtherBranch => self.0.strip_prefix(BRANCH_PREFIX),
            RefKind::None => None,
        }
    }
}

impl From<Option<&str>> for GitRef {
    fn from(value: Option<&str>) -> Self {
        // arch-lint: allow(no-silent-result-drop) reason="a missing ref classifies as RefKind::None"
        Self::new(value.unwrap_or_default())
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RefKind::Tag => "tag",
            RefKind::MasterBranch => "master branch",
            RefKind::OtherBranch => "branch",
            RefKind::None => "none",
        };
        f.write_str(label)
    }
}

// ── Host OS ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Linux,
    MacOs,
    Other(String),
}

impl HostOs {
    /// Parse a runner OS identifier (`Windows`, `Linux`, `macOS`).
    pub fn parse(value: &str) -> Self {
        let v = value.trim();
        if v.eq_ignore_ascii_case("windows") {
            Self::Windows
        } else if v.eq_ignore_ascii_case("linux") {
            Self::Linux
        } else if v.eq_ignore_ascii_case("macos") {
            Self::MacOs
        } else {
            Self::Other(v.to_owned())
        }
    }

    /// OS this binary was compiled for; used when `RUNNER_OS` is unset.
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl Default for HostOs {
    fn default() -> Self {
        Self::current()
    }
}
