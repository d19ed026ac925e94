use std::fmt;
use std::path::PathBuf;

use secrecy::SecretString;

/// Everything the engine needs to build one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub dockerfile: PathBuf,
    pub image_name: String,
    pub context_dir: PathBuf,
    /// `KEY=VALUE` entries, passed through in order without deduplication.
    pub build_args: Vec<String>,
}

impl BuildRequest {
    pub fn new(
        dockerfile: impl Into<PathBuf>,
        image_name: impl Into<String>,
        context_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dockerfile: dockerfile.into(),
            image_name: image_name.into(),
            context_dir: context_dir.into(),
            build_args: Vec::new(),
        }
    }

    pub fn with_build_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// A registry to authenticate against.
///
/// The password is held as a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct RegistryTarget {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl RegistryTarget {
    /// Blank username/password values are normalised to `None`.
    pub fn new(host: impl Into<String>, username: Option<String>, password: Option<String>) -> Self {
        Self {
            host: host.into(),
            username: username.filter(|u| !u.is_empty()),
            password: password.filter(|p| !p.is_empty()).map(SecretString::from),
        }
    }

    /// Username and password, only when both are present.
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass)),
            _ => None,
        }
    }
}

/// Fully qualified image reference: `registry/repository:tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub registry: String,
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(
        registry: impl Into<String>,
        repository: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            registry: registry.into(),
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.trim_end_matches('/');
        if registry.is_empty() {
            write!(f, "{}:{}", self.repository, self.tag)
        } else {
            write!(f, "{registry}/{}:{}", self.repository, self.tag)
        }
    }
}
