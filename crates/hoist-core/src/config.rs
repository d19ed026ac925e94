use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hoist.toml";

/// hoist.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoistConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Repository name, e.g. `my-org/my-service`
    pub name: Option<String>,
    /// Registry host, e.g. `123456789.dkr.ecr.us-east-1.amazonaws.com`
    pub registry: Option<String>,
    /// Fixed tag. When unset the commit SHA is used.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Path to the Dockerfile
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,
    /// Build context directory
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Build arguments in `KEY=VALUE` form, passed through in order.
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Container engine CLI
    #[serde(default = "default_engine")]
    pub program: String,
    /// AWS CLI used for ECR logins
    #[serde(default = "default_aws_cli")]
    pub aws_cli: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            dockerfile: default_dockerfile(),
            directory: default_directory(),
            args: Vec::new(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_engine(),
            aws_cli: default_aws_cli(),
        }
    }
}

impl HoistConfig {
    /// Load from hoist.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_dockerfile() -> String {
    "Dockerfile".to_owned()
}

fn default_directory() -> String {
    ".".to_owned()
}

fn default_engine() -> String {
    "docker".to_owned()
}

fn default_aws_cli() -> String {
    "aws".to_owned()
}
