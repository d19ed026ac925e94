use clap::Args;
use hoist_core::{
    BuildRequest, HoistConfig, ImageRef, PipelineContext, RegistryTarget, create_tag,
};
use hoist_engine::EngineClient;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};

/// Workflow inputs. Each flag falls back to the matching `INPUT_*` variable
/// that GitHub Actions sets for `with:` entries.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Image repository name, e.g. `my-org/my-service`
    #[arg(long, env = "INPUT_IMAGE")]
    pub image: Option<String>,

    /// Registry host
    #[arg(long, env = "INPUT_REGISTRY")]
    pub registry: Option<String>,

    /// Explicit tag (defaults to the commit SHA)
    #[arg(long, env = "INPUT_TAG")]
    pub tag: Option<String>,

    /// Path to the Dockerfile
    #[arg(long, env = "INPUT_DOCKERFILE")]
    pub dockerfile: Option<String>,

    /// Build context directory
    #[arg(long, env = "INPUT_DIRECTORY")]
    pub directory: Option<String>,

    /// Build argument in KEY=VALUE form (repeatable, passed through verbatim)
    #[arg(long = "build-arg")]
    pub build_args: Vec<String>,

    /// Comma-separated build arguments, as the workflow `buildArgs` input
    #[arg(long = "build-args", env = "INPUT_BUILDARGS")]
    pub build_arg_list: Option<String>,

    /// Registry username
    #[arg(long, env = "INPUT_USERNAME")]
    pub username: Option<String>,

    /// Registry password (prefer the env var over the flag)
    #[arg(long, env = "INPUT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Container engine CLI
    #[arg(long, env = "INPUT_ENGINE")]
    pub engine: Option<String>,

    /// AWS CLI used for ECR logins
    #[arg(long, env = "INPUT_AWS_CLI")]
    pub aws_cli: Option<String>,
}

/// Inputs merged over hoist.toml; flags and env vars win.
#[derive(Debug)]
pub(crate) struct Settings {
    pub image: Option<String>,
    pub registry: Option<String>,
    pub tag: Option<String>,
    pub dockerfile: PathBuf,
    pub directory: PathBuf,
    pub build_args: Vec<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub engine: String,
    pub aws_cli: String,
}

impl Settings {
    /// Load hoist.toml from `project_dir` and merge the inputs over it.
    pub fn load(inputs: InputArgs, project_dir: &Path) -> anyhow::Result<Self> {
        let config = HoistConfig::load(project_dir)?;
        Ok(Self::resolve(inputs, config))
    }

    pub fn resolve(inputs: InputArgs, config: HoistConfig) -> Self {
        // Only the list input is split; `--build-arg` values may contain commas.
        let listed = inputs
            .build_arg_list
            .iter()
            .flat_map(|list| list.split(','))
            .map(str::to_owned);
        let build_args: Vec<String> = inputs
            .build_args
            .into_iter()
            .chain(listed)
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect();

        Self {
            image: non_blank(inputs.image).or(config.image.name),
            registry: non_blank(inputs.registry).or(config.image.registry),
            tag: non_blank(inputs.tag).or(config.image.tag),
            dockerfile: PathBuf::from(input_or(inputs.dockerfile, config.build.dockerfile)),
            directory: PathBuf::from(input_or(inputs.directory, config.build.directory)),
            build_args: if build_args.is_empty() {
                config.build.args
            } else {
                build_args
            },
            username: non_blank(inputs.username),
            password: non_blank(inputs.password).map(SecretString::from),
            engine: input_or(inputs.engine, config.engine.program),
            aws_cli: input_or(inputs.aws_cli, config.engine.aws_cli),
        }
    }

    pub fn client(&self) -> EngineClient {
        EngineClient::new()
            .with_engine(&self.engine)
            .with_aws_cli(&self.aws_cli)
    }

    pub fn require_image(&self) -> Result<&str, hoist_core::Error> {
        self.image
            .as_deref()
            .ok_or(hoist_core::Error::MissingInput { name: "image" })
    }

    pub fn require_registry(&self) -> Result<&str, hoist_core::Error> {
        self.registry
            .as_deref()
            .ok_or(hoist_core::Error::MissingInput { name: "registry" })
    }

    /// `registry/image:tag` for this run.
    pub fn image_ref(&self, ctx: &PipelineContext) -> Result<ImageRef, hoist_core::Error> {
        let registry = self.require_registry()?;
        let image = self.require_image()?;
        let tag = create_tag(ctx, self.tag.as_deref());
        Ok(ImageRef::new(registry, image, tag))
    }

    pub fn build_request(&self, image: &ImageRef) -> BuildRequest {
        BuildRequest::new(&self.dockerfile, image.full_name(), &self.directory)
            .with_build_args(self.build_args.iter().cloned())
    }

    pub fn registry_target(&self) -> Result<RegistryTarget, hoist_core::Error> {
        let host = self.require_registry()?;
        Ok(RegistryTarget::new(
            host,
            self.username.clone(),
            self.password
                .as_ref()
                .map(|p| p.expose_secret().to_owned()),
        ))
    }
}

/// The input when it is set and non-blank, the configured value otherwise.
fn input_or(input: Option<String>, configured: String) -> String {
    // arch-lint: allow(no-silent-result-drop) reason="an unset input falls back to hoist.toml or its default"
    non_blank(input).unwrap_or(configured)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
