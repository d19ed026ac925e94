use crate::command::{self, EngineCommand};
use crate::exec::ExecError;
use crate::executor::{CommandExecutor, RealExecutor};
use crate::registry;
use hoist_core::{BuildRequest, HostOs, RegistryTarget};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};

const DEFAULT_ENGINE: &str = "docker";
const DEFAULT_AWS_CLI: &str = "aws";

/// Container engine client, parameterized over the executor for testability.
pub struct EngineClient<E: CommandExecutor = RealExecutor> {
    executor: E,
    engine: String,
    aws_cli: String,
}

impl EngineClient<RealExecutor> {
    pub fn new() -> Self {
        Self::with_executor(RealExecutor)
    }
}

impl Default for EngineClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> EngineClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            engine: DEFAULT_ENGINE.to_owned(),
            aws_cli: DEFAULT_AWS_CLI.to_owned(),
        }
    }

    /// Use a different container CLI (e.g. `podman`).
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Use a different AWS CLI binary for ECR logins.
    pub fn with_aws_cli(mut self, aws_cli: impl Into<String>) -> Self {
        self.aws_cli = aws_cli.into();
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    // ── Build ──

    /// Build the engine command for a request without running it.
    pub fn build_command(&self, request: &BuildRequest) -> Result<EngineCommand, BuildError> {
        Ok(command::build_command(
            &self.engine,
            path_str(&request.dockerfile)?,
            &request.image_name,
            path_str(&request.context_dir)?,
            &request.build_args,
        ))
    }

    /// Build an image, streaming engine output to the terminal.
    ///
    /// Fails before starting any process when the Dockerfile is missing.
    pub async fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        if !request.dockerfile.is_file() {
            return Err(BuildError::DockerfileNotFound(request.dockerfile.clone()));
        }

        let cmd = self.build_command(request)?;

        tracing::info!(image = %request.image_name, "building image");
        tracing::debug!(command = %cmd, "build command");

        self.executor
            .exec_streaming(&cmd.program, &cmd.args)
            .await
            .map_err(|e| BuildError::Build { source: e })
    }

    // ── Login ──

    /// Authenticate the engine against a registry.
    ///
    /// ECR hosts go through the AWS CLI (ignoring any username/password);
    /// both ECR variants log in with the configured engine.
    /// Other hosts log in with username/password when both are set, and are
    /// skipped otherwise.
    pub async fn login(
        &self,
        target: &RegistryTarget,
        os: &HostOs,
    ) -> Result<LoginOutcome, LoginError> {
        if registry::is_managed_registry(&target.host) {
            let region = registry::extract_region(&target.host)
                .ok_or_else(|| LoginError::InvalidEcrHost(target.host.clone()))?;

            tracing::info!(region, "logging into ECR...");

            if os.is_windows() {
                self.ecr_login(&target.host, region).await?;
            } else {
                self.ecr_legacy_login(region).await?;
            }

            return Ok(LoginOutcome::Ecr {
                region: region.to_owned(),
            });
        }

        let Some((username, password)) = target.credentials() else {
            tracing::debug!(registry = %target.host, "no credentials supplied; skipping login");
            return Ok(LoginOutcome::Skipped);
        };

        if target.host.trim().is_empty() {
            return Err(LoginError::MissingRegistry);
        }

        tracing::info!(registry = %target.host, "logging into registry...");

        let cmd = command::login_command(&self.engine, username, &target.host);
        self.executor
            .exec_with_stdin(
                &cmd.program,
                &cmd.args,
                password.expose_secret().as_bytes(),
            )
            .await
            .map_err(|e| LoginError::Login { source: e })?;

        Ok(LoginOutcome::Credentials)
    }

    /// `aws ecr get-login-password | <engine> login --password-stdin`
    async fn ecr_login(&self, host: &str, region: &str) -> Result<(), LoginError> {
        let fetch = command::ecr_password_command(&self.aws_cli, region);
        let password = self
            .executor
            .exec(&fetch.program, &fetch.args)
            .await
            .map_err(|e| LoginError::CredentialFetch { source: e })?;

        let login = command::ecr_login_command(&self.engine, host);
        self.executor
            .exec_with_stdin(&login.program, &login.args, password.trim().as_bytes())
            .await
            .map_err(|e| LoginError::Login { source: e })?;

        Ok(())
    }

    /// Run the login command printed by `aws ecr get-login` with the
    /// configured engine in place of the `docker` it names.
    async fn ecr_legacy_login(&self, region: &str) -> Result<(), LoginError> {
        let fetch = command::ecr_legacy_login_command(&self.aws_cli, region);
        let output = self
            .executor
            .exec(&fetch.program, &fetch.args)
            .await
            .map_err(|e| LoginError::CredentialFetch { source: e })?;

        let mut login = EngineCommand::parse_line(&output).ok_or(LoginError::EmptyLoginCommand)?;
        login.program.clone_from(&self.engine);
        self.executor
            .exec(&login.program, &login.args)
            .await
            .map_err(|e| LoginError::Login { source: e })?;

        Ok(())
    }

    // ── Push ──

    pub async fn push(&self, image_name: &str) -> Result<(), PushError> {
        tracing::info!(image = image_name, "pushing image");

        let cmd = command::push_command(&self.engine, image_name);
        self.executor
            .exec_streaming(&cmd.program, &cmd.args)
            .await
            .map_err(|e| PushError::Push { source: e })
    }
}

// ── Helper ──

fn path_str(path: &Path) -> Result<&str, BuildError> {
    path.to_str()
        .ok_or_else(|| BuildError::InvalidPath(path.to_path_buf()))
}

// ── Outcome / error types ──

/// Which login flow ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Ecr { region: String },
    Credentials,
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Dockerfile does not exist in location {}", .0.display())]
    DockerfileNotFound(PathBuf),

    #[error("path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("image build failed")]
    Build { source: ExecError },
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("cannot determine ECR region from registry host '{0}'")]
    InvalidEcrHost(String),

    #[error("registry host is required to log in")]
    MissingRegistry,

    #[error("failed to fetch ECR credentials")]
    CredentialFetch { source: ExecError },

    #[error("aws ecr get-login printed no login command")]
    EmptyLoginCommand,

    #[error("registry login failed")]
    Login { source: ExecError },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("image push failed")]
    Push { source: ExecError },
}
