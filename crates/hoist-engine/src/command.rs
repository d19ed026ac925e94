//! Structured command lines for the container engine and the AWS CLI.
//!
//! Commands are kept as discrete tokens and handed straight to the process
//! spawner; nothing here goes through a shell.

use std::fmt;

/// Flags whose following token is a credential.
const SECRET_FLAGS: &[&str] = &["-p", "--password"];
const REDACTED: &str = "********";

/// Username the ECR credential helper authenticates as.
pub const ECR_USERNAME: &str = "AWS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a single-line command emitted by another tool into tokens.
    ///
    /// Returns `None` for blank input.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let program = tokens.next()?;
        Some(Self::new(program, tokens))
    }
}

/// Renders the command line with credentials masked.
impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in redact_args(&self.args) {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ── Engine commands ──

/// `<engine> build -f <dockerfile> -t <image> [--build-arg <arg>]... <dir>`
pub fn build_command(
    engine: &str,
    dockerfile: &str,
    image_name: &str,
    build_dir: &str,
    build_args: &[String],
) -> EngineCommand {
    let mut args = vec![
        "build".to_owned(),
        "-f".to_owned(),
        dockerfile.to_owned(),
        "-t".to_owned(),
        image_name.to_owned(),
    ];

    for arg in build_args {
        args.push("--build-arg".to_owned());
        args.push(arg.clone());
    }

    args.push(build_dir.to_owned());

    EngineCommand::new(engine, args)
}

/// `<engine> push <image>`
pub fn push_command(engine: &str, image_name: &str) -> EngineCommand {
    EngineCommand::new(engine, ["push", image_name])
}

/// `<engine> login -u <username> --password-stdin <registry>`
pub fn login_command(engine: &str, username: &str, registry: &str) -> EngineCommand {
    EngineCommand::new(
        engine,
        ["login", "-u", username, "--password-stdin", registry],
    )
}

/// `<engine> login --username AWS --password-stdin <registry>`
pub fn ecr_login_command(engine: &str, registry: &str) -> EngineCommand {
    EngineCommand::new(
        engine,
        [
            "login",
            "--username",
            ECR_USERNAME,
            "--password-stdin",
            registry,
        ],
    )
}

// ── AWS CLI commands ──

/// `aws ecr get-login-password --region <region>`
pub fn ecr_password_command(aws_cli: &str, region: &str) -> EngineCommand {
    EngineCommand::new(aws_cli, ["ecr", "get-login-password", "--region", region])
}

/// `aws ecr get-login --region <region> --no-include-email`
///
/// Prints a complete `docker login` command line to stdout.
pub fn ecr_legacy_login_command(aws_cli: &str, region: &str) -> EngineCommand {
    EngineCommand::new(
        aws_cli,
        ["ecr", "get-login", "--region", region, "--no-include-email"],
    )
}

/// Copy of `args` with the value after any password flag masked.
pub fn redact_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push(REDACTED.to_owned());
            mask_next = false;
            continue;
        }
        if let Some((flag, _)) = arg.split_once('=')
            && SECRET_FLAGS.contains(&flag)
        {
            out.push(format!("{flag}={REDACTED}"));
            continue;
        }
        mask_next = SECRET_FLAGS.contains(&arg.as_str());
        out.push(arg.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn build_without_args_renders_plain_command() {
        let cmd = build_command("docker", "Dockerfile", "acme/api:abc", ".", &[]);
        assert_eq!(cmd.to_string(), "docker build -f Dockerfile -t acme/api:abc .");
    }

    #[test]
    fn build_args_sit_between_tag_and_context() {
        let cmd = build_command(
            "docker",
            "Dockerfile",
            "img",
            "ctx",
            &strings(&["A=1", "B=2"]),
        );
        assert_eq!(
            cmd.args,
            strings(&[
                "build",
                "-f",
                "Dockerfile",
                "-t",
                "img",
                "--build-arg",
                "A=1",
                "--build-arg",
                "B=2",
                "ctx"
            ])
        );
    }

    #[test]
    fn duplicate_build_args_pass_through() {
        let cmd = build_command("docker", "D", "i", ".", &strings(&["A=1", "A=2"]));
        assert_eq!(
            cmd.to_string(),
            "docker build -f D -t i --build-arg A=1 --build-arg A=2 ."
        );
    }

    #[test]
    fn build_arg_with_spaces_stays_one_token() {
        let cmd = build_command("docker", "D", "i", ".", &strings(&["MSG=hello world"]));
        assert!(cmd.args.contains(&"MSG=hello world".to_owned()));
        assert_eq!(cmd.args.len(), 8);
    }

    #[test]
    fn push_and_login_commands() {
        assert_eq!(push_command("podman", "img:1").to_string(), "podman push img:1");
        assert_eq!(
            login_command("docker", "bot", "ghcr.io").to_string(),
            "docker login -u bot --password-stdin ghcr.io"
        );
        assert_eq!(
            ecr_login_command("docker", "1.dkr.ecr.us-east-1.amazonaws.com").to_string(),
            "docker login --username AWS --password-stdin 1.dkr.ecr.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn aws_commands() {
        assert_eq!(
            ecr_password_command("aws", "eu-west-1").to_string(),
            "aws ecr get-login-password --region eu-west-1"
        );
        assert_eq!(
            ecr_legacy_login_command("aws", "eu-west-1").to_string(),
            "aws ecr get-login --region eu-west-1 --no-include-email"
        );
    }

    #[test]
    fn parse_line_splits_tokens() {
        let cmd = EngineCommand::parse_line("docker login -u AWS -p s3cr3t https://x\n").unwrap();
        assert_eq!(cmd.program, "docker");
        assert_eq!(cmd.args, strings(&["login", "-u", "AWS", "-p", "s3cr3t", "https://x"]));
    }

    #[test]
    fn parse_line_blank_is_none() {
        assert!(EngineCommand::parse_line("  \n").is_none());
    }

    #[test]
    fn display_masks_password() {
        let cmd = EngineCommand::parse_line("docker login -u AWS -p s3cr3t https://x").unwrap();
        let rendered = cmd.to_string();
        assert!(!rendered.contains("s3cr3t"));
        assert_eq!(rendered, "docker login -u AWS -p ******** https://x");
    }

    #[test]
    fn redact_handles_equals_form() {
        let out = redact_args(&strings(&["login", "--password=s3cr3t", "host"]));
        assert_eq!(out, strings(&["login", "--password=********", "host"]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn build_args_preserve_order(
                args in proptest::collection::vec("[A-Z_]{1,8}=[a-z0-9]{0,8}", 0..8),
            ) {
                let cmd = build_command("docker", "Dockerfile", "img", "dir", &args);

                prop_assert_eq!(cmd.args.last().map(String::as_str), Some("dir"));
                let prefix = strings(&["build", "-f", "Dockerfile", "-t", "img"]);
                prop_assert_eq!(&cmd.args[..5], prefix.as_slice());

                let passed: Vec<String> = cmd.args[5..cmd.args.len() - 1]
                    .chunks(2)
                    .map(|pair| {
                        assert_eq!(pair[0], "--build-arg");
                        pair[1].clone()
                    })
                    .collect();
                prop_assert_eq!(passed, args);
            }

            #[test]
            fn redact_never_leaks_password(secret in "[a-zA-Z0-9]{8,32}") {
                let mut args = strings(&["login", "-u", "AWS", "-p"]);
                args.push(secret.clone());
                let out = redact_args(&args);
                prop_assert!(!out.contains(&secret));
            }
        }
    }
}
