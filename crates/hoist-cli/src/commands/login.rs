use super::settings::{InputArgs, Settings};
use hoist_core::PipelineContext;
use hoist_engine::LoginOutcome;
use std::path::Path;

pub async fn login(inputs: InputArgs) -> anyhow::Result<()> {
    let settings = Settings::load(inputs, Path::new("."))?;
    let ctx = PipelineContext::from_env();

    let target = settings.registry_target()?;
    let outcome = settings.client().login(&target, &ctx.os).await?;

    match outcome {
        LoginOutcome::Ecr { region } => println!("Logged in to ECR ({region})"),
        LoginOutcome::Credentials => println!("Logged in to {}", target.host),
        LoginOutcome::Skipped => println!("No credentials for {}; login skipped", target.host),
    }

    Ok(())
}
