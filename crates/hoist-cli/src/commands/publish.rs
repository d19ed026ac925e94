use super::output::set_output;
use super::settings::{InputArgs, Settings};
use hoist_core::PipelineContext;
use hoist_engine::LoginOutcome;
use std::path::Path;

/// Full CI step: tag → build → login → push.
///
/// Each step must succeed before the next one starts; an image that was
/// already pushed stays pushed if a later step fails.
pub async fn publish(inputs: InputArgs) -> anyhow::Result<()> {
    let settings = Settings::load(inputs, Path::new("."))?;
    let ctx = PipelineContext::from_env();
    let client = settings.client();

    // ── Tag ──
    let image = settings.image_ref(&ctx)?;
    let image_name = image.full_name();
    tracing::info!(image = %image_name, engine = client.engine(), os = ?ctx.os, "publishing");

    // ── Build ──
    client.build(&settings.build_request(&image)).await?;

    // ── Login ──
    let target = settings.registry_target()?;
    match client.login(&target, &ctx.os).await? {
        LoginOutcome::Ecr { region } => tracing::info!(region = %region, "ECR login complete"),
        LoginOutcome::Credentials => tracing::info!(registry = %target.host, "login complete"),
        LoginOutcome::Skipped => {
            tracing::info!(registry = %target.host, "no credentials; relying on existing session")
        }
    }

    // ── Push ──
    client.push(&image_name).await?;

    set_output("imageFullName", &image_name)?;
    Ok(())
}
