use super::output::set_output;
use super::settings::{InputArgs, Settings};
use hoist_core::PipelineContext;
use std::path::Path;

pub async fn push(inputs: InputArgs) -> anyhow::Result<()> {
    let settings = Settings::load(inputs, Path::new("."))?;
    let ctx = PipelineContext::from_env();

    let image = settings.image_ref(&ctx)?;
    settings.client().push(&image.full_name()).await?;

    set_output("imageFullName", &image.full_name())?;
    Ok(())
}
