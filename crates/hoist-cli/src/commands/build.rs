use super::settings::{InputArgs, Settings};
use hoist_core::PipelineContext;
use std::path::Path;

pub async fn build(inputs: InputArgs) -> anyhow::Result<()> {
    let settings = Settings::load(inputs, Path::new("."))?;
    let ctx = PipelineContext::from_env();

    let image = settings.image_ref(&ctx)?;
    let request = settings.build_request(&image);

    settings.client().build(&request).await?;
    println!("Built {image}");

    Ok(())
}
