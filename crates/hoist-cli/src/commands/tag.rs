use super::output::set_output;
use super::settings::{InputArgs, Settings};
use hoist_core::{PipelineContext, create_tag};
use std::path::Path;

pub fn tag(inputs: InputArgs) -> anyhow::Result<()> {
    let settings = Settings::load(inputs, Path::new("."))?;
    let ctx = PipelineContext::from_env();

    let tag = create_tag(&ctx, settings.tag.as_deref());
    set_output("tag", &tag)?;
    set_output("refKind", &ctx.git_ref.kind().to_string())?;

    Ok(())
}
