use crate::context::PipelineContext;

/// Derive the image tag for this run.
///
/// An explicit tag wins; otherwise the commit SHA from the pipeline context is
/// used as-is. A missing SHA is not an error and yields an empty tag.
pub fn create_tag(ctx: &PipelineContext, explicit: Option<&str>) -> String {
    tracing::info!("creating image tag...");

    let tag = match explicit.filter(|t| !t.trim().is_empty()) {
        Some(t) => t.trim().to_owned(),
        None => {
            if ctx.sha.is_none() {
                tracing::warn!("no commit SHA in pipeline context; tag will be empty");
            }
            // arch-lint: allow(no-silent-result-drop) reason="a missing SHA is reported above and yields an empty tag"
            ctx.sha.clone().unwrap_or_default()
        }
    };

    tracing::info!(
        tag = %tag,
        git_ref = ctx.git_ref.as_str(),
        ref_kind = %ctx.git_ref.kind(),
        "image tag created"
    );
    tag
}
