use hoist_core::{
    BuildRequest, GitRef, HostOs, ImageRef, PipelineContext, RegistryTarget, create_tag,
};
use secrecy::ExposeSecret;

fn ctx(sha: Option<&str>) -> PipelineContext {
    PipelineContext {
        sha: sha.map(str::to_owned),
        git_ref: GitRef::new("refs/heads/master"),
        os: HostOs::Linux,
    }
}

// ── Tag ──

#[test]
fn tag_is_commit_sha() {
    let tag = create_tag(&ctx(Some("0123abcd")), None);
    assert_eq!(tag, "0123abcd");
}

#[test]
fn explicit_tag_overrides_sha() {
    let tag = create_tag(&ctx(Some("0123abcd")), Some("v1.2.3"));
    assert_eq!(tag, "v1.2.3");
}

#[test]
fn blank_explicit_tag_falls_back_to_sha() {
    let tag = create_tag(&ctx(Some("0123abcd")), Some("  "));
    assert_eq!(tag, "0123abcd");
}

#[test]
fn missing_sha_yields_empty_tag() {
    let tag = create_tag(&ctx(None), None);
    assert!(tag.is_empty());
}

// ── Image ref ──

#[test]
fn image_ref_full_name() {
    let image = ImageRef::new("ghcr.io", "acme/api", "abc123");
    assert_eq!(image.full_name(), "ghcr.io/acme/api:abc123");
}

#[test]
fn image_ref_trims_trailing_slash_on_registry() {
    let image = ImageRef::new("docker.io/", "acme/api", "v1");
    assert_eq!(image.full_name(), "docker.io/acme/api:v1");
}

#[test]
fn image_ref_without_registry() {
    let image = ImageRef::new("", "acme/api", "v1");
    assert_eq!(image.full_name(), "acme/api:v1");
}

// ── Registry target ──

#[test]
fn registry_target_requires_both_credentials() {
    let only_user = RegistryTarget::new("docker.io", Some("bot".to_owned()), None);
    assert!(only_user.credentials().is_none());

    let only_pass = RegistryTarget::new("docker.io", None, Some("hunter2".to_owned()));
    assert!(only_pass.credentials().is_none());

    let both = RegistryTarget::new(
        "docker.io",
        Some("bot".to_owned()),
        Some("hunter2".to_owned()),
    );
    let (user, pass) = both.credentials().unwrap();
    assert_eq!(user, "bot");
    assert_eq!(pass.expose_secret(), "hunter2");
}

#[test]
fn registry_target_blank_values_are_absent() {
    let target = RegistryTarget::new("docker.io", Some(String::new()), Some(String::new()));
    assert!(target.username.is_none());
    assert!(target.password.is_none());
}

#[test]
fn registry_target_debug_redacts_password() {
    let target = RegistryTarget::new(
        "docker.io",
        Some("bot".to_owned()),
        Some("hunter2".to_owned()),
    );
    let rendered = format!("{target:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("bot"));
}

// ── Build request ──

#[test]
fn build_request_keeps_arg_order() {
    let req = BuildRequest::new("Dockerfile", "img:1", ".").with_build_args(["B=2", "A=1", "B=3"]);
    assert_eq!(req.build_args, vec!["B=2", "A=1", "B=3"]);
}
