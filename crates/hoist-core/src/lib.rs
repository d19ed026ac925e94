//! Core types and configuration for hoist.
//!
//! This crate defines the `hoist.toml` schema ([`HoistConfig`]), the ambient
//! pipeline context ([`PipelineContext`]), the image/registry value types and
//! shared error types.

pub mod config;
pub mod context;
pub mod error;
pub mod image;
pub mod tag;

pub use config::{BuildConfig, EngineConfig, HoistConfig, ImageConfig};
pub use context::{GitRef, HostOs, PipelineContext, RefKind};
pub use error::{Error, Result};
pub use image::{BuildRequest, ImageRef, RegistryTarget};
pub use tag::create_tag;
