pub mod client;
pub mod command;
pub mod exec;
pub mod executor;
pub mod registry;

pub use client::{BuildError, EngineClient, LoginError, LoginOutcome, PushError};
pub use command::EngineCommand;
pub use exec::ExecError;
pub use executor::{CommandExecutor, RealExecutor};
