mod build;
mod login;
mod output;
mod publish;
mod push;
mod settings;
mod tag;

pub use build::build;
pub use login::login;
pub use output::report_failure;
pub use publish::publish;
pub use push::push;
pub use settings::InputArgs;
pub use tag::tag;
