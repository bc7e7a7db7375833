mod cli;
mod parsers;

pub use cli::HarnessArgs;
pub(crate) use parsers::parse_duration_arg;
