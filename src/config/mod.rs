//! Integration configuration and the playground editor's bindings.

pub(crate) mod defaults;
mod parse;

pub use parse::load_config;
