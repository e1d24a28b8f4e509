pub mod analyzer;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod forge;
pub mod logging;
pub mod orchestrator;
pub mod outputs;
pub mod result;
pub mod template;
pub mod validator;
pub mod version;

pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
