pub mod cli;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod gitea_provider;
pub mod github_provider;
pub mod migrate;
pub mod model;
pub mod progress;
pub mod provider;
pub mod report;
pub mod verify;

#[cfg(test)]
mod testing;

pub use driver::ReconciliationDriver;
pub use error::{Error, Result};
