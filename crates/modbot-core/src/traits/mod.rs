//! Ports - the interfaces the domain needs from infrastructure

mod repositories;
mod transport;

pub use repositories::{CredibilityRepository, RepoResult, ReportRepository};
pub use transport::Transport;
