pub mod client;
pub mod config;
pub mod poller;
pub mod render;

pub use client::{ApiClient, ClientError};
pub use config::Config;
pub use poller::{DashboardPoller, DashboardState, PollerHandle};
