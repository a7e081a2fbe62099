pub use config::PortalConfig;

pub mod config;
pub mod connector;
pub mod hooks;
