pub mod config;
pub mod service;

pub use config::GearConfig;
pub use service::{GearService, RankedProfile};
