// waxwing-api: Async Rust client for the Netgear WAX access point local API

pub mod auth;
pub mod bytes;
pub mod client;
pub mod error;
pub mod firmware;
pub mod models;
pub mod ssid;
pub mod state;
pub mod throttle;
pub mod transport;

pub use client::WaxClient;
pub use error::Error;
pub use models::{DeviceState, Ssid, Stat};
pub use throttle::Throttle;
