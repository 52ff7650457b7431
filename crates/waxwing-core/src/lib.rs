// waxwing-core: Polling and device lifecycle layer between waxwing-api
// and consumers (CLI).

pub mod config;
pub mod coordinator;
pub mod error;
mod optimistic;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DeviceConfig, TlsVerification};
pub use coordinator::{Coordinator, PollState, Snapshot};
pub use error::CoreError;

// Re-export the wire-layer domain types consumers render.
pub use waxwing_api::bytes::{format_bytes, parse_bytes};
pub use waxwing_api::{DeviceState, Ssid, Stat};
