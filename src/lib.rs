pub mod bridge;
pub mod config;
pub mod dl;
pub mod error;

pub use bridge::{fetch_listing, NativeListingBridge};
pub use config::BridgeConfig;
pub use error::{Error, ErrorKind, Result, Stage};
