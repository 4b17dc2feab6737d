//! # State Module
//!
//! Per-session and per-process state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐              ┌──────────────────┐                │
//! │  │    CartState     │              │   StoreConfig    │                │
//! │  │                  │              │                  │                │
//! │  │  Arc<Mutex<      │              │  store_name      │                │
//! │  │    CartStore     │              │  delivery fee    │                │
//! │  │  >>              │              │  catalog path    │                │
//! │  └──────────────────┘              └──────────────────┘                │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • StoreConfig: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::{ConfigError, ConfigResult, StoreConfig};
