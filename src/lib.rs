//! Native client layer for the letsmeet map and location browser.
//!
//! ```text
//! Application ──→ Store ◀── views ──→ ApiClient ──→ letsmeet service
//!      │                      ▲
//!      └──→ Router ───────────┘ (active route selects the view)
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod router;
pub mod store;
pub mod views;
