//! Client-side routing: URL path to view.
//!
//! ```text
//! path ──→ normalize ──→ best match ──→ (redirect?) ──→ Resolved
//!                              │
//!                              └─ no match ──→ fallback route
//! ```

mod error;
mod navigator;
mod resolve;
mod table;

pub use error::RouteError;
pub use navigator::Router;
pub use resolve::{normalize_path, resolve, Resolved};
pub use table::{RouteEntry, RouteTable, RouteTarget};
