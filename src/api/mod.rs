//! Outbound calls to the letsmeet service.
//!
//! Three core calls (`map_points`, `retrieve_point`, `login`) plus the
//! per-location lookups used by the location tabs.

mod client;
mod error;
mod points;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, FailureKind};
pub use points::{MapPoint, MapPoints, PointsIter};
pub use types::{Coordinates, LoginRequest};
