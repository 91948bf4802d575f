use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &[&str] = &["api", "login"];
pub const MAP_POINTS_PATH: &[&str] = &["api", "map", "points"];
pub const MAP_POINT_PATH: &[&str] = &["api", "map", "point"];
pub const AGGREGATE_PATH: &[&str] = &["api", "aggregate", "all"];
pub const RESTAURANTS_PATH: &[&str] = &["api", "source", "restaurants", "location"];
pub const EVENTS_PATH: &[&str] = &["api", "source", "events", "location"];

/// Body of `POST /api/login`. Serializes to exactly two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Latitude/longitude pair used by the per-location source endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_has_only_credentials() {
        let body = serde_json::to_value(LoginRequest {
            username: "ada".to_string(),
            password: "s3cret".to_string(),
        })
        .unwrap();

        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["username"], "ada");
        assert_eq!(object["password"], "s3cret");
    }
}
