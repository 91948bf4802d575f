//! Decoder for the map points listing.
//!
//! The service answers `GET /api/map/points` with newline-delimited text,
//! one record per line:
//!
//! ```text
//! id,category,label,latitude,longitude
//! 1,food,Cafe,12.5,-3.25
//! ```
//!
//! Decoding is lazy: [`MapPoints`] owns the body and hands out an iterator
//! that parses one line per step.

use std::str::Lines;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

const FIELD_COUNT: usize = 5;

/// One labeled geographic location from the points listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: i64,
    pub category: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl MapPoint {
    /// Parse one `id,category,label,lat,lon` line.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, ApiError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ApiError::MalformedPoint {
                line: line_no,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }

        let id = fields[0]
            .trim()
            .parse::<i64>()
            .map_err(|e| malformed(line_no, "id", fields[0], e))?;
        let latitude = fields[3]
            .trim()
            .parse::<f64>()
            .map_err(|e| malformed(line_no, "latitude", fields[3], e))?;
        let longitude = fields[4]
            .trim()
            .parse::<f64>()
            .map_err(|e| malformed(line_no, "longitude", fields[4], e))?;

        Ok(Self {
            id,
            category: fields[1].to_string(),
            label: fields[2].to_string(),
            latitude,
            longitude,
        })
    }
}

fn malformed(line: usize, field: &str, raw: &str, err: impl std::fmt::Display) -> ApiError {
    ApiError::MalformedPoint {
        line,
        reason: format!("invalid {} '{}': {}", field, raw, err),
    }
}

/// Undecoded points body. Iterate it to get [`MapPoint`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPoints {
    body: String,
}

impl MapPoints {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Raw response text as received.
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Lazily decode the records, one line per step.
    pub fn iter(&self) -> PointsIter<'_> {
        PointsIter {
            lines: self.body.lines(),
            line_no: 0,
        }
    }

    /// Decode every record, failing on the first malformed line.
    pub fn collect_all(&self) -> Result<Vec<MapPoint>, ApiError> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a MapPoints {
    type Item = Result<MapPoint, ApiError>;
    type IntoIter = PointsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`MapPoints`] body.
///
/// Blank lines are skipped. Line numbers in errors count every physical line.
pub struct PointsIter<'a> {
    lines: Lines<'a>,
    line_no: usize,
}

impl Iterator for PointsIter<'_> {
    type Item = Result<MapPoint, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(MapPoint::parse_line(line, self.line_no));
        }
    }
}
