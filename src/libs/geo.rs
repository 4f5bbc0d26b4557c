//! Great-circle distance between GPS coordinates.
//!
//! Uses the haversine formula on a spherical Earth of radius 6371 km and
//! reports the result in statute miles. Coordinates are not validated: values
//! outside the usual latitude/longitude ranges still produce a number, it just
//! has no physical meaning.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles.
pub const KM_TO_MILES: f64 = 0.621371;

/// A point in decimal degrees.
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

/// Haversine distance between two points, in miles.
pub fn distance_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * KM_TO_MILES
}

/// Sum of the distances between every consecutive pair of points.
///
/// Fewer than two points travel nowhere and yield `0.0`.
pub fn path_miles<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a Coordinates>,
{
    let mut points = points.into_iter();
    let Some(mut prev) = points.next() else {
        return 0.0;
    };

    let mut total = 0.0;
    for point in points {
        total += distance_miles(prev, point);
        prev = point;
    }
    total
}
