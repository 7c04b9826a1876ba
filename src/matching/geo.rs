use crate::Location;

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two coordinates, rounded to the nearest
/// whole mile (ranking never needs finer granularity).
///
/// Coordinates are taken as-is: out-of-range values produce a well-defined
/// but meaningless distance, which is an upstream data-quality concern, not
/// a failure mode here.
pub fn distance_miles(a: &Location, b: &Location) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().asin();

    (EARTH_RADIUS_MILES * central_angle).round()
}
