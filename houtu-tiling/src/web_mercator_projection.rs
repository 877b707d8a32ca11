use std::f64::consts::{FRAC_PI_2, PI};

use bevy::math::DVec3;

use crate::{
    cartographic::Cartographic, ellipsoid::Ellipsoid, projection::Projection,
    rectangle::Rectangle,
};

/// The map projection used by Google Maps, Bing Maps, and most of ArcGIS Online, EPSG:3857.
///
/// Expects longitude and latitude expressed in WGS84 radians and produces metres. Latitudes
/// are not clamped; the poles project to infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercatorProjection {
    pub ellipsoid: Ellipsoid,
    pub semimajor_axis: f64,
    pub one_over_semimajor_axis: f64,
}
impl Default for WebMercatorProjection {
    fn default() -> Self {
        WebMercatorProjection::from_ellipsoid(&Ellipsoid::WGS84)
    }
}
impl WebMercatorProjection {
    /// The latitude at which the projection is square: `atan(sinh(PI))`, about 85.0511 degrees.
    pub const MAXIMUM_LATITUDE: f64 = 1.4844222297453322;

    pub fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        let semimajor_axis = ellipsoid.semimajor_axis();
        Self {
            ellipsoid: *ellipsoid,
            semimajor_axis,
            one_over_semimajor_axis: 1.0 / semimajor_axis,
        }
    }
}
impl Projection for WebMercatorProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        let semimajor_axis = self.semimajor_axis;
        let x = cartographic.longitude * semimajor_axis;
        let y = geodetic_latitude_to_mercator_angle(cartographic.latitude) * semimajor_axis;
        DVec3::new(x, y, cartographic.height)
    }
    fn un_project(&self, vec: &DVec3) -> Cartographic {
        let one_over_semimajor_axis = self.one_over_semimajor_axis;
        let longitude = vec.x * one_over_semimajor_axis;
        let latitude = mercator_angle_to_geodetic_latitude(vec.y * one_over_semimajor_axis);
        Cartographic::new(longitude, latitude, vec.z)
    }
    fn native_domain(&self) -> Rectangle {
        let semimajor_axis_times_pi = self.semimajor_axis * PI;
        Rectangle::new(
            -semimajor_axis_times_pi,
            -semimajor_axis_times_pi,
            semimajor_axis_times_pi,
            semimajor_axis_times_pi,
        )
    }
}

/// Converts a Mercator angle, in the range -PI to PI, to a geodetic latitude in radians.
pub fn mercator_angle_to_geodetic_latitude(mercator_angle: f64) -> f64 {
    FRAC_PI_2 - 2.0 * (-mercator_angle).exp().atan()
}

/// Converts a geodetic latitude in radians to a Mercator angle.
///
/// Infinite at the poles and NaN beyond them.
pub fn geodetic_latitude_to_mercator_angle(latitude: f64) -> f64 {
    let sin_latitude = latitude.sin();
    0.5 * ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln()
}
