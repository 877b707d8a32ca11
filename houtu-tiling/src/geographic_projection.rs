use std::f64::consts::{FRAC_PI_2, PI};

use bevy::math::DVec3;

use crate::{
    cartographic::Cartographic, ellipsoid::Ellipsoid, projection::Projection,
    rectangle::Rectangle,
};

/// A simple map projection where longitude and latitude are linearly mapped to X and Y by
/// multiplying them by the semi-major axis of the ellipsoid.
///
/// This is commonly known as geographic, equirectangular or plate carrée.
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicProjection {
    pub ellipsoid: Ellipsoid,
    pub semimajor_axis: f64,
    pub one_over_semimajor_axis: f64,
}
impl Default for GeographicProjection {
    fn default() -> Self {
        GeographicProjection::from_ellipsoid(&Ellipsoid::WGS84)
    }
}
impl GeographicProjection {
    pub fn from_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        let semimajor_axis = ellipsoid.semimajor_axis();
        Self {
            ellipsoid: *ellipsoid,
            semimajor_axis,
            one_over_semimajor_axis: 1.0 / semimajor_axis,
        }
    }
}
impl Projection for GeographicProjection {
    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
    fn project(&self, cartographic: &Cartographic) -> DVec3 {
        let semimajor_axis = self.semimajor_axis;
        let x = cartographic.longitude * semimajor_axis;
        let y = cartographic.latitude * semimajor_axis;
        DVec3::new(x, y, cartographic.height)
    }
    fn un_project(&self, vec: &DVec3) -> Cartographic {
        let one_over_semimajor_axis = self.one_over_semimajor_axis;
        let longitude = vec.x * one_over_semimajor_axis;
        let latitude = vec.y * one_over_semimajor_axis;
        Cartographic::new(longitude, latitude, vec.z)
    }
    fn native_domain(&self) -> Rectangle {
        let a = self.semimajor_axis;
        Rectangle::new(-PI * a, -FRAC_PI_2 * a, PI * a, FRAC_PI_2 * a)
    }
}
