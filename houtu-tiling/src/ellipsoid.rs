use bevy::{math::DVec3, prelude::Resource};

use crate::{
    cartographic::Cartographic,
    math::{EPSILON1, EPSILON12, EPSILON14, LUNAR_RADIUS},
};

/// A quadratic surface defined in Cartesian coordinates by `(x / a)^2 + (y / b)^2 + (z / c)^2 = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct Ellipsoid {
    pub radii: DVec3,
    pub radii_squared: DVec3,
    pub radii_to_the_fourth: DVec3,
    pub one_over_radii: DVec3,
    pub one_over_radii_squared: DVec3,
    pub minimum_radius: f64,
    pub maximum_radius: f64,
    pub center_tolerance_squared: f64,
}
impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}
impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::new(6378137.0, 6378137.0, 6356752.3142451793);
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
    pub const MOON: Ellipsoid = Ellipsoid::new(LUNAR_RADIUS, LUNAR_RADIUS, LUNAR_RADIUS);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        let minimum_radius = min3(x, y, z);
        let maximum_radius = max3(x, y, z);
        Self {
            radii: DVec3::new(x, y, z),
            radii_squared: DVec3::new(x * x, y * y, z * z),
            radii_to_the_fourth: DVec3::new(x * x * x * x, y * y * y * y, z * z * z * z),
            one_over_radii: DVec3::new(1.0 / x, 1.0 / y, 1.0 / z),
            one_over_radii_squared: DVec3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
            minimum_radius,
            maximum_radius,
            center_tolerance_squared: EPSILON1,
        }
    }
    pub fn from_vec3(radii: DVec3) -> Self {
        Ellipsoid::new(radii.x, radii.y, radii.z)
    }
    /// Every radius must be finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.radii.is_finite() && self.minimum_radius > 0.0
    }
    pub fn semimajor_axis(&self) -> f64 {
        self.radii.x
    }
    pub fn semiminor_axis(&self) -> f64 {
        self.radii.z
    }
    /// Scales each axis by the reciprocal radius, mapping the ellipsoid onto the unit sphere.
    pub fn transform_position_to_scaled_space(&self, position: &DVec3) -> DVec3 {
        *position * self.one_over_radii
    }
    pub fn transform_position_from_scaled_space(&self, position: &DVec3) -> DVec3 {
        *position * self.radii
    }
    pub fn geodetic_surface_normal_cartographic(&self, cartographic: &Cartographic) -> DVec3 {
        let cos_latitude = cartographic.latitude.cos();
        let x = cos_latitude * cartographic.longitude.cos();
        let y = cos_latitude * cartographic.longitude.sin();
        let z = cartographic.latitude.sin();
        DVec3::new(x, y, z).normalize()
    }
    /// `None` when `cartesian` is at the centre of the ellipsoid.
    pub fn geodetic_surface_normal(&self, cartesian: &DVec3) -> Option<DVec3> {
        if cartesian.abs_diff_eq(DVec3::ZERO, EPSILON14) {
            return None;
        }
        Some((*cartesian * self.one_over_radii_squared).normalize())
    }
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> DVec3 {
        let n = self.geodetic_surface_normal_cartographic(cartographic);
        let mut k = self.radii_squared * n;
        let gamma = n.dot(k).sqrt();
        k /= gamma;
        k + n * cartographic.height
    }
    /// Scales `cartesian` along the geodetic surface normal so that it lies on the surface.
    ///
    /// Returns `None` for positions too close to the centre to have a well defined normal.
    pub fn scale_to_geodetic_surface(&self, cartesian: &DVec3) -> Option<DVec3> {
        let one_over_radii = self.one_over_radii;
        let one_over_radii_squared = self.one_over_radii_squared;

        let x2 = cartesian.x * cartesian.x * one_over_radii.x * one_over_radii.x;
        let y2 = cartesian.y * cartesian.y * one_over_radii.y * one_over_radii.y;
        let z2 = cartesian.z * cartesian.z * one_over_radii.z * one_over_radii.z;

        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();
        let intersection = *cartesian * ratio;

        if squared_norm < self.center_tolerance_squared {
            return if ratio.is_finite() {
                Some(intersection)
            } else {
                None
            };
        }

        let gradient = intersection * one_over_radii_squared * 2.0;
        let mut lambda = ((1.0 - ratio) * cartesian.length()) / (0.5 * gradient.length());
        let mut correction = 0.0;

        let mut multiplier;
        loop {
            lambda -= correction;
            multiplier = DVec3::new(
                1.0 / (1.0 + lambda * one_over_radii_squared.x),
                1.0 / (1.0 + lambda * one_over_radii_squared.y),
                1.0 / (1.0 + lambda * one_over_radii_squared.z),
            );
            let multiplier2 = multiplier * multiplier;
            let multiplier3 = multiplier2 * multiplier;

            let func = x2 * multiplier2.x + y2 * multiplier2.y + z2 * multiplier2.z - 1.0;
            let denominator = x2 * multiplier3.x * one_over_radii_squared.x
                + y2 * multiplier3.y * one_over_radii_squared.y
                + z2 * multiplier3.z * one_over_radii_squared.z;
            let derivative = -2.0 * denominator;
            correction = func / derivative;

            if !func.is_finite() {
                return None;
            }
            if func.abs() <= EPSILON12 {
                break;
            }
        }
        Some(*cartesian * multiplier)
    }
    pub fn cartesian_to_cartographic(&self, cartesian: &DVec3) -> Option<Cartographic> {
        let p = self.scale_to_geodetic_surface(cartesian)?;
        let n = self.geodetic_surface_normal(&p)?;
        let h = *cartesian - p;
        let longitude = n.y.atan2(n.x);
        let latitude = n.z.asin();
        let height = h.dot(*cartesian).signum() * h.length();
        Some(Cartographic::new(longitude, latitude, height))
    }
}

const fn min3(x: f64, y: f64, z: f64) -> f64 {
    let m = if x < y { x } else { y };
    if m < z {
        m
    } else {
        z
    }
}
const fn max3(x: f64, y: f64, z: f64) -> f64 {
    let m = if x > y { x } else { y };
    if m > z {
        m
    } else {
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{equals_epsilon, EPSILON6, EPSILON7};

    const SPACE_CARTESIAN: DVec3 =
        DVec3::new(4582719.8827300891, -4582719.8827300882, 1725510.4250797231);

    fn space_cartographic() -> Cartographic {
        Cartographic::from_degrees(-45.0, 15.0, 330000.0)
    }

    #[test]
    fn derived_radii() {
        let ellipsoid = Ellipsoid::new(1.0, 2.0, 3.0);
        assert_eq!(ellipsoid.radii_squared, DVec3::new(1.0, 4.0, 9.0));
        assert_eq!(ellipsoid.one_over_radii, DVec3::new(1.0, 0.5, 1.0 / 3.0));
        assert_eq!(ellipsoid.minimum_radius, 1.0);
        assert_eq!(ellipsoid.maximum_radius, 3.0);
        assert!(ellipsoid.is_valid());
        assert!(!Ellipsoid::new(0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn cartographic_to_cartesian_works() {
        let ellipsoid = Ellipsoid::WGS84;
        let actual = ellipsoid.cartographic_to_cartesian(&space_cartographic());
        assert!(equals_epsilon(actual.x, SPACE_CARTESIAN.x, Some(EPSILON7), None));
        assert!(equals_epsilon(actual.y, SPACE_CARTESIAN.y, Some(EPSILON7), None));
        assert!(equals_epsilon(actual.z, SPACE_CARTESIAN.z, Some(EPSILON7), None));
    }

    #[test]
    fn cartesian_to_cartographic_works() {
        let ellipsoid = Ellipsoid::WGS84;
        let actual = ellipsoid.cartesian_to_cartographic(&SPACE_CARTESIAN).unwrap();
        let expected = space_cartographic();
        assert!(equals_epsilon(actual.longitude, expected.longitude, Some(EPSILON6), None));
        assert!(equals_epsilon(actual.latitude, expected.latitude, Some(EPSILON6), None));
        assert!(equals_epsilon(actual.height, expected.height, Some(EPSILON6), None));
    }

    #[test]
    fn cartesian_to_cartographic_at_center_is_none() {
        assert!(Ellipsoid::WGS84
            .cartesian_to_cartographic(&DVec3::ZERO)
            .is_none());
    }

    #[test]
    fn scale_to_geodetic_surface_on_surface_is_identity() {
        let ellipsoid = Ellipsoid::WGS84;
        let surface = DVec3::new(6378137.0, 0.0, 0.0);
        let scaled = ellipsoid.scale_to_geodetic_surface(&surface).unwrap();
        assert!(scaled.abs_diff_eq(surface, EPSILON6));
    }

    #[test]
    fn scaled_space_round_trip() {
        let ellipsoid = Ellipsoid::new(2.0, 4.0, 8.0);
        let position = DVec3::new(1.0, -2.0, 16.0);
        let scaled = ellipsoid.transform_position_to_scaled_space(&position);
        assert_eq!(scaled, DVec3::new(0.5, -0.5, 2.0));
        assert_eq!(
            ellipsoid.transform_position_from_scaled_space(&scaled),
            position
        );
    }
}
