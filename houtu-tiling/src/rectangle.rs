use std::f64::consts::{FRAC_PI_2, PI};

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    cartographic::Cartographic,
    ellipsoid::Ellipsoid,
    math::{equals_epsilon, EPSILON14},
};

/// A two dimensional region given by its `west`, `south`, `east` and `north` bounds.
///
/// Geodetic rectangles are in radians; native rectangles are in whatever unit the
/// projection produces. Rectangles never wrap: `west <= east` and `south <= north`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}
impl Rectangle {
    /// The largest possible geodetic rectangle.
    pub const MAX_VALUE: Rectangle = Rectangle {
        west: -PI,
        south: -FRAC_PI_2,
        east: PI,
        north: FRAC_PI_2,
    };
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
        }
    }
    pub fn compute_width(&self) -> f64 {
        self.east - self.west
    }
    pub fn compute_height(&self) -> f64 {
        self.north - self.south
    }
    pub fn is_finite(&self) -> bool {
        self.west.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.north.is_finite()
    }
    /// Non-empty in both directions and finite.
    pub fn is_non_degenerate(&self) -> bool {
        self.is_finite() && self.west < self.east && self.south < self.north
    }
    /// Whether the rectangle is an ordered geodetic rectangle inside `MAX_VALUE`.
    pub fn validate(&self) -> bool {
        (-FRAC_PI_2..=FRAC_PI_2).contains(&self.north)
            && (-FRAC_PI_2..=FRAC_PI_2).contains(&self.south)
            && (-PI..=PI).contains(&self.west)
            && (-PI..=PI).contains(&self.east)
            && self.south <= self.north
            && self.west <= self.east
    }
    pub fn south_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.south, 0.0)
    }
    pub fn north_west(&self) -> Cartographic {
        Cartographic::new(self.west, self.north, 0.0)
    }
    pub fn south_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.south, 0.0)
    }
    pub fn north_east(&self) -> Cartographic {
        Cartographic::new(self.east, self.north, 0.0)
    }
    pub fn center(&self) -> Cartographic {
        Cartographic::new(
            (self.west + self.east) * 0.5,
            (self.south + self.north) * 0.5,
            0.0,
        )
    }
    /// Inclusive on every edge; longitudes within `EPSILON14` of an edge count as inside.
    pub fn contains(&self, cartographic: &Cartographic) -> bool {
        let longitude = cartographic.longitude;
        let latitude = cartographic.latitude;
        (longitude > self.west || equals_epsilon(longitude, self.west, Some(EPSILON14), None))
            && (longitude < self.east || equals_epsilon(longitude, self.east, Some(EPSILON14), None))
            && latitude >= self.south
            && latitude <= self.north
    }
    pub fn equals_epsilon(&self, right: &Rectangle, absolute_epsilon: f64) -> bool {
        self == right
            || (self.west - right.west).abs() <= absolute_epsilon
                && (self.south - right.south).abs() <= absolute_epsilon
                && (self.east - right.east).abs() <= absolute_epsilon
                && (self.north - right.north).abs() <= absolute_epsilon
    }
    /// Samples the rectangle on the surface of `ellipsoid` raised by `surface_height`: the
    /// four corners, then the latitude closest to the equator at every quarter turn of
    /// longitude inside the rectangle, then that latitude at the west and east edges when it
    /// is the equator.
    pub fn subsample(&self, ellipsoid: &Ellipsoid, surface_height: f64) -> Vec<DVec3> {
        let mut result = Vec::with_capacity(13);
        let mut lla = Cartographic::new(self.west, self.north, surface_height);
        result.push(ellipsoid.cartographic_to_cartesian(&lla));
        lla.longitude = self.east;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));
        lla.latitude = self.south;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));
        lla.longitude = self.west;
        result.push(ellipsoid.cartographic_to_cartesian(&lla));

        lla.latitude = if self.north < 0.0 {
            self.north
        } else if self.south > 0.0 {
            self.south
        } else {
            0.0
        };
        for i in 1..8 {
            lla.longitude = -PI + i as f64 * FRAC_PI_2;
            if self.contains(&lla) {
                result.push(ellipsoid.cartographic_to_cartesian(&lla));
            }
        }
        if lla.latitude == 0.0 {
            lla.longitude = self.west;
            result.push(ellipsoid.cartographic_to_cartesian(&lla));
            lla.longitude = self.east;
            result.push(ellipsoid.cartographic_to_cartesian(&lla));
        }
        result
    }
}
