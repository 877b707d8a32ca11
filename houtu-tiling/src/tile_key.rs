use std::fmt;

use bevy::{math::UVec3, prelude::Component};
use serde::{Deserialize, Serialize};

use crate::error::TilingError;

/// The address of a tile: `x` grows eastward from the west edge, `y` grows southward from
/// the north edge.
#[derive(
    Default,
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Component,
    Serialize,
    Deserialize,
)]
pub struct TileKey {
    pub x: u32,
    pub y: u32,
    pub level: u32,
}
impl TileKey {
    pub fn new(x: u32, y: u32, level: u32) -> Self {
        Self { x, y, level }
    }

    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.x, self.y, self.level)
    }
    pub fn southwest(&self) -> Result<TileKey, TilingError> {
        self.child(0, 1)
    }
    pub fn southeast(&self) -> Result<TileKey, TilingError> {
        self.child(1, 1)
    }
    pub fn northwest(&self) -> Result<TileKey, TilingError> {
        self.child(0, 0)
    }
    pub fn northeast(&self) -> Result<TileKey, TilingError> {
        self.child(1, 0)
    }
    /// Northwest, northeast, southwest, southeast.
    ///
    /// Fails when the child addresses no longer fit in a `u32`.
    pub fn children(&self) -> Result<[TileKey; 4], TilingError> {
        Ok([
            self.northwest()?,
            self.northeast()?,
            self.southwest()?,
            self.southeast()?,
        ])
    }
    fn child(&self, x_offset: u32, y_offset: u32) -> Result<TileKey, TilingError> {
        let level = self.level.checked_add(1);
        let out_of_range = TilingError::LevelOutOfRange {
            level: self.level.saturating_add(1),
        };
        let x = self.x.checked_mul(2).and_then(|x| x.checked_add(x_offset));
        let y = self.y.checked_mul(2).and_then(|y| y.checked_add(y_offset));
        match (x, y, level) {
            (Some(x), Some(y), Some(level)) => Ok(TileKey { x, y, level }),
            _ => Err(out_of_range),
        }
    }
    pub fn parent(&self) -> Option<TileKey> {
        if self.level == 0 {
            return None;
        }
        Some(TileKey {
            x: self.x / 2,
            y: self.y / 2,
            level: self.level - 1,
        })
    }
}
impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl From<TileKey> for UVec3 {
    fn from(key: TileKey) -> Self {
        UVec3::new(key.x, key.y, key.level)
    }
}

impl From<&TileKey> for UVec3 {
    fn from(key: &TileKey) -> Self {
        UVec3::new(key.x, key.y, key.level)
    }
}

impl From<UVec3> for TileKey {
    fn from(v: UVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            level: v.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_one_level_deeper() {
        let key = TileKey::new(3, 1, 2);
        let [nw, ne, sw, se] = key.children().unwrap();
        assert_eq!(nw, TileKey::new(6, 2, 3));
        assert_eq!(ne, TileKey::new(7, 2, 3));
        assert_eq!(sw, TileKey::new(6, 3, 3));
        assert_eq!(se, TileKey::new(7, 3, 3));
    }

    #[test]
    fn parent_of_children_is_self() {
        let key = TileKey::new(5, 4, 7);
        for child in key.children().unwrap() {
            assert_eq!(child.parent(), Some(key));
        }
        assert_eq!(TileKey::new(1, 0, 0).parent(), None);
    }

    #[test]
    fn children_past_the_addressable_range_are_out_of_range() {
        let widest = TileKey::new(3 * (1 << 30) - 1, 0, 30);
        assert_eq!(
            widest.children(),
            Err(TilingError::LevelOutOfRange { level: 31 })
        );
        assert!(widest.northwest().is_err());
        assert_eq!(
            TileKey::new(0, 0, 30).northwest(),
            Ok(TileKey::new(0, 0, 31))
        );
        let deepest = TileKey::new(0, 0, u32::MAX);
        assert_eq!(
            deepest.southeast().unwrap_err().kind(),
            crate::error::ErrorKind::OutOfRange
        );
    }

    #[test]
    fn id_and_display() {
        let key = TileKey::new(1, 2, 3);
        assert_eq!(key.id(), "1_2_3");
        assert_eq!(key.to_string(), "1_2_3");
    }

    #[test]
    fn uvec3_conversion() {
        let key = TileKey::new(1, 2, 3);
        let v: UVec3 = key.into();
        assert_eq!(v, UVec3::new(1, 2, 3));
        assert_eq!(TileKey::from(v), key);
    }
}
