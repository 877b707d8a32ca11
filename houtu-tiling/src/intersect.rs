use serde::{Deserialize, Serialize};

use crate::error::TilingError;

/// Where an object lies relative to a culling volume.
///
/// The discriminants are part of the contract: more negative means further outside, so
/// combining two results is their minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Intersect {
    /// Not contained within the volume.
    Outside = -1,
    /// Crosses one of the volume's planes.
    Intersecting = 0,
    /// Fully within the volume.
    Inside = 1,
}
impl Intersect {
    pub const fn value(self) -> i8 {
        self as i8
    }
    /// The least-inside of the two results.
    pub fn combine(self, other: Intersect) -> Intersect {
        self.min(other)
    }
}
impl From<Intersect> for i8 {
    fn from(intersect: Intersect) -> Self {
        intersect.value()
    }
}
impl TryFrom<i8> for Intersect {
    type Error = TilingError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Intersect::Outside),
            0 => Ok(Intersect::Intersecting),
            1 => Ok(Intersect::Inside),
            other => Err(TilingError::InvalidIntersect(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_fixed() {
        assert_eq!(Intersect::Outside.value(), -1);
        assert_eq!(Intersect::Intersecting.value(), 0);
        assert_eq!(Intersect::Inside.value(), 1);
        assert_eq!(Intersect::Outside as i8, -1);
    }

    #[test]
    fn ordering_follows_values() {
        assert!(Intersect::Outside < Intersect::Intersecting);
        assert!(Intersect::Intersecting < Intersect::Inside);
        assert_eq!(
            [Intersect::Inside, Intersect::Outside, Intersect::Intersecting]
                .into_iter()
                .min(),
            Some(Intersect::Outside)
        );
    }

    #[test]
    fn combine_takes_the_worst() {
        assert_eq!(
            Intersect::Inside.combine(Intersect::Intersecting),
            Intersect::Intersecting
        );
        assert_eq!(
            Intersect::Intersecting.combine(Intersect::Outside),
            Intersect::Outside
        );
        assert_eq!(Intersect::Inside.combine(Intersect::Inside), Intersect::Inside);
    }

    #[test]
    fn try_from_rejects_unknown() {
        assert_eq!(Intersect::try_from(-1), Ok(Intersect::Outside));
        assert_eq!(Intersect::try_from(1), Ok(Intersect::Inside));
        assert_eq!(
            Intersect::try_from(2),
            Err(TilingError::InvalidIntersect(2))
        );
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Intersect::Outside).unwrap(), "-1");
        assert_eq!(
            serde_json::from_str::<Intersect>("0").unwrap(),
            Intersect::Intersecting
        );
        assert!(serde_json::from_str::<Intersect>("5").is_err());
    }
}
