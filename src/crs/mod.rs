pub mod cheap_ruler;
mod frame;
pub mod transform;

pub use cheap_ruler::{cheap_ruler_k, CheapRuler, PointOnLine, Unit};
pub(crate) use frame::LocalView;
pub use frame::EnuFrame;
pub use transform::{
    apply_transform, apply_transform_inplace, ecef2enu, ecef2lla, ecef2lla_batch, enu2ecef,
    enu2lla, lla2ecef, lla2ecef_batch, lla2enu, r_ecef_enu, t_ecef_enu, t_ecef_enu_at, Datum,
    DEFAULT_BATCH_SIZE,
};

/// Coordinate system of a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    /// Cartesian `(x, y, z)` in a consistent linear unit.
    #[default]
    Planar,
    /// Geodetic `(lon, lat, alt)` in degrees and meters on WGS84.
    Wgs84,
}

impl CoordinateMode {
    #[must_use]
    pub fn is_wgs84(self) -> bool {
        self == CoordinateMode::Wgs84
    }
}

impl From<bool> for CoordinateMode {
    fn from(is_wgs84: bool) -> Self {
        if is_wgs84 {
            CoordinateMode::Wgs84
        } else {
            CoordinateMode::Planar
        }
    }
}

/// How geodetic points are mapped into a local East-North-Up frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnuMethod {
    /// Per-latitude linear scale factors ([`CheapRuler`]). Fast; accurate for
    /// spans up to tens of kilometers.
    #[default]
    CheapRuler,
    /// Rotation through ECEF on the WGS84 ellipsoid.
    Exact,
}
