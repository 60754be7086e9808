use crate::config::ProjectionOrigin;
use crate::models::{GeoPoint, PlanarPoint};

/// Conversion between geographic and planar coordinates about an origin.
///
/// Implementations must be deterministic and side-effect free. Planar units
/// are metres, matching the distance matrix.
pub trait Projection {
    /// Projects a geographic point onto the plane.
    fn project(&self, geo: GeoPoint, origin: ProjectionOrigin) -> PlanarPoint;

    /// Maps a planar point back to longitude/latitude.
    fn unproject(&self, point: PlanarPoint, origin: ProjectionOrigin) -> GeoPoint;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, geo: GeoPoint, origin: ProjectionOrigin) -> PlanarPoint {
        (**self).project(geo, origin)
    }

    fn unproject(&self, point: PlanarPoint, origin: ProjectionOrigin) -> GeoPoint {
        (**self).unproject(point, origin)
    }
}
