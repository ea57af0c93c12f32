//! Géodésique → cartésien géocentrique (forme fermée)

use crate::ellipsoid::Ellipsoid;
use crate::types::{Cartesian, Geodetic};
use crate::GeoError;

/// Convertit des coordonnées géodésiques (radians, mètres) en cartésiennes
pub fn geodetic_to_cartesian(ell: &Ellipsoid, geo: Geodetic) -> Result<Cartesian, GeoError> {
    GeoError::check_finite(&[geo.lat, geo.lon, geo.h])?;

    let e2 = ell.eccentricity_squared();
    let (sin_lat, cos_lat) = geo.lat.sin_cos();
    let (sin_lon, cos_lon) = geo.lon.sin_cos();

    let rn = ell.prime_vertical_radius(geo.lat);
    let q = rn * e2 * sin_lat;

    Ok(Cartesian::new(
        (rn + geo.h) * cos_lat * cos_lon,
        (rn + geo.h) * cos_lat * sin_lon,
        (rn + geo.h) * sin_lat - q,
    ))
}
