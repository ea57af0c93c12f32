//! Cartésien géocentrique → topocentrique nord/est/haut (NEU)

use nalgebra::{Matrix3, Vector3};

use crate::ellipsoid::Ellipsoid;
use crate::hirvonen::{cartesian_to_geodetic, LongitudeMode};
use crate::types::{Cartesian, Topocentric};
use crate::GeoError;

/// Matrice de rotation dont les colonnes sont les vecteurs nord, est et haut
/// exprimés dans le repère géocentrique.
pub fn neu_rotation(lat: f64, lon: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    #[rustfmt::skip]
    let r = Matrix3::new(
        -sin_lat * cos_lon, -sin_lon, cos_lat * cos_lon,
        -sin_lat * sin_lon,  cos_lon, cos_lat * sin_lon,
         cos_lat,            0.0,     sin_lat,
    );
    r
}

/// Coordonnées NEU de `station` par rapport à `origin`.
///
/// La rotation est construite à partir de la latitude/longitude de la station.
pub fn cartesian_to_topocentric(
    ell: &Ellipsoid,
    station: Cartesian,
    origin: Cartesian,
    mode: LongitudeMode,
) -> Result<Topocentric, GeoError> {
    GeoError::check_finite(&origin.to_array())?;
    let geo = cartesian_to_geodetic(ell, station, mode)?;

    let r = neu_rotation(geo.lat, geo.lon);
    let delta = Vector3::from(station.to_array()) - Vector3::from(origin.to_array());
    let neu = r.transpose() * delta;

    Ok(Topocentric::new(neu.x, neu.y, neu.z))
}
