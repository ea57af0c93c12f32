//! Cartésien géocentrique → géodésique (algorithme de Hirvonen)
//!
//! Processus itératif sur la latitude : 3 à 5 itérations suffisent
//! pour une précision sub-millimétrique.

use tracing::trace;

use crate::ellipsoid::Ellipsoid;
use crate::types::{Cartesian, Geodetic};
use crate::GeoError;

/// Seuil de convergence : 0.000001" exprimé en radians
pub const TOLERANCE: f64 = 0.000001 / 206265.0;

/// Nombre maximal d'itérations avant d'abandonner
pub const MAX_ITERATIONS: usize = 100;

/// Calcul de la longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongitudeMode {
    /// `atan(Y/X)` : résultat dans ]-90°, 90°[, exige X ≠ 0.
    /// Faux pour les points où X < 0 (hémisphère opposé au méridien origine).
    #[default]
    SingleQuadrant,
    /// `atan2(Y, X)` : résultat dans ]-180°, 180°]
    FourQuadrant,
}

/// Convertit des coordonnées cartésiennes en coordonnées géodésiques (radians, mètres)
pub fn cartesian_to_geodetic(
    ell: &Ellipsoid,
    xyz: Cartesian,
    mode: LongitudeMode,
) -> Result<Geodetic, GeoError> {
    let Cartesian { x, y, z } = xyz;
    GeoError::check_finite(&[x, y, z])?;

    if mode == LongitudeMode::SingleQuadrant && x == 0.0 {
        return Err(GeoError::DegenerateInput(
            "X = 0: longitude atan(Y/X) is undefined".to_string(),
        ));
    }

    let e2 = ell.eccentricity_squared();

    // Rayon dans le plan équatorial
    let r = x.hypot(y);
    if r == 0.0 {
        return Err(GeoError::DegenerateInput(
            "point on the polar axis (X = Y = 0)".to_string(),
        ));
    }

    // Première approximation
    let mut lat_prev = (z / (r * (1.0 - e2))).atan();
    let mut lat = 0.0_f64;
    let mut iterations = 0;

    while (lat_prev - lat).abs() > TOLERANCE {
        if iterations == MAX_ITERATIONS {
            return Err(GeoError::ConvergenceFailure {
                iterations,
                delta: (lat_prev - lat).abs(),
            });
        }
        lat_prev = lat;
        let n = ell.prime_vertical_radius(lat_prev);
        let h = r / lat_prev.cos() - n;
        lat = ((z / r) * (1.0 - e2 * n / (n + h)).recip()).atan();
        iterations += 1;
    }

    let n = ell.prime_vertical_radius(lat);
    let h = r / lat.cos() - n;

    let lon = match mode {
        LongitudeMode::SingleQuadrant => (y / x).atan(),
        LongitudeMode::FourQuadrant => y.atan2(x),
    };

    trace!(iterations, lat, lon, h, "Hirvonen converged");

    Ok(Geodetic::new(lat, lon, h))
}
