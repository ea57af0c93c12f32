//! Systèmes de coordonnées planes polonais
//!
//! - PL-1992 : une zone, méridien central 19°E, m0 = 0.9993
//! - PL-2000 : zones de 3° centrées sur 15°, 18°, 21° et 24°E, m0 = 0.999923
//!
//! Les deux systèmes s'appuient sur le même développement de Gauss-Krüger
//! ([`gauss_kruger::project`]) et ne sont définis que sur GRS80/WGS84.

pub mod gauss_kruger;

use tracing::debug;

pub use gauss_kruger::Zone;

use crate::ellipsoid::Ellipsoid;
use crate::types::{Geodetic, PlaneCoordinate, PlaneSystem};
use crate::GeoError;

/// Zone unique du système 1992
pub const PL1992: Zone = Zone {
    lon0: 19.0,
    m0: 0.9993,
    x0: -5_300_000.0,
    y0: 500_000.0,
};

/// Facteur d'échelle du système 2000
pub const PL2000_SCALE: f64 = 0.999923;

/// Méridien central (degrés) de la zone PL-2000 contenant la longitude `lon_deg`
pub fn pl2000_central_meridian(lon_deg: f64) -> f64 {
    if lon_deg < 16.5 {
        15.0
    } else if lon_deg < 19.5 {
        18.0
    } else if lon_deg < 22.5 {
        21.0
    } else {
        24.0
    }
}

/// Zone PL-2000 et son numéro (5 à 8) pour une longitude en degrés
pub fn pl2000_zone(lon_deg: f64) -> (Zone, u8) {
    let lon0 = pl2000_central_meridian(lon_deg);
    let number = (lon0 / 3.0).round() as u8;
    let zone = Zone {
        lon0,
        m0: PL2000_SCALE,
        x0: 0.0,
        y0: 500_000.0 + f64::from(number) * 1_000_000.0,
    };
    (zone, number)
}

fn ensure_supported(ell: &Ellipsoid, operation: &str) -> Result<(), GeoError> {
    if ell.supports_gauss_kruger() {
        Ok(())
    } else {
        Err(GeoError::unsupported_for(ell.model().name(), operation))
    }
}

/// Projette un point dans une zone quelconque
pub fn project_in_zone(ell: &Ellipsoid, geo: &Geodetic, zone: &Zone) -> Result<(f64, f64), GeoError> {
    GeoError::check_finite(&[geo.lat, geo.lon])?;
    let (xgk, ygk) = gauss_kruger::project(ell, geo.lat, geo.lon, zone.lon0.to_radians());
    Ok(zone.to_plane(xgk, ygk))
}

/// Coordonnées dans le système 1992
pub fn to_pl1992(ell: &Ellipsoid, geo: &Geodetic) -> Result<PlaneCoordinate, GeoError> {
    ensure_supported(ell, "PL-1992 projection")?;
    let (x, y) = project_in_zone(ell, geo, &PL1992)?;
    Ok(PlaneCoordinate {
        x,
        y,
        system: PlaneSystem::Pl1992,
    })
}

/// Coordonnées dans le système 2000 (zone choisie d'après la longitude)
pub fn to_pl2000(ell: &Ellipsoid, geo: &Geodetic) -> Result<PlaneCoordinate, GeoError> {
    ensure_supported(ell, "PL-2000 projection")?;
    let (zone, number) = pl2000_zone(geo.lon_degrees());
    debug!(lon = geo.lon_degrees(), zone = number, "PL-2000 zone selected");
    let (x, y) = project_in_zone(ell, geo, &zone)?;
    Ok(PlaneCoordinate {
        x,
        y,
        system: PlaneSystem::Pl2000 { zone: number },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::Model;

    #[test]
    fn test_zone_boundaries() {
        let cases = [
            (16.4, 15.0),
            (16.5, 18.0),
            (16.6, 18.0),
            (19.4, 18.0),
            (19.6, 21.0),
            (22.4, 21.0),
            (22.5, 24.0),
            (22.6, 24.0),
        ];
        for (lon, expected) in cases {
            assert_eq!(pl2000_central_meridian(lon), expected, "lon={}", lon);
        }
    }

    #[test]
    fn test_zone_numbers() {
        assert_eq!(pl2000_zone(14.2).1, 5);
        assert_eq!(pl2000_zone(17.0).1, 6);
        assert_eq!(pl2000_zone(21.0).1, 7);
        assert_eq!(pl2000_zone(23.9).1, 8);
    }

    #[test]
    fn test_pl1992_central_meridian() {
        let ell = Ellipsoid::new(Model::Grs80);
        let p = to_pl1992(&ell, &Geodetic::from_degrees(52.0, 19.0, 0.0)).unwrap();
        assert!((p.x - 459309.20987740345).abs() < 1e-3, "x={}", p.x);
        assert!((p.y - 500000.0).abs() < 1e-6, "y={}", p.y);
        assert_eq!(p.system, PlaneSystem::Pl1992);
    }

    #[test]
    fn test_pl1992_reference_point() {
        let ell = Ellipsoid::new(Model::Grs80);
        let p = to_pl1992(&ell, &Geodetic::from_degrees(50.25, 20.75, 0.0)).unwrap();
        assert!((p.x - 266221.5124396775).abs() < 1e-3, "x={}", p.x);
        assert!((p.y - 624724.8591778832).abs() < 1e-3, "y={}", p.y);
    }

    #[test]
    fn test_pl2000_reference_point() {
        let ell = Ellipsoid::new(Model::Grs80);
        let p = to_pl2000(&ell, &Geodetic::from_degrees(50.25, 20.75, 0.0)).unwrap();
        assert_eq!(p.system, PlaneSystem::Pl2000 { zone: 7 });
        assert!((p.x - 5568256.02988183).abs() < 1e-3, "x={}", p.x);
        assert!((p.y - 7482170.562457621).abs() < 1e-3, "y={}", p.y);
    }

    #[test]
    fn test_krasowski_rejected() {
        let ell = Ellipsoid::new(Model::Krasowski);
        let geo = Geodetic::from_degrees(52.0, 19.0, 0.0);
        assert!(matches!(to_pl1992(&ell, &geo), Err(GeoError::UnsupportedModel(_))));
        assert!(matches!(to_pl2000(&ell, &geo), Err(GeoError::UnsupportedModel(_))));
    }
}
