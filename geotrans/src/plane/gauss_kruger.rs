//! Projection de Gauss-Krüger (Mercator transverse, développement en série)
//!
//! Cœur commun aux systèmes 1992 et 2000 : seuls le méridien central,
//! le facteur d'échelle et les constantes additives diffèrent.

use crate::ellipsoid::Ellipsoid;

/// Paramètres d'une zone de projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Méridien central en degrés
    pub lon0: f64,
    /// Facteur d'échelle sur le méridien central
    pub m0: f64,
    /// False northing
    pub x0: f64,
    /// False easting
    pub y0: f64,
}

impl Zone {
    /// Applique l'échelle et les constantes additives aux coordonnées de Gauss-Krüger
    pub fn to_plane(&self, xgk: f64, ygk: f64) -> (f64, f64) {
        (xgk * self.m0 + self.x0, ygk * self.m0 + self.y0)
    }
}

/// Coefficients de la longueur d'arc de méridien
#[derive(Debug, Clone, Copy)]
struct MeridianArc {
    a0: f64,
    a2: f64,
    a4: f64,
    a6: f64,
}

impl MeridianArc {
    fn new(e2: f64) -> Self {
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        Self {
            a0: 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0,
            a2: (3.0 / 8.0) * (e2 + e4 / 4.0 + 15.0 * e6 / 128.0),
            a4: (15.0 / 256.0) * (e4 + 3.0 * e6 / 4.0),
            a6: 35.0 * e6 / 3072.0,
        }
    }

    /// Longueur d'arc de l'équateur à la latitude `lat` (radians)
    fn length(&self, a: f64, lat: f64) -> f64 {
        a * (self.a0 * lat - self.a2 * (2.0 * lat).sin() + self.a4 * (4.0 * lat).sin()
            - self.a6 * (6.0 * lat).sin())
    }
}

/// Coordonnées de Gauss-Krüger (xgk, ygk) d'un point, sans échelle ni translation.
///
/// `lat`, `lon` et `lon0` sont en radians.
pub fn project(ell: &Ellipsoid, lat: f64, lon: f64, lon0: f64) -> (f64, f64) {
    let a = ell.a();
    let e2 = ell.eccentricity_squared();
    let ep2 = ell.second_eccentricity_squared();

    let dl = lon - lon0;
    let dl2 = dl * dl;
    let dl4 = dl2 * dl2;

    let (sin_lat, cos_lat) = lat.sin_cos();
    let cos2 = cos_lat * cos_lat;
    let cos4 = cos2 * cos2;
    let t = lat.tan();
    let t2 = t * t;
    let t4 = t2 * t2;
    let eta2 = ep2 * cos2;
    let n = ell.prime_vertical_radius(lat);

    let sigma = MeridianArc::new(e2).length(a, lat);

    let xgk = sigma
        + (dl2 / 2.0)
            * n
            * sin_lat
            * cos_lat
            * (1.0
                + (dl2 / 12.0) * cos2 * (5.0 - t2 + 9.0 * eta2 + 4.0 * eta2 * eta2)
                + (dl4 / 360.0)
                    * cos4
                    * (61.0 - 58.0 * t2 + t4 + 270.0 * eta2 - 330.0 * eta2 * t2));

    let ygk = dl
        * n
        * cos_lat
        * (1.0
            + (dl2 / 6.0) * cos2 * (1.0 - t2 + eta2)
            + (dl4 / 120.0) * cos4 * (5.0 - 18.0 * t2 + t4 + 14.0 * eta2 - 58.0 * eta2 * t2));

    (xgk, ygk)
}
