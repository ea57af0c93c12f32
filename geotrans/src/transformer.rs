//! Transformation d'un enregistrement selon l'opération demandée
//!
//! [`Transformer`] lie un ellipsoïde à des options et applique une
//! [`Operation`] à une ligne de valeurs déjà parsées. Il est immuable et
//! peut être partagé entre threads (traitement par lots avec rayon).

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::angle::{AngleFormat, Dms};
use crate::ellipsoid::Ellipsoid;
use crate::hirvonen::{cartesian_to_geodetic, LongitudeMode};
use crate::types::{Cartesian, Geodetic, PlaneCoordinate, Topocentric};
use crate::{geocentric, plane, topocentric, GeoError};

/// Options de transformation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Calcul de la longitude dans Hirvonen
    pub longitude_mode: LongitudeMode,
    /// Format des angles en sortie de xyz2plh
    pub angle_format: AngleFormat,
}

/// Opération de conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// X, Y, Z → φ, λ, h
    XyzToPlh,
    /// φ, λ, h → X, Y, Z
    PlhToXyz,
    /// φ, λ → x, y (PL-1992)
    Pl1992,
    /// φ, λ → x, y (PL-2000)
    Pl2000,
    /// X, Y, Z → n, e, u par rapport à une origine
    XyzToNeu { origin: Cartesian },
}

impl Operation {
    /// Nom court (utilisé pour les fichiers de sortie)
    pub fn name(&self) -> &'static str {
        match self {
            Operation::XyzToPlh => "xyz2plh",
            Operation::PlhToXyz => "plh2xyz",
            Operation::Pl1992 => "pl1992",
            Operation::Pl2000 => "pl2000",
            Operation::XyzToNeu { .. } => "xyz2neu",
        }
    }

    /// Nombre de champs attendus en entrée (min, max)
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Operation::Pl1992 | Operation::Pl2000 => (2, 3),
            _ => (3, 3),
        }
    }

    /// Indices des champs angulaires (acceptant le format DMS en entrée)
    pub fn angle_fields(&self) -> &'static [usize] {
        match self {
            Operation::PlhToXyz | Operation::Pl1992 | Operation::Pl2000 => &[0, 1],
            Operation::XyzToPlh | Operation::XyzToNeu { .. } => &[],
        }
    }

    /// Ligne d'en-tête du fichier résultat
    pub fn header(&self) -> &'static str {
        match self {
            Operation::XyzToPlh => "phi[deg], lam[deg], h[m]",
            Operation::PlhToXyz => "x[m], y[m], z[m]",
            Operation::Pl1992 | Operation::Pl2000 => "x[m], y[m]",
            Operation::XyzToNeu { .. } => "n[m], e[m], u[m]",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Résultat d'une transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Output {
    Geodetic { coords: Geodetic, format: AngleFormat },
    Cartesian(Cartesian),
    Plane(PlaneCoordinate),
    Topocentric(Topocentric),
}

impl Output {
    /// Champs formatés pour l'écriture (ordre des colonnes de l'en-tête)
    pub fn fields(&self) -> Vec<String> {
        match self {
            Output::Geodetic { coords, format } => {
                let (lat, lon) = match format {
                    AngleFormat::DecimalDegrees => (
                        coords.lat_degrees().to_string(),
                        coords.lon_degrees().to_string(),
                    ),
                    AngleFormat::Dms => (
                        Dms::from_degrees(coords.lat_degrees()).to_string(),
                        Dms::from_degrees(coords.lon_degrees()).to_string(),
                    ),
                };
                vec![lat, lon, format!("{:.3}", coords.h)]
            }
            Output::Cartesian(c) => vec![metres(c.x), metres(c.y), metres(c.z)],
            Output::Plane(p) => vec![metres(p.x), metres(p.y)],
            Output::Topocentric(t) => vec![metres(t.n), metres(t.e), metres(t.u)],
        }
    }
}

fn metres(v: f64) -> String {
    format!("{:11.3}", v)
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(","))
    }
}

/// Transformateur lié à un ellipsoïde
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    ellipsoid: Ellipsoid,
    options: Options,
}

impl Transformer {
    pub fn new(ellipsoid: Ellipsoid, options: Options) -> Self {
        Self { ellipsoid, options }
    }

    /// Crée un transformateur depuis un nom d'ellipsoïde
    pub fn named(model: &str, options: Options) -> Result<Self, GeoError> {
        Ok(Self::new(Ellipsoid::named(model)?, options))
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Vérifie qu'une opération est applicable avec cet ellipsoïde
    pub fn check(&self, op: &Operation) -> Result<(), GeoError> {
        match op {
            Operation::Pl1992 | Operation::Pl2000 if !self.ellipsoid.supports_gauss_kruger() => {
                Err(GeoError::unsupported_for(
                    self.ellipsoid.model().name(),
                    op.name(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Applique une opération à un enregistrement (angles en degrés décimaux)
    pub fn apply(&self, op: &Operation, values: &[f64]) -> Result<Output, GeoError> {
        let (min, max) = op.arity();
        if values.len() < min || values.len() > max {
            return Err(GeoError::InvalidInput(format!(
                "{} expects {} field(s), got {}",
                op,
                if min == max { min.to_string() } else { format!("{}-{}", min, max) },
                values.len()
            )));
        }
        GeoError::check_finite(values)?;

        let ell = &self.ellipsoid;
        let output = match op {
            Operation::XyzToPlh => {
                let xyz = Cartesian::new(values[0], values[1], values[2]);
                Output::Geodetic {
                    coords: cartesian_to_geodetic(ell, xyz, self.options.longitude_mode)?,
                    format: self.options.angle_format,
                }
            }
            Operation::PlhToXyz => {
                let geo = Geodetic::from_degrees(values[0], values[1], values[2]);
                Output::Cartesian(geocentric::geodetic_to_cartesian(ell, geo)?)
            }
            Operation::Pl1992 => {
                let geo = Geodetic::from_degrees(values[0], values[1], 0.0);
                Output::Plane(plane::to_pl1992(ell, &geo)?)
            }
            Operation::Pl2000 => {
                let geo = Geodetic::from_degrees(values[0], values[1], 0.0);
                Output::Plane(plane::to_pl2000(ell, &geo)?)
            }
            Operation::XyzToNeu { origin } => {
                let station = Cartesian::new(values[0], values[1], values[2]);
                Output::Topocentric(topocentric::cartesian_to_topocentric(
                    ell,
                    station,
                    *origin,
                    self.options.longitude_mode,
                )?)
            }
        };

        debug!(operation = op.name(), ?values, "record transformed");
        Ok(output)
    }
}

impl FromStr for Transformer {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::named(s, Options::default())
    }
}
