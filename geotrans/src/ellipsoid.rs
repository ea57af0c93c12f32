//! Définitions des ellipsoïdes

use std::fmt;
use std::str::FromStr;

use crate::GeoError;

/// Ellipsoïdes de référence disponibles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// WGS84 (GPS)
    Wgs84,
    /// GRS80 (ETRF89, base des systèmes 1992 et 2000)
    Grs80,
    /// Krasowski (système 1942)
    Krasowski,
}

impl Model {
    /// Tous les modèles, dans l'ordre d'affichage
    pub const ALL: [Model; 3] = [Model::Wgs84, Model::Grs80, Model::Krasowski];

    /// Demi-axes (a, b) en mètres
    fn axes(self) -> (f64, f64) {
        match self {
            Model::Wgs84 => (6378137.0, 6356752.31424518),
            Model::Grs80 => (6378137.0, 6356752.31414036),
            Model::Krasowski => (6378245.0, 6356863.019),
        }
    }

    /// Nom canonique
    pub fn name(self) -> &'static str {
        match self {
            Model::Wgs84 => "WGS84",
            Model::Grs80 => "GRS80",
            Model::Krasowski => "Krasowski",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Model::Wgs84),
            "grs80" => Ok(Model::Grs80),
            "krasowski" | "krassowski" | "krass" => Ok(Model::Krasowski),
            other => Err(GeoError::UnsupportedModel(format!(
                "{} model not implemented. Use: wgs84, grs80, krasowski",
                other
            ))),
        }
    }
}

/// Ellipsoïde de révolution avec ses constantes dérivées
///
/// Les constantes sont calculées une seule fois à la construction ;
/// la valeur est immuable et peut être partagée entre threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    model: Model,
    a: f64,
    b: f64,
    flattening: f64,
    e2: f64,
    ep2: f64,
}

impl Ellipsoid {
    /// Construit l'ellipsoïde d'un modèle prédéfini
    pub fn new(model: Model) -> Self {
        let (a, b) = model.axes();
        let flattening = (a - b) / a;
        Self {
            model,
            a,
            b,
            flattening,
            e2: 2.0 * flattening - flattening * flattening,
            ep2: (a * a - b * b) / (b * b),
        }
    }

    /// Construit un ellipsoïde depuis son nom (insensible à la casse)
    pub fn named(name: &str) -> Result<Self, GeoError> {
        name.parse::<Model>().map(Self::new)
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Demi-grand axe (rayon équatorial) en mètres
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Aplatissement f = (a - b) / a
    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Première excentricité au carré e² = 2f - f²
    pub fn eccentricity_squared(&self) -> f64 {
        self.e2
    }

    /// Deuxième excentricité au carré e'² = (a² - b²) / b²
    pub fn second_eccentricity_squared(&self) -> f64 {
        self.ep2
    }

    /// Grande normale (rayon de courbure dans le premier vertical)
    pub fn prime_vertical_radius(&self, lat: f64) -> f64 {
        self.a / (1.0 - self.e2 * lat.sin().powi(2)).sqrt()
    }

    /// Les systèmes 1992 et 2000 sont définis sur GRS80 ; WGS84 est accepté
    /// (écart < 0.1 mm), Krasowski ne l'est pas.
    pub fn supports_gauss_kruger(&self) -> bool {
        !matches!(self.model, Model::Krasowski)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::new(Model::Wgs84)
    }
}
