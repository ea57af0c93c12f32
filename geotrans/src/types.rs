//! Types de coordonnées

use std::fmt;

/// Point en coordonnées géodésiques (latitude, longitude en radians, hauteur en mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// Latitude en radians
    pub lat: f64,
    /// Longitude en radians
    pub lon: f64,
    /// Hauteur ellipsoïdale en mètres
    pub h: f64,
}

impl Geodetic {
    pub fn new(lat: f64, lon: f64, h: f64) -> Self {
        Self { lat, lon, h }
    }

    /// Crée depuis des degrés décimaux
    pub fn from_degrees(lat_deg: f64, lon_deg: f64, h: f64) -> Self {
        Self {
            lat: lat_deg.to_radians(),
            lon: lon_deg.to_radians(),
            h,
        }
    }

    /// Latitude en degrés décimaux
    pub fn lat_degrees(&self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude en degrés décimaux
    pub fn lon_degrees(&self) -> f64 {
        self.lon.to_degrees()
    }
}

/// Point en coordonnées cartésiennes géocentriques (mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::ops::Sub for Cartesian {
    type Output = Cartesian;

    fn sub(self, rhs: Self) -> Self::Output {
        Cartesian::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Système de coordonnées planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSystem {
    /// PL-1992 : une seule zone, méridien central 19°E
    Pl1992,
    /// PL-2000 : quatre zones de 3°, numéro de zone 5 à 8
    Pl2000 { zone: u8 },
}

impl PlaneSystem {
    /// Méridien central de la zone, en degrés
    pub fn central_meridian(&self) -> f64 {
        match self {
            PlaneSystem::Pl1992 => 19.0,
            PlaneSystem::Pl2000 { zone } => f64::from(*zone) * 3.0,
        }
    }
}

impl fmt::Display for PlaneSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaneSystem::Pl1992 => write!(f, "PL-1992"),
            PlaneSystem::Pl2000 { zone } => write!(f, "PL-2000/{}", zone),
        }
    }
}

/// Coordonnées planes (x vers le nord, y vers l'est, en mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneCoordinate {
    pub x: f64,
    pub y: f64,
    pub system: PlaneSystem,
}

/// Coordonnées topocentriques nord/est/haut (mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    pub n: f64,
    pub e: f64,
    pub u: f64,
}

impl Topocentric {
    pub fn new(n: f64, e: f64, u: f64) -> Self {
        Self { n, e, u }
    }

    /// Distance à l'origine
    pub fn norm(&self) -> f64 {
        (self.n * self.n + self.e * self.e + self.u * self.u).sqrt()
    }
}
