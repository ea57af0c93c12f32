//! # geotrans
//!
//! Moteur de transformation de coordonnées sur l'ellipsoïde utilisé en géodésie
//! et en topographie polonaises.
//!
//! ## Features
//!
//! - Ellipsoïdes WGS84, GRS80 et Krasowski
//! - Cartésien → géodésique par itération de Hirvonen
//! - Géodésique → cartésien (forme fermée)
//! - Projection de Gauss-Krüger vers les systèmes PL-1992 et PL-2000
//! - Coordonnées topocentriques nord/est/haut
//! - Conversion degrés décimaux ↔ degrés, minutes, secondes
//!
//! ## Usage
//!
//! ```rust
//! use geotrans::{Cartesian, Ellipsoid, LongitudeMode};
//!
//! let wgs84 = Ellipsoid::named("wgs84")?;
//! let xyz = Cartesian::new(3664940.500, 1409153.590, 5009571.170);
//! let geo = geotrans::cartesian_to_geodetic(&wgs84, xyz, LongitudeMode::SingleQuadrant)?;
//!
//! assert!((geo.lat_degrees() - 52.0972722).abs() < 1e-6);
//! # Ok::<(), geotrans::GeoError>(())
//! ```
//!
//! Toutes les opérations sont des fonctions pures : un même [`Ellipsoid`]
//! ou [`Transformer`] peut être partagé entre threads sans synchronisation.

pub mod angle;
pub mod ellipsoid;
pub mod error;
pub mod geocentric;
pub mod hirvonen;
pub mod plane;
pub mod topocentric;
pub mod transformer;
pub mod types;

pub use angle::{deg2dms, AngleFormat, Dms};
pub use ellipsoid::{Ellipsoid, Model};
pub use error::GeoError;
pub use geocentric::geodetic_to_cartesian;
pub use hirvonen::{cartesian_to_geodetic, LongitudeMode};
pub use plane::{to_pl1992, to_pl2000};
pub use topocentric::cartesian_to_topocentric;
pub use transformer::{Operation, Options, Output, Transformer};
pub use types::{Cartesian, Geodetic, PlaneCoordinate, PlaneSystem, Topocentric};
