//! Angles sexagésimaux (degrés, minutes, secondes)

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::GeoError;

/// Format d'affichage des latitudes/longitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleFormat {
    /// Degrés décimaux
    #[default]
    DecimalDegrees,
    /// Degrés, minutes, secondes
    Dms,
}

impl FromStr for AngleFormat {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dec_degree" | "decimal" | "deg" => Ok(AngleFormat::DecimalDegrees),
            "dms" => Ok(AngleFormat::Dms),
            other => Err(GeoError::UnsupportedOutputFormat(format!(
                "{} - output format not defined. Use: dec_degree, dms",
                other
            ))),
        }
    }
}

/// Angle décomposé en degrés, minutes, secondes.
///
/// Le signe porte sur la valeur entière : minutes et secondes sont toujours positives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    /// Décompose des degrés décimaux (troncature des degrés puis des minutes)
    pub fn from_degrees(deg: f64) -> Self {
        let negative = deg.is_sign_negative() && deg != 0.0;
        let abs = deg.abs();
        let d = abs.trunc();
        let m = (60.0 * (abs - d)).trunc();
        let s = (abs - d - m / 60.0) * 3600.0;
        Self {
            negative,
            degrees: d as u32,
            minutes: m as u32,
            seconds: s,
        }
    }

    /// Recompose en degrés décimaux
    pub fn to_degrees(&self) -> f64 {
        let value =
            f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -value
        } else {
            value
        }
    }

    /// Vérifie si un champ texte a la forme `DD:MM:SS.ss`
    pub fn looks_like_dms(s: &str) -> bool {
        dms_regex().is_match(s)
    }
}

fn dms_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-])?(\d{1,3}):(\d{1,2}):(\d{1,2}(?:\.\d*)?)\s*$")
            .expect("static DMS pattern is valid")
    })
}

impl FromStr for Dms {
    type Err = GeoError;

    /// Parse un angle de la forme `[-]DD:MM:SS.ss`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = dms_regex()
            .captures(s)
            .ok_or_else(|| GeoError::InvalidInput(format!("not a DD:MM:SS angle: {:?}", s)))?;

        let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("0");
        let degrees: u32 = field(2)
            .parse()
            .map_err(|_| GeoError::InvalidInput(format!("bad degrees in {:?}", s)))?;
        let minutes: u32 = field(3)
            .parse()
            .map_err(|_| GeoError::InvalidInput(format!("bad minutes in {:?}", s)))?;
        let seconds: f64 = fast_float::parse(field(4))
            .map_err(|_| GeoError::InvalidInput(format!("bad seconds in {:?}", s)))?;

        if minutes >= 60 || seconds >= 60.0 {
            return Err(GeoError::InvalidInput(format!(
                "minutes and seconds must be below 60 in {:?}",
                s
            )));
        }

        Ok(Self {
            negative: field(1) == "-",
            degrees,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for Dms {
    /// Rendu `DDD°MM'SS.ss"`, retenue propagée si les secondes arrondies atteignent 60
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut degrees = self.degrees;
        let mut minutes = self.minutes;
        let mut seconds = (self.seconds * 100.0).round() / 100.0;
        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees += 1;
        }

        let deg = if self.negative {
            format!("-{}", degrees)
        } else {
            degrees.to_string()
        };
        write!(f, "{:>3}\u{b0}{:02}'{:.2}\"", deg, minutes, seconds.abs())
    }
}

/// Convertit des degrés décimaux en (degrés, minutes, secondes).
///
/// Les trois composantes portent le signe de l'angle, de sorte que
/// `d + m / 60 + s / 3600` redonne la valeur d'origine. Pour l'affichage,
/// utiliser [`Dms`] (signe porté une seule fois).
pub fn deg2dms(deg: f64) -> (i32, i32, f64) {
    let dms = Dms::from_degrees(deg);
    let sign = if dms.negative { -1 } else { 1 };
    (
        sign * dms.degrees as i32,
        sign * dms.minutes as i32,
        f64::from(sign) * dms.seconds,
    )
}
