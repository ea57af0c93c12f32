//! Configuration de l'outil
//!
//! Ordre de priorité : valeurs par défaut < fichier JSON < variables
//! d'environnement (`GEOTRANS_*`, `.env` chargé au démarrage) < arguments CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Nombre de lignes d'en-tête des fichiers de coordonnées produits par les
/// récepteurs et logiciels de calcul usuels
pub const DEFAULT_HEADER_LINES: usize = 4;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Ellipsoïde (wgs84, grs80, krasowski)
    pub model: String,

    /// Lignes d'en-tête à ignorer dans le fichier d'entrée
    pub header_lines: usize,

    /// Angles en degrés, minutes, secondes (entrée et sortie)
    pub dms: bool,

    /// Longitude calculée avec atan2 au lieu de atan(Y/X)
    pub four_quadrant: bool,

    /// Nombre de threads pour le traitement par lots
    pub jobs: Option<usize>,

    /// Répertoire des fichiers résultat (défaut : répertoire courant)
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "wgs84".to_string(),
            header_lines: DEFAULT_HEADER_LINES,
            dms: false,
            four_quadrant: false,
            jobs: None,
            output_dir: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Valeurs par défaut, surchargées par le fichier s'il est fourni puis par l'environnement
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applique les variables `GEOTRANS_MODEL`, `GEOTRANS_HEADER_LINES`,
    /// `GEOTRANS_DMS`, `GEOTRANS_FOUR_QUADRANT` et `GEOTRANS_JOBS`.
    ///
    /// Une valeur invalide est ignorée avec un avertissement ; retourne les
    /// noms des variables ignorées.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
        let mut rejected = Vec::new();

        if let Some(model) = lookup("GEOTRANS_MODEL") {
            self.model = model;
        }
        if let Some(n) = env_value(&lookup, "GEOTRANS_HEADER_LINES", &mut rejected, |s| {
            s.parse::<usize>().ok()
        }) {
            self.header_lines = n;
        }
        if let Some(dms) = env_value(&lookup, "GEOTRANS_DMS", &mut rejected, parse_bool) {
            self.dms = dms;
        }
        if let Some(fq) = env_value(&lookup, "GEOTRANS_FOUR_QUADRANT", &mut rejected, parse_bool) {
            self.four_quadrant = fq;
        }
        if let Some(jobs) = env_value(&lookup, "GEOTRANS_JOBS", &mut rejected, |s| {
            s.parse::<usize>().ok().filter(|&n| n > 0)
        }) {
            self.jobs = Some(jobs);
        }

        rejected
    }
}

fn env_value<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let value = parse(raw.trim());
    if value.is_none() {
        warn!(variable = key, value = %raw, "Invalid value ignored");
        rejected.push(key);
    }
    value
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.model, "wgs84");
        assert_eq!(config.header_lines, 4);
        assert!(!config.dms);
    }

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(r#"{"model": "grs80", "dms": true}"#).unwrap();
        assert_eq!(config.model, "grs80");
        assert!(config.dms);
        assert_eq!(config.header_lines, DEFAULT_HEADER_LINES);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GEOTRANS_MODEL", "krasowski"),
            ("GEOTRANS_HEADER_LINES", "1"),
            ("GEOTRANS_DMS", "yes"),
            ("GEOTRANS_JOBS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        let rejected = config.apply_env_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(rejected, vec!["GEOTRANS_JOBS"]);
        assert_eq!(config.model, "krasowski");
        assert_eq!(config.header_lines, 1);
        assert!(config.dms);
        assert!(!config.four_quadrant);
        assert_eq!(config.jobs, None);
    }

    #[test]
    fn test_invalid_env_values_are_reported() {
        let env: HashMap<&str, &str> = [
            ("GEOTRANS_HEADER_LINES", "four"),
            ("GEOTRANS_DMS", "maybe"),
            ("GEOTRANS_FOUR_QUADRANT", " TRUE "),
            ("GEOTRANS_JOBS", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        let rejected = config.apply_env_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(
            rejected,
            vec!["GEOTRANS_HEADER_LINES", "GEOTRANS_DMS", "GEOTRANS_JOBS"]
        );
        assert_eq!(config.header_lines, DEFAULT_HEADER_LINES);
        assert!(!config.dms);
        assert!(config.four_quadrant);
        assert_eq!(config.jobs, None);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load(Path::new("/nonexistent/geotrans.json")).is_err());
    }
}
