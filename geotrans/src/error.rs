//! Types d'erreurs pour le crate geotrans

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une transformation de coordonnées
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Ellipsoïde inconnu, ou non supporté par l'opération demandée
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Entrée dégénérée (X = 0 pour la longitude)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// L'itération de Hirvonen n'a pas convergé
    #[error("Hirvonen iteration did not converge after {iterations} iterations (delta = {delta:e} rad)")]
    ConvergenceFailure { iterations: usize, delta: f64 },

    /// Valeur numérique invalide (NaN, infini, nombre de champs)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Format de sortie non reconnu
    #[error("Unsupported output format: {0}")]
    UnsupportedOutputFormat(String),
}

impl GeoError {
    /// Crée une erreur d'opération non supportée pour un ellipsoïde
    pub fn unsupported_for(model: &str, operation: &str) -> Self {
        Self::UnsupportedModel(format!("{} is not defined on the {} ellipsoid", operation, model))
    }

    /// Vérifie que toutes les valeurs sont finies
    pub fn check_finite(values: &[f64]) -> Result<(), Self> {
        match values.iter().find(|v| !v.is_finite()) {
            Some(v) => Err(Self::InvalidInput(format!("non-finite value: {}", v))),
            None => Ok(()),
        }
    }
}
