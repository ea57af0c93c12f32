//! Rapport d'exécution
//!
//! Collecte les enregistrements convertis et rejetés pour l'affichage
//! console et l'export JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::batch::RecordOutcome;
use crate::input::RecordError;

/// Statut global de l'exécution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Tous les enregistrements ont été convertis
    Success,
    /// Certains enregistrements ont été rejetés
    PartialSuccess,
    /// Aucun enregistrement converti
    Failed,
}

/// Enregistrement rejeté
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    /// Numéro de ligne dans le fichier d'entrée
    pub line: usize,
    /// Message d'erreur
    pub message: String,
}

impl From<&RecordError> for RejectedRecord {
    fn from(e: &RecordError) -> Self {
        Self {
            line: e.line(),
            message: e.to_string(),
        }
    }
}

/// Rapport complet
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Opération exécutée
    pub operation: String,
    /// Ellipsoïde utilisé
    pub model: String,
    /// Fichier d'entrée
    pub input: String,
    /// Fichier résultat
    pub output: Option<String>,
    /// Durée de traitement
    pub duration_secs: f64,
    /// Statut global
    pub status: RunStatus,
    /// Nombre d'enregistrements lus (hors en-tête et lignes vides)
    pub records_read: usize,
    /// Nombre d'enregistrements convertis
    pub records_converted: usize,
    /// Enregistrements rejetés
    pub rejected: Vec<RejectedRecord>,
}

impl RunReport {
    pub fn new(operation: &str, model: &str, input: &Path) -> Self {
        Self {
            operation: operation.to_string(),
            model: model.to_string(),
            input: input.display().to_string(),
            output: None,
            duration_secs: 0.0,
            status: RunStatus::Success,
            records_read: 0,
            records_converted: 0,
            rejected: Vec::new(),
        }
    }

    /// Comptabilise les résultats d'un lot
    pub fn record_outcomes(&mut self, outcomes: &[RecordOutcome]) {
        for outcome in outcomes {
            self.records_read += 1;
            match outcome {
                Ok(_) => self.records_converted += 1,
                Err(e) => self.rejected.push(e.into()),
            }
        }
    }

    pub fn set_output(&mut self, path: &Path) {
        self.output = Some(path.display().to_string());
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.rejected.is_empty() {
            RunStatus::Success
        } else if self.records_converted > 0 {
            RunStatus::PartialSuccess
        } else {
            RunStatus::Failed
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("{} ({})", self.operation.to_uppercase(), self.model);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.3}s", self.duration_secs);
        println!("Input: {}", self.input);
        if let Some(ref output) = self.output {
            println!("Output: {}", output);
        }
        println!(
            "Records: {} read, {} converted, {} rejected",
            self.records_read,
            self.records_converted,
            self.rejected.len()
        );

        if !self.rejected.is_empty() {
            println!("\n--- REJECTED ({}) ---", self.rejected.len());
            for r in self.rejected.iter().take(20) {
                println!("  [line {}] {}", r.line, r.message);
            }
            if self.rejected.len() > 20 {
                println!("  ... and {} more", self.rejected.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} converted, {} rejected",
            self.operation,
            self.records_converted,
            self.rejected.len()
        )
    }
}
