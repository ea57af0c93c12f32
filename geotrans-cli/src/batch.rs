//! Traitement par lots
//!
//! Chaque enregistrement est indépendant : la transformation est répartie
//! sur un pool rayon, et `collect` conserve l'ordre du fichier d'entrée.

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

use geotrans::{Operation, Output, Transformer};

use crate::input::{Record, RecordError};

/// Résultat d'un enregistrement : numéro de ligne et sortie
pub type RecordOutcome = Result<(usize, Output), RecordError>;

/// Transforme tous les enregistrements, en parallèle
pub fn transform_all(
    transformer: &Transformer,
    op: &Operation,
    records: Vec<Result<Record, RecordError>>,
    jobs: Option<usize>,
) -> Result<Vec<RecordOutcome>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build().context("Failed to build thread pool")?;

    debug!(records = records.len(), threads = pool.current_num_threads(), "Starting batch");

    let outcomes = pool.install(|| {
        records
            .into_par_iter()
            .map(|record| transform_one(transformer, op, record))
            .collect::<Vec<_>>()
    });

    Ok(outcomes)
}

fn transform_one(
    transformer: &Transformer,
    op: &Operation,
    record: Result<Record, RecordError>,
) -> RecordOutcome {
    let outcome = record.and_then(|r| {
        transformer
            .apply(op, &r.values)
            .map(|out| (r.line, out))
            .map_err(|source| RecordError::Transform {
                line: r.line,
                source,
            })
    });

    if let Err(e) = &outcome {
        warn!("Skipping record: {}", e);
    }
    outcome
}
