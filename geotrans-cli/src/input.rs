//! Lecture des fichiers de coordonnées
//!
//! Format : quelques lignes d'en-tête, puis un point par ligne, champs séparés
//! par des virgules. Une ligne invalide produit une [`RecordError`] sans
//! interrompre la lecture des suivantes.

use memchr::memchr_iter;
use thiserror::Error;

use geotrans::{Dms, GeoError, Operation};

/// Erreur sur un enregistrement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Ligne non UTF-8
    #[error("line {line}: invalid UTF-8")]
    Encoding { line: usize },

    /// Nombre de champs incorrect
    #[error("line {line}: expected {expected} fields, got {found}")]
    FieldCount {
        line: usize,
        expected: String,
        found: usize,
    },

    /// Champ non numérique
    #[error("line {line}, field {field}: cannot parse {value:?}")]
    BadNumber {
        line: usize,
        field: usize,
        value: String,
    },

    /// Échec de la transformation
    #[error("line {line}: {source}")]
    Transform {
        line: usize,
        #[source]
        source: GeoError,
    },
}

impl RecordError {
    /// Numéro de ligne (à partir de 1) dans le fichier source
    pub fn line(&self) -> usize {
        match self {
            RecordError::Encoding { line }
            | RecordError::FieldCount { line, .. }
            | RecordError::BadNumber { line, .. }
            | RecordError::Transform { line, .. } => *line,
        }
    }
}

/// Enregistrement parsé
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Numéro de ligne (à partir de 1)
    pub line: usize,
    /// Valeurs, angles en degrés décimaux
    pub values: Vec<f64>,
}

/// Options de lecture
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Lignes d'en-tête à ignorer
    pub header_lines: usize,
    /// Accepter les angles au format `DD:MM:SS.ss`
    pub dms: bool,
}

/// Itère sur les lignes d'un buffer (séparateur `\n`, `\r` final retiré)
pub fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut start = 0;
    let mut ends = memchr_iter(b'\n', data);
    std::iter::from_fn(move || {
        let end = match ends.next() {
            Some(end) => end,
            None if start < data.len() => data.len(),
            None => return None,
        };
        let line = &data[start..end];
        start = end + 1;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    })
}

/// Parse tous les enregistrements d'un fichier pour une opération donnée
pub fn parse_records(
    data: &[u8],
    op: &Operation,
    options: &ReaderOptions,
) -> Vec<Result<Record, RecordError>> {
    split_lines(data)
        .enumerate()
        .skip(options.header_lines)
        .filter(|(_, raw)| !raw.iter().all(u8::is_ascii_whitespace))
        .map(|(idx, raw)| parse_line(idx + 1, raw, op, options))
        .collect()
}

fn parse_line(
    line: usize,
    raw: &[u8],
    op: &Operation,
    options: &ReaderOptions,
) -> Result<Record, RecordError> {
    let text = std::str::from_utf8(raw).map_err(|_| RecordError::Encoding { line })?;
    let fields: Vec<&str> = text.trim().split(',').map(str::trim).collect();

    let (min, max) = op.arity();
    if fields.len() < min || fields.len() > max {
        return Err(RecordError::FieldCount {
            line,
            expected: if min == max {
                min.to_string()
            } else {
                format!("{}-{}", min, max)
            },
            found: fields.len(),
        });
    }

    let values = fields
        .iter()
        .enumerate()
        .map(|(i, field)| parse_field(line, i, field, op, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Record { line, values })
}

fn parse_field(
    line: usize,
    index: usize,
    field: &str,
    op: &Operation,
    options: &ReaderOptions,
) -> Result<f64, RecordError> {
    let bad = || RecordError::BadNumber {
        line,
        field: index + 1,
        value: field.to_string(),
    };

    if options.dms && op.angle_fields().contains(&index) && Dms::looks_like_dms(field) {
        return field.parse::<Dms>().map(|d| d.to_degrees()).map_err(|_| bad());
    }

    fast_float::parse(field).map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTS: ReaderOptions = ReaderOptions {
        header_lines: 1,
        dms: false,
    };

    #[test]
    fn test_split_lines() {
        let lines: Vec<Vec<u8>> = split_lines(b"a\r\nb\n\nc").map(|l| l.to_vec()).collect();
        assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec(), vec![], b"c".to_vec()]);

        let trailing: Vec<Vec<u8>> = split_lines(b"a\nb\n").map(|l| l.to_vec()).collect();
        assert_eq!(trailing, vec![b"a".to_vec(), b"b".to_vec()]);

        assert_eq!(split_lines(b"").count(), 0);
    }

    #[test]
    fn test_skip_header_and_blank_lines() {
        let data = b"X,Y,Z\n1,2,3\n\n4,5,6\n";
        let records = parse_records(data, &Operation::XyzToPlh, &OPTS);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Ok(Record {
                line: 2,
                values: vec![1.0, 2.0, 3.0]
            })
        );
        assert_eq!(records[1].as_ref().unwrap().line, 4);
    }

    #[test]
    fn test_bad_record_does_not_abort() {
        let data = b"header\n1,2,3\n1,abc,3\n1,2\n7,8,9\n";
        let records = parse_records(data, &Operation::XyzToPlh, &OPTS);
        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        assert_eq!(
            records[1],
            Err(RecordError::BadNumber {
                line: 3,
                field: 2,
                value: "abc".to_string()
            })
        );
        assert!(matches!(records[2], Err(RecordError::FieldCount { line: 4, found: 2, .. })));
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_dms_fields() {
        let opts = ReaderOptions {
            header_lines: 0,
            dms: true,
        };
        let data = b"52:05:50.18, 21:01:53.52, 141.399\n-0:30:00,19.5,0\n";
        let records = parse_records(data, &Operation::PlhToXyz, &opts);
        let first = records[0].as_ref().unwrap();
        assert!((first.values[0] - 52.0972722).abs() < 1e-6);
        assert!((first.values[1] - 21.0315333).abs() < 1e-6);
        assert!((first.values[2] - 141.399).abs() < 1e-12);

        let second = records[1].as_ref().unwrap();
        assert!((second.values[0] + 0.5).abs() < 1e-12);
        assert!((second.values[1] - 19.5).abs() < 1e-12);
    }

    #[test]
    fn test_dms_ignored_for_cartesian_fields() {
        let opts = ReaderOptions {
            header_lines: 0,
            dms: true,
        };
        let records = parse_records(b"1:00:00,2,3\n", &Operation::XyzToPlh, &opts);
        assert!(matches!(records[0], Err(RecordError::BadNumber { field: 1, .. })));
    }

    #[test]
    fn test_plane_accepts_two_or_three_fields() {
        let opts = ReaderOptions {
            header_lines: 0,
            dms: false,
        };
        let records = parse_records(b"52,21\n52,21,100\n52\n", &Operation::Pl2000, &opts);
        assert!(records[0].is_ok());
        assert!(records[1].is_ok());
        let err = records[2].as_ref().unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(
            matches!(err, RecordError::FieldCount { expected, found: 1, .. } if expected == "2-3"),
            "{:?}",
            err
        );
    }
}
