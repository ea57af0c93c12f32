//! Écriture des fichiers résultat

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use geotrans::Operation;

use crate::batch::RecordOutcome;

/// Nom de fichier par défaut : `result_<opération>.txt`
pub fn default_output_path(dir: Option<&Path>, op: &Operation) -> PathBuf {
    let name = format!("result_{}.txt", op.name());
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Préfixe des lignes signalant un enregistrement rejeté
pub const REJECTED_PREFIX: &str = "# ";

/// Écrit l'en-tête puis une ligne par enregistrement, dans l'ordre d'entrée.
///
/// Un enregistrement rejeté produit une ligne `# line N: <erreur>` à sa place.
/// Retourne le nombre de résultats écrits (hors rejets).
pub fn write_results<W: Write>(
    mut writer: W,
    op: &Operation,
    outcomes: &[RecordOutcome],
) -> std::io::Result<usize> {
    writeln!(writer, "{}", op.header())?;

    let mut written = 0;
    for outcome in outcomes {
        match outcome {
            Ok((_, output)) => {
                writeln!(writer, "{}", output)?;
                written += 1;
            }
            Err(e) => writeln!(writer, "{}{}", REJECTED_PREFIX, e)?,
        }
    }
    writer.flush()?;
    Ok(written)
}

/// Écrit les résultats dans un fichier
pub fn write_file(path: &Path, op: &Operation, outcomes: &[RecordOutcome]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    write_results(BufWriter::new(file), op, outcomes)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RecordError;
    use geotrans::{Cartesian, Output, PlaneCoordinate, PlaneSystem};

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(None, &Operation::Pl2000),
            PathBuf::from("result_pl2000.txt")
        );
        assert_eq!(
            default_output_path(Some(Path::new("out")), &Operation::XyzToPlh),
            Path::new("out").join("result_xyz2plh.txt")
        );
    }

    #[test]
    fn test_rejected_records_keep_their_row() {
        let outcomes = vec![
            Ok((
                2,
                Output::Plane(PlaneCoordinate {
                    x: 459309.2098,
                    y: 500000.0,
                    system: PlaneSystem::Pl1992,
                }),
            )),
            Err(RecordError::Encoding { line: 3 }),
            Ok((
                4,
                Output::Plane(PlaneCoordinate {
                    x: 1.0,
                    y: -2.5,
                    system: PlaneSystem::Pl1992,
                }),
            )),
        ];

        let mut buf = Vec::new();
        let n = write_results(&mut buf, &Operation::Pl1992, &outcomes).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "x[m], y[m]\n 459309.210, 500000.000\n# line 3: invalid UTF-8\n      1.000,     -2.500\n"
        );
    }

    #[test]
    fn test_cartesian_line() {
        let outcomes = vec![Ok((1, Output::Cartesian(Cartesian::new(1.0, 2.0, 3.0))))];
        let mut buf = Vec::new();
        write_results(&mut buf, &Operation::PlhToXyz, &outcomes).unwrap();
        assert!(String::from_utf8(buf)
            .unwrap()
            .ends_with("      1.000,      2.000,      3.000\n"));
    }
}
