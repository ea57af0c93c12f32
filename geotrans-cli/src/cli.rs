//! Définition et implémentation de la commande de conversion
//!
//! Une seule opération par exécution, choisie parmi `--xyz2plh`, `--plh2xyz`,
//! `--pl1992`, `--pl2000` et `--xyz2neu`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::info;

use geotrans::{AngleFormat, Cartesian, LongitudeMode, Operation, Options, Transformer};

use crate::batch::transform_all;
use crate::config::Config;
use crate::input::{parse_records, ReaderOptions};
use crate::output::{default_output_path, write_file};
use crate::report::RunReport;

/// Opération à exécuter (exactement une)
#[derive(Args, Debug, Clone, Default)]
#[group(id = "operation", required = true, multiple = false)]
pub struct OperationArgs {
    /// Cartesian X,Y,Z → geodetic φ,λ,h (Hirvonen)
    #[arg(long)]
    pub xyz2plh: bool,

    /// Geodetic φ,λ,h → cartesian X,Y,Z
    #[arg(long)]
    pub plh2xyz: bool,

    /// Geodetic φ,λ → PL-1992 plane coordinates
    #[arg(long)]
    pub pl1992: bool,

    /// Geodetic φ,λ → PL-2000 plane coordinates (zone chosen per point)
    #[arg(long)]
    pub pl2000: bool,

    /// Cartesian X,Y,Z → topocentric n,e,u relative to --origin
    #[arg(long, requires = "origin")]
    pub xyz2neu: bool,
}

impl OperationArgs {
    /// Opération sélectionnée
    pub fn operation(&self, origin: Option<Cartesian>) -> Result<Operation> {
        let op = if self.xyz2plh {
            Operation::XyzToPlh
        } else if self.plh2xyz {
            Operation::PlhToXyz
        } else if self.pl1992 {
            Operation::Pl1992
        } else if self.pl2000 {
            Operation::Pl2000
        } else if self.xyz2neu {
            Operation::XyzToNeu {
                origin: origin.ok_or_else(|| anyhow!("--xyz2neu requires --origin X,Y,Z"))?,
            }
        } else {
            return Err(anyhow!("No operation selected"));
        };
        Ok(op)
    }
}

/// Arguments de la conversion
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input file (header lines, then one comma-separated point per line)
    pub input: PathBuf,

    #[command(flatten)]
    pub operation: OperationArgs,

    /// Ellipsoid model: wgs84, grs80, krasowski (défaut : config / wgs84)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Angles as DD:MM:SS.ss (input angle fields, xyz2plh output)
    #[arg(long)]
    pub dms: bool,

    /// Decimal degrees even if the config or environment enables DMS
    #[arg(long, conflicts_with = "dms")]
    pub no_dms: bool,

    /// Number of header lines to skip (défaut : 4)
    #[arg(long)]
    pub header_lines: Option<usize>,

    /// Topocentric origin for --xyz2neu, as X,Y,Z in metres
    #[arg(long, value_parser = parse_origin, allow_hyphen_values = true)]
    pub origin: Option<Cartesian>,

    /// Use atan2 for the longitude (all quadrants)
    #[arg(long)]
    pub four_quadrant: bool,

    /// Use atan(Y/X) even if the config or environment enables atan2
    #[arg(long, conflicts_with = "four_quadrant")]
    pub no_four_quadrant: bool,

    /// Output file (défaut : result_<operation>.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,
}

impl ConvertArgs {
    /// Configuration effective : fichier et environnement, puis arguments CLI
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::resolve(self.config.as_deref())?;

        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(n) = self.header_lines {
            config.header_lines = n;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = Some(jobs);
        }
        if let Some(dms) = switch(self.dms, self.no_dms) {
            config.dms = dms;
        }
        if let Some(fq) = switch(self.four_quadrant, self.no_four_quadrant) {
            config.four_quadrant = fq;
        }

        Ok(config)
    }
}

/// Paire `--x` / `--no-x` : `None` si aucun des deux n'est donné
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Parse `X,Y,Z`
fn parse_origin(s: &str) -> Result<Cartesian, String> {
    let values = s
        .split(',')
        .map(|v| fast_float::parse::<f64, _>(v.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| format!("invalid number in origin {:?}", s))?;

    match values[..] {
        [x, y, z] if values.iter().all(|v| v.is_finite()) => Ok(Cartesian::new(x, y, z)),
        _ => Err(format!("origin must be X,Y,Z (got {:?})", s)),
    }
}

/// Options de transformation déduites de la configuration
fn transform_options(config: &Config) -> Options {
    Options {
        longitude_mode: if config.four_quadrant {
            LongitudeMode::FourQuadrant
        } else {
            LongitudeMode::SingleQuadrant
        },
        angle_format: if config.dms {
            AngleFormat::Dms
        } else {
            AngleFormat::DecimalDegrees
        },
    }
}

/// Exécute la conversion d'un fichier
///
/// Les erreurs de configuration et d'entrée/sortie sont fatales ; les
/// enregistrements invalides sont rejetés individuellement et listés dans le
/// rapport.
pub fn cmd_convert(args: &ConvertArgs) -> Result<RunReport> {
    let start = Instant::now();

    let config = args.resolve_config()?;
    let op = args.operation.operation(args.origin)?;

    let transformer = Transformer::named(&config.model, transform_options(&config))?;
    transformer.check(&op)?;

    info!(
        operation = op.name(),
        model = transformer.ellipsoid().model().name(),
        input = %args.input.display(),
        "Starting conversion"
    );

    let data = std::fs::read(&args.input)
        .with_context(|| format!("Cannot read input file {}", args.input.display()))?;

    let reader = ReaderOptions {
        header_lines: config.header_lines,
        dms: config.dms,
    };
    let records = parse_records(&data, &op, &reader);
    let outcomes = transform_all(&transformer, &op, records, config.jobs)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(config.output_dir.as_deref(), &op));
    let written = write_file(&output, &op, &outcomes)?;

    let mut report = RunReport::new(op.name(), transformer.ellipsoid().model().name(), &args.input);
    report.record_outcomes(&outcomes);
    report.set_output(&output);
    report.set_duration(start.elapsed());
    report.finalize();

    if let Some(ref path) = args.report {
        save_report(&report, path)?;
    }

    info!(
        written,
        rejected = report.rejected.len(),
        output = %output.display(),
        "Conversion finished"
    );

    Ok(report)
}

fn save_report(report: &RunReport, path: &Path) -> Result<()> {
    report
        .save_to_file(path)
        .with_context(|| format!("Cannot write report {}", path.display()))
}
