//! Point d'entrée CLI pour geotrans

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use geotrans_cli::{cmd_convert, ConvertArgs};

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Conversions de coordonnées géodésiques, cartésiennes, planes et topocentriques
#[derive(Parser)]
#[command(name = "geotrans")]
#[command(author, version)]
#[command(about = "Convertir des fichiers de coordonnées (WGS84, GRS80, Krasowski)")]
#[command(long_about = "Convertit un fichier de points entre coordonnées cartésiennes (X,Y,Z), géodésiques (φ,λ,h), planes PL-1992 / PL-2000 et topocentriques (n,e,u).\n\nUne seule opération par exécution. Les lignes invalides sont rejetées et listées dans le rapport.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> Result<()> {
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let report = cmd_convert(&cli.convert)?;
    if cli.quiet {
        println!("{}", report.summary());
    } else {
        report.display();
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
