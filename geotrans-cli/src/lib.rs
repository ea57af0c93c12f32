//! # geotrans-cli
//!
//! Conversion par lots de fichiers de coordonnées avec le moteur `geotrans`.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Cartésiennes → géodésiques (WGS84), angles en DMS
//! geotrans --xyz2plh --dms points.txt
//!
//! # Géodésiques → PL-2000 (GRS80), fichier résultat explicite
//! geotrans --pl2000 --model grs80 --output pl2000.txt points.txt
//!
//! # Topocentriques par rapport à une station
//! geotrans --xyz2neu --origin 3664940.5,1409153.59,5009571.17 points.txt
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod report;

pub use cli::{cmd_convert, ConvertArgs, OperationArgs};
pub use config::Config;
pub use report::{RunReport, RunStatus};
