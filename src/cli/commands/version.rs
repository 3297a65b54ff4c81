//! Version information display

use serde::Serialize;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::CookoffError;

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    core: &'static str,
}

const INFO: VersionInfo = VersionInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    core: cookoff_core::VERSION,
};

/// Print version information.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), CookoffError> {
    match args.format {
        OutputFormat::Human => println!("{} {} (core {})", INFO.name, INFO.version, INFO.core),
        OutputFormat::Json => println!("{}", serde_json::to_string(&INFO)?),
    }
    Ok(())
}
