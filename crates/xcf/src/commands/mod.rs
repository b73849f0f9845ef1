pub mod info;
pub mod parasites;
pub mod scan;

use std::{fs::File, path::Path};

use miette::{Context, IntoDiagnostic, Result};
use xcf_core::XcfDocument;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the header, properties and layers of an XCF file
    Info(info::InfoArgs),
    /// List the parasites of an XCF file and its layers
    Parasites(parasites::ParasitesArgs),
    /// Decode every XCF file below a directory
    Scan(scan::ScanArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Info(info) => info.handle(),
            Commands::Parasites(parasites) => parasites.handle(),
            Commands::Scan(scan) => scan.handle(),
        }
    }
}

fn open_document(path: &Path) -> Result<XcfDocument> {
    let file = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    XcfDocument::from_reader(file).context(format!("decoding {}", path.display()))
}
