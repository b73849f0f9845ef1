use clap::Args;
use miette::{miette, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Args)]
pub struct ScanArgs {
    /// A directory to search for XCF files
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Exit with an error if any file fails to decode
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl ScanArgs {
    pub fn handle(&self) -> Result<()> {
        let files = WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .filter(|e| {
                e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xcf"))
            })
            .collect::<Vec<_>>();

        info!("found {} xcf files in {}", files.len(), self.directory.display());

        let mut failed = 0usize;
        for file in &files {
            match super::open_document(file.path()) {
                Ok(document) => println!(
                    "✅ {} ({}, {} layers)",
                    file.path().display(),
                    document.version.suffix(),
                    document.layers.len()
                ),
                Err(err) => {
                    failed += 1;
                    warn!("{:?}", err);
                    println!("❌ {}", file.path().display().red());
                }
            }
        }

        println!("{} of {} files decoded", files.len() - failed, files.len());

        if self.strict && failed > 0 {
            return Err(miette!("{failed} files failed to decode"));
        }
        Ok(())
    }
}
