use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use xcf_core::Parasite;

#[derive(Args)]
pub struct ParasitesArgs {
    /// An input XCF file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

fn print_parasite(parasite: &Parasite) {
    let name = if parasite.name.is_empty() {
        "<unnamed>"
    } else {
        parasite.name.as_str()
    };
    println!(
        "    {} flags={:#x} length={}",
        name.bold(),
        parasite.flags,
        parasite.length
    );

    let printable = parasite
        .text()
        .chars()
        .all(|c| !c.is_control() || c.is_whitespace());
    if parasite.is_gimp() && printable && !parasite.payload.is_empty() {
        println!("      {}", parasite.text().dimmed());
    }
}

impl ParasitesArgs {
    pub fn handle(&self) -> Result<()> {
        let document = super::open_document(&self.file)?;

        println!("{}", "image".green());
        document.properties.parasites().for_each(print_parasite);

        for layer in &document.layers {
            println!("{} {}", "layer".green(), layer.name);
            layer.properties.parasites().for_each(print_parasite);
        }

        Ok(())
    }
}
