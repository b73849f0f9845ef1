use clap::Args;
use itertools::Itertools;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use xcf_core::{Layer, PropertyList, XcfDocument};

#[derive(Args)]
pub struct InfoArgs {
    /// An input XCF file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the decoded document as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let document = super::open_document(&self.file)?;

        if self.json {
            let json = serde_json::to_string_pretty(&document).into_diagnostic()?;
            println!("{json}");
            return Ok(());
        }

        print_document(&document);
        Ok(())
    }
}

fn summarize(properties: &PropertyList) -> String {
    if properties.is_empty() {
        return "none".dimmed().to_string();
    }
    properties.iter().map(|property| property.kind).join(", ")
}

fn print_layer(index: usize, layer: &Layer) {
    println!(
        "  {} {} ({}x{}, {})",
        format!("#{index}").dimmed(),
        layer.name.bold(),
        layer.width,
        layer.height,
        layer.image_type
    );
    if let Some(opacity) = layer.properties.opacity() {
        println!("      opacity:    {:.1}%", opacity * 100.0);
    }
    if let Some(visible) = layer.properties.is_visible() {
        println!("      visible:    {visible}");
    }
    println!("      properties: {}", summarize(&layer.properties));
    println!("      hierarchy:  {:#x}", layer.hierarchy_pointer);
    if let Some(mask) = layer.mask_pointer {
        println!("      mask:       {mask:#x}");
    }
}

fn print_document(document: &XcfDocument) {
    println!("{}", document.version.text.bold());
    println!("  version:    {}", document.version.number);
    println!("  size:       {}x{}", document.width, document.height);
    println!("  base type:  {}", document.base_type);
    println!("  precision:  {}", document.precision);
    println!("  properties: {}", summarize(&document.properties));
    if let Some(comment) = document.comment() {
        println!("  comment:    {}", comment.italic());
    }
    println!("  channels:   {}", document.channel_pointers.len());

    println!("{} ({})", "layers".bold(), document.layers.len());
    for (index, layer) in document.layers.iter().enumerate() {
        print_layer(index, layer);
    }
}
