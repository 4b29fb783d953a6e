use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use formwork_rs::io::export::export_report;
use formwork_rs::io::import::Importer;
use log::{info, warn};
use slab_builder::builder::SlabBuilder;
use slab_builder::config::BuilderConfig;
use slab_builder::io::cli::Cli;
use slab_builder::io::output::BuildOutput;
use slab_builder::io::read_build_request;
use slab_builder::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BuilderConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed BuilderConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?
        .to_string();

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {:?}", args.output_folder)
        })?;
    }

    let ext_request = read_build_request(args.input_file.as_path())?;
    let request = Importer::new(config.skip_unusable_parts).import_request(&ext_request)?;

    let mut builder = SlabBuilder::new(request, config);
    let (result, meshes) = builder.build()?;

    let meshes = config.export_meshes.then_some(&meshes);
    let output = BuildOutput {
        report: export_report(&ext_request.name, &result, meshes, *EPOCH),
        request: ext_request,
        config,
    };

    let output_path = args.output_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &output_path)?;

    Ok(())
}
