use crate::cli::ResiduesArgs;
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use pqrtools::core::models::atom_model::AtomNameModel;
use pqrtools::core::models::residue_index::ResidueIndex;
use pqrtools::core::utils::paths;
use pqrtools::workflows;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ResiduesArgs, config: &AppConfig) -> Result<()> {
    info!("Reading residue list from {:?}", &args.input);
    let index = ResidueIndex::from_path(&args.input)?;
    info!("Found {} residue(s).", index.len());

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    match (&args.model, args.residues.is_empty()) {
        (None, true) => {
            print_index(&index);
            Ok(())
        }
        (None, false) => handle_extract(&args, &index, config),
        (Some(model), false) => handle_transplant(&args, model, &index, config),
        (Some(_), true) => Err(CliError::Argument(
            "--model requires at least one residue number".to_string(),
        )),
    }
}

fn print_index(index: &ResidueIndex) {
    for (i, entry) in index.iter().enumerate() {
        println!("{}  {}  {}  {}", i, entry.number, entry.name, entry.offset);
    }
}

fn warn_if_absent(index: &ResidueIndex, residues: &[isize], input: &Path) {
    for &r in residues {
        if index.find(r).is_none() {
            warn!("Residue number {} does not occur in {}", r, input.display());
        }
    }
}

fn handle_extract(args: &ResiduesArgs, index: &ResidueIndex, config: &AppConfig) -> Result<()> {
    warn_if_absent(index, &args.residues, &args.input);

    for &r in &args.residues {
        let output = paths::residue_path(&args.input, r, config.output_dir.as_deref());
        let extraction = workflows::extract::run(&args.input, r, &output)?;
        if extraction.found() {
            println!(
                "✓ Residue {} ({} atoms) written to: {}",
                r,
                extraction.atoms_written,
                extraction.output_path.display()
            );
        }
    }
    Ok(())
}

fn handle_transplant(
    args: &ResiduesArgs,
    model: &Path,
    index: &ResidueIndex,
    config: &AppConfig,
) -> Result<()> {
    info!("Reading charge model residues from {:?}", model);
    let model_index = ResidueIndex::from_path(model)?;
    warn_if_absent(index, &args.residues, &args.input);
    warn_if_absent(&model_index, &args.residues, model);

    if config.write_residue_files {
        for &r in &args.residues {
            let atom_model = AtomNameModel::from_path(model, r)?;
            let output = paths::residue_path(&args.input, r, config.output_dir.as_deref());
            let report = workflows::transplant::run_residue(
                &args.input,
                r,
                atom_model,
                &output,
                &config.transplant,
            )?;
            if report.atoms_written > 0 {
                println!(
                    "✓ Residue {} ({} matched, {} zeroed) written to: {}",
                    r,
                    report.atoms_matched,
                    report.atoms_zeroed,
                    report.output_path.display()
                );
            }
            if !report.leftover_atoms.is_empty() {
                info!(
                    "Model atoms of residue {} without a target counterpart: {}",
                    r,
                    report.leftover_atoms.join(", ")
                );
            }
        }
    }

    let output = paths::tagged_path(
        &args.input,
        &config.model_tag,
        config.output_dir.as_deref(),
    );
    let report = workflows::transplant::run_file(
        &args.input,
        model,
        &args.residues,
        &output,
        &config.transplant,
    )?;
    println!(
        "✓ Charge model applied to {} residue(s) ({} atoms matched, {} zeroed), written to: {}",
        report.residues_transplanted.len(),
        report.atoms_matched,
        report.atoms_zeroed,
        report.output_path.display()
    );
    if report.skipped_records > 0 {
        println!(
            "  Warning: {} record(s) of selected residues appeared out of order and were copied unchanged.",
            report.skipped_records
        );
    }
    Ok(())
}
