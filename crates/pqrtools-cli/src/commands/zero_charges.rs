use crate::cli::ZeroChargesArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use pqrtools::workflows;
use tracing::info;

pub fn run(args: ZeroChargesArgs, config: &AppConfig) -> Result<()> {
    info!(
        "Zeroing charges: {:?} -> {:?} (keep HETATM: {}, keep other lines: {})",
        &args.input,
        &args.output,
        config.zero_charges.keep_hetatm,
        config.zero_charges.keep_other_lines
    );

    let report = workflows::zero_charges::run(&args.input, &args.output, &config.zero_charges)?;

    println!(
        "✓ Zeroed {} record(s) from {} ({} line(s) dropped), saved as {}",
        report.records_zeroed,
        args.input.display(),
        report.lines_dropped,
        args.output.display()
    );
    Ok(())
}
