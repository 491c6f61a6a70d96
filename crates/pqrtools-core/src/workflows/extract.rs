use crate::core::io::pqr::PqrReader;
use crate::core::io::runs::ResidueRuns;
use crate::core::utils::paths::display_name;
use crate::engine::error::EngineError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueExtraction {
    pub output_path: PathBuf,
    pub residue_number: isize,
    pub atoms_written: usize,
}

impl ResidueExtraction {
    pub fn found(&self) -> bool {
        self.atoms_written > 0
    }
}

/// Copies the first contiguous run of `residue_number` in `input` to `output`,
/// preceded by a single REMARK line naming the source file.
///
/// Only the first run is written; the same number recurring later in the file
/// is never reached. When the residue does not occur at all, nothing is
/// written, a warning is logged and the intended output path is still
/// returned with `atoms_written == 0`.
#[instrument(skip_all, name = "extract_workflow", fields(residue = residue_number))]
pub fn run(
    input: &Path,
    residue_number: isize,
    output: &Path,
) -> Result<ResidueExtraction, EngineError> {
    let runs = ResidueRuns::new(PqrReader::open(input)?.records());
    let mut extraction = ResidueExtraction {
        output_path: output.to_path_buf(),
        residue_number,
        atoms_written: 0,
    };

    let Some(run) = runs.find_residue(residue_number)? else {
        warn!(
            "Residue number {} not found in {}; nothing written.",
            residue_number,
            display_name(input)
        );
        return Ok(extraction);
    };

    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(
        writer,
        "REMARK  Residue number {} extracted from file {}",
        residue_number,
        display_name(input)
    )?;
    for record in &run.records {
        writeln!(writer, "{}", record.as_str())?;
    }
    writer.flush()?;

    extraction.atoms_written = run.len();
    info!(
        "Extracted residue {} {} ({} atoms) to {}",
        run.residue_name(),
        residue_number,
        run.len(),
        output.display()
    );
    Ok(extraction)
}
