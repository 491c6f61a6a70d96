use crate::core::io::pqr::{PqrError, PqrReader, RecordKind};
use crate::core::utils::paths::display_name;
use crate::engine::config::ZeroChargeConfig;
use crate::engine::error::EngineError;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroChargeReport {
    pub lines_read: usize,
    pub records_zeroed: usize,
    pub lines_copied: usize,
    pub lines_dropped: usize,
}

/// Writes a copy of `input` to `output` with every kept record's charge set to zero.
///
/// With the default configuration only `ATOM` records are written; `HETATM`
/// records and every other line are left out of the result.
///
/// # Errors
///
/// Returns [`PqrError::FileNotFound`] (wrapped) before `output` is touched when
/// `input` does not exist, and I/O or parse errors as they occur. A failure
/// part-way through leaves a truncated `output` behind.
#[instrument(skip_all, name = "zero_charges_workflow")]
pub fn run(
    input: &Path,
    output: &Path,
    config: &ZeroChargeConfig,
) -> Result<ZeroChargeReport, EngineError> {
    let reader = PqrReader::open(input)?;
    info!("Turning charges off on input file: {}", display_name(input));
    info!("Saving as: {}", display_name(output));

    let mut writer = BufWriter::new(File::create(output)?);
    let report = write_zeroed(reader, &mut writer, config)?;
    writer.flush()?;

    info!(
        records = report.records_zeroed,
        dropped = report.lines_dropped,
        "Charge zeroing finished."
    );
    Ok(report)
}

/// Streams `lines` into `writer`, zeroing the charge span of every kept record.
///
/// Lines are only classified by record type; fields such as the residue
/// number are never parsed, so chain identifiers or non-numeric residue
/// fields do not stop the pass.
pub fn write_zeroed<R: BufRead>(
    lines: PqrReader<R>,
    writer: &mut impl Write,
    config: &ZeroChargeConfig,
) -> Result<ZeroChargeReport, PqrError> {
    let mut report = ZeroChargeReport::default();

    for item in lines.classified() {
        let line = item?;
        report.lines_read += 1;
        match line.kind {
            Some(RecordKind::Atom) => {
                writeln!(writer, "{}", line.with_zero_charge()?)?;
                report.records_zeroed += 1;
            }
            Some(RecordKind::HetAtom) if config.keep_hetatm => {
                writeln!(writer, "{}", line.with_zero_charge()?)?;
                report.records_zeroed += 1;
            }
            None if config.keep_other_lines => {
                writeln!(writer, "{}", line.content)?;
                report.lines_copied += 1;
            }
            _ => {
                debug!(line = line.line_number, "Dropping line: {}", line.content);
                report.lines_dropped += 1;
            }
        }
    }

    Ok(report)
}
