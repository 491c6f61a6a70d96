use crate::core::io::pqr::{PqrError, PqrLine, PqrReader};
use crate::core::io::runs::ResidueRuns;
use crate::core::models::atom_model::AtomNameModel;
use crate::core::utils::paths::display_name;
use crate::engine::config::TransplantConfig;
use crate::engine::error::EngineError;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueTransplant {
    pub output_path: PathBuf,
    pub residue_number: isize,
    pub atoms_written: usize,
    pub atoms_matched: usize,
    pub atoms_zeroed: usize,
    pub leftover_atoms: Vec<String>, // Model atoms with no same-named target atom
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTransplant {
    pub output_path: PathBuf,
    pub residues_transplanted: Vec<isize>,
    pub residues_not_found: Vec<isize>,
    pub atoms_matched: usize,
    pub atoms_zeroed: usize,
    pub skipped_records: usize, // Subset records met after the cursor had moved past them
}

/// Writes the first run of `residue_number` in `target` to `output`, with each
/// atom's charge and radius taken from `model` by atom name.
///
/// Atoms the model does not define get the configured fallback suffix. If the
/// residue is absent from `target`, nothing is written and the intended
/// output path is returned with `atoms_written == 0`.
#[instrument(skip_all, name = "residue_transplant_workflow", fields(residue = residue_number))]
pub fn run_residue(
    target: &Path,
    residue_number: isize,
    mut model: AtomNameModel,
    output: &Path,
    config: &TransplantConfig,
) -> Result<ResidueTransplant, EngineError> {
    let runs = ResidueRuns::new(PqrReader::open(target)?.records());
    let mut report = ResidueTransplant {
        output_path: output.to_path_buf(),
        residue_number,
        atoms_written: 0,
        atoms_matched: 0,
        atoms_zeroed: 0,
        leftover_atoms: Vec::new(),
    };

    let Some(run) = runs.find_residue(residue_number)? else {
        warn!(
            "Residue number {} not found in {}; nothing written.",
            residue_number,
            display_name(target)
        );
        return Ok(report);
    };

    if model.is_empty() {
        warn!(
            "Charge model for residue {} is empty; every atom will be zeroed.",
            residue_number
        );
    }

    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(
        writer,
        "REMARK  Residue number {} extracted from file {} with charge model from {}",
        residue_number,
        display_name(target),
        model.source().unwrap_or("another pqr file")
    )?;
    for record in &run.records {
        let applied = model.apply(record, &config.fallback_suffix)?;
        if applied.matched {
            report.atoms_matched += 1;
        } else {
            debug!(atom = record.atom_name(), "Atom missing from model, zeroing.");
            report.atoms_zeroed += 1;
        }
        writeln!(writer, "{}", applied.line)?;
        report.atoms_written += 1;
    }
    writer.flush()?;

    report.leftover_atoms = model.into_leftovers();
    if !report.leftover_atoms.is_empty() {
        debug!(
            "Model atoms unused for residue {}: {:?}",
            residue_number, report.leftover_atoms
        );
    }
    info!(
        "Residue {} transplanted ({} matched, {} zeroed) to {}",
        residue_number,
        report.atoms_matched,
        report.atoms_zeroed,
        output.display()
    );
    Ok(report)
}

/// Copies `target` to `output`, transplanting charges from `model` onto every
/// residue whose number is in `residues`.
///
/// The residue list is sorted and deduplicated, then walked with a cursor that
/// only moves forward: a residue number that comes back after its run has
/// closed, or that appears after a larger subset number was already passed, is
/// copied unchanged. A fresh model is read for each run that is transplanted.
#[instrument(skip_all, name = "file_transplant_workflow")]
pub fn run_file(
    target: &Path,
    model: &Path,
    residues: &[isize],
    output: &Path,
    config: &TransplantConfig,
) -> Result<FileTransplant, EngineError> {
    if !model.exists() {
        return Err(PqrError::FileNotFound {
            path: model.to_path_buf(),
        }
        .into());
    }
    let reader = PqrReader::open(target)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(
        writer,
        "REMARK  Extracted from file {} with charge model from {}",
        display_name(target),
        display_name(model)
    )?;
    let mut report = transplant_lines(
        reader,
        &mut writer,
        residues,
        |number| AtomNameModel::from_path(model, number),
        config,
    )?;
    writer.flush()?;

    report.output_path = output.to_path_buf();
    if !report.residues_not_found.is_empty() {
        warn!(
            "Residues never transplanted: {:?}",
            report.residues_not_found
        );
    }
    info!(
        "Transplanted {} residue(s) ({} atoms matched, {} zeroed) to {}",
        report.residues_transplanted.len(),
        report.atoms_matched,
        report.atoms_zeroed,
        output.display()
    );
    Ok(report)
}

enum ScanState {
    Scanning,
    InRun {
        residue_number: isize,
        model: AtomNameModel,
    },
}

/// Streaming core of [`run_file`]. `load_model` is called once for every run
/// that is entered.
pub fn transplant_lines<R, F>(
    lines: PqrReader<R>,
    writer: &mut impl Write,
    residues: &[isize],
    mut load_model: F,
    config: &TransplantConfig,
) -> Result<FileTransplant, PqrError>
where
    R: BufRead,
    F: FnMut(isize) -> Result<AtomNameModel, PqrError>,
{
    let mut subset = residues.to_vec();
    subset.sort_unstable();
    subset.dedup();

    let mut report = FileTransplant::default();
    let mut cursor = 0;
    let mut state = ScanState::Scanning;
    let mut previous: Option<isize> = None;

    for item in lines {
        let record = match item? {
            PqrLine::Other(line) => {
                writeln!(writer, "{}", line)?;
                continue;
            }
            PqrLine::Atom(record) => record,
        };
        let number = record.residue_number();

        if let ScanState::InRun {
            residue_number,
            model,
        } = &mut state
        {
            if *residue_number == number {
                let applied = model.apply(&record, &config.fallback_suffix)?;
                tally(&mut report, applied.matched);
                writeln!(writer, "{}", applied.line)?;
                previous = Some(number);
                continue;
            }
            if let ScanState::InRun {
                residue_number,
                model,
            } = std::mem::replace(&mut state, ScanState::Scanning)
            {
                close_run(residue_number, model);
            }
            cursor += 1;
        }

        while cursor < subset.len() && subset[cursor] < number {
            cursor += 1;
        }

        if subset.get(cursor) == Some(&number) {
            let mut model = load_model(number)?;
            let applied = model.apply(&record, &config.fallback_suffix)?;
            tally(&mut report, applied.matched);
            writeln!(writer, "{}", applied.line)?;
            report.residues_transplanted.push(number);
            state = ScanState::InRun {
                residue_number: number,
                model,
            };
        } else {
            if subset[..cursor].binary_search(&number).is_ok() {
                if previous != Some(number) {
                    warn!(
                        line = record.line_number(),
                        "Residue {} reappears after the transplant cursor moved past it; copying unchanged.",
                        number
                    );
                }
                report.skipped_records += 1;
            }
            writeln!(writer, "{}", record.as_str())?;
        }
        previous = Some(number);
    }

    if let ScanState::InRun {
        residue_number,
        model,
    } = state
    {
        close_run(residue_number, model);
    }

    report.residues_not_found = subset
        .into_iter()
        .filter(|n| !report.residues_transplanted.contains(n))
        .collect();
    Ok(report)
}

fn tally(report: &mut FileTransplant, matched: bool) {
    if matched {
        report.atoms_matched += 1;
    } else {
        report.atoms_zeroed += 1;
    }
}

fn close_run(residue_number: isize, model: AtomNameModel) {
    let leftovers = model.into_leftovers();
    if !leftovers.is_empty() {
        debug!(
            "Model atoms unused for residue {}: {:?}",
            residue_number, leftovers
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pqr::ZERO_CHARGE_RADIUS_SUFFIX;
    use crate::test_utils::{atom_line, read_lines, write_pqr};
    use std::io::Cursor;

    fn model_lines() -> Vec<String> {
        vec![
            atom_line(1, "N", "ASP", 4, -0.3, 1.55),
            atom_line(2, "CG", "ASP", 4, 0.62, 1.7),
            atom_line(3, "OD1", "ASP", 4, -0.76, 1.4),
            atom_line(4, "N", "GLU", 5, -0.35, 1.55),
            atom_line(5, "CD", "GLU", 5, 0.7, 1.7),
            atom_line(6, "N", "LYS", 6, -0.3, 1.55),
        ]
    }

    fn target_lines() -> Vec<String> {
        vec![
            "REMARK target".to_string(),
            atom_line(1, "N", "ALA", 3, -0.4, 1.5),
            atom_line(2, "N", "ASN", 4, -0.4, 1.5),
            atom_line(3, "CG", "ASN", 4, 0.5, 1.7),
            atom_line(4, "OD1", "ASN", 4, -0.5, 1.4),
            atom_line(5, "ND2", "ASN", 4, -0.9, 1.6),
            atom_line(6, "N", "GLN", 5, -0.4, 1.5),
            atom_line(7, "CD", "GLN", 5, 0.5, 1.7),
            "TER".to_string(),
            atom_line(8, "N", "LYS", 6, -0.4, 1.5),
            "END".to_string(),
        ]
    }

    fn model_text() -> String {
        model_lines().join("\n")
    }

    fn transplant(target: &[String], residues: &[isize]) -> (Vec<String>, FileTransplant) {
        let mut out = Vec::new();
        let report = transplant_lines(
            PqrReader::new(Cursor::new(target.join("\n"))),
            &mut out,
            residues,
            |n| AtomNameModel::from_reader(Cursor::new(model_text()), n),
            &TransplantConfig::default(),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), report)
    }

    #[test]
    fn run_residue_applies_model_and_zeroes_missing_atoms() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_pqr(dir.path(), "target.pqr", &target_lines());
        let model_path = write_pqr(dir.path(), "model.pqr", &model_lines());
        let output = dir.path().join("target.4.pqr");

        let model = AtomNameModel::from_path(&model_path, 4).unwrap();
        let report =
            run_residue(&target, 4, model, &output, &TransplantConfig::default()).unwrap();

        assert_eq!(report.atoms_written, 4);
        assert_eq!(report.atoms_matched, 3);
        assert_eq!(report.atoms_zeroed, 1);
        assert!(report.leftover_atoms.is_empty());

        let written = read_lines(&output);
        assert_eq!(
            written[0],
            "REMARK  Residue number 4 extracted from file target.pqr with charge model from model.pqr"
        );
        let targets = target_lines();
        assert_eq!(&written[1][..54], &targets[2][..54]);
        assert_eq!(&written[1][54..], &model_lines()[0][54..]);
        assert_eq!(&written[3][54..], &model_lines()[2][54..]);
        assert_eq!(written[4][54..].trim(), "0.0000 0.0000");
    }

    #[test]
    fn run_residue_reports_unused_model_atoms() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_pqr(
            dir.path(),
            "target.pqr",
            &[atom_line(1, "N", "ASN", 4, -0.4, 1.5)],
        );
        let output = dir.path().join("out.pqr");
        let model = AtomNameModel::from_reader(Cursor::new(model_text()), 4).unwrap();

        let report =
            run_residue(&target, 4, model, &output, &TransplantConfig::default()).unwrap();
        assert_eq!(report.leftover_atoms, vec!["CG".to_string(), "OD1".to_string()]);
        assert!(read_lines(&output)[0].ends_with("with charge model from another pqr file"));
    }

    #[test]
    fn run_residue_for_absent_residue_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_pqr(dir.path(), "target.pqr", &target_lines());
        let output = dir.path().join("out.pqr");
        let model = AtomNameModel::from_reader(Cursor::new(model_text()), 77).unwrap();

        let report =
            run_residue(&target, 77, model, &output, &TransplantConfig::default()).unwrap();
        assert_eq!(report.atoms_written, 0);
        assert_eq!(report.output_path, output);
        assert!(!output.exists());
    }

    #[test]
    fn complete_model_never_uses_fallback() {
        let target = vec![
            atom_line(1, "N", "ASN", 4, -0.4, 1.5),
            atom_line(2, "OD1", "ASN", 4, -0.5, 1.4),
        ];
        let (out, report) = transplant(&target, &[4]);
        assert_eq!(report.atoms_zeroed, 0);
        assert_eq!(report.atoms_matched, 2);
        assert!(out.iter().all(|l| !l.ends_with(ZERO_CHARGE_RADIUS_SUFFIX)));
        assert_eq!(&out[1][54..], &model_lines()[2][54..]);
    }

    #[test]
    fn file_transplant_touches_only_selected_residues() {
        let target = target_lines();
        let (out, report) = transplant(&target, &[4]);

        assert_eq!(out.len(), target.len());
        assert_eq!(out[0], target[0]);
        assert_eq!(out[1], target[1]);
        assert_eq!(&out[2][54..], &model_lines()[0][54..]);
        assert_eq!(out[5][54..].trim(), "0.0000 0.0000");
        assert_eq!(&out[6..], &target[6..]);
        assert_eq!(report.residues_transplanted, vec![4]);
        assert_eq!(report.atoms_matched, 3);
        assert_eq!(report.atoms_zeroed, 1);
    }

    #[test]
    fn adjacent_residues_are_both_transplanted_from_their_first_atom() {
        let (out, report) = transplant(&target_lines(), &[5, 4]);

        assert_eq!(report.residues_transplanted, vec![4, 5]);
        assert_eq!(&out[6][54..], &model_lines()[3][54..]);
        assert_eq!(&out[7][54..], &model_lines()[4][54..]);
        assert_eq!(out[8], "TER");
    }

    #[test]
    fn non_record_lines_pass_through_without_ending_a_run() {
        let target = vec![
            atom_line(1, "N", "GLN", 5, -0.4, 1.5),
            "REMARK inside".to_string(),
            atom_line(2, "CD", "GLN", 5, 0.5, 1.7),
        ];
        let (out, report) = transplant(&target, &[5]);
        assert_eq!(out[1], "REMARK inside");
        assert_eq!(&out[2][54..], &model_lines()[4][54..]);
        assert_eq!(report.atoms_matched, 2);
    }

    #[test]
    fn cursor_skips_subset_values_absent_from_target() {
        let (out, report) = transplant(&target_lines(), &[1, 2, 6]);
        assert_eq!(report.residues_transplanted, vec![6]);
        assert_eq!(report.residues_not_found, vec![1, 2]);
        assert_eq!(&out[9][54..], &model_lines()[5][54..]);
    }

    #[test]
    fn recurrence_after_run_closed_is_copied_unchanged() {
        let target = vec![
            atom_line(1, "N", "ASN", 4, -0.4, 1.5),
            atom_line(2, "N", "GLN", 5, -0.4, 1.5),
            atom_line(3, "OD1", "ASN", 4, -0.5, 1.4),
        ];
        let (out, report) = transplant(&target, &[4]);
        assert_eq!(&out[0][54..], &model_lines()[0][54..]);
        assert_eq!(out[2], target[2]);
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.residues_transplanted, vec![4]);
    }

    #[test]
    fn empty_subset_copies_target_verbatim() {
        let target = target_lines();
        let (out, report) = transplant(&target, &[]);
        assert_eq!(out, target);
        assert!(report.residues_transplanted.is_empty());
    }

    #[test]
    fn run_file_writes_remark_and_reports_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_pqr(dir.path(), "target.pqr", &target_lines());
        let model = write_pqr(dir.path(), "model.pqr", &model_lines());
        let output = dir.path().join("target.m.pqr");

        let report =
            run_file(&target, &model, &[4, 5], &output, &TransplantConfig::default()).unwrap();
        assert_eq!(report.output_path, output);
        assert_eq!(report.residues_transplanted, vec![4, 5]);

        let written = read_lines(&output);
        assert_eq!(
            written[0],
            "REMARK  Extracted from file target.pqr with charge model from model.pqr"
        );
        assert_eq!(written.len(), target_lines().len() + 1);

        let missing = run_file(
            &target,
            &dir.path().join("none.pqr"),
            &[4],
            &dir.path().join("x.pqr"),
            &TransplantConfig::default(),
        );
        assert!(matches!(
            missing,
            Err(EngineError::Pqr(PqrError::FileNotFound { .. }))
        ));
    }
}
