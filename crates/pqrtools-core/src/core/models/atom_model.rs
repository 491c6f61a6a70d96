use crate::core::io::pqr::{AtomRecord, PqrError, PqrReader};
use crate::core::io::runs::{ResidueRun, ResidueRuns};
use crate::core::utils::paths::display_name;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Result of applying a charge model to one target record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransplantedLine {
    pub line: String,
    pub matched: bool,
}

/// Charge model for a single residue, keyed by atom name.
///
/// An individual residue lists its atoms one per line in no particular order,
/// each atom identified by a unique name. Mapping the name to the whole source
/// record lets the charge and radius columns of a model residue be copied onto
/// the same-named atoms of another residue:
///
/// ```text
/// "N"   -> "ATOM     38  N   ASP     4      36.757  40.599  28.876 -0.4000 1.5000"
/// "OD1" -> "ATOM     44  OD1 ASP     4      37.702  42.881  30.781 -0.5500 1.4000"
/// ```
///
/// Entries are consumed as they are applied, so whatever remains afterwards is
/// exactly the set of model atoms that had no counterpart in the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomNameModel {
    residue_number: isize,
    source: Option<String>, // File name the model was read from, if any
    atoms: HashMap<String, AtomRecord>,
}

impl AtomNameModel {
    /// Builds a model from the records of one residue run. A repeated atom
    /// name keeps the last record seen.
    pub fn from_run(run: ResidueRun) -> Self {
        let residue_number = run.residue_number();
        let atoms = run
            .records
            .into_iter()
            .map(|record| (record.atom_name().to_string(), record))
            .collect();
        Self {
            residue_number,
            source: None,
            atoms,
        }
    }

    /// Model for the first run of `residue_number` in `reader`. The model is
    /// empty when the residue does not occur.
    pub fn from_reader(reader: impl BufRead, residue_number: isize) -> Result<Self, PqrError> {
        let run = ResidueRuns::new(PqrReader::new(reader).records()).find_residue(residue_number)?;
        Ok(Self::from_optional_run(run, residue_number))
    }

    pub fn from_path<P: AsRef<Path>>(path: P, residue_number: isize) -> Result<Self, PqrError> {
        let path = path.as_ref();
        let run = ResidueRuns::new(PqrReader::open(path)?.records()).find_residue(residue_number)?;
        let mut model = Self::from_optional_run(run, residue_number);
        model.source = Some(display_name(path));
        Ok(model)
    }

    fn from_optional_run(run: Option<ResidueRun>, residue_number: isize) -> Self {
        match run {
            Some(run) => Self::from_run(run),
            None => Self {
                residue_number,
                source: None,
                atoms: HashMap::new(),
            },
        }
    }

    pub fn residue_number(&self) -> isize {
        self.residue_number
    }

    /// File name of the model source when it was read from disk.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn contains(&self, atom_name: &str) -> bool {
        self.atoms.contains_key(atom_name.trim())
    }

    /// Rewrites `record` with the model's charge and radius for the same atom
    /// name, consuming that model entry. Atoms without a model entry get
    /// `fallback_suffix` instead.
    ///
    /// # Errors
    ///
    /// Returns [`PqrError::Parse`] if either the target or the model record is
    /// too short to hold the 54-column prefix.
    pub fn apply(
        &mut self,
        record: &AtomRecord,
        fallback_suffix: &str,
    ) -> Result<TransplantedLine, PqrError> {
        match self.atoms.remove(record.atom_name()) {
            Some(model) => Ok(TransplantedLine {
                line: record.with_suffix(model.charge_radius_suffix()?)?,
                matched: true,
            }),
            None => Ok(TransplantedLine {
                line: record.with_suffix(fallback_suffix)?,
                matched: false,
            }),
        }
    }

    /// Names of the model atoms never applied, sorted.
    pub fn into_leftovers(self) -> Vec<String> {
        let mut names: Vec<String> = self.atoms.into_keys().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pqr::{RecordKind, ZERO_CHARGE_RADIUS_SUFFIX};
    use crate::test_utils::atom_line;
    use std::io::Cursor;

    fn record(line: String) -> AtomRecord {
        AtomRecord::parse(RecordKind::Atom, line, 1).unwrap()
    }

    fn model_text() -> String {
        [
            atom_line(1, "N", "ALA", 3, -0.4, 1.5),
            atom_line(2, "N", "ASP", 4, -0.3, 1.55),
            atom_line(3, "CG", "ASP", 4, 0.62, 1.7),
            atom_line(4, "OD1", "ASP", 4, -0.76, 1.4),
            atom_line(5, "N", "GLY", 5, -0.4, 1.5),
        ]
        .join("\n")
    }

    #[test]
    fn model_holds_first_run_of_requested_residue_only() {
        let model = AtomNameModel::from_reader(Cursor::new(model_text()), 4).unwrap();
        assert_eq!(model.residue_number(), 4);
        assert_eq!(model.len(), 3);
        assert!(model.contains("OD1"));
        assert!(model.contains(" CG "));
        assert!(!model.contains("CA"));
    }

    #[test]
    fn missing_residue_gives_empty_model() {
        let model = AtomNameModel::from_reader(Cursor::new(model_text()), 42).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.residue_number(), 42);
    }

    #[test]
    fn apply_copies_model_suffix_and_consumes_entry() {
        let mut model = AtomNameModel::from_reader(Cursor::new(model_text()), 4).unwrap();
        let target = record(atom_line(17, "OD1", "ASN", 9, 0.0, 0.0));

        let applied = model.apply(&target, ZERO_CHARGE_RADIUS_SUFFIX).unwrap();
        assert!(applied.matched);
        assert_eq!(&applied.line[..54], &target.as_str()[..54]);
        assert_eq!(&applied.line[54..], " -0.7600 1.4000");
        assert!(!model.contains("OD1"));

        let again = model.apply(&target, ZERO_CHARGE_RADIUS_SUFFIX).unwrap();
        assert!(!again.matched);
    }

    #[test]
    fn apply_zeroes_charge_and_radius_for_unknown_atom() {
        let mut model = AtomNameModel::from_reader(Cursor::new(model_text()), 4).unwrap();
        let target = record(atom_line(18, "ND2", "ASN", 9, 0.2, 1.6));

        let applied = model.apply(&target, ZERO_CHARGE_RADIUS_SUFFIX).unwrap();
        assert!(!applied.matched);
        assert_eq!(applied.line[54..].trim(), "0.0000 0.0000");
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn leftovers_list_unapplied_atoms_sorted() {
        let mut model = AtomNameModel::from_reader(Cursor::new(model_text()), 4).unwrap();
        model
            .apply(&record(atom_line(1, "CG", "ASP", 4, 0.0, 0.0)), ZERO_CHARGE_RADIUS_SUFFIX)
            .unwrap();
        assert_eq!(model.into_leftovers(), vec!["N".to_string(), "OD1".to_string()]);
    }

    #[test]
    fn from_path_remembers_source_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = crate::test_utils::write_pqr(
            dir.path(),
            "model.pqr",
            &[atom_line(1, "N", "ASP", 4, -0.3, 1.55)],
        );
        let model = AtomNameModel::from_path(&path, 4).unwrap();
        assert_eq!(model.source(), Some("model.pqr"));
        assert_eq!(model.len(), 1);
        assert_eq!(AtomNameModel::from_reader(Cursor::new(""), 4).unwrap().source(), None);
    }

    #[test]
    fn duplicate_atom_names_keep_last_record() {
        let text = [
            atom_line(1, "CA", "ALA", 1, 0.1, 1.9),
            atom_line(2, "CA", "ALA", 1, 0.2, 1.8),
        ]
        .join("\n");
        let mut model = AtomNameModel::from_reader(Cursor::new(text), 1).unwrap();
        assert_eq!(model.len(), 1);
        let applied = model
            .apply(&record(atom_line(9, "CA", "ALA", 1, 0.0, 0.0)), ZERO_CHARGE_RADIUS_SUFFIX)
            .unwrap();
        assert_eq!(&applied.line[54..], "  0.2000 1.8000");
    }
}
