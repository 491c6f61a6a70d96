use crate::core::io::pqr::{PqrError, PqrReader};
use crate::core::io::runs::{ResidueRun, ResidueRuns};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueEntry {
    pub name: String,  // Residue name of the first record in the run (e.g., "ASP")
    pub number: isize, // Residue number shared by the run
    pub offset: usize, // Zero-based ordinal of the first record, counted over the whole file
}

impl From<&ResidueRun> for ResidueEntry {
    fn from(run: &ResidueRun) -> Self {
        Self {
            name: run.residue_name().to_string(),
            number: run.residue_number(),
            offset: run.offset,
        }
    }
}

/// Ordered list of the residue runs found in one PQR file.
///
/// Atom offsets count every `ATOM`/`HETATM` record from the start of the file,
/// regardless of chain or residue numbering, which is how APBS numbers atoms in
/// its per-atom output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueIndex {
    entries: Vec<ResidueEntry>,
}

impl ResidueIndex {
    pub fn from_reader(reader: impl BufRead) -> Result<Self, PqrError> {
        Self::from_lines(PqrReader::new(reader))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PqrError> {
        Self::from_lines(PqrReader::open(path)?)
    }

    fn from_lines<R: BufRead>(lines: PqrReader<R>) -> Result<Self, PqrError> {
        let entries = ResidueRuns::new(lines.records())
            .map(|run| run.map(|run| ResidueEntry::from(&run)))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ResidueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResidueEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given residue number.
    pub fn find(&self, number: isize) -> Option<&ResidueEntry> {
        self.entries.iter().find(|e| e.number == number)
    }
}

impl<'a> IntoIterator for &'a ResidueIndex {
    type Item = &'a ResidueEntry;
    type IntoIter = std::slice::Iter<'a, ResidueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
