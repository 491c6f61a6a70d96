use super::pqr::{AtomRecord, PqrError};

/// A maximal contiguous run of records sharing one residue number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueRun {
    /// Zero-based ordinal of the first record of the run among all records of the file.
    pub offset: usize,
    pub records: Vec<AtomRecord>,
}

impl ResidueRun {
    pub fn residue_number(&self) -> isize {
        self.records[0].residue_number()
    }

    /// Residue name as declared by the first record of the run.
    pub fn residue_name(&self) -> &str {
        self.records[0].residue_name()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Groups a record stream into residue runs.
///
/// Boundaries are detected only by a change of residue number between two
/// consecutive records; residue names are never consulted, and a number that
/// reappears later starts a new run. Lines that are not records are expected
/// to have been filtered out already and therefore never end a run.
pub struct ResidueRuns<I> {
    records: I,
    pending: Option<AtomRecord>,
    seen: usize,
    failed: bool,
}

impl<I> ResidueRuns<I>
where
    I: Iterator<Item = Result<AtomRecord, PqrError>>,
{
    pub fn new(records: I) -> Self {
        Self {
            records,
            pending: None,
            seen: 0,
            failed: false,
        }
    }

    /// First run carrying `residue_number`, reading no further than needed to close it.
    pub fn find_residue(mut self, residue_number: isize) -> Result<Option<ResidueRun>, PqrError> {
        for run in self.by_ref() {
            let run = run?;
            if run.residue_number() == residue_number {
                return Ok(Some(run));
            }
        }
        Ok(None)
    }
}

impl<I> Iterator for ResidueRuns<I>
where
    I: Iterator<Item = Result<AtomRecord, PqrError>>,
{
    type Item = Result<ResidueRun, PqrError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let first = match self.pending.take() {
            Some(record) => record,
            None => match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            },
        };

        let number = first.residue_number();
        let offset = self.seen;
        self.seen += 1;
        let mut records = vec![first];

        for item in self.records.by_ref() {
            let record = match item {
                Ok(record) => record,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };
            if record.residue_number() != number {
                self.pending = Some(record);
                break;
            }
            self.seen += 1;
            records.push(record);
        }

        Some(Ok(ResidueRun { offset, records }))
    }
}
