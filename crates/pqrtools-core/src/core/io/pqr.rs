use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns holding the atom name.
pub const ATOM_NAME_COLUMNS: Range<usize> = 11..17;
/// Columns holding the three-letter residue name.
pub const RESIDUE_NAME_COLUMNS: Range<usize> = 17..20;
/// Columns holding the residue sequence number.
pub const RESIDUE_NUMBER_COLUMNS: Range<usize> = 21..26;
/// First column of the charge field. Everything before it is the immutable prefix.
pub const CHARGE_COLUMN: usize = 54;
/// First column after the charge field (radius and any trailing fields).
pub const RADIUS_COLUMN: usize = 62;
/// Replacement for the `[54, 62)` charge span when zeroing.
pub const ZERO_CHARGE_FIELD: &str = "  0.0000";
/// Charge and radius suffix written for atoms missing from a charge model.
pub const ZERO_CHARGE_RADIUS_SUFFIX: &str = "  0.0000 0.0000";

#[derive(Debug, Error)]
pub enum PqrError {
    #[error("PQR file '{path}' does not exist", path = path.display())]
    FileNotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PqrParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PqrParseErrorKind {
    #[error("Invalid residue number in columns {columns} (value: '{value}')")]
    InvalidResidueNumber { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (need {required} chars, found {found})")]
    LineTooShort { required: usize, found: usize },
    #[error("Column {column} falls inside a multi-byte character")]
    SplitCharacter { column: usize },
}

/// Column boundaries every record is sliced at.
const COLUMN_BOUNDARIES: [usize; 7] = [11, 17, 20, 21, 26, CHARGE_COLUMN, RADIUS_COLUMN];

fn check_boundaries(content: &str, line_number: usize) -> Result<(), PqrError> {
    match COLUMN_BOUNDARIES
        .iter()
        .find(|&&column| column < content.len() && !content.is_char_boundary(column))
    {
        Some(&column) => Err(PqrError::Parse {
            line: line_number,
            kind: PqrParseErrorKind::SplitCharacter { column },
        }),
        None => Ok(()),
    }
}

/// `content` with the `[54, 62)` span replaced by `  0.0000` and columns from
/// 62 on kept. Only the two column splits are read.
fn zero_charge_span(content: &str, line_number: usize) -> Result<String, PqrError> {
    check_boundaries(content, line_number)?;
    let prefix = content.get(..CHARGE_COLUMN).ok_or(PqrError::Parse {
        line: line_number,
        kind: PqrParseErrorKind::LineTooShort {
            required: CHARGE_COLUMN,
            found: content.len(),
        },
    })?;
    let trailer = content.get(RADIUS_COLUMN..).unwrap_or("");
    let mut line = String::with_capacity(prefix.len() + ZERO_CHARGE_FIELD.len() + trailer.len());
    line.push_str(prefix);
    line.push_str(ZERO_CHARGE_FIELD);
    line.push_str(trailer);
    Ok(line)
}

fn slice_and_trim(line: &str, columns: Range<usize>) -> &str {
    line.get(columns).unwrap_or("").trim()
}

/// Record type of a classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Atom,
    HetAtom,
}

impl RecordKind {
    /// Classifies a raw line. Anything that does not start with `ATOM` or
    /// `HETATM` is not a record.
    pub fn classify(line: &str) -> Option<Self> {
        if line.starts_with("ATOM") {
            Some(RecordKind::Atom)
        } else if line.starts_with("HETATM") {
            Some(RecordKind::HetAtom)
        } else {
            None
        }
    }
}

/// A single `ATOM`/`HETATM` line with its residue number already parsed.
///
/// The original text is kept verbatim; every other field is read lazily from
/// fixed columns so that output can always reproduce the source prefix byte
/// for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    line_number: usize,
    kind: RecordKind,
    residue_number: isize,
    content: String,
}

impl AtomRecord {
    /// Parses a line already classified as `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PqrError::Parse`] if the line does not reach the residue
    /// number columns, if that field is not an integer, or if a column
    /// boundary splits a multi-byte character.
    pub fn parse(kind: RecordKind, content: String, line_number: usize) -> Result<Self, PqrError> {
        check_boundaries(&content, line_number)?;
        if content.len() < RESIDUE_NUMBER_COLUMNS.end {
            return Err(PqrError::Parse {
                line: line_number,
                kind: PqrParseErrorKind::LineTooShort {
                    required: RESIDUE_NUMBER_COLUMNS.end,
                    found: content.len(),
                },
            });
        }

        let res_num_str = slice_and_trim(&content, RESIDUE_NUMBER_COLUMNS);
        let residue_number: isize = res_num_str.parse().map_err(|_| PqrError::Parse {
            line: line_number,
            kind: PqrParseErrorKind::InvalidResidueNumber {
                columns: "22-26".into(),
                value: res_num_str.into(),
            },
        })?;

        Ok(Self {
            line_number,
            kind,
            residue_number,
            content,
        })
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn residue_number(&self) -> isize {
        self.residue_number
    }

    pub fn residue_name(&self) -> &str {
        slice_and_trim(&self.content, RESIDUE_NAME_COLUMNS)
    }

    /// Atom name with surrounding whitespace removed.
    pub fn atom_name(&self) -> &str {
        slice_and_trim(&self.content, ATOM_NAME_COLUMNS)
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_line(self) -> String {
        self.content
    }

    fn too_short(&self, required: usize) -> PqrError {
        PqrError::Parse {
            line: self.line_number,
            kind: PqrParseErrorKind::LineTooShort {
                required,
                found: self.content.len(),
            },
        }
    }

    /// Columns `[0, 54)`: record type, serial, names, residue number and coordinates.
    pub fn prefix(&self) -> Result<&str, PqrError> {
        self.content
            .get(..CHARGE_COLUMN)
            .ok_or_else(|| self.too_short(CHARGE_COLUMN))
    }

    /// Columns `[54, ..)`: charge, radius and anything trailing.
    pub fn charge_radius_suffix(&self) -> Result<&str, PqrError> {
        self.content
            .get(CHARGE_COLUMN..)
            .ok_or_else(|| self.too_short(CHARGE_COLUMN))
    }

    /// The prefix of this record followed by `suffix`.
    pub fn with_suffix(&self, suffix: &str) -> Result<String, PqrError> {
        let prefix = self.prefix()?;
        let mut line = String::with_capacity(prefix.len() + suffix.len());
        line.push_str(prefix);
        line.push_str(suffix);
        Ok(line)
    }
}

/// A line tagged with its record kind, with no field parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line_number: usize,
    pub kind: Option<RecordKind>, // None for REMARK, TER, END and the like
    pub content: String,
}

impl ClassifiedLine {
    /// This line with the `[54, 62)` charge span replaced by `  0.0000`.
    ///
    /// Columns from 62 on are kept as they are; a line that ends inside the
    /// charge span simply has no trailer.
    pub fn with_zero_charge(&self) -> Result<String, PqrError> {
        zero_charge_span(&self.content, self.line_number)
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PqrLine {
    Atom(AtomRecord),
    Other(String),
}

/// Lazy, line-by-line reader that classifies every line of a PQR stream.
pub struct PqrReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> PqrReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Adapts the reader to yield lines classified by record kind only. The
    /// residue number and other columns are never read.
    pub fn classified(mut self) -> impl Iterator<Item = Result<ClassifiedLine, PqrError>> {
        std::iter::from_fn(move || self.next_classified())
    }

    fn next_classified(&mut self) -> Option<Result<ClassifiedLine, PqrError>> {
        let content = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e.into())),
        };
        self.line_number += 1;
        Some(Ok(ClassifiedLine {
            line_number: self.line_number,
            kind: RecordKind::classify(&content),
            content,
        }))
    }

    /// Adapts the reader to yield only `ATOM`/`HETATM` records.
    pub fn records(self) -> impl Iterator<Item = Result<AtomRecord, PqrError>> {
        self.filter_map(|item| match item {
            Ok(PqrLine::Atom(record)) => Some(Ok(record)),
            Ok(PqrLine::Other(_)) => None,
            Err(e) => Some(Err(e)),
        })
    }
}

impl PqrReader<BufReader<File>> {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`PqrError::FileNotFound`] when the path does not exist and
    /// [`PqrError::Io`] when it cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PqrError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PqrError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for PqrReader<R> {
    type Item = Result<PqrLine, PqrError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.next_classified()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };

        Some(match line.kind {
            Some(kind) => AtomRecord::parse(kind, line.content, line.line_number).map(PqrLine::Atom),
            None => Ok(PqrLine::Other(line.content)),
        })
    }
}
