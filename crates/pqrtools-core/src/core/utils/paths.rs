use std::path::{Path, PathBuf};

/// File name component of `path` for use in REMARK lines.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Inserts `tag` before the extension of `input`'s file name: `protein.pqr`
/// becomes `protein.{tag}.pqr`, and `protein` becomes `protein.{tag}`.
///
/// The derived file lives in `output_dir` when given, otherwise next to `input`.
pub fn tagged_path(input: &Path, tag: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}.{}.{}", stem, tag, ext.to_string_lossy()),
        None => format!("{}.{}", stem, tag),
    };

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Output path for a single extracted or transplanted residue.
pub fn residue_path(input: &Path, residue_number: isize, output_dir: Option<&Path>) -> PathBuf {
    tagged_path(input, &residue_number.to_string(), output_dir)
}
