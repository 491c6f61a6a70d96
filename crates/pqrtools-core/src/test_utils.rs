use std::fs;
use std::path::{Path, PathBuf};

/// Formats a fixed-column PQR `ATOM` line.
pub fn atom_line(
    serial: usize,
    name: &str,
    res_name: &str,
    res_num: isize,
    charge: f64,
    radius: f64,
) -> String {
    let name = if name.len() < 4 {
        format!(" {:<3}", name)
    } else {
        name.to_string()
    };
    format!(
        "ATOM  {:>5} {:<4} {:<3}  {:>4}    {:>8.3}{:>8.3}{:>8.3}{:>8.4}{:>7.4}",
        serial, name, res_name, res_num, 10.0, 20.0, 30.0, charge, radius
    )
}

/// Same as [`atom_line`] with a `HETATM` record type.
pub fn hetatm_line(
    serial: usize,
    name: &str,
    res_name: &str,
    res_num: isize,
    charge: f64,
    radius: f64,
) -> String {
    atom_line(serial, name, res_name, res_num, charge, radius).replacen("ATOM  ", "HETATM", 1)
}

pub fn write_pqr(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
