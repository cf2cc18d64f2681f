use crate::error::{Result, SnsimError};
use crate::types::parse_numbers;
use nalgebra::Matrix4;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Parses a 4x4 matrix from text
///
/// The sixteen values are read in row-major order, with any mix of
/// whitespace, commas or brackets between them.
///
/// # Errors
///
/// Returns an error if the text does not hold exactly sixteen numbers
pub fn parse_matrix4(text: &str) -> Result<Matrix4<f64>> {
    let values = parse_numbers(text).map_err(SnsimError::InvalidValue)?;
    if values.len() != 16 {
        return Err(SnsimError::InvalidValue(format!(
            "Expected 16 matrix values, found {}",
            values.len()
        )));
    }
    Ok(Matrix4::from_row_slice(&values))
}

/// Reads a 4x4 matrix from a text file
pub fn read_matrix4(path: &Path) -> Result<Matrix4<f64>> {
    let text = fs::read_to_string(path)?;
    parse_matrix4(&text)
}

/// Formats a matrix as four whitespace-separated rows
pub fn format_matrix4(matrix: &Matrix4<f64>) -> String {
    let mut out = String::new();
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{}", v)).collect();
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

/// Writes a matrix in the format [`read_matrix4`] accepts
pub fn write_matrix4(path: &Path, matrix: &Matrix4<f64>) -> Result<()> {
    fs::write(path, format_matrix4(matrix))?;
    Ok(())
}
