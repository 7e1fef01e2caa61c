//! Spreadsheet column references

use crate::core::models::ArgumentError;

/// Zero-based index of a column letter reference (`A` is 0, `AA` is 26)
pub fn letter_index(name: &str, letters: &str) -> Result<usize, ArgumentError> {
    let letters = letters.trim();
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ArgumentError::invalid(name, letters, "expected a column letter such as B"));
    }
    let mut index: usize = 0;
    for c in letters.chars() {
        let digit = c.to_ascii_uppercase() as usize - 'A' as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ArgumentError::invalid(name, letters, "column out of range"))?;
    }
    Ok(index - 1)
}

/// Zero-based index of a 1-based column number
pub fn number_index(name: &str, number: &str) -> Result<usize, ArgumentError> {
    match number.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ArgumentError::invalid(name, number, "expected a column number starting at 1")),
    }
}
