//! Parsing of user-provided row numbers for file view selections.
//!
//! Rows are numbered from 1 in `status` output. [`IndexParser`] turns input like
//! `1 3-5,8` into a sorted, de-duplicated list and validates it against the number
//! of rows on screen.
//!
//! # Supported Formats
//! - **Single rows**: `1`, `3`
//! - **Space or comma separated**: `1 3 5`, `1,3,5`
//! - **Ranges**: `3-6` (expands to 3,4,5,6)
//! - **Mixed**: `1 3-5,8`

use crate::core::error::{NavigatorError, Result};
use std::collections::BTreeSet;

pub struct IndexParser;

impl IndexParser {
    /// Parse 1-based row numbers
    pub fn parse(input: &str) -> Result<Vec<usize>> {
        let mut rows = BTreeSet::new();

        for part in input.split([' ', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    if end.contains('-') {
                        return Err(NavigatorError::invalid_range_format(part));
                    }
                    let start = parse_number(start, |s| NavigatorError::invalid_range_number(s))?;
                    let end = parse_number(end, |s| NavigatorError::invalid_range_number(s))?;
                    if start > end {
                        return Err(NavigatorError::invalid_range_order(start, end));
                    }
                    rows.extend(start..=end);
                }
                None => {
                    rows.insert(parse_number(part, |s| NavigatorError::invalid_number(s))?);
                }
            }
        }

        Ok(rows.into_iter().collect())
    }

    /// Check 1-based rows against the number of rows available
    pub fn validate(rows: &[usize], row_count: usize) -> Result<()> {
        if row_count == 0 && !rows.is_empty() {
            return Err(NavigatorError::NoFilesAvailable);
        }
        for &row in rows {
            if row == 0 {
                return Err(NavigatorError::ZeroIndex);
            }
            if row > row_count {
                return Err(NavigatorError::index_out_of_range(row, row_count));
            }
        }
        Ok(())
    }

    /// Parse command line arguments into validated zero-based row offsets.
    ///
    /// No arguments means no selection, which callers may widen with `--all-if-empty`.
    pub fn parse_args(args: &[String], row_count: usize) -> Result<Vec<usize>> {
        let rows = Self::parse(&args.join(" "))?;
        Self::validate(&rows, row_count)?;
        Ok(rows.into_iter().map(|row| row - 1).collect())
    }
}

fn parse_number(text: &str, on_error: fn(String) -> NavigatorError) -> Result<usize> {
    text.trim()
        .parse()
        .map_err(|_| on_error(text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_format() -> Result<()> {
        assert_eq!(IndexParser::parse("1 3-5,8")?, vec![1, 3, 4, 5, 8]);
        Ok(())
    }

    #[test]
    fn test_parse_duplicates_removed() -> Result<()> {
        assert_eq!(IndexParser::parse("2,1,2 1-2")?, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn test_parse_empty_input() -> Result<()> {
        assert!(IndexParser::parse("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = IndexParser::parse("abc").unwrap_err();
        assert!(err.to_string().contains("Invalid number: 'abc'"));
    }

    #[test]
    fn test_parse_reversed_range() {
        let err = IndexParser::parse("5-3").unwrap_err();
        assert!(err.to_string().contains("start (5) must be <= end (3)"));
    }

    #[test]
    fn test_parse_malformed_range() {
        let err = IndexParser::parse("1-2-3").unwrap_err();
        assert!(err.to_string().contains("Invalid range format"));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(IndexParser::validate(&[1, 5], 5).is_ok());
        assert!(IndexParser::validate(&[], 0).is_ok());
        assert!(IndexParser::validate(&[6], 5)
            .unwrap_err()
            .to_string()
            .contains("Index 6 is out of range (1-5 available)"));
        assert!(matches!(
            IndexParser::validate(&[0], 5),
            Err(NavigatorError::ZeroIndex)
        ));
        assert!(matches!(
            IndexParser::validate(&[1], 0),
            Err(NavigatorError::NoFilesAvailable)
        ));
    }

    #[test]
    fn test_parse_args_zero_based() -> Result<()> {
        let args = vec!["1".to_string(), "3-4".to_string()];
        assert_eq!(IndexParser::parse_args(&args, 4)?, vec![0, 2, 3]);
        assert!(IndexParser::parse_args(&[], 4)?.is_empty());
        Ok(())
    }
}
