//! CSV serialization and download-filename sanitization.
//!
//! The CSV shape deliberately mirrors what spreadsheet imports of the scraped
//! table expect: every cell double-quoted verbatim, cells comma-joined, rows
//! newline-joined. Embedded double quotes are passed through unescaped.

/// Filename used when the caller supplies no (or a blank) name.
pub const DEFAULT_CSV_FILENAME: &str = "google-maps-data.csv";

/// Serializes a row/column structure to CSV.
///
/// Each cell is wrapped in double quotes as-is; a cell containing a comma is
/// therefore preserved literally. Embedded quotes are not escaped.
#[must_use]
pub fn rows_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{cell}\""))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns a user-supplied name into a safe `.csv` filename.
///
/// Blank input yields [`DEFAULT_CSV_FILENAME`]. Otherwise every
/// non-alphanumeric character is replaced with `_`, the result is lowercased,
/// and `.csv` is appended.
#[must_use]
pub fn sanitize_filename(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_CSV_FILENAME.to_owned();
    }
    let cleaned: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.csv", cleaned.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_wraps_every_cell_in_quotes() {
        let rows = vec![
            vec!["Title".to_owned(), "Address".to_owned()],
            vec!["Cafe One".to_owned(), "123 Main St, Suite 4".to_owned()],
        ];
        let csv = rows_to_csv(&rows);
        assert_eq!(
            csv,
            "\"Title\",\"Address\"\n\"Cafe One\",\"123 Main St, Suite 4\""
        );
    }

    #[test]
    fn csv_cell_with_comma_stays_one_cell() {
        let rows = vec![vec!["a,b".to_owned()]];
        assert_eq!(rows_to_csv(&rows), "\"a,b\"");
    }

    #[test]
    fn csv_embedded_quotes_are_not_escaped() {
        let rows = vec![vec!["say \"hi\"".to_owned()]];
        assert_eq!(rows_to_csv(&rows), "\"say \"hi\"\"");
    }

    #[test]
    fn csv_of_no_rows_is_empty() {
        assert_eq!(rows_to_csv(&[]), "");
    }

    #[test]
    fn blank_filename_falls_back_to_default() {
        assert_eq!(sanitize_filename(""), DEFAULT_CSV_FILENAME);
        assert_eq!(sanitize_filename("   "), DEFAULT_CSV_FILENAME);
    }

    #[test]
    fn filename_is_lowercased_and_underscored() {
        assert_eq!(sanitize_filename("My Report!"), "my_report_.csv");
    }

    #[test]
    fn alphanumeric_filename_passes_through() {
        assert_eq!(sanitize_filename("listings2024"), "listings2024.csv");
    }
}
