// src/sheets/range.rs
//! A1-notation helpers: sheet titles in configured ranges and the ranges
//! built for the read (A:H) and status write (F) calls.

/// Tab used when neither the configured range nor a GID names one.
pub const DEFAULT_SHEET_TITLE: &str = "Página2";

/// First data row; row 1 holds the headers.
pub const HEADER_OFFSET: u32 = 2;

/// Column holding the status code.
pub const STATUS_COLUMN: &str = "F";

/// Extract the sheet title from `"Name!A2:H"`. Returns `None` when the range
/// carries no `!` or the title part is empty.
pub fn title_from_range(range: &str) -> Option<String> {
    let (title, _) = range.split_once('!')?;
    let title = title.strip_prefix('\'').unwrap_or(title);
    let title = title.trim_end_matches('\'');
    if title.is_empty() {
        None
    } else {
        Some(title.replace("''", "'"))
    }
}

/// Quote a title for use in a range when it contains anything other than
/// ASCII alphanumerics and underscores.
pub fn quote_title(title: &str) -> String {
    if !title.is_empty() && title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        title.to_string()
    } else {
        format!("'{}'", title.replace('\'', "''"))
    }
}

/// Full order range for a tab, columns A..H from the first data row.
pub fn orders_range(title: &str) -> String {
    format!("{}!A{}:H", quote_title(title), HEADER_OFFSET)
}

/// Single-cell range of the status code in `row_number`.
pub fn status_cell_range(title: &str, row_number: u32) -> String {
    format!(
        "{}!{col}{row}:{col}{row}",
        quote_title(title),
        col = STATUS_COLUMN,
        row = row_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_range() {
        assert_eq!(title_from_range("Orders!A2:H").as_deref(), Some("Orders"));
        assert_eq!(title_from_range("'Página 2'!A2:H").as_deref(), Some("Página 2"));
        assert_eq!(title_from_range("'It''s'!A1").as_deref(), Some("It's"));
        assert_eq!(title_from_range("A!B!C").as_deref(), Some("A"));
        assert_eq!(title_from_range("A2:H"), None);
        assert_eq!(title_from_range("!A2:H"), None);
        assert_eq!(title_from_range(""), None);
    }

    #[test]
    fn test_quote_title() {
        assert_eq!(quote_title("Orders"), "Orders");
        assert_eq!(quote_title("Sheet_1"), "Sheet_1");
        assert_eq!(quote_title("Página2"), "'Página2'");
        assert_eq!(quote_title("My Tab"), "'My Tab'");
        assert_eq!(quote_title("It's"), "'It''s'");
    }

    #[test]
    fn test_built_ranges() {
        assert_eq!(orders_range("Orders"), "Orders!A2:H");
        assert_eq!(orders_range("My Tab"), "'My Tab'!A2:H");
        assert_eq!(status_cell_range("Orders", 7), "Orders!F7:F7");
        assert_eq!(status_cell_range("Página2", 12), "'Página2'!F12:F12");
    }
}
