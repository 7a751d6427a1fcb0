//! Conversion between the accepted date/time spellings and an in-memory
//! instant.

use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{CommandError, Result};

/// The accepted input spellings, tried in order.
///
/// The first entry doubles as the storage spelling, so a persisted value
/// always parses on the first attempt no matter which spelling the user
/// originally typed.
const INPUT_FORMATS: [&[BorrowedFormatItem<'static>]; 4] = [
    format_description!("[day padding:none]/[month]/[year] [hour][minute]"),
    format_description!("[day padding:none]-[month]-[year] [hour][minute]"),
    format_description!("[year]/[month]/[day padding:none] [hour][minute]"),
    format_description!("[year]-[month]-[day padding:none] [hour][minute]"),
];

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:long] [month repr:long] [day padding:none] [year] at [hour repr:12 padding:none]:[minute] [period]"
);

/// Parse `text` against the accepted spellings, returning the first match.
///
/// The input is trimmed first; the spellings are tried in a fixed order.
///
/// # Errors
/// Returns [`CommandError::InvalidDateTime`] when no spelling matches.
pub fn parse(text: &str) -> Result<PrimitiveDateTime> {
    let trimmed = text.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(trimmed, format).ok())
        .ok_or(CommandError::InvalidDateTime)
}

/// Render `instant` for humans, e.g. `Tuesday February 25 2025 at 4:00 PM`.
#[must_use]
pub fn format_display(instant: PrimitiveDateTime) -> String {
    instant
        .format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| instant.to_string())
}

/// Render `instant` in the storage spelling, e.g. `25/02/2025 1600`.
///
/// Guarantees `parse(format_storage(x)) == x`.
#[must_use]
pub fn format_storage(instant: PrimitiveDateTime) -> String {
    instant
        .format(INPUT_FORMATS[0])
        .unwrap_or_else(|_| instant.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_accepted_spelling_parses_to_the_same_instant() -> Result<()> {
        let expected = parse("25/02/2025 1600")?;
        for spelling in [
            "25-02-2025 1600",
            "2025/02/25 1600",
            "2025-02-25 1600",
            "  25/02/2025 1600  ",
        ] {
            assert_eq!(parse(spelling)?, expected, "spelling {spelling:?}");
        }
        Ok(())
    }

    #[test]
    fn unpadded_day_is_accepted() -> Result<()> {
        let slash = parse("5/02/2025 0900")?;
        let dash = parse("2025-02-5 0900")?;
        assert_eq!(slash, dash);
        Ok(())
    }

    #[test]
    fn rejects_text_matching_no_spelling() {
        for bad in ["tomorrow", "25/02/2025", "25.02.2025 1600", "", "1600 25/02/2025"] {
            assert_eq!(parse(bad), Err(CommandError::InvalidDateTime), "input {bad:?}");
        }
    }

    #[test]
    fn display_spelling_names_weekday_month_and_half_day() -> Result<()> {
        let instant = parse("25/02/2025 1600")?;
        assert_eq!(format_display(instant), "Tuesday February 25 2025 at 4:00 PM");

        let morning = parse("5/02/2025 0905")?;
        assert_eq!(format_display(morning), "Wednesday February 5 2025 at 9:05 AM");
        Ok(())
    }

    #[test]
    fn storage_spelling_round_trips_regardless_of_input_spelling() -> Result<()> {
        for spelling in ["25/02/2025 1600", "2025-02-25 1600", "5-02-2025 0030"] {
            let instant = parse(spelling)?;
            assert_eq!(parse(&format_storage(instant))?, instant, "spelling {spelling:?}");
        }
        assert_eq!(format_storage(parse("2025-02-25 1600")?), "25/02/2025 1600");
        Ok(())
    }
}
