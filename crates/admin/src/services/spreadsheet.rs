//! Spreadsheet export/import of the artwork catalog.
//!
//! Exports a single `작품목록` (artwork list) worksheet with Korean column
//! headers. Import reads the same layout back; rows are matched to existing
//! records by the exact image path string in the `이미지` column.

use calamine::{Data, DataType, Reader, Xlsx};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use thiserror::Error;

use maru_core::{ApprovalStatus, Category, Season, SpaceTag};

use crate::models::artwork::Artwork;

/// Worksheet name.
pub const SHEET_NAME: &str = "작품목록";

/// Column headers, in order.
pub const HEADERS: [&str; 13] = [
    "제목",
    "작가",
    "설명",
    "가격",
    "대여가",
    "분류",
    "계절",
    "공간",
    "가로(cm)",
    "세로(cm)",
    "상태",
    "이미지",
    "등록일",
];

/// Errors that can occur in spreadsheet operations.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// xlsx could not be produced.
    #[error("spreadsheet write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// xlsx could not be read.
    #[error("spreadsheet read error: {0}")]
    Read(String),

    /// The header row does not match the expected layout.
    #[error("unexpected header row; expected the {SHEET_NAME} export layout")]
    HeaderMismatch,

    /// One row is missing required fields or holds unparseable values.
    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// One parsed import row.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkImportRow {
    pub title: String,
    pub artist_name: String,
    pub description: String,
    pub price: Decimal,
    pub rental_price: Option<Decimal>,
    pub category: Category,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    /// Stored image path used to match existing records.
    pub image: Option<String>,
}

/// Interchange value for a moderation status.
const fn status_param(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Pending => "pending",
        ApprovalStatus::Approved => "approved",
        ApprovalStatus::Rejected => "rejected",
    }
}

/// Export the catalog as an xlsx workbook.
///
/// # Errors
///
/// Returns `SpreadsheetError::Write` if the workbook cannot be built.
pub fn export_artworks(artworks: &[Artwork]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, artwork) in artworks.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let row = (i + 1) as u32;

        sheet.write_string(row, 0, &artwork.title)?;
        sheet.write_string(row, 1, &artwork.artist_name)?;
        sheet.write_string(row, 2, &artwork.description)?;
        sheet.write_number(row, 3, artwork.price.to_f64().unwrap_or(0.0))?;
        if let Some(rental) = artwork.rental_price {
            sheet.write_number(row, 4, rental.to_f64().unwrap_or(0.0))?;
        }
        sheet.write_string(row, 5, artwork.category.as_param())?;
        if let Some(season) = artwork.season {
            sheet.write_string(row, 6, season.as_param())?;
        }
        if let Some(space) = artwork.space {
            sheet.write_string(row, 7, space.as_param())?;
        }
        sheet.write_number(row, 8, artwork.width_cm.to_f64().unwrap_or(0.0))?;
        sheet.write_number(row, 9, artwork.height_cm.to_f64().unwrap_or(0.0))?;
        sheet.write_string(row, 10, status_param(artwork.status))?;
        if let Some(image) = artwork.images.first() {
            sheet.write_string(row, 11, image)?;
        }
        sheet.write_string(row, 12, artwork.created_at.format("%Y-%m-%d").to_string())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Read a string cell, trimming and dropping blanks.
fn cell_str(row: &[Data], idx: usize) -> Option<String> {
    row.get(idx)
        .and_then(|c| c.get_string())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Read a numeric cell, accepting numbers or numeric strings.
fn cell_number(row: &[Data], idx: usize) -> Option<Decimal> {
    let cell = row.get(idx)?;
    if let Some(value) = cell.as_f64() {
        // Route through the shortest display form so 65.3 stays 65.3
        // rather than picking up f64 expansion digits.
        return format!("{value}").parse::<Decimal>().ok();
    }
    cell.get_string()?.trim().parse::<Decimal>().ok()
}

/// Parse an uploaded xlsx back into import rows.
///
/// Rows with a blank title column are skipped entirely; rows with required
/// fields missing fail the import with their row number.
///
/// # Errors
///
/// Returns `SpreadsheetError::Read` if the workbook is unreadable,
/// `SpreadsheetError::HeaderMismatch` if the layout differs from the
/// export, and `SpreadsheetError::Row` for unusable rows.
pub fn parse_artworks(bytes: &[u8]) -> Result<Vec<ArtworkImportRow>, SpreadsheetError> {
    let cursor = std::io::Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> =
        Xlsx::new(cursor).map_err(|e| SpreadsheetError::Read(e.to_string()))?;
    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|e| SpreadsheetError::Read(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(SpreadsheetError::HeaderMismatch)?;
    let header_matches = HEADERS
        .iter()
        .enumerate()
        .all(|(i, expected)| header.get(i).and_then(|c| c.get_string()) == Some(*expected));
    if !header_matches {
        return Err(SpreadsheetError::HeaderMismatch);
    }

    let mut parsed = Vec::new();
    for (i, row) in rows.enumerate() {
        // Spreadsheet row number, counting the header.
        let row_number = i + 2;

        let Some(title) = cell_str(row, 0) else {
            // Blank row.
            continue;
        };

        let artist_name = cell_str(row, 1).ok_or_else(|| SpreadsheetError::Row {
            row: row_number,
            reason: "작가 (artist) is required".to_owned(),
        })?;
        let price = cell_number(row, 3).ok_or_else(|| SpreadsheetError::Row {
            row: row_number,
            reason: "가격 (price) is required".to_owned(),
        })?;
        let category = cell_str(row, 5)
            .as_deref()
            .and_then(Category::from_param)
            .ok_or_else(|| SpreadsheetError::Row {
                row: row_number,
                reason: "분류 (category) is missing or unknown".to_owned(),
            })?;
        let width_cm = cell_number(row, 8).ok_or_else(|| SpreadsheetError::Row {
            row: row_number,
            reason: "가로(cm) is required".to_owned(),
        })?;
        let height_cm = cell_number(row, 9).ok_or_else(|| SpreadsheetError::Row {
            row: row_number,
            reason: "세로(cm) is required".to_owned(),
        })?;

        parsed.push(ArtworkImportRow {
            title,
            artist_name,
            description: cell_str(row, 2).unwrap_or_default(),
            price,
            rental_price: cell_number(row, 4),
            category,
            season: cell_str(row, 6).as_deref().and_then(Season::from_param),
            space: cell_str(row, 7).as_deref().and_then(SpaceTag::from_param),
            width_cm,
            height_cm,
            image: cell_str(row, 11),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use maru_core::{ArtworkId, UserId};

    use super::*;

    fn artwork(id: i32, title: &str, image: Option<&str>) -> Artwork {
        Artwork {
            id: ArtworkId::new(id),
            owner_id: UserId::new(1),
            title: title.to_owned(),
            artist_name: "한유진".to_owned(),
            description: "Oil on canvas".to_owned(),
            images: image.map(ToOwned::to_owned).into_iter().collect(),
            price: Decimal::from(1_200_000),
            rental_price: Some(Decimal::from(90_000)),
            category: Category::Painting,
            season: Some(Season::Winter),
            space: Some(SpaceTag::LivingRoom),
            width_cm: Decimal::new(653, 1),
            height_cm: Decimal::new(530, 1),
            status: ApprovalStatus::Approved,
            featured: false,
            featured_rank: None,
            curated: false,
            sold: false,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_then_parse_roundtrip() {
        let artworks = vec![
            artwork(1, "겨울빛", Some("artworks/1760_winter.webp")),
            artwork(2, "아침 안개", None),
        ];

        let bytes = export_artworks(&artworks).unwrap();
        let rows = parse_artworks(&bytes).unwrap();

        assert_eq!(rows.len(), 2);
        let first = rows.first().unwrap();
        assert_eq!(first.title, "겨울빛");
        assert_eq!(first.artist_name, "한유진");
        assert_eq!(first.category, Category::Painting);
        assert_eq!(first.season, Some(Season::Winter));
        assert_eq!(first.image.as_deref(), Some("artworks/1760_winter.webp"));
        assert_eq!(first.price, Decimal::from(1_200_000));
        assert_eq!(first.rental_price, Some(Decimal::from(90_000)));

        let second = rows.get(1).unwrap();
        assert_eq!(second.image, None);
        assert_eq!(second.rental_price, Some(Decimal::from(90_000)));
    }

    #[test]
    fn test_export_empty_catalog() {
        let bytes = export_artworks(&[]).unwrap();
        let rows = parse_artworks(&bytes).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_artworks(b"definitely not an xlsx"),
            Err(SpreadsheetError::Read(_))
        ));
    }

    #[test]
    fn test_width_height_survive_roundtrip() {
        let bytes = export_artworks(&[artwork(1, "호수", None)]).unwrap();
        let rows = parse_artworks(&bytes).unwrap();
        let row = rows.first().unwrap();
        assert_eq!(row.width_cm, Decimal::new(653, 1));
        assert_eq!(row.height_cm, Decimal::new(530, 1));
    }
}
