use crate::config::ColumnNames;
use crate::error::EngineError;
use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use shared::models::UsageRecord;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek};
use std::path::Path;

// Cell parsing for spreadsheet exports: blank and `NaN`-style cells are
// treated as missing, numbers may carry `,` thousands separators.
pub mod sheet_format {
    use std::str::FromStr;

    const MISSING_MARKERS: [&str; 6] = ["", "-", "nan", "NaN", "#N/A", "N/A"];

    pub fn is_missing(s: &str) -> bool {
        MISSING_MARKERS.contains(&s.trim())
    }

    pub fn parse_text(s: &str) -> Option<String> {
        if is_missing(s) {
            None
        } else {
            Some(s.trim().to_string())
        }
    }

    // "1,234.5" -> Some(1234.5), "" -> None
    pub fn parse_number(s: &str) -> Result<Option<f64>, String> {
        if is_missing(s) {
            return Ok(None);
        }
        let normalized = s.trim().replace(',', "");
        let value = f64::from_str(&normalized).map_err(|e| format!("Failed to parse number '{}': {}", s, e))?;
        if value.is_nan() {
            return Ok(None);
        }
        if value.is_infinite() {
            return Err(format!("Failed to parse number '{}': value is not finite", s));
        }
        Ok(Some(value))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_number_simple() {
            assert_eq!(parse_number("12").unwrap(), Some(12.0));
            assert_eq!(parse_number(" 6.5 ").unwrap(), Some(6.5));
        }

        #[test]
        fn test_parse_number_with_thousands() {
            assert_eq!(parse_number("1,234.5").unwrap(), Some(1234.5));
        }

        #[test]
        fn test_parse_number_missing_markers() {
            assert_eq!(parse_number("").unwrap(), None);
            assert_eq!(parse_number("  ").unwrap(), None);
            assert_eq!(parse_number("NaN").unwrap(), None);
            assert_eq!(parse_number("#N/A").unwrap(), None);
        }

        #[test]
        fn test_parse_number_invalid() {
            assert!(parse_number("abc").is_err());
            assert!(parse_number("inf").is_err());
        }

        #[test]
        fn test_parse_text_trims() {
            assert_eq!(parse_text(" 中国 "), Some("中国".to_string()));
            assert_eq!(parse_text("-"), None);
        }
    }
}

/// Header positions of the required columns.
struct ColumnIndex {
    product_code: usize,
    short_name: usize,
    estimated_sheets: usize,
    headcount: usize,
    sheets_per_pack: usize,
    packs_per_case: usize,
    country_of_origin: usize,
    product_name: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[&str], columns: &ColumnNames) -> Result<Self, EngineError> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name.trim());

        let missing: Vec<String> = columns
            .required()
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::MissingColumns { columns: missing });
        }

        let at = |name: &str| position(name).unwrap_or_default();
        Ok(ColumnIndex {
            product_code: at(columns.product_code.as_str()),
            short_name: at(columns.short_name.as_str()),
            estimated_sheets: at(columns.estimated_sheets.as_str()),
            headcount: at(columns.headcount.as_str()),
            sheets_per_pack: at(columns.sheets_per_pack.as_str()),
            packs_per_case: at(columns.packs_per_case.as_str()),
            country_of_origin: at(columns.country_of_origin.as_str()),
            product_name: at(columns.product_name.as_str()),
        })
    }

    /// Builds one record from a row's cells; `line` is the 1-based sheet row.
    fn record(&self, cells: &[&str], line: u64, columns: &ColumnNames) -> Result<UsageRecord, EngineError> {
        let cell = |pos: usize| cells.get(pos).copied().unwrap_or_default();
        let number = |pos: usize, name: &str| -> Result<Option<f64>, EngineError> {
            sheet_format::parse_number(cell(pos))
                .map_err(|e| EngineError::Load(format!("Error parsing '{}' at line {}: {}", name, line, e)))
        };
        let text = |pos: usize| sheet_format::parse_text(cell(pos));

        Ok(UsageRecord {
            product_code: text(self.product_code),
            short_name: text(self.short_name),
            estimated_sheets: number(self.estimated_sheets, columns.estimated_sheets.as_str())?,
            headcount: number(self.headcount, columns.headcount.as_str())?,
            sheets_per_pack: number(self.sheets_per_pack, columns.sheets_per_pack.as_str())?,
            packs_per_case: number(self.packs_per_case, columns.packs_per_case.as_str())?,
            country_of_origin: text(self.country_of_origin),
            product_name: text(self.product_name),
        })
    }
}

fn open_source(path: &Path) -> Result<File, EngineError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EngineError::SourceNotFound { path: path.to_path_buf() },
        _ => EngineError::Load(format!("Failed to open usage file '{}': {}", path.display(), e)),
    })
}

pub struct UsageSheetParser;

impl UsageSheetParser {
    // Header: 商品コード,略符,推定使用枚数,事業所人数,枚数,入数,原産国,商品名
    // Example Row: A-100,新エルナ,134.2,20,200,35,日本,新エルナ ハンドタオル 200枚
    pub fn load_records_from_path(
        path: &Path,
        delimiter: u8,
        columns: &ColumnNames,
    ) -> Result<Vec<UsageRecord>, EngineError> {
        let file = open_source(path)?;
        Self::read_records(BufReader::new(file), delimiter, columns)
    }

    pub fn read_records<R: Read>(
        reader: R,
        delimiter: u8,
        columns: &ColumnNames,
    ) -> Result<Vec<UsageRecord>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let header_cells: Vec<&str> = headers.iter().collect();
        let index = ColumnIndex::resolve(&header_cells, columns)?;

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
            let cells: Vec<&str> = record.iter().collect();
            records.push(index.record(&cells, line, columns)?);
        }
        tracing::debug!(rows = records.len(), "Parsed usage sheet");
        Ok(records)
    }

    /// Reads the usage table from an `.xlsx` workbook. The first worksheet is
    /// used unless `sheet` names another one.
    pub fn load_records_from_workbook(
        path: &Path,
        sheet: Option<&str>,
        columns: &ColumnNames,
    ) -> Result<Vec<UsageRecord>, EngineError> {
        let file = open_source(path)?;
        Self::read_workbook(BufReader::new(file), sheet, columns)
    }

    pub fn read_workbook<RS: Read + Seek>(
        reader: RS,
        sheet: Option<&str>,
        columns: &ColumnNames,
    ) -> Result<Vec<UsageRecord>, EngineError> {
        let mut workbook: Xlsx<RS> = Xlsx::new(reader)?;
        let range = match sheet {
            Some(name) => workbook.worksheet_range(name)?,
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| EngineError::Load("Workbook has no worksheets".to_string()))??,
        };

        let first_row = range.start().map(|(row, _)| u64::from(row)).unwrap_or_default();
        let mut rows = range.rows().map(|row| row.iter().map(Data::to_string).collect::<Vec<String>>());

        let headers = rows.next().unwrap_or_default();
        let header_cells: Vec<&str> = headers.iter().map(String::as_str).collect();
        let index = ColumnIndex::resolve(&header_cells, columns)?;

        let mut records = Vec::new();
        for (idx, row) in rows.enumerate() {
            // Blank rows are skipped, matching the delimited reader.
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            let line = first_row + idx as u64 + 2;
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            records.push(index.record(&cells, line, columns)?);
        }
        tracing::debug!(rows = records.len(), "Parsed usage workbook");
        Ok(records)
    }
}


#[cfg(test)]
mod tests {
    use super::workbook_fixture::{self, create_test_workbook};
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const HEADER: &str = "商品コード,略符,推定使用枚数,事業所人数,枚数,入数,原産国,商品名";

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    fn load(content: &str) -> Result<Vec<UsageRecord>, EngineError> {
        let tmp_file = create_test_csv(content);
        UsageSheetParser::load_records_from_path(tmp_file.path(), b',', &ColumnNames::default())
    }

    #[test]
    fn test_load_records_valid_data() {
        let content = format!(
            "{}\nA-100,新エルナ,134.2,20,200,35,日本,新エルナ 200枚\nB-200,ソフト,\"1,000\",40,200,40,中国,ソフトタオル",
            HEADER
        );
        let records = load(&content).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].product_code.as_deref(), Some("A-100"));
        assert_eq!(records[0].short_name.as_deref(), Some("新エルナ"));
        assert_eq!(records[0].estimated_sheets, Some(134.2));
        assert_eq!(records[0].headcount, Some(20.0));
        assert_eq!(records[0].sheets_per_pack, Some(200.0));
        assert_eq!(records[0].packs_per_case, Some(35.0));
        assert_eq!(records[0].country_of_origin.as_deref(), Some("日本"));

        assert_eq!(records[1].estimated_sheets, Some(1000.0));
        assert_eq!(records[1].product_name.as_deref(), Some("ソフトタオル"));
    }

    #[test]
    fn test_headers_are_trimmed_and_reordered() {
        let content = " 商品名 , 略符,推定使用枚数 ,事業所人数,枚数,入数,原産国,商品コード\nソフトタオル,ソフト,100,10,200,40,中国,B-200";
        let records = load(content).unwrap();
        assert_eq!(records[0].short_name.as_deref(), Some("ソフト"));
        assert_eq!(records[0].product_code.as_deref(), Some("B-200"));
        assert_eq!(records[0].product_name.as_deref(), Some("ソフトタオル"));
    }

    #[test]
    fn test_blank_cells_are_missing() {
        let content = format!("{}\nA-100,新エルナ,,20,200,35,,", HEADER);
        let records = load(&content).unwrap();
        assert_eq!(records[0].estimated_sheets, None);
        assert_eq!(records[0].country_of_origin, None);
        assert_eq!(records[0].product_name, None);
    }

    #[test]
    fn test_missing_column_is_reported_by_name() {
        let content = "商品コード,略符,推定使用枚数,事業所人数,枚数,原産国,商品名\nA-100,新エルナ,134.2,20,200,日本,x";
        match load(content) {
            Err(EngineError::MissingColumns { columns }) => assert_eq!(columns, vec!["入数".to_string()]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let result = UsageSheetParser::load_records_from_path(
            Path::new("definitely/not/here.csv"),
            b',',
            &ColumnNames::default(),
        );
        assert!(matches!(result, Err(EngineError::SourceNotFound { .. })));
    }

    #[test]
    fn test_invalid_number_reports_column_and_line() {
        let content = format!("{}\nA-100,新エルナ,134.2,20,200,35,日本,x\nB-200,ソフト,lots,20,200,40,中国,y", HEADER);
        let err = load(&content).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, EngineError::Load(_)));
        assert!(msg.contains("'推定使用枚数' at line 3"), "{}", msg);
        assert!(msg.contains("Failed to parse number 'lots'"), "{}", msg);
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let content = format!("{}\nA-100,新エルナ,134.2", HEADER);
        let err = load(&content).unwrap_err();
        assert!(matches!(err, EngineError::Load(ref msg) if msg.contains("CSV parsing system error")));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let content = HEADER.replace(',', ";") + "\nA-100;新エルナ;10;2;200;35;日本;x";
        let records = UsageSheetParser::read_records(content.as_bytes(), b';', &ColumnNames::default()).unwrap();
        assert_eq!(records[0].headcount, Some(2.0));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        assert!(load(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_bom_header_is_accepted() {
        let content = format!("\u{feff}{}\nA-100,新エルナ,134.2,20,200,35,日本,x", HEADER);
        let records = load(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_code.as_deref(), Some("A-100"));
    }

    const SHEET_HEADER: [&str; 8] = ["商品コード", " 略符 ", "推定使用枚数", "事業所人数", "枚数", "入数", "原産国", "商品名"];

    #[test]
    fn test_workbook_rows_are_read() {
        let file = create_test_workbook(&[
            &SHEET_HEADER,
            &["A-100", "新エルナ", "134.2", "20", "200", "35", "日本", "新エルナ 200枚"],
            &["", "", "", "", "", "", "", ""],
            &["B-200", "ソフト", "100", "20", "200", "40", "", "ソフトタオル"],
        ]);
        let records =
            UsageSheetParser::load_records_from_workbook(file.path(), None, &ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].product_code.as_deref(), Some("A-100"));
        assert_eq!(records[0].short_name.as_deref(), Some("新エルナ"));
        assert_eq!(records[0].estimated_sheets, Some(134.2));
        assert_eq!(records[0].headcount, Some(20.0));
        assert_eq!(records[0].packs_per_case, Some(35.0));
        assert_eq!(records[0].country_of_origin.as_deref(), Some("日本"));

        assert_eq!(records[1].short_name.as_deref(), Some("ソフト"));
        assert_eq!(records[1].country_of_origin, None);
    }

    #[test]
    fn test_workbook_sheet_by_name() {
        let bytes = workbook_fixture::workbook_bytes(
            "使用実績",
            &[&SHEET_HEADER, &["A-100", "新エルナ", "10", "2", "200", "35", "日本", "x"]],
        );
        let columns = ColumnNames::default();
        let records = UsageSheetParser::read_workbook(Cursor::new(bytes.clone()), Some("使用実績"), &columns).unwrap();
        assert_eq!(records[0].headcount, Some(2.0));

        let err = UsageSheetParser::read_workbook(Cursor::new(bytes), Some("Sheet9"), &columns).unwrap_err();
        assert!(matches!(err, EngineError::Load(_)));
    }

    #[test]
    fn test_workbook_missing_column_is_reported_by_name() {
        let file = create_test_workbook(&[
            &["商品コード", "略符", "推定使用枚数", "事業所人数", "枚数", "原産国", "商品名"],
            &["A-100", "新エルナ", "134.2", "20", "200", "日本", "x"],
        ]);
        match UsageSheetParser::load_records_from_workbook(file.path(), None, &ColumnNames::default()) {
            Err(EngineError::MissingColumns { columns }) => assert_eq!(columns, vec!["入数".to_string()]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_workbook_invalid_number_reports_sheet_row() {
        let file = create_test_workbook(&[
            &SHEET_HEADER,
            &["A-100", "新エルナ", "lots", "20", "200", "35", "日本", "x"],
        ]);
        let err = UsageSheetParser::load_records_from_workbook(file.path(), None, &ColumnNames::default())
            .unwrap_err();
        assert!(err.to_string().contains("'推定使用枚数' at line 2"), "{}", err);
    }

    #[test]
    fn test_missing_workbook_is_source_not_found() {
        let result = UsageSheetParser::load_records_from_workbook(
            Path::new("definitely/not/here.xlsx"),
            None,
            &ColumnNames::default(),
        );
        assert!(matches!(result, Err(EngineError::SourceNotFound { .. })));
    }
}
