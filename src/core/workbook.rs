//! Persisted translation workbook.
//!
//! A workbook is a single JSON file with one sheet per logical document. Each
//! sheet is a grid of rows: row 0 is the header (`LABEL` then the language
//! codes in configured order), every following row is a key and one cell per
//! language. `null` marks a missing translation.
//!
//! ```json
//! {
//!   "sheets": [
//!     {
//!       "name": "login",
//!       "rows": [
//!         ["LABEL", "ENG", "CHS", "CHT"],
//!         ["LOGIN.TITLE", "Sign in", null, "登入"]
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    language::LanguageSet,
    pivot::{Table, TableRow},
};

pub const LABEL_HEADER: &str = "LABEL";

/// The table of one logical document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn label_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.table.len()).sum()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WorkbookFile {
    sheets: Vec<SheetFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SheetFile {
    name: String,
    rows: Vec<Vec<Value>>,
}

fn header(languages: &LanguageSet) -> Vec<String> {
    std::iter::once(LABEL_HEADER)
        .chain(languages.iter())
        .map(str::to_string)
        .collect()
}

/// Serialize a workbook to pretty-printed JSON.
pub fn write_workbook(workbook: &Workbook) -> Result<String> {
    let sheets = workbook
        .sheets
        .iter()
        .map(|sheet| {
            let table = &sheet.table;
            let mut rows = Vec::with_capacity(table.len() + 1);
            rows.push(
                header(table.languages())
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            );
            for row in table.rows() {
                let mut cells = vec![Value::String(row.key.clone())];
                cells.extend(table.cells(row).map(|cell| match cell {
                    Some(value) => Value::String(value.to_string()),
                    None => Value::Null,
                }));
                rows.push(cells);
            }
            SheetFile {
                name: sheet.name.clone(),
                rows,
            }
        })
        .collect();

    let mut json = serde_json::to_string_pretty(&WorkbookFile { sheets })
        .context("Failed to serialize workbook.")?;
    json.push('\n');
    Ok(json)
}

/// Parse and validate a workbook against the configured languages.
///
/// Any structural problem is an error naming the sheet, row and column.
pub fn read_workbook(text: &str, languages: &LanguageSet) -> Result<Workbook> {
    let file: WorkbookFile =
        serde_json::from_str(text).context("Workbook is not a valid sheets document")?;

    let expected_header = header(languages);
    let mut names = HashSet::new();
    let mut sheets = Vec::with_capacity(file.sheets.len());

    for sheet in file.sheets {
        if !names.insert(sheet.name.clone()) {
            bail!("Duplicate sheet \"{}\"", sheet.name);
        }
        let table = read_sheet(&sheet, &expected_header, languages)
            .with_context(|| format!("Sheet \"{}\"", sheet.name))?;
        sheets.push(Sheet {
            name: sheet.name,
            table,
        });
    }

    Ok(Workbook { sheets })
}

fn read_sheet(
    sheet: &SheetFile,
    expected_header: &[String],
    languages: &LanguageSet,
) -> Result<Table> {
    let Some((header_row, data_rows)) = sheet.rows.split_first() else {
        bail!("row 0: missing header, expected {:?}", expected_header);
    };

    let found: Vec<Option<&str>> = header_row.iter().map(Value::as_str).collect();
    let matches = found.len() == expected_header.len()
        && found
            .iter()
            .zip(expected_header)
            .all(|(found, expected)| *found == Some(expected.as_str()));
    if !matches {
        bail!(
            "row 0: header must be {:?}, found {}",
            expected_header,
            Value::Array(header_row.clone())
        );
    }

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut rows = Vec::with_capacity(data_rows.len());

    for (offset, cells) in data_rows.iter().enumerate() {
        let row_number = offset + 1;
        if cells.len() != expected_header.len() {
            bail!(
                "row {}: expected {} cells, found {}",
                row_number,
                expected_header.len(),
                cells.len()
            );
        }

        let key = match &cells[0] {
            Value::String(key) if !key.is_empty() => key.as_str(),
            other => bail!(
                "row {}, column 0 ({}): key must be a non-empty string, found {}",
                row_number,
                LABEL_HEADER,
                other
            ),
        };
        if let Some(first) = first_seen.insert(key, row_number) {
            bail!(
                "row {}: duplicate key \"{}\" (first at row {})",
                row_number,
                key,
                first
            );
        }

        let mut values = BTreeMap::new();
        for (column, (language, cell)) in languages.iter().zip(&cells[1..]).enumerate() {
            match cell {
                Value::String(value) => {
                    values.insert(language.to_string(), value.clone());
                }
                Value::Null => {}
                other => bail!(
                    "row {}, column {} ({}): expected a string or null, found {}",
                    row_number,
                    column + 1,
                    language,
                    other
                ),
            }
        }

        rows.push(TableRow {
            key: key.to_string(),
            values,
        });
    }

    Ok(Table::from_rows(languages.clone(), rows))
}

pub fn load_workbook(path: &Path, languages: &LanguageSet) -> Result<Workbook> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workbook: {}", path.display()))?;
    read_workbook(&text, languages)
        .with_context(|| format!("Malformed workbook: {}", path.display()))
}

pub fn save_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, write_workbook(workbook)?)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))
}
