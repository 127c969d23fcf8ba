// Primitives for importing a workbook exported from a hosted
// spreadsheet (Google Sheets, Excel Online).

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, info, warn};
use snafu::prelude::*;

use crate::lab::*;
use decision_lab::{ResponseRecord, TIMESTAMP_FORMAT};

// Days between the Excel epoch (1899-12-30) and the Unix epoch.
const EXCEL_UNIX_OFFSET_DAYS: f64 = 25569.0;

/// A read-only view over a workbook export. Submissions keep flowing
/// into the hosted copy; this side only ever imports.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WorkbookSheet {
    path: String,
    worksheet_name: Option<String>,
}

impl WorkbookSheet {
    pub fn new(path: String, worksheet_name: Option<String>) -> WorkbookSheet {
        WorkbookSheet {
            path,
            worksheet_name,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn read_all(&self) -> LabResult<Vec<ResponseRecord>> {
        let wrange = self.get_range()?;
        let mut rows = wrange.rows();
        let header: Vec<String> = match rows.next() {
            Some(row) => read_header(row)?,
            None => {
                warn!("Workbook {:?} has no rows, reading it as empty", self.path);
                return Ok(Vec::new());
            }
        };
        schema::validate_header(&header, &self.path)?;

        let mut res: Vec<ResponseRecord> = Vec::new();
        for (idx, row) in rows.enumerate() {
            let lineno = idx + 2;
            debug!("workbook row {}: {:?}", lineno, row);
            let mut cells: Vec<String> = Vec::new();
            for (col, cell) in row.iter().enumerate() {
                let column = schema::SHEET_COLUMNS.get(col).copied().unwrap_or("");
                cells.push(read_cell(cell, lineno, column)?);
            }
            res.push(schema::parse_row(&cells, lineno)?);
        }
        info!("Read {} records from workbook {:?}", res.len(), self.path);
        Ok(res)
    }

    fn get_range(&self) -> LabResult<calamine::Range<DataType>> {
        debug!(
            "get_range: path: {:?} worksheet: {:?}",
            &self.path, &self.worksheet_name
        );
        let mut workbook: Xlsx<_> = open_workbook(&self.path).context(OpeningWorkbookSnafu {
            path: self.path.clone(),
        })?;

        // A worksheet name was provided, use it.
        if let Some(worksheet_name) = &self.worksheet_name {
            let wrange = workbook
                .worksheet_range(worksheet_name)
                .context(MissingWorksheetSnafu {
                    path: self.path.clone(),
                    name: worksheet_name.clone(),
                })?
                .context(OpeningWorkbookSnafu {
                    path: self.path.clone(),
                })?;
            return Ok(wrange);
        }
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [(name, wrange)] => {
                debug!("get_range: using the only worksheet {:?}", name);
                Ok(wrange.clone())
            }
            sheets => AmbiguousWorksheetSnafu {
                path: self.path.clone(),
                count: sheets.len(),
            }
            .fail(),
        }
    }
}

fn read_header(row: &[DataType]) -> LabResult<Vec<String>> {
    let mut header: Vec<String> = Vec::new();
    for (col, cell) in row.iter().enumerate() {
        let column = schema::SHEET_COLUMNS.get(col).copied().unwrap_or("");
        header.push(read_cell(cell, 1, column)?);
    }
    Ok(header)
}

// Cells arrive typed from calamine; everything is normalized to the
// text the row parser expects. Hosted exports format timestamps as
// date cells, so those come back through the serial-date path.
fn read_cell(cell: &DataType, lineno: usize, column: &'static str) -> LabResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::DateTime(serial) => excel_serial_to_timestamp(*serial, lineno, column),
        _ => BadCellSnafu {
            lineno,
            column,
            value: format!("{:?}", cell),
        }
        .fail(),
    }
}

// Excel stores timestamps as fractional days since 1899-12-30.
// Rounded to whole seconds, which is all the sheet schema keeps.
fn excel_serial_to_timestamp(
    serial: f64,
    lineno: usize,
    column: &'static str,
) -> LabResult<String> {
    let unix_seconds = ((serial - EXCEL_UNIX_OFFSET_DAYS) * 86400.0).round() as i64;
    let stamp = chrono::DateTime::from_timestamp(unix_seconds, 0).context(BadCellSnafu {
        lineno,
        column,
        value: serial.to_string(),
    })?;
    Ok(stamp.naive_utc().format(TIMESTAMP_FORMAT).to_string())
}
