// Primitives for reading and appending the CSV response sheet.

use std::fs::OpenOptions;
use std::path::Path;

use log::{debug, info, warn};
use snafu::prelude::*;

use crate::lab::*;
use decision_lab::ResponseRecord;

/// The live response sheet of a session: a CSV file that is appended
/// to on submission and re-read in full on every dashboard refresh.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CsvSheet {
    path: String,
}

impl CsvSheet {
    pub fn new(path: String) -> CsvSheet {
        CsvSheet { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// All records in storage order. A sheet that does not exist yet,
    /// or holds nothing at all, is an empty session, not an error.
    pub fn read_all(&self) -> LabResult<Vec<ResponseRecord>> {
        if !Path::new(&self.path).exists() {
            warn!(
                "Response sheet {:?} does not exist yet, reading it as empty",
                self.path
            );
            return Ok(Vec::new());
        }
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .context(OpeningSheetSnafu {
                path: self.path.clone(),
            })?;
        let mut records = rdr.into_records();
        let header: Vec<String> = match records.next() {
            Some(line_r) => {
                let line = line_r.context(SheetLineSnafu { lineno: 1usize })?;
                line.iter().map(|s| s.to_string()).collect()
            }
            None => {
                warn!("Response sheet {:?} is empty, no header yet", self.path);
                return Ok(Vec::new());
            }
        };
        schema::validate_header(&header, &self.path)?;

        let mut res: Vec<ResponseRecord> = Vec::new();
        for (idx, line_r) in records.enumerate() {
            // The header sits on line 1.
            let lineno = idx + 2;
            let line = line_r.context(SheetLineSnafu { lineno })?;
            let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
            let record = schema::parse_row(&cells, lineno)?;
            debug!("read_all: line {}: {:?}", lineno, record);
            res.push(record);
        }
        info!("Read {} records from {:?}", res.len(), self.path);
        Ok(res)
    }

    /// Appends one record, creating the sheet with its header row on
    /// first use.
    pub fn append(&self, record: &ResponseRecord) -> LabResult<()> {
        let fresh_sheet = !Path::new(&self.path).exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context(SheetIoSnafu {
                path: self.path.clone(),
            })?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if fresh_sheet {
            info!("Creating response sheet {:?}", self.path);
            wtr.write_record(schema::SHEET_COLUMNS)
                .context(WritingSheetSnafu {
                    path: self.path.clone(),
                })?;
        }
        wtr.write_record(schema::record_to_row(record))
            .context(WritingSheetSnafu {
                path: self.path.clone(),
            })?;
        wtr.flush().context(SheetIoSnafu {
            path: self.path.clone(),
        })?;
        debug!("Appended record for {:?} to {:?}", record.participant_id, self.path);
        Ok(())
    }
}
