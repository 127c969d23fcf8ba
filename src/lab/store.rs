// Provider dispatch for the response sheet.

use log::debug;

use crate::lab::*;
use decision_lab::{ResponseRecord, ResponseTable};

/// The session's response store, opened once from the configuration
/// and passed by reference to everything that reads or appends.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SheetStore {
    Csv(CsvSheet),
    Workbook(WorkbookSheet),
}

impl SheetStore {
    pub fn open(config: &SessionConfig) -> LabResult<SheetStore> {
        let provider = config.provider();
        let path = config.file_path();
        debug!("Opening response store: provider {:?} path {:?}", provider, path);
        match provider.as_str() {
            "csv" => Ok(SheetStore::Csv(CsvSheet::new(path))),
            "xlsx" => Ok(SheetStore::Workbook(WorkbookSheet::new(
                path,
                config.worksheet_name(),
            ))),
            _ => UnknownProviderSnafu { provider }.fail(),
        }
    }

    pub fn read_all(&self) -> LabResult<Vec<ResponseRecord>> {
        match self {
            SheetStore::Csv(sheet) => sheet.read_all(),
            SheetStore::Workbook(workbook) => workbook.read_all(),
        }
    }

    /// One immutable snapshot of the whole log, ready for aggregation.
    pub fn snapshot(&self) -> LabResult<ResponseTable> {
        Ok(ResponseTable::new(self.read_all()?))
    }

    /// Appends to the live sheet. Workbook imports are read-only; the
    /// hosted copy is where those submissions happen.
    pub fn append(&self, record: &ResponseRecord) -> LabResult<()> {
        match self {
            SheetStore::Csv(sheet) => sheet.append(record),
            SheetStore::Workbook(workbook) => ReadOnlyStoreSnafu {
                path: workbook.path().to_string(),
            }
            .fail(),
        }
    }
}
