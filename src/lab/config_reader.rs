use std::fs;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::lab::*;

/// Where the response sheet lives. Everything is optional; the
/// defaults describe a plain CSV session in the working directory.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetSettings {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
    pub sheet: Option<SheetSettings>,
    #[serde(rename = "refreshSeconds")]
    pub refresh_seconds: Option<u64>,
}

impl SessionConfig {
    /// The configuration of a session run without a config file.
    pub fn course_default() -> SessionConfig {
        SessionConfig {
            course_name: None,
            sheet: None,
            refresh_seconds: None,
        }
    }

    pub fn course_name(&self) -> String {
        self.course_name
            .clone()
            .unwrap_or_else(|| "Bank Crisis Decision Lab".to_string())
    }

    pub fn provider(&self) -> String {
        self.sheet
            .as_ref()
            .and_then(|s| s.provider.clone())
            .unwrap_or_else(|| "csv".to_string())
    }

    pub fn file_path(&self) -> String {
        self.sheet
            .as_ref()
            .and_then(|s| s.file_path.clone())
            .unwrap_or_else(|| "responses.csv".to_string())
    }

    pub fn worksheet_name(&self) -> Option<String> {
        self.sheet.as_ref().and_then(|s| s.worksheet_name.clone())
    }

    /// The `--watch` refresh period in seconds.
    pub fn refresh_seconds(&self) -> u64 {
        self.refresh_seconds.unwrap_or(5)
    }
}

pub fn read_config(path: &str) -> LabResult<SessionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let config: SessionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("Loaded session config from {:?}: {:?}", path, config);
    Ok(config)
}

pub fn load_config(path: &Option<String>) -> LabResult<SessionConfig> {
    match path {
        Some(p) => read_config(p),
        None => {
            debug!("No config file given, using the session defaults");
            Ok(SessionConfig::course_default())
        }
    }
}

/// Reads a previously written summary for reference checking.
pub fn read_summary(path: &str) -> LabResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
