// The canonical layout of the response sheet, shared by all providers.

use snafu::prelude::*;

use crate::lab::*;
use decision_lab::*;

/// Column names of the response sheet header, in sheet order.
pub const SHEET_COLUMNS: [&str; 9] = [
    "Timestamp",
    "Participant_ID",
    "Role",
    "Bank_Type",
    "Question_ID",
    "Decision",
    "Confidence",
    "Reflection",
    "Round",
];

pub const COL_TIMESTAMP: usize = 0;
pub const COL_PARTICIPANT: usize = 1;
pub const COL_ROLE: usize = 2;
pub const COL_BANK: usize = 3;
pub const COL_QUESTION: usize = 4;
pub const COL_DECISION: usize = 5;
pub const COL_CONFIDENCE: usize = 6;
pub const COL_REFLECTION: usize = 7;
pub const COL_ROUND: usize = 8;

/// Checks the first sheet row against the canonical header. The known
/// retired layout (five or six columns, no participant or round
/// tracking) gets its own error so the fix is obvious.
pub fn validate_header(header: &[String], path: &str) -> LabResult<()> {
    if header.len() == SHEET_COLUMNS.len()
        && header.iter().zip(SHEET_COLUMNS.iter()).all(|(h, c)| h == c)
    {
        return Ok(());
    }
    if is_legacy_header(header) {
        return LegacyLayoutSnafu {
            path: path.to_string(),
            columns: header.len(),
        }
        .fail();
    }
    HeaderMismatchSnafu {
        path: path.to_string(),
        found: header.join(","),
    }
    .fail()
}

// The pre-round-tracking sheets had Timestamp, Role, Bank_Type (or
// Bank), Decision, Confidence and sometimes Reflection. Detected by
// column set so column order does not matter.
fn is_legacy_header(header: &[String]) -> bool {
    let has = |name: &str| header.iter().any(|h| h == name);
    has("Timestamp")
        && has("Role")
        && has("Decision")
        && has("Confidence")
        && (has("Bank_Type") || has("Bank"))
        && !has("Participant_ID")
        && !has("Round")
}

/// Parses one data row into a typed record. `lineno` is 1-based with
/// the header on line 1; any malformed cell fails with the line number
/// and column name.
pub fn parse_row(cells: &[String], lineno: usize) -> LabResult<ResponseRecord> {
    ensure!(
        cells.len() == SHEET_COLUMNS.len(),
        RowWidthSnafu {
            lineno,
            expected: SHEET_COLUMNS.len(),
            actual: cells.len(),
        }
    );
    let timestamp = chrono::NaiveDateTime::parse_from_str(&cells[COL_TIMESTAMP], TIMESTAMP_FORMAT)
        .ok()
        .context(BadCellSnafu {
            lineno,
            column: SHEET_COLUMNS[COL_TIMESTAMP],
            value: cells[COL_TIMESTAMP].clone(),
        })?;
    let role = Role::parse(&cells[COL_ROLE]).ok().context(BadCellSnafu {
        lineno,
        column: SHEET_COLUMNS[COL_ROLE],
        value: cells[COL_ROLE].clone(),
    })?;
    let archetype = Archetype::parse(&cells[COL_BANK])
        .ok()
        .context(BadCellSnafu {
            lineno,
            column: SHEET_COLUMNS[COL_BANK],
            value: cells[COL_BANK].clone(),
        })?;
    let confidence = cells[COL_CONFIDENCE]
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|v| Confidence::new(v).ok())
        .context(BadCellSnafu {
            lineno,
            column: SHEET_COLUMNS[COL_CONFIDENCE],
            value: cells[COL_CONFIDENCE].clone(),
        })?;
    let round = cells[COL_ROUND]
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|v| Round::from_number(v).ok())
        .context(BadCellSnafu {
            lineno,
            column: SHEET_COLUMNS[COL_ROUND],
            value: cells[COL_ROUND].clone(),
        })?;
    Ok(ResponseRecord {
        timestamp,
        participant_id: cells[COL_PARTICIPANT].clone(),
        role,
        archetype,
        question_id: cells[COL_QUESTION].clone(),
        decision: cells[COL_DECISION].clone(),
        confidence,
        reflection: cells[COL_REFLECTION].clone(),
        round,
    })
}

/// The sheet row for a record, all nine cells in sheet order.
pub fn record_to_row(record: &ResponseRecord) -> [String; 9] {
    [
        record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        record.participant_id.clone(),
        record.role.as_str().to_string(),
        record.archetype.as_str().to_string(),
        record.question_id.clone(),
        record.decision.clone(),
        record.confidence.value().to_string(),
        record.reflection.clone(),
        record.round.as_number().to_string(),
    ]
}
