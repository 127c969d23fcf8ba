use log::{info, warn};

use decision_lab::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::thread;
use std::time::Duration;

use chrono::Timelike;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::{Args, Command, DashboardArgs, SubmitArgs};

pub mod config_reader;
pub mod io_csv;
pub mod io_xlsx;
pub mod render;
pub mod schema;
pub mod store;

pub use crate::lab::config_reader::{SessionConfig, SheetSettings};
pub use crate::lab::io_csv::CsvSheet;
pub use crate::lab::io_xlsx::WorkbookSheet;
pub use crate::lab::store::SheetStore;

#[derive(Debug, Snafu)]
pub enum LabError {
    // **** Response sheet access ****
    #[snafu(display("Error opening response sheet {path}"))]
    OpeningSheet { source: csv::Error, path: String },
    #[snafu(display("Error writing response sheet {path}"))]
    WritingSheet { source: csv::Error, path: String },
    #[snafu(display("Error accessing response sheet {path}"))]
    SheetIo {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading response sheet line {lineno}"))]
    SheetLine { source: csv::Error, lineno: usize },

    // **** Workbook imports ****
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "Workbook {path} has {count} worksheets, set worksheetName to pick one"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("Workbook {path} is read-only, submissions go to the hosted copy"))]
    ReadOnlyStore { path: String },

    // **** Sheet contents ****
    #[snafu(display(
        "Sheet {path} uses the retired {columns}-column layout, re-export it with the nine-column header"
    ))]
    LegacyLayout { path: String, columns: usize },
    #[snafu(display("Sheet {path} has an unexpected header: {found}"))]
    HeaderMismatch { path: String, found: String },
    #[snafu(display("Line {lineno} has {actual} cells, expected {expected}"))]
    RowWidth {
        lineno: usize,
        expected: usize,
        actual: usize,
    },
    #[snafu(display("Line {lineno}, column {column}: bad value {value:?}"))]
    BadCell {
        lineno: usize,
        column: &'static str,
        value: String,
    },

    // **** Configuration ****
    #[snafu(display("Error opening {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Malformed JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Unknown sheet provider {provider:?}, expected csv or xlsx"))]
    UnknownProvider { provider: String },

    // **** Submissions ****
    #[snafu(display("Invalid submission: {source}"))]
    Validation { source: ValidationError },
    #[snafu(display("Unknown bank scenario: {source}"))]
    UnknownArchetype { source: NotFoundError },
    #[snafu(display("Option {index} is out of range, the scenario has {count} options"))]
    OptionIndex { index: usize, count: usize },

    // **** Summary output ****
    #[snafu(display("Error writing summary {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The computed summary differs from the reference {path}"))]
    SummaryMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type LabResult<T> = Result<T, LabError>;

// ********* Command dispatch **********

pub fn run(args: &Args) -> LabResult<()> {
    let config = config_reader::load_config(&args.config)?;
    match &args.command {
        Command::Scenarios => run_scenarios(&config),
        Command::Submit(sub) => run_submit(&config, sub),
        Command::Dashboard(dash) => run_dashboard(&config, dash),
    }
}

fn run_scenarios(config: &SessionConfig) -> LabResult<()> {
    let catalog = ScenarioCatalog::course_default();
    print!(
        "{}",
        render::render_scenarios(&catalog, &config.course_name())
    );
    Ok(())
}

// **** submit ****

fn run_submit(config: &SessionConfig, sub: &SubmitArgs) -> LabResult<()> {
    let catalog = ScenarioCatalog::course_default();
    let scenario = catalog
        .get_by_name(&sub.bank)
        .context(UnknownArchetypeSnafu {})?;
    let decision = resolve_decision(scenario, &sub.decision)?;
    let role = Role::parse(&sub.role).context(ValidationSnafu {})?;
    let confidence = Confidence::new(sub.confidence).context(ValidationSnafu {})?;
    let round = Round::from_number(sub.round).context(ValidationSnafu {})?;
    let record = ResponseRecord {
        timestamp: now_for_sheet(),
        participant_id: sub.participant.clone(),
        role,
        archetype: scenario.archetype,
        question_id: sub.question.clone().unwrap_or_else(|| scenario.id.clone()),
        decision,
        confidence,
        reflection: sub.reflection.clone().unwrap_or_default(),
        round,
    };
    validate_submission(&catalog, &record).context(ValidationSnafu {})?;

    let store = SheetStore::open(config)?;
    store.append(&record)?;
    println!(
        "Recorded: {} ({}) on {}, round {}",
        record.participant_id, record.role, record.archetype, record.round
    );
    Ok(())
}

/// The decision option, accepted as the full option text or as the
/// 1-based number shown in the scenarios listing. Free text that is
/// neither passes through so validation can name it in its error.
fn resolve_decision(scenario: &ScenarioDefinition, input: &str) -> LabResult<String> {
    if let Some(option) = scenario.options.iter().find(|o| *o == input) {
        return Ok(option.clone());
    }
    if let Ok(number) = input.trim().parse::<usize>() {
        let option = number
            .checked_sub(1)
            .and_then(|idx| scenario.options.get(idx))
            .context(OptionIndexSnafu {
                index: number,
                count: scenario.options.len(),
            })?;
        return Ok(option.clone());
    }
    Ok(input.to_string())
}

// Sheet timestamps carry second precision; anything finer would not
// round-trip through the storage format.
fn now_for_sheet() -> chrono::NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    match now.with_nanosecond(0) {
        Some(t) => t,
        None => now,
    }
}

// **** dashboard ****

fn run_dashboard(config: &SessionConfig, dash: &DashboardArgs) -> LabResult<()> {
    let catalog = ScenarioCatalog::course_default();
    let scenario = catalog
        .get_by_name(&dash.bank)
        .context(UnknownArchetypeSnafu {})?;
    let role_filter = match &dash.role {
        Some(role) => Some(Role::parse(role).context(ValidationSnafu {})?),
        None => None,
    };
    let store = SheetStore::open(config)?;
    if dash.watch {
        let interval = dash.interval.unwrap_or_else(|| config.refresh_seconds());
        info!("Watching {:?}, refreshing every {}s", store, interval);
        loop {
            render_once(&store, &catalog, scenario, role_filter, config, dash)?;
            thread::sleep(Duration::from_secs(interval));
        }
    } else {
        render_once(&store, &catalog, scenario, role_filter, config, dash)
    }
}

fn render_once(
    store: &SheetStore,
    catalog: &ScenarioCatalog,
    scenario: &ScenarioDefinition,
    role_filter: Option<Role>,
    config: &SessionConfig,
    dash: &DashboardArgs,
) -> LabResult<()> {
    let table = store.snapshot()?;
    let data = dashboard_data(&table, catalog, scenario.archetype, role_filter)
        .context(UnknownArchetypeSnafu {})?;
    let raw_scope;
    let raw = if dash.raw {
        raw_scope = table.filtered(scenario.archetype, role_filter);
        Some(raw_scope.records())
    } else {
        None
    };
    print!(
        "{}",
        render::render_dashboard(
            &data,
            scenario,
            &config.course_name(),
            raw,
            dash.reveal_outcome
        )
    );

    if dash.out.is_some() || dash.reference.is_some() {
        let summary = build_summary_js(config, &data);
        let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
        if let Some(out_path) = &dash.out {
            fs::write(out_path, format!("{}\n", pretty)).context(WritingSummarySnafu {
                path: out_path.clone(),
            })?;
            info!("Wrote the summary to {:?}", out_path);
        }
        if let Some(ref_path) = &dash.reference {
            let reference = config_reader::read_summary(ref_path)?;
            let pretty_ref =
                serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
            if pretty_ref != pretty {
                warn!("Found differences with the reference summary");
                print_diff(pretty_ref.as_str(), pretty.as_str(), "\n");
                return SummaryMismatchSnafu {
                    path: ref_path.clone(),
                }
                .fail();
            }
        }
    }
    Ok(())
}

// ********* JSON summary **********

// Counts are serialized as strings, like the sheet cells they came
// from; key order is the serializer's sorted order, so two summaries
// of the same table compare byte for byte.
fn build_summary_js(config: &SessionConfig, data: &DashboardData) -> JSValue {
    let mut means: JSMap<String, JSValue> = JSMap::new();
    for (role, mean) in &data.confidence_means {
        means.insert(role.as_str().to_string(), json!(format!("{:.2}", mean)));
    }

    let mut by_role: Vec<JSValue> = Vec::new();
    for ((decision, role), count) in &data.distribution {
        by_role.push(json!({
            "decision": decision,
            "role": role.as_str(),
            "count": count.to_string()
        }));
    }

    let pivot_rows: Vec<JSValue> = data
        .pivot
        .counts
        .iter()
        .map(|row| json!(row.iter().map(|c| c.to_string()).collect::<Vec<String>>()))
        .collect();

    let mut participants: Vec<JSValue> = Vec::new();
    for pair in &data.round_comparison.pairs {
        participants.push(json!({
            "id": &pair.participant_id,
            "before": &pair.before.decision,
            "after": &pair.after.decision,
            "changed": pair.changed
        }));
    }
    let change_rate = match data.round_comparison.change_rate {
        Some(rate) => json!(format!("{:.1}", rate)),
        None => JSValue::Null,
    };

    let mut shifts: Vec<JSValue> = Vec::new();
    for ((from, to), count) in &data.direction_shift {
        shifts.push(json!({
            "from": from.as_str(),
            "to": to.as_str(),
            "count": count.to_string()
        }));
    }

    json!({
        "config": {
            "course": config.course_name(),
            "bank": data.archetype.as_str(),
            "roleFilter": data.role_filter.map(|r| r.as_str())
        },
        "submissions": data.submissions,
        "dominantDecision": &data.dominant,
        "meanConfidenceByRole": means,
        "decisionsByRole": by_role,
        "pivot": {
            "decisions": &data.pivot.decisions,
            "roles": data.pivot.roles.iter().map(|r| r.as_str()).collect::<Vec<&str>>(),
            "counts": pivot_rows
        },
        "roundComparison": {
            "pairs": data.round_comparison.pairs.len(),
            "changed": data.round_comparison.changed,
            "changeRate": change_rate,
            "participants": participants
        },
        "directionShifts": shifts
    })
}
