// ********* Input data structures ***********

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::Display;

/// The timestamp layout written to and read from the response sheet.
/// Second precision; no zone marker, wall-clock time of the classroom.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The six bank risk profiles a scenario can be built on.
///
/// Declaration order is meaningful: it is the order selection controls
/// are populated in and the order `ScenarioCatalog::archetypes` reports.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Archetype {
    GrowthAtAllCosts,
    FortressBank,
    MarginMachine,
    HiddenRiskBank,
    CapitalStarvedGrowth,
    RegulatorApprovedBank,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::GrowthAtAllCosts,
        Archetype::FortressBank,
        Archetype::MarginMachine,
        Archetype::HiddenRiskBank,
        Archetype::CapitalStarvedGrowth,
        Archetype::RegulatorApprovedBank,
    ];

    /// Short code, stable across sessions. Used on the command line and
    /// as the scenario id.
    pub fn code(self) -> &'static str {
        match self {
            Archetype::GrowthAtAllCosts => "growth",
            Archetype::FortressBank => "fortress",
            Archetype::MarginMachine => "margin",
            Archetype::HiddenRiskBank => "hidden",
            Archetype::CapitalStarvedGrowth => "starved",
            Archetype::RegulatorApprovedBank => "approved",
        }
    }

    /// The display name, byte for byte the value stored in the sheet's
    /// `Bank_Type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::GrowthAtAllCosts => "Growth-at-All-Costs",
            Archetype::FortressBank => "Fortress Bank",
            Archetype::MarginMachine => "Margin Machine",
            Archetype::HiddenRiskBank => "Hidden Risk Bank",
            Archetype::CapitalStarvedGrowth => "Capital-Starved Growth",
            Archetype::RegulatorApprovedBank => "Regulator-Approved Bank",
        }
    }

    /// Accepts the short code or the display name, case-insensitively.
    pub fn parse(s: &str) -> Result<Archetype, NotFoundError> {
        for a in Archetype::ALL {
            if s.eq_ignore_ascii_case(a.code()) || s.eq_ignore_ascii_case(a.as_str()) {
                return Ok(a);
            }
        }
        Err(NotFoundError {
            name: s.to_string(),
        })
    }
}

impl Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role a participant plays while deciding. HR only appears in some
/// course editions; it is carried everywhere so those sheets read back.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Role {
    Ceo,
    Cro,
    Regulator,
    Hr,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Ceo, Role::Cro, Role::Regulator, Role::Hr];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Ceo => "CEO",
            Role::Cro => "CRO",
            Role::Regulator => "Regulator",
            Role::Hr => "HR",
        }
    }

    pub fn parse(s: &str) -> Result<Role, ValidationError> {
        for r in Role::ALL {
            if s.eq_ignore_ascii_case(r.as_str()) {
                return Ok(r);
            }
        }
        Err(ValidationError::UnknownRole {
            value: s.to_string(),
        })
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision rounds. Round one is played before the role switch, round
/// two after it; the paired comparison measures the shift between them.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Round {
    One,
    Two,
}

impl Round {
    pub fn as_number(self) -> u32 {
        match self {
            Round::One => 1,
            Round::Two => 2,
        }
    }

    pub fn from_number(n: u32) -> Result<Round, ValidationError> {
        match n {
            1 => Ok(Round::One),
            2 => Ok(Round::Two),
            _ => Err(ValidationError::RoundOutOfRange { value: n }),
        }
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

/// Self-reported confidence on the classroom's 1-5 slider.
/// The constructor is the only way in, so the range holds everywhere.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(value: u32) -> Result<Confidence, ValidationError> {
        if (1..=5).contains(&value) {
            Ok(Confidence(value as u8))
        } else {
            Err(ValidationError::ConfidenceOutOfRange { value })
        }
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse classification of a decision option, used for the
/// round-over-round direction shift table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Direction {
    Aggressive,
    Conservative,
    Delay,
    Unclassified,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Aggressive => "Aggressive",
            Direction::Conservative => "Conservative",
            Direction::Delay => "Delay",
            Direction::Unclassified => "Unclassified",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative reaction tag attached to an (archetype, decision, role)
/// triple. Five-point scale plus the `Unknown` sentinel for triples the
/// annotation table does not cover. Display enrichment only; nothing
/// branches on it.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Sentiment {
    StrongSupport,
    Support,
    Neutral,
    Concern,
    Alarm,
    Unknown,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::StrongSupport => "strong support",
            Sentiment::Support => "support",
            Sentiment::Neutral => "neutral",
            Sentiment::Concern => "concern",
            Sentiment::Alarm => "alarm",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-play scenario: the prompt shown to students, the closed set
/// of decision options (2 to 4 of them, in display order), and the
/// real-world outcome note revealed at the end of the debrief.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScenarioDefinition {
    pub id: String,
    pub archetype: Archetype,
    pub prompt: String,
    pub options: Vec<String>,
    pub outcome: String,
}

/// One submitted decision, exactly the nine sheet columns in sheet
/// order. Written once at submission time, never updated or deleted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRecord {
    pub timestamp: NaiveDateTime,
    pub participant_id: String,
    pub role: Role,
    pub archetype: Archetype,
    pub question_id: String,
    pub decision: String,
    pub confidence: Confidence,
    /// Free text; empty means the student left it blank.
    pub reflection: String,
    pub round: Round,
}

// ******** Output data structures *********

/// Dense decision-by-role grid for one archetype. Rows follow the
/// scenario's option declaration order, columns follow `Role::ALL`;
/// cells with no submissions hold 0.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PivotTable {
    pub decisions: Vec<String>,
    pub roles: Vec<Role>,
    pub counts: Vec<Vec<u64>>,
}

/// Dense option-by-role grid of sentiment tags, same axes as the pivot.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SentimentPanel {
    pub decisions: Vec<String>,
    pub roles: Vec<Role>,
    pub tags: Vec<Vec<Sentiment>>,
}

/// The canonical round-1 and round-2 records of one participant for one
/// archetype, paired up once both rounds exist.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairedComparison {
    pub participant_id: String,
    pub before: ResponseRecord,
    pub after: ResponseRecord,
    pub changed: bool,
}

/// Before/after comparison over every participant with both rounds in.
/// `change_rate` is a percentage rounded to one decimal place, `None`
/// when there are no pairs yet (the expected start-of-class state).
#[derive(PartialEq, Debug, Clone)]
pub struct RoundComparison {
    pub pairs: Vec<PairedComparison>,
    pub changed: u64,
    pub change_rate: Option<f64>,
}

/// Everything one dashboard render needs, computed in a single pass
/// over an immutable snapshot of the response log.
#[derive(PartialEq, Debug, Clone)]
pub struct DashboardData {
    pub archetype: Archetype,
    pub role_filter: Option<Role>,
    /// Number of records after archetype and role filtering.
    pub submissions: u64,
    /// Observed (decision, role) pair counts; zero cells are omitted.
    pub distribution: std::collections::BTreeMap<(String, Role), u64>,
    /// Mean confidence per role, two decimal places; roles with no
    /// records are absent rather than zero.
    pub confidence_means: std::collections::BTreeMap<Role, f64>,
    pub dominant: Option<String>,
    pub pivot: PivotTable,
    pub round_comparison: RoundComparison,
    pub direction_shift: std::collections::BTreeMap<(Direction, Direction), u64>,
    pub sentiment_panel: SentimentPanel,
}

// ********* Errors **********

/// Lookup of an archetype the current catalog does not carry. With a
/// validated submission path this indicates a configuration mistake,
/// not student input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NotFoundError {
    pub name: String,
}

impl Error for NotFoundError {}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown bank archetype: {:?}", self.name)
    }
}

/// A submission that violates a declared constraint. Rejected before
/// anything is persisted; the message names the violated constraint.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ValidationError {
    UnknownArchetype(NotFoundError),
    UnknownDecision {
        archetype: Archetype,
        decision: String,
    },
    UnknownRole {
        value: String,
    },
    ConfidenceOutOfRange {
        value: u32,
    },
    RoundOutOfRange {
        value: u32,
    },
}

impl Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownArchetype(e) => write!(f, "{}", e),
            ValidationError::UnknownDecision {
                archetype,
                decision,
            } => write!(
                f,
                "decision {:?} is not one of the declared options for {}",
                decision, archetype
            ),
            ValidationError::UnknownRole { value } => write!(
                f,
                "unknown role {:?} (expected CEO, CRO, Regulator or HR)",
                value
            ),
            ValidationError::ConfidenceOutOfRange { value } => {
                write!(f, "confidence {} is outside the 1-5 scale", value)
            }
            ValidationError::RoundOutOfRange { value } => {
                write!(f, "round {} is not a valid round (1 or 2)", value)
            }
        }
    }
}
