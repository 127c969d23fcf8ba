//! The scenario catalog: the closed set of bank archetypes taught in the
//! course, each with its prompt, decision options and real-world outcome
//! note, plus the annotation tables (decision directions and role
//! sentiments) the dashboard draws on.

use crate::config::{
    Archetype, Direction, NotFoundError, Role, ScenarioDefinition, Sentiment,
};

// ********* Course data **********

struct ScenarioSeed {
    archetype: Archetype,
    prompt: &'static str,
    options: &'static [&'static str],
    outcome: &'static str,
}

const COURSE_SCENARIOS: [ScenarioSeed; 6] = [
    ScenarioSeed {
        archetype: Archetype::GrowthAtAllCosts,
        prompt: "Your bank has doubled its loan book in three years by courting \
                 commercial real estate developers other lenders turned away. Deposit \
                 growth lags far behind and funding is increasingly short-term and \
                 rate-sensitive. The board celebrates the market share; your risk team \
                 quietly flags concentration limits breached in two regions. What do \
                 you do this quarter?",
        options: &[
            "Act early / tighten controls",
            "Continue current strategy",
            "Delay and monitor",
        ],
        outcome: "Banks that rode concentrated growth into the 2023 rate cycle saw \
                  uninsured depositors leave within days once losses surfaced. The \
                  lenders that pre-emptively capped concentrations and termed out \
                  funding absorbed the same shock with no run.",
    },
    ScenarioSeed {
        archetype: Archetype::FortressBank,
        prompt: "Your bank holds capital far above every regulatory minimum, lends \
                 conservatively, and is routinely praised for resilience. Return on \
                 equity trails peers by four points and activist investors are \
                 circling, demanding buybacks or faster growth. The franchise is safe \
                 but the owners are restless. What do you do?",
        options: &[
            "Deploy excess capital",
            "Hold current buffers",
            "Delay and monitor",
        ],
        outcome: "Fortress balance sheets looked inefficient for a decade and then \
                  priceless for a quarter. In 2023 the banks with genuine excess \
                  capital bought loan books from failing rivals at a discount; the \
                  ones that had bought back stock at the top could not.",
    },
    ScenarioSeed {
        archetype: Archetype::MarginMachine,
        prompt: "Your bank earns enviable margins by funding a long-duration, \
                 fixed-rate securities portfolio with cheap sticky deposits. Rates \
                 have started moving up faster than any internal scenario assumed, \
                 and the unrealized loss on the portfolio now exceeds a third of \
                 tangible equity. Deposits have not moved yet. What do you do?",
        options: &[
            "Shorten asset duration",
            "Continue current strategy",
            "Delay and monitor",
        ],
        outcome: "This is the Silicon Valley Bank trade. Held-to-maturity accounting \
                  hid the loss until a capital raise forced disclosure, and the \
                  deposit base that looked sticky moved in hours. Banks that \
                  restructured the portfolio early booked a painful but survivable \
                  loss.",
    },
    ScenarioSeed {
        archetype: Archetype::HiddenRiskBank,
        prompt: "Headline metrics are spotless, but an internal review found that a \
                 profitable trading desk has been warehousing illiquid structured \
                 positions in a booking entity the risk dashboards roll up only \
                 quarterly. Desk leadership insists the positions are hedged and the \
                 review is overreach. Nothing has hit the P&L. What do you do?",
        options: &[
            "Act early / tighten controls",
            "Commission external review",
            "Continue current strategy",
            "Delay and monitor",
        ],
        outcome: "From the London Whale to Archegos, losses that ended careers sat \
                  for months in exposures the aggregate dashboards smoothed over. \
                  Firms that escalated on the first internal warning contained the \
                  damage to a bad quarter rather than a public reckoning.",
    },
    ScenarioSeed {
        archetype: Archetype::CapitalStarvedGrowth,
        prompt: "Your bank is growing fast and profitably, but capital generation \
                 cannot keep pace with balance-sheet expansion and the CET1 ratio \
                 drifts a little lower every quarter. Markets are receptive today; a \
                 rights issue would dilute the founders who control the board. The \
                 buffer over regulatory minimums is thinning. What do you do?",
        options: &[
            "Raise capital immediately",
            "Slow balance-sheet growth",
            "Continue current strategy",
        ],
        outcome: "Capital windows close without notice. Lenders that raised while \
                  markets were receptive paid single-digit dilution; those that \
                  waited for the buffer to run out raised at crisis prices or were \
                  resolved over a weekend.",
    },
    ScenarioSeed {
        archetype: Archetype::RegulatorApprovedBank,
        prompt: "Your bank passes every stress test with room to spare and the \
                 supervisor holds it up as a model institution. Internally you \
                 suspect the standard scenarios miss your real tail risk: a \
                 correlated drawdown in the niche asset class you dominate, which no \
                 prescribed scenario shocks. Extra stress-testing would cost money \
                 and could surface awkward numbers. What do you do?",
        options: &[
            "Continue current strategy",
            "Stress-test beyond the mandate",
        ],
        outcome: "Every failed bank of the last two decades passed its final \
                  regulatory exam. The prescribed scenarios are a floor, not a \
                  forecast; institutions that stress-tested their own known \
                  concentrations found the tail before the market did.",
    },
];

// Decision option -> coarse direction. Options absent from this table
// classify as Unclassified rather than failing.
const DIRECTION_SEEDS: [(&str, Direction); 10] = [
    ("Act early / tighten controls", Direction::Conservative),
    ("Raise capital immediately", Direction::Conservative),
    ("Slow balance-sheet growth", Direction::Conservative),
    ("Shorten asset duration", Direction::Conservative),
    ("Hold current buffers", Direction::Conservative),
    ("Stress-test beyond the mandate", Direction::Conservative),
    ("Continue current strategy", Direction::Aggressive),
    ("Deploy excess capital", Direction::Aggressive),
    ("Delay and monitor", Direction::Delay),
    ("Commission external review", Direction::Delay),
];

// How each role typically reacts to each decision, per archetype. HR is
// deliberately unannotated; lookups for it fall back to Unknown.
const SENTIMENT_SEEDS: [(Archetype, &str, Role, Sentiment); 54] = [
    (
        Archetype::GrowthAtAllCosts,
        "Act early / tighten controls",
        Role::Ceo,
        Sentiment::Concern,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Act early / tighten controls",
        Role::Cro,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Act early / tighten controls",
        Role::Regulator,
        Sentiment::Support,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Continue current strategy",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Continue current strategy",
        Role::Cro,
        Sentiment::Alarm,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Continue current strategy",
        Role::Regulator,
        Sentiment::Concern,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Delay and monitor",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Delay and monitor",
        Role::Cro,
        Sentiment::Concern,
    ),
    (
        Archetype::GrowthAtAllCosts,
        "Delay and monitor",
        Role::Regulator,
        Sentiment::Concern,
    ),
    (
        Archetype::FortressBank,
        "Deploy excess capital",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::FortressBank,
        "Deploy excess capital",
        Role::Cro,
        Sentiment::Concern,
    ),
    (
        Archetype::FortressBank,
        "Deploy excess capital",
        Role::Regulator,
        Sentiment::Concern,
    ),
    (
        Archetype::FortressBank,
        "Hold current buffers",
        Role::Ceo,
        Sentiment::Concern,
    ),
    (
        Archetype::FortressBank,
        "Hold current buffers",
        Role::Cro,
        Sentiment::Support,
    ),
    (
        Archetype::FortressBank,
        "Hold current buffers",
        Role::Regulator,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::FortressBank,
        "Delay and monitor",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::FortressBank,
        "Delay and monitor",
        Role::Cro,
        Sentiment::Neutral,
    ),
    (
        Archetype::FortressBank,
        "Delay and monitor",
        Role::Regulator,
        Sentiment::Support,
    ),
    (
        Archetype::MarginMachine,
        "Shorten asset duration",
        Role::Ceo,
        Sentiment::Concern,
    ),
    (
        Archetype::MarginMachine,
        "Shorten asset duration",
        Role::Cro,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::MarginMachine,
        "Shorten asset duration",
        Role::Regulator,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::MarginMachine,
        "Continue current strategy",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::MarginMachine,
        "Continue current strategy",
        Role::Cro,
        Sentiment::Alarm,
    ),
    (
        Archetype::MarginMachine,
        "Continue current strategy",
        Role::Regulator,
        Sentiment::Alarm,
    ),
    (
        Archetype::MarginMachine,
        "Delay and monitor",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::MarginMachine,
        "Delay and monitor",
        Role::Cro,
        Sentiment::Concern,
    ),
    (
        Archetype::MarginMachine,
        "Delay and monitor",
        Role::Regulator,
        Sentiment::Concern,
    ),
    (
        Archetype::HiddenRiskBank,
        "Act early / tighten controls",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::HiddenRiskBank,
        "Act early / tighten controls",
        Role::Cro,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::HiddenRiskBank,
        "Act early / tighten controls",
        Role::Regulator,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::HiddenRiskBank,
        "Commission external review",
        Role::Ceo,
        Sentiment::Concern,
    ),
    (
        Archetype::HiddenRiskBank,
        "Commission external review",
        Role::Cro,
        Sentiment::Support,
    ),
    (
        Archetype::HiddenRiskBank,
        "Commission external review",
        Role::Regulator,
        Sentiment::Support,
    ),
    (
        Archetype::HiddenRiskBank,
        "Continue current strategy",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::HiddenRiskBank,
        "Continue current strategy",
        Role::Cro,
        Sentiment::Alarm,
    ),
    (
        Archetype::HiddenRiskBank,
        "Continue current strategy",
        Role::Regulator,
        Sentiment::Alarm,
    ),
    (
        Archetype::HiddenRiskBank,
        "Delay and monitor",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::HiddenRiskBank,
        "Delay and monitor",
        Role::Cro,
        Sentiment::Concern,
    ),
    (
        Archetype::HiddenRiskBank,
        "Delay and monitor",
        Role::Regulator,
        Sentiment::Alarm,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Raise capital immediately",
        Role::Ceo,
        Sentiment::Concern,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Raise capital immediately",
        Role::Cro,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Raise capital immediately",
        Role::Regulator,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Slow balance-sheet growth",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Slow balance-sheet growth",
        Role::Cro,
        Sentiment::Support,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Slow balance-sheet growth",
        Role::Regulator,
        Sentiment::Support,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Continue current strategy",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Continue current strategy",
        Role::Cro,
        Sentiment::Alarm,
    ),
    (
        Archetype::CapitalStarvedGrowth,
        "Continue current strategy",
        Role::Regulator,
        Sentiment::Alarm,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Continue current strategy",
        Role::Ceo,
        Sentiment::Support,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Continue current strategy",
        Role::Cro,
        Sentiment::Concern,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Continue current strategy",
        Role::Regulator,
        Sentiment::Neutral,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Stress-test beyond the mandate",
        Role::Ceo,
        Sentiment::Neutral,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Stress-test beyond the mandate",
        Role::Cro,
        Sentiment::StrongSupport,
    ),
    (
        Archetype::RegulatorApprovedBank,
        "Stress-test beyond the mandate",
        Role::Regulator,
        Sentiment::Support,
    ),
];

// ********* Catalog *********

/// The set of scenarios active in one course session, in presentation
/// order, together with the decision-direction vocabulary. Immutable
/// once built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<ScenarioDefinition>,
    directions: DirectionMap,
}

impl ScenarioCatalog {
    /// The full six-archetype catalog the course ships with.
    pub fn course_default() -> ScenarioCatalog {
        let scenarios = COURSE_SCENARIOS
            .iter()
            .map(|seed| ScenarioDefinition {
                id: seed.archetype.code().to_string(),
                archetype: seed.archetype,
                prompt: seed.prompt.to_string(),
                options: seed.options.iter().map(|o| o.to_string()).collect(),
                outcome: seed.outcome.to_string(),
            })
            .collect();
        ScenarioCatalog {
            scenarios,
            directions: DirectionMap::course_default(),
        }
    }

    /// A catalog over an explicit scenario list, e.g. a session that
    /// only plays a subset of the archetypes. Keeps the course
    /// direction vocabulary.
    pub fn new(scenarios: Vec<ScenarioDefinition>) -> ScenarioCatalog {
        ScenarioCatalog {
            scenarios,
            directions: DirectionMap::course_default(),
        }
    }

    /// A catalog with its own direction vocabulary, for sessions whose
    /// scenarios use option texts outside the course set.
    pub fn with_directions(
        scenarios: Vec<ScenarioDefinition>,
        directions: DirectionMap,
    ) -> ScenarioCatalog {
        ScenarioCatalog {
            scenarios,
            directions,
        }
    }

    pub fn directions(&self) -> &DirectionMap {
        &self.directions
    }

    /// The scenario for an archetype, or `NotFoundError` when this
    /// session does not play it.
    pub fn get(&self, archetype: Archetype) -> Result<&ScenarioDefinition, NotFoundError> {
        match self.scenarios.iter().find(|s| s.archetype == archetype) {
            Some(s) => Ok(s),
            None => Err(NotFoundError {
                name: archetype.as_str().to_string(),
            }),
        }
    }

    /// Lookup by short code or display name, case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Result<&ScenarioDefinition, NotFoundError> {
        let archetype = Archetype::parse(name)?;
        self.get(archetype)
    }

    /// The archetypes this session plays, in declaration order.
    pub fn archetypes(&self) -> Vec<Archetype> {
        self.scenarios.iter().map(|s| s.archetype).collect()
    }

    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// Position of a decision in its scenario's option list. Feeds the
    /// dominant-decision tie break: earlier-declared options win ties.
    pub fn option_position(&self, archetype: Archetype, decision: &str) -> Option<usize> {
        let scenario = self.scenarios.iter().find(|s| s.archetype == archetype)?;
        scenario.options.iter().position(|o| o == decision)
    }
}

/// How each role reacts to a decision under an archetype. Total over all
/// inputs: unannotated triples (all of HR, for instance) report
/// `Sentiment::Unknown`.
pub fn sentiment(archetype: Archetype, decision: &str, role: Role) -> Sentiment {
    for (a, d, r, s) in SENTIMENT_SEEDS {
        if a == archetype && r == role && d == decision {
            return s;
        }
    }
    Sentiment::Unknown
}

// ********* Direction map *********

/// Maps decision option text to a coarse direction. Total: options
/// outside the table classify as `Unclassified`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DirectionMap {
    entries: Vec<(String, Direction)>,
}

impl DirectionMap {
    pub fn course_default() -> DirectionMap {
        let entries = DIRECTION_SEEDS
            .iter()
            .map(|(text, dir)| (text.to_string(), *dir))
            .collect();
        DirectionMap { entries }
    }

    pub fn new(entries: Vec<(String, Direction)>) -> DirectionMap {
        DirectionMap { entries }
    }

    pub fn classify(&self, decision: &str) -> Direction {
        for (text, dir) in &self.entries {
            if text == decision {
                return *dir;
            }
        }
        Direction::Unclassified
    }
}
