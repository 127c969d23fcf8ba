mod catalog;
mod config;
pub mod manual;
pub mod quick_start;

use log::{debug, info};

use std::collections::BTreeMap;

pub use crate::catalog::{sentiment, DirectionMap, ScenarioCatalog};
pub use crate::config::*;

// **** Response table ****

/// An immutable snapshot of the response log, in storage (append)
/// order. Rebuilt wholesale from the sheet on every refresh; all
/// aggregation reads one snapshot, so a render never mixes two fetches.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseTable {
    records: Vec<ResponseRecord>,
}

impl ResponseTable {
    pub fn new(records: Vec<ResponseRecord>) -> ResponseTable {
        ResponseTable { records }
    }

    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sub-table scoped to one archetype, and to one role when a
    /// filter is given. Storage order is preserved, so duplicate
    /// resolution behaves identically on the scoped table.
    pub fn filtered(&self, archetype: Archetype, role_filter: Option<Role>) -> ResponseTable {
        let records: Vec<ResponseRecord> = self
            .records
            .iter()
            .filter(|r| r.archetype == archetype)
            .filter(|r| match role_filter {
                Some(role) => r.role == role,
                None => true,
            })
            .cloned()
            .collect();
        debug!(
            "Filtered {} records down to {} for {} (role filter: {:?})",
            self.records.len(),
            records.len(),
            archetype,
            role_filter
        );
        ResponseTable { records }
    }
}

// **** Aggregation engine ****

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Counts submissions by (decision, role) pair. Only observed pairs
/// appear; an empty table yields an empty map.
pub fn decision_role_counts(table: &ResponseTable) -> BTreeMap<(String, Role), u64> {
    let mut counts: BTreeMap<(String, Role), u64> = BTreeMap::new();
    for r in table.records() {
        *counts.entry((r.decision.clone(), r.role)).or_insert(0) += 1;
    }
    counts
}

/// Mean self-reported confidence per role, rounded to 2 decimal
/// places. Roles with no submissions are absent from the map rather
/// than reported as zero.
pub fn mean_confidence_by_role(table: &ResponseTable) -> BTreeMap<Role, f64> {
    let mut sums: BTreeMap<Role, (u64, u64)> = BTreeMap::new();
    for r in table.records() {
        let entry = sums.entry(r.role).or_insert((0, 0));
        entry.0 += r.confidence.value() as u64;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(role, (sum, n))| (role, round2(sum as f64 / n as f64)))
        .collect()
}

/// The decision with the most submissions, or `None` on an empty
/// table. Ties go to the option declared earlier in the scenario;
/// decisions the scenario does not declare lose every tie.
pub fn dominant_decision(table: &ResponseTable, scenario: &ScenarioDefinition) -> Option<String> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for r in table.records() {
        *counts.entry(r.decision.as_str()).or_insert(0) += 1;
    }
    let position = |decision: &str| {
        scenario
            .options
            .iter()
            .position(|o| o == decision)
            .unwrap_or(usize::MAX)
    };
    let mut best: Option<(&str, u64)> = None;
    for (decision, count) in counts {
        let better = match best {
            None => true,
            Some((best_decision, best_count)) => {
                count > best_count
                    || (count == best_count && position(decision) < position(best_decision))
            }
        };
        if better {
            best = Some((decision, count));
        }
    }
    best.map(|(decision, _)| decision.to_string())
}

/// The dense decision-by-role grid for one scenario. Rows are the
/// scenario's options in declaration order, columns are every role in
/// declaration order, and cells without submissions hold 0.
pub fn pivot(table: &ResponseTable, scenario: &ScenarioDefinition) -> PivotTable {
    let decisions: Vec<String> = scenario.options.clone();
    let roles: Vec<Role> = Role::ALL.to_vec();
    let mut counts = vec![vec![0u64; roles.len()]; decisions.len()];
    for r in table.records() {
        let row = decisions.iter().position(|d| *d == r.decision);
        let col = roles.iter().position(|role| *role == r.role);
        if let (Some(row), Some(col)) = (row, col) {
            counts[row][col] += 1;
        }
    }
    PivotTable {
        decisions,
        roles,
        counts,
    }
}

// The canonical record of a participant for one round: last one by
// timestamp, storage order breaking ties at equal seconds.
fn canonical_record<'a>(
    records: &[(usize, &'a ResponseRecord)],
    round: Round,
) -> Option<&'a ResponseRecord> {
    records
        .iter()
        .filter(|(_, r)| r.round == round)
        .max_by_key(|&&(pos, r)| (r.timestamp, pos))
        .map(|&(_, r)| r)
}

/// Pairs every participant's canonical round-1 record with their
/// canonical round-2 record, for participants that submitted in both
/// rounds. Pairs come out ordered by participant id. `change_rate` is
/// a percentage rounded to 1 decimal place, `None` when no pairs
/// exist yet.
///
/// Normally called on a table already scoped to one archetype;
/// participants are paired within whatever scope the table carries.
pub fn paired_round_comparison(table: &ResponseTable) -> RoundComparison {
    let mut by_participant: BTreeMap<&str, Vec<(usize, &ResponseRecord)>> = BTreeMap::new();
    for (pos, r) in table.records().iter().enumerate() {
        by_participant
            .entry(r.participant_id.as_str())
            .or_default()
            .push((pos, r));
    }
    let mut pairs: Vec<PairedComparison> = Vec::new();
    for (participant, records) in by_participant {
        match (
            canonical_record(&records, Round::One),
            canonical_record(&records, Round::Two),
        ) {
            (Some(before), Some(after)) => {
                let changed = before.decision != after.decision;
                pairs.push(PairedComparison {
                    participant_id: participant.to_string(),
                    before: before.clone(),
                    after: after.clone(),
                    changed,
                });
            }
            _ => continue,
        }
    }
    let changed = pairs.iter().filter(|p| p.changed).count() as u64;
    let change_rate = if pairs.is_empty() {
        None
    } else {
        Some(round1(100.0 * changed as f64 / pairs.len() as f64))
    };
    RoundComparison {
        pairs,
        changed,
        change_rate,
    }
}

/// Counts (before direction, after direction) transitions over the
/// paired records. Options outside the direction map count under
/// `Unclassified`.
pub fn direction_shift(
    pairs: &[PairedComparison],
    directions: &DirectionMap,
) -> BTreeMap<(Direction, Direction), u64> {
    let mut shifts: BTreeMap<(Direction, Direction), u64> = BTreeMap::new();
    for pair in pairs {
        let key = (
            directions.classify(&pair.before.decision),
            directions.classify(&pair.after.decision),
        );
        *shifts.entry(key).or_insert(0) += 1;
    }
    shifts
}

fn sentiment_panel_for(scenario: &ScenarioDefinition) -> SentimentPanel {
    let decisions = scenario.options.clone();
    let roles: Vec<Role> = Role::ALL.to_vec();
    let tags = decisions
        .iter()
        .map(|decision| {
            roles
                .iter()
                .map(|&role| sentiment(scenario.archetype, decision, role))
                .collect()
        })
        .collect();
    SentimentPanel {
        decisions,
        roles,
        tags,
    }
}

/// Computes everything one dashboard render needs, in one pass over
/// one snapshot.
///
/// Arguments:
/// * `table` the full response snapshot
/// * `catalog` the session's scenario catalog
/// * `archetype` the scenario under discussion
/// * `role_filter` restricts every aggregate to one role when given
///
/// Fails only when the catalog does not carry the archetype; an empty
/// or partial table yields explicit no-data values, never an error.
pub fn dashboard_data(
    table: &ResponseTable,
    catalog: &ScenarioCatalog,
    archetype: Archetype,
    role_filter: Option<Role>,
) -> Result<DashboardData, NotFoundError> {
    let scenario = catalog.get(archetype)?;
    let scoped = table.filtered(archetype, role_filter);
    let distribution = decision_role_counts(&scoped);
    let confidence_means = mean_confidence_by_role(&scoped);
    let dominant = dominant_decision(&scoped, scenario);
    let pivot_table = pivot(&scoped, scenario);
    let round_comparison = paired_round_comparison(&scoped);
    let shifts = direction_shift(&round_comparison.pairs, catalog.directions());
    info!(
        "Aggregated {} for {} submissions: {} round pairs, dominant decision: {:?}",
        archetype,
        scoped.len(),
        round_comparison.pairs.len(),
        dominant
    );
    Ok(DashboardData {
        archetype,
        role_filter,
        submissions: scoped.len() as u64,
        distribution,
        confidence_means,
        dominant,
        pivot: pivot_table,
        round_comparison,
        direction_shift: shifts,
        sentiment_panel: sentiment_panel_for(scenario),
    })
}

// **** Submission validation ****

/// Checks a submission against the session catalog before it is
/// persisted. The decision must be one of the declared options of the
/// record's archetype; confidence and round ranges are already
/// enforced by their constructors.
pub fn validate_submission(
    catalog: &ScenarioCatalog,
    record: &ResponseRecord,
) -> Result<(), ValidationError> {
    let scenario = match catalog.get(record.archetype) {
        Ok(s) => s,
        Err(e) => return Err(ValidationError::UnknownArchetype(e)),
    };
    if !scenario.options.iter().any(|o| *o == record.decision) {
        return Err(ValidationError::UnknownDecision {
            archetype: record.archetype,
            decision: record.decision.clone(),
        });
    }
    debug!(
        "Valid submission from {:?} for {}",
        record.participant_id, record.archetype
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn rec(
        stamp: &str,
        participant: &str,
        role: Role,
        archetype: Archetype,
        decision: &str,
        confidence: u32,
        round: Round,
    ) -> ResponseRecord {
        ResponseRecord {
            timestamp: ts(stamp),
            participant_id: participant.to_string(),
            role,
            archetype,
            question_id: archetype.code().to_string(),
            decision: decision.to_string(),
            confidence: Confidence::new(confidence).unwrap(),
            reflection: String::new(),
            round,
        }
    }

    fn scenario_with_options(options: &[&str]) -> ScenarioDefinition {
        ScenarioDefinition {
            id: "growth".to_string(),
            archetype: Archetype::GrowthAtAllCosts,
            prompt: "prompt".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            outcome: "outcome".to_string(),
        }
    }

    #[test]
    fn counts_group_by_decision_and_role() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:05",
                "p2",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                4,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:10",
                "p3",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Act early / tighten controls",
                5,
                Round::One,
            ),
        ]);
        let counts = decision_role_counts(&table);
        assert_eq!(
            counts.get(&("Delay and monitor".to_string(), Role::Ceo)),
            Some(&2)
        );
        assert_eq!(
            counts.get(&("Act early / tighten controls".to_string(), Role::Cro)),
            Some(&1)
        );
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn counting_twice_gives_the_same_answer() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::FortressBank,
                "Hold current buffers",
                4,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:01",
                "p2",
                Role::Cro,
                Archetype::FortressBank,
                "Hold current buffers",
                4,
                Round::One,
            ),
        ]);
        assert_eq!(decision_role_counts(&table), decision_role_counts(&table));
        assert_eq!(
            mean_confidence_by_role(&table),
            mean_confidence_by_role(&table)
        );
    }

    #[test]
    fn mean_confidence_rounds_and_omits_absent_roles() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:01:00",
                "p2",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                5,
                Round::One,
            ),
        ]);
        let means = mean_confidence_by_role(&table);
        assert_eq!(means.get(&Role::Ceo), Some(&4.0));
        assert!(!means.contains_key(&Role::Regulator));
        assert_eq!(means.len(), 1);
    }

    #[test]
    fn mean_confidence_keeps_two_decimal_places() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:01:00",
                "p2",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:02:00",
                "p3",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                4,
                Round::One,
            ),
        ]);
        let means = mean_confidence_by_role(&table);
        assert_eq!(means.get(&Role::Cro), Some(&3.33));
    }

    #[test]
    fn dominant_decision_takes_the_highest_count() {
        let scenario = scenario_with_options(&["A", "B", "C"]);
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "B",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:01",
                "p2",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "B",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:02",
                "p3",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "A",
                3,
                Round::One,
            ),
        ]);
        assert_eq!(dominant_decision(&table, &scenario), Some("B".to_string()));
    }

    #[test]
    fn dominant_decision_breaks_ties_by_declaration_order() {
        let votes = [
            ("p1", "A"),
            ("p2", "A"),
            ("p3", "A"),
            ("p4", "B"),
            ("p5", "B"),
            ("p6", "B"),
            ("p7", "C"),
        ];
        let records: Vec<ResponseRecord> = votes
            .iter()
            .map(|(participant, decision)| {
                rec(
                    "2026-03-02 09:00:00",
                    participant,
                    Role::Ceo,
                    Archetype::GrowthAtAllCosts,
                    decision,
                    3,
                    Round::One,
                )
            })
            .collect();
        let table = ResponseTable::new(records);

        // A and B tie at 3 apiece. Whichever is declared first wins.
        let forward = scenario_with_options(&["A", "B", "C"]);
        assert_eq!(dominant_decision(&table, &forward), Some("A".to_string()));
        let reversed = scenario_with_options(&["B", "A", "C"]);
        assert_eq!(dominant_decision(&table, &reversed), Some("B".to_string()));
    }

    #[test]
    fn pivot_is_dense_and_zero_filled() {
        let scenario = scenario_with_options(&["A", "B"]);
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "A",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:01",
                "p2",
                Role::Regulator,
                Archetype::GrowthAtAllCosts,
                "A",
                3,
                Round::One,
            ),
        ]);
        let grid = pivot(&table, &scenario);
        assert_eq!(grid.decisions, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(grid.roles, Role::ALL.to_vec());
        // Row A: one CEO, one Regulator. Row B: all zeros.
        assert_eq!(grid.counts[0], vec![1, 0, 1, 0]);
        assert_eq!(grid.counts[1], vec![0, 0, 0, 0]);
    }

    #[test]
    fn paired_comparison_detects_a_changed_decision() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::MarginMachine,
                "Continue current strategy",
                4,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::MarginMachine,
                "Shorten asset duration",
                3,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        assert_eq!(comparison.pairs.len(), 1);
        let pair = &comparison.pairs[0];
        assert_eq!(pair.participant_id, "p1");
        assert!(pair.changed);
        assert_eq!(pair.before.decision, "Continue current strategy");
        assert_eq!(pair.after.decision, "Shorten asset duration");
        assert_eq!(comparison.changed, 1);
        assert_eq!(comparison.change_rate, Some(100.0));
    }

    #[test]
    fn change_rate_is_a_one_decimal_percentage() {
        let mut records = Vec::new();
        for p in ["p1", "p2", "p3", "p4"] {
            records.push(rec(
                "2026-03-02 09:00:00",
                p,
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ));
        }
        // Only p1 changes its decision in round 2.
        records.push(rec(
            "2026-03-02 10:00:00",
            "p1",
            Role::Cro,
            Archetype::GrowthAtAllCosts,
            "Act early / tighten controls",
            4,
            Round::Two,
        ));
        for p in ["p2", "p3", "p4"] {
            records.push(rec(
                "2026-03-02 10:00:00",
                p,
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                4,
                Round::Two,
            ));
        }
        let comparison = paired_round_comparison(&ResponseTable::new(records));
        assert_eq!(comparison.pairs.len(), 4);
        assert_eq!(comparison.changed, 1);
        assert_eq!(comparison.change_rate, Some(25.0));
    }

    #[test]
    fn unpaired_participants_are_left_out() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p2",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        assert!(comparison.pairs.is_empty());
        assert_eq!(comparison.changed, 0);
        assert_eq!(comparison.change_rate, None);
    }

    #[test]
    fn duplicate_submissions_resolve_to_the_latest() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Continue current strategy",
                3,
                Round::One,
            ),
            // Second thoughts, a minute later.
            rec(
                "2026-03-02 09:01:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                2,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                4,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        assert_eq!(comparison.pairs.len(), 1);
        assert_eq!(comparison.pairs[0].before.decision, "Delay and monitor");
        assert!(!comparison.pairs[0].changed);
    }

    #[test]
    fn duplicate_ties_at_equal_seconds_go_to_storage_order() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Continue current strategy",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Act early / tighten controls",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Act early / tighten controls",
                4,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        assert_eq!(
            comparison.pairs[0].before.decision,
            "Act early / tighten controls"
        );
        assert!(!comparison.pairs[0].changed);
    }

    #[test]
    fn pairs_come_out_sorted_by_participant() {
        let mut records = Vec::new();
        for p in ["zoe", "amir", "kim"] {
            records.push(rec(
                "2026-03-02 09:00:00",
                p,
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ));
            records.push(rec(
                "2026-03-02 10:00:00",
                p,
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::Two,
            ));
        }
        let comparison = paired_round_comparison(&ResponseTable::new(records));
        let ids: Vec<&str> = comparison
            .pairs
            .iter()
            .map(|p| p.participant_id.as_str())
            .collect();
        assert_eq!(ids, vec!["amir", "kim", "zoe"]);
    }

    #[test]
    fn direction_shift_counts_transitions() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Continue current strategy",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Act early / tighten controls",
                4,
                Round::Two,
            ),
            rec(
                "2026-03-02 09:00:00",
                "p2",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p2",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        let shifts = direction_shift(&comparison.pairs, &DirectionMap::course_default());
        assert_eq!(
            shifts.get(&(Direction::Aggressive, Direction::Conservative)),
            Some(&1)
        );
        assert_eq!(shifts.get(&(Direction::Delay, Direction::Delay)), Some(&1));
        assert_eq!(shifts.len(), 2);
    }

    #[test]
    fn unmapped_options_shift_as_unclassified() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Call an advisor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::Two,
            ),
        ]);
        let comparison = paired_round_comparison(&table);
        let shifts = direction_shift(&comparison.pairs, &DirectionMap::course_default());
        assert_eq!(
            shifts.get(&(Direction::Unclassified, Direction::Delay)),
            Some(&1)
        );
    }

    #[test]
    fn custom_direction_vocabularies_flow_through_the_dashboard() {
        let scenario = scenario_with_options(&["Freeze new lending", "Expand into new markets"]);
        let directions = DirectionMap::new(vec![
            ("Freeze new lending".to_string(), Direction::Conservative),
            ("Expand into new markets".to_string(), Direction::Aggressive),
        ]);
        let catalog = ScenarioCatalog::with_directions(vec![scenario], directions);
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Expand into new markets",
                4,
                Round::One,
            ),
            rec(
                "2026-03-02 10:00:00",
                "p1",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Freeze new lending",
                4,
                Round::Two,
            ),
        ]);
        let data = dashboard_data(&table, &catalog, Archetype::GrowthAtAllCosts, None).unwrap();
        assert_eq!(
            data.direction_shift
                .get(&(Direction::Aggressive, Direction::Conservative)),
            Some(&1)
        );
    }

    #[test]
    fn every_aggregate_is_total_on_the_empty_table() {
        let table = ResponseTable::new(Vec::new());
        let catalog = ScenarioCatalog::course_default();
        let scenario = catalog.get(Archetype::FortressBank).unwrap();

        assert!(decision_role_counts(&table).is_empty());
        assert!(mean_confidence_by_role(&table).is_empty());
        assert_eq!(dominant_decision(&table, scenario), None);
        let grid = pivot(&table, scenario);
        assert!(grid.counts.iter().all(|row| row.iter().all(|c| *c == 0)));
        let comparison = paired_round_comparison(&table);
        assert!(comparison.pairs.is_empty());
        assert_eq!(comparison.change_rate, None);
        assert!(direction_shift(&comparison.pairs, catalog.directions()).is_empty());

        let data = dashboard_data(&table, &catalog, Archetype::FortressBank, None).unwrap();
        assert_eq!(data.submissions, 0);
        assert_eq!(data.dominant, None);
        assert!(data.distribution.is_empty());
        assert!(data.confidence_means.is_empty());
    }

    #[test]
    fn dashboard_data_scopes_to_archetype_and_role() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:00",
                "p1",
                Role::Ceo,
                Archetype::MarginMachine,
                "Continue current strategy",
                4,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:05",
                "p2",
                Role::Cro,
                Archetype::MarginMachine,
                "Shorten asset duration",
                5,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:10",
                "p3",
                Role::Ceo,
                Archetype::FortressBank,
                "Hold current buffers",
                2,
                Round::One,
            ),
        ]);
        let catalog = ScenarioCatalog::course_default();

        let all_roles =
            dashboard_data(&table, &catalog, Archetype::MarginMachine, None).unwrap();
        assert_eq!(all_roles.submissions, 2);

        let ceo_only =
            dashboard_data(&table, &catalog, Archetype::MarginMachine, Some(Role::Ceo)).unwrap();
        assert_eq!(ceo_only.submissions, 1);
        assert_eq!(
            ceo_only.dominant,
            Some("Continue current strategy".to_string())
        );
        assert_eq!(ceo_only.confidence_means.get(&Role::Ceo), Some(&4.0));
        assert!(!ceo_only.confidence_means.contains_key(&Role::Cro));
    }

    #[test]
    fn dashboard_data_fails_on_archetypes_outside_the_session() {
        let full = ScenarioCatalog::course_default();
        let subset = ScenarioCatalog::new(vec![full
            .get(Archetype::GrowthAtAllCosts)
            .unwrap()
            .clone()]);
        let table = ResponseTable::new(Vec::new());
        let err = dashboard_data(&table, &subset, Archetype::MarginMachine, None).unwrap_err();
        assert_eq!(err.name, "Margin Machine");
    }

    #[test]
    fn dashboard_sentiment_panel_lines_up_with_the_pivot() {
        let table = ResponseTable::new(Vec::new());
        let catalog = ScenarioCatalog::course_default();
        let data = dashboard_data(&table, &catalog, Archetype::HiddenRiskBank, None).unwrap();
        assert_eq!(data.sentiment_panel.decisions, data.pivot.decisions);
        assert_eq!(data.sentiment_panel.roles, data.pivot.roles);
        // CRO alarm at continuing as-is; HR is unannotated.
        let row = data
            .sentiment_panel
            .decisions
            .iter()
            .position(|d| d == "Continue current strategy")
            .unwrap();
        let cro = data
            .sentiment_panel
            .roles
            .iter()
            .position(|r| *r == Role::Cro)
            .unwrap();
        let hr = data
            .sentiment_panel
            .roles
            .iter()
            .position(|r| *r == Role::Hr)
            .unwrap();
        assert_eq!(data.sentiment_panel.tags[row][cro], Sentiment::Alarm);
        assert_eq!(data.sentiment_panel.tags[row][hr], Sentiment::Unknown);
    }

    #[test]
    fn validation_accepts_declared_options_only() {
        let catalog = ScenarioCatalog::course_default();
        let good = rec(
            "2026-03-02 09:00:00",
            "p1",
            Role::Ceo,
            Archetype::CapitalStarvedGrowth,
            "Raise capital immediately",
            4,
            Round::One,
        );
        assert!(validate_submission(&catalog, &good).is_ok());

        let bad = rec(
            "2026-03-02 09:00:00",
            "p1",
            Role::Ceo,
            Archetype::CapitalStarvedGrowth,
            "Sell the bank",
            4,
            Round::One,
        );
        match validate_submission(&catalog, &bad) {
            Err(ValidationError::UnknownDecision {
                archetype,
                decision,
            }) => {
                assert_eq!(archetype, Archetype::CapitalStarvedGrowth);
                assert_eq!(decision, "Sell the bank");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_archetypes_the_session_does_not_play() {
        let full = ScenarioCatalog::course_default();
        let subset = ScenarioCatalog::new(vec![full
            .get(Archetype::FortressBank)
            .unwrap()
            .clone()]);
        let record = rec(
            "2026-03-02 09:00:00",
            "p1",
            Role::Ceo,
            Archetype::MarginMachine,
            "Shorten asset duration",
            4,
            Round::One,
        );
        assert!(matches!(
            validate_submission(&subset, &record),
            Err(ValidationError::UnknownArchetype(_))
        ));
    }

    #[test]
    fn filtered_preserves_storage_order() {
        let table = ResponseTable::new(vec![
            rec(
                "2026-03-02 09:00:02",
                "p1",
                Role::Ceo,
                Archetype::GrowthAtAllCosts,
                "Delay and monitor",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:01",
                "p2",
                Role::Ceo,
                Archetype::FortressBank,
                "Hold current buffers",
                3,
                Round::One,
            ),
            rec(
                "2026-03-02 09:00:00",
                "p3",
                Role::Cro,
                Archetype::GrowthAtAllCosts,
                "Continue current strategy",
                3,
                Round::One,
            ),
        ]);
        let scoped = table.filtered(Archetype::GrowthAtAllCosts, None);
        let ids: Vec<&str> = scoped
            .records()
            .iter()
            .map(|r| r.participant_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }
}
