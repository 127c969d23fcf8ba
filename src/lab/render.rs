// Text rendering of the catalog listing and the dashboard.

use std::collections::BTreeMap;

use decision_lab::*;

pub fn render_scenarios(catalog: &ScenarioCatalog, course_name: &str) -> String {
    let mut out = format!("== {}: scenarios ==\n", course_name);
    for scenario in catalog.scenarios() {
        out.push('\n');
        out.push_str(&format!("[{}] {}\n", scenario.id, scenario.archetype));
        out.push_str(&wrap(&scenario.prompt, 76, "  "));
        out.push('\n');
        out.push_str("  Options:\n");
        for (idx, option) in scenario.options.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", idx + 1, option));
        }
    }
    out
}

pub fn render_dashboard(
    data: &DashboardData,
    scenario: &ScenarioDefinition,
    course_name: &str,
    raw: Option<&[ResponseRecord]>,
    reveal_outcome: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", course_name));
    out.push_str(&format!(
        "Scenario: {} ({})\n",
        scenario.archetype, scenario.id
    ));
    match data.role_filter {
        Some(role) => out.push_str(&format!(
            "Submissions: {} ({} only)\n",
            data.submissions, role
        )),
        None => out.push_str(&format!("Submissions: {} (all roles)\n", data.submissions)),
    }
    out.push('\n');
    out.push_str(&wrap(&scenario.prompt, 76, "  "));
    out.push_str("\n\n");

    if data.submissions == 0 {
        out.push_str("No submissions yet.\n");
    } else {
        out.push_str("Decisions by role:\n");
        out.push_str(&render_pivot(&data.pivot));
        if let Some(dominant) = &data.dominant {
            out.push_str(&format!("Dominant decision: {}\n", dominant));
        }
        out.push('\n');
        out.push_str("Mean confidence by role:\n");
        out.push_str(&format!("  {}\n", render_means(&data.confidence_means)));
        out.push('\n');
        match data.round_comparison.change_rate {
            Some(rate) => {
                out.push_str(&format!(
                    "Round 1 -> 2: {} participants with both rounds, {} changed ({:.1}%)\n",
                    data.round_comparison.pairs.len(),
                    data.round_comparison.changed,
                    rate
                ));
                if !data.direction_shift.is_empty() {
                    out.push_str("  Direction shifts:\n");
                    for ((from, to), count) in &data.direction_shift {
                        out.push_str(&format!(
                            "    {} -> {}  {}\n",
                            pad(from.as_str(), 12),
                            pad(to.as_str(), 12),
                            count
                        ));
                    }
                }
            }
            None => out.push_str("Round 1 -> 2: awaiting participants with both rounds\n"),
        }
        out.push('\n');
        out.push_str("Typical role reactions:\n");
        out.push_str(&render_sentiments(&data.sentiment_panel));
    }

    if let Some(records) = raw {
        out.push('\n');
        out.push_str(&render_raw(records));
    }
    if reveal_outcome {
        out.push('\n');
        out.push_str("Real-world outcome:\n");
        out.push_str(&wrap(&scenario.outcome, 76, "  "));
        out.push('\n');
    }
    out
}

fn render_pivot(pivot: &PivotTable) -> String {
    let label = "Decision";
    let decision_width = pivot
        .decisions
        .iter()
        .map(|d| d.len())
        .chain(std::iter::once(label.len()))
        .max()
        .unwrap_or(label.len());
    let mut out = format!("  {}", pad(label, decision_width));
    for role in &pivot.roles {
        out.push_str(&format!("  {:>9}", role.as_str()));
    }
    out.push_str(&format!("  {:>6}\n", "Total"));
    for (row, decision) in pivot.decisions.iter().enumerate() {
        out.push_str(&format!("  {}", pad(decision, decision_width)));
        let mut total = 0u64;
        for (col, _) in pivot.roles.iter().enumerate() {
            let count = pivot.counts[row][col];
            total += count;
            out.push_str(&format!("  {:>9}", count));
        }
        out.push_str(&format!("  {:>6}\n", total));
    }
    out
}

fn render_means(means: &BTreeMap<Role, f64>) -> String {
    if means.is_empty() {
        return "no submissions yet".to_string();
    }
    means
        .iter()
        .map(|(role, mean)| format!("{} {:.2}", role.as_str(), mean))
        .collect::<Vec<String>>()
        .join("   ")
}

fn render_sentiments(panel: &SentimentPanel) -> String {
    let label = "Decision";
    let decision_width = panel
        .decisions
        .iter()
        .map(|d| d.len())
        .chain(std::iter::once(label.len()))
        .max()
        .unwrap_or(label.len());
    let mut out = format!("  {}", pad(label, decision_width));
    for role in &panel.roles {
        out.push_str(&format!("  {:<14}", role.as_str()));
    }
    out.push('\n');
    for (row, decision) in panel.decisions.iter().enumerate() {
        out.push_str(&format!("  {}", pad(decision, decision_width)));
        for (col, _) in panel.roles.iter().enumerate() {
            let tag = match panel.tags[row][col] {
                Sentiment::Unknown => "-",
                tag => tag.as_str(),
            };
            out.push_str(&format!("  {:<14}", tag));
        }
        out.push('\n');
    }
    out
}

fn render_raw(records: &[ResponseRecord]) -> String {
    let mut out = format!("Raw responses ({}):\n", records.len());
    let participant_width = records
        .iter()
        .map(|r| r.participant_id.len())
        .max()
        .unwrap_or(0);
    for record in records {
        out.push_str(&format!(
            "  {}  {}  {}  round {}  {}  (confidence {})\n",
            record.timestamp.format(TIMESTAMP_FORMAT),
            pad(&record.participant_id, participant_width),
            pad(record.role.as_str(), 9),
            record.round,
            record.decision,
            record.confidence
        ));
        if !record.reflection.is_empty() {
            out.push_str(&format!("      note: {}\n", record.reflection));
        }
    }
    out
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

fn wrap(text: &str, width: usize, indent: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(format!("{}{}", indent, current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(format!("{}{}", indent, current));
    }
    lines.join("\n")
}
