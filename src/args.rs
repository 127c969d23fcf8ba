use clap::{Parser, Subcommand};

/// Classroom decision survey for bank crisis scenarios: students submit
/// role-play decisions, instructors watch the aggregates live.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The session configuration file in JSON format, selecting the
    /// response sheet provider and refresh period. For more information about the keys,
    /// read the documentation of the decision_lab crate.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lists the bank scenarios of the session with their decision options.
    Scenarios,
    /// Validates one decision and appends it to the response sheet.
    Submit(SubmitArgs),
    /// Renders the aggregate dashboard for one bank scenario.
    Dashboard(DashboardArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct SubmitArgs {
    /// The participant identifier (seat number, initials, pseudonym).
    #[clap(long, value_parser)]
    pub participant: String,

    /// The role played while deciding: CEO, CRO, Regulator or HR.
    #[clap(long, value_parser)]
    pub role: String,

    /// The bank archetype, by short code (e.g. margin) or full display name.
    #[clap(long, value_parser)]
    pub bank: String,

    /// The chosen option, either as its full text or as its 1-based number in the
    /// scenarios listing.
    #[clap(long, value_parser)]
    pub decision: String,

    /// Self-reported confidence in the decision, 1 (low) to 5 (high).
    #[clap(long, value_parser)]
    pub confidence: u32,

    /// (default 1) The decision round: 1 before the role switch, 2 after it.
    #[clap(long, value_parser, default_value_t = 1)]
    pub round: u32,

    /// (optional) Which prompt was answered. Defaults to the archetype short code.
    #[clap(long, value_parser)]
    pub question: Option<String>,

    /// (optional) A short reflection on the decision, stored next to it.
    #[clap(long, value_parser)]
    pub reflection: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DashboardArgs {
    /// The bank archetype to aggregate, by short code or full display name.
    #[clap(long, value_parser)]
    pub bank: String,

    /// (optional) Restricts every aggregate to one role.
    #[clap(long, value_parser)]
    pub role: Option<String>,

    /// If passed as an argument, re-reads the sheet and re-renders at a fixed interval
    /// until interrupted.
    #[clap(long, takes_value = false)]
    pub watch: bool,

    /// (seconds, optional) The refresh period for --watch. Overrides the refreshSeconds
    /// value from the configuration file.
    #[clap(long, value_parser)]
    pub interval: Option<u64>,

    /// If passed as an argument, also prints the individual responses after the
    /// aggregates.
    #[clap(long, takes_value = false)]
    pub raw: bool,

    /// If passed as an argument, prints the real-world outcome note for the scenario.
    /// Meant for the debrief, not for the live phase.
    #[clap(long, takes_value = false)]
    pub reveal_outcome: bool,

    /// (file path, optional) If specified, the summary of the aggregates will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A reference summary in JSON format. If provided, declab will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,
}
