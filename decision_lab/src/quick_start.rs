/*!

# Quick start: running a classroom session

This example walks through one full session of the bank crisis decision
lab with the `declab` command line tool. A session has three phases:
students pick decisions for a bank scenario, the instructor watches the
aggregate dashboard fill in live, and the debrief reveals what happened
to real banks in the same position.

**Listing the scenarios** Every session starts from the built-in
catalog of six bank archetypes. List them with:

```bash
declab scenarios
```

Each entry prints the archetype's short code, the situation prompt, and
the numbered decision options. The short codes (`growth`, `fortress`,
`margin`, `hidden`, `starved`, `approved`) are what the other
subcommands take as `--bank`.

**Collecting decisions** Each student submits one decision per round.
The decision can be given as full option text or as its 1-based number
from the `scenarios` listing, so this records the same submission
twice:

```bash
declab submit --participant s042 --role CEO --bank margin \
  --decision "Continue current strategy" --confidence 4
declab submit --participant s042 --role CEO --bank margin \
  --decision 2 --confidence 4
```

Submissions are validated against the catalog before anything is
written. A decision outside the scenario's options, an unknown role or
a confidence outside 1-5 is rejected on the spot and nothing lands in
the sheet:

```text
error: Invalid submission: decision "Sell the bank" is not one of the declared options for Margin Machine
```

Accepted submissions are appended to the response sheet
(`responses.csv` in the working directory by default, see the
[configuration section](../manual/index.html#configuration)) with a
timestamp, and the tool confirms:

```text
Recorded: s042 (CEO) on Margin Machine, round 1
```

**Watching the dashboard** While students submit, the instructor keeps
a live view on the projector:

```bash
declab dashboard --bank margin --watch
```

This re-reads the sheet and re-renders every 5 seconds. One render
shows the submission count, the decision-by-role distribution table,
mean confidence per role, the current dominant decision, and (once
round 2 starts) the round-over-round comparison. With `RUST_LOG=info`
(or `--verbose`) the refresh loop is visible:

```text
[2026-03-02T14:05:10Z INFO  declab::lab::io_csv] Read 23 records from "responses.csv"
[2026-03-02T14:05:10Z INFO  decision_lab] Aggregated Margin Machine for 23 submissions: 0 round pairs, dominant decision: Some("Continue current strategy")
```

**Switching roles for round 2** After the first round closes, students
swap roles (the CEO becomes the risk officer, and so on) and submit
again with `--round 2`:

```bash
declab submit --participant s042 --role CRO --bank margin \
  --decision "Shorten asset duration" --confidence 3 --round 2
```

As round-2 submissions arrive, the dashboard pairs each participant's
two decisions and reports how many changed their mind and in which
direction (toward conservative, aggressive, or delaying choices).

**The debrief** When the discussion wraps up, reveal what actually
happened to banks with this profile:

```bash
declab dashboard --bank margin --reveal-outcome
```

`--raw` also prints the individual responses (useful for picking
students to defend their choice), and `--out summary.json` writes the
whole aggregate bundle to a JSON file for the course archive.

If your institution collects submissions through a hosted form instead
of this tool, export the result spreadsheet as `.xlsx` and point a
config file at it; the [manual](../manual/index.html) covers the sheet
layout and the configuration keys.

*/
