/*!

This is the long-form manual for `decision_lab` and `declab`.

## The response sheet

All submissions live in one append-only sheet. The first row is the
header, and the nine columns are fixed, in this order:

```text
Timestamp,Participant_ID,Role,Bank_Type,Question_ID,Decision,Confidence,Reflection,Round
```

* `Timestamp`: local wall-clock time, `YYYY-MM-DD HH:MM:SS`, stamped
  when the submission is accepted.
* `Participant_ID`: free text chosen by the class (seat number,
  initials, pseudonym). Uniqueness is not enforced; when one
  participant submits several times for the same bank and round, the
  latest submission is the one the analytics count.
* `Role`: one of `CEO`, `CRO`, `Regulator`, `HR`.
* `Bank_Type`: the archetype display name, e.g. `Margin Machine`.
* `Question_ID`: which prompt was answered. The built-in catalog uses
  the archetype short code here.
* `Decision`: the chosen option, exactly as the catalog declares it.
* `Confidence`: integer 1 to 5.
* `Reflection`: optional free text; empty when the student skipped it.
* `Round`: `1` or `2`.

Rows are only ever appended. Nothing in the toolchain updates or
deletes a row, so the sheet doubles as the session's audit trail.

Sheets from older course editions with five or six columns (no
participant or round tracking) are rejected with a message saying so
rather than guessed at; re-collect with the current layout.

## Input providers

The sheet can live in two places:

### `csv`

The default. A plain CSV file on disk, created (with its header row)
on the first accepted submission. This is the provider `declab submit`
writes to. A missing file reads back as an empty session, which is the
normal state before the first submission.

### `xlsx`

A workbook exported from a hosted spreadsheet (Google Sheets or Excel
Online), for classes that collect submissions through a web form. The
first worksheet is read unless `worksheetName` picks another one. The
expected column layout is the same nine columns. This provider is
read-only: `declab submit` against it fails with an explicit error, as
the hosted copy is the written one.

## Configuration

`declab` runs with sensible defaults; a JSON config file selects the
provider and session parameters. Pass it with `--config`:

```json
{
  "courseName": "Bank Crisis Decision Lab",
  "sheet": {
    "provider": "csv",
    "filePath": "responses.csv",
    "worksheetName": null
  },
  "refreshSeconds": 5
}
```

* `courseName` (string, optional): printed in the dashboard header.
* `sheet.provider` (string, optional): `csv` or `xlsx`, default `csv`.
* `sheet.filePath` (string, optional): path to the sheet file, default
  `responses.csv` in the working directory.
* `sheet.worksheetName` (string, optional): for `xlsx`, the worksheet
  holding the responses. Default is the only worksheet present.
* `refreshSeconds` (number, optional): the `--watch` refresh period,
  default 5.

Command-line flags win over the config file where both apply
(`--interval` over `refreshSeconds`).

## Aggregation semantics

The analytics are deterministic and total over well-formed sheets. The
details that matter when reading the numbers:

* **Latest submission wins.** Within one participant, bank and round,
  the record with the latest timestamp is canonical. If two share a
  timestamp (the sheet only keeps seconds), the one appended later
  wins.
* **Dominant decision ties.** When two options tie on count, the one
  declared earlier in the scenario wins. The listing order in
  `declab scenarios` is the declaration order.
* **Rounding.** Mean confidence is rounded to 2 decimal places, the
  round-2 change rate to 1 decimal place. Roles with no submissions
  are omitted from the means instead of shown as zero.
* **Round pairing.** A participant appears in the round comparison
  only once both of their rounds are in. The change rate is undefined
  (shown as no data) until the first pair exists.
* **Directions.** Each decision option maps to a coarse direction
  (aggressive, conservative, delay) for the round-over-round shift
  table. Options outside the built-in vocabulary count as
  unclassified rather than being dropped.

## The JSON summary

`declab dashboard --out <path>` writes the full aggregate bundle as
deterministic JSON (stable key order, stable array order), so two runs
over the same sheet produce byte-identical files. `--reference <path>`
compares the freshly computed summary with a saved one and prints a
line diff when they disagree, which is how the course archive is
checked after editing a sheet by hand.

*/
