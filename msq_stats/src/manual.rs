/*!

This is the long-form manual for `msq_stats` and `msqstat`.

## Question configuration

`msqstat` reads a configuration file in JSON. The question itself uses the same keys as the
storage format of the feedback system:

```text
{
  "outputSettings": { "questionName": "Which topics did you enjoy?", "questionNumber": 3 },
  "question": {
    "msqChoices": ["Lectures", "Labs", "Projects"],
    "otherEnabled": true,
    "generateOptionsFor": "NONE",
    "maxSelectableChoices": 3,
    "minSelectableChoices": null,
    "hasAssignedWeights": true,
    "msqWeights": [1, 2, 3],
    "msqOtherWeight": 0.5
  },
  "responseSources": [ { "provider": "json", "filePath": "responses.json" } ],
  "recipients": [ { "id": "alice@example.com", "name": "Alice", "team": "Team 1" } ]
}
```

Notes:
- `maxSelectableChoices` and `minSelectableChoices` may be missing or `null` when there is no
  restriction. The legacy value `-2147483648` is also understood as "no restriction".
- `generateOptionsFor` is one of `NONE`, `STUDENTS`, `STUDENTS_EXCLUDING_SELF`, `TEAMS`,
  `TEAMS_EXCLUDING_SELF`, `INSTRUCTORS`. When it is not `NONE`, the number of generated
  options must be given with `numOfGeneratedMsqChoices`.
- the paths of the response sources are relative to the configuration file.
- `recipients` is optional. When provided, the per-recipient statistics show the name and
  the team of each recipient and are sorted by team, then by name.

## Response formats

### `json`

A list of responses:

```text
[
  { "recipient": "alice@example.com", "answers": ["Labs", "Projects"] },
  { "recipient": "bob@example.com", "answers": ["Labs", "Hackathon"], "isOther": true, "otherFieldContent": "Hackathon" },
  { "recipient": "bob@example.com", "answers": [""] }
]
```

An empty answer stands for "None of the above".

### `csv`

One response per row. The first row is a header and is skipped.

```text
recipient,other,answer 1,answer 2
alice@example.com,,Labs,Projects
bob@example.com,Hackathon,Labs
```

The second column holds the content of the "Other" field, empty if this option was not
selected. Rows may have different numbers of answers.

## Output

The summary is written in JSON (default) or CSV with the `--format` flag. Percentages and
weights are rounded to two decimal places. When no option was selected at all, the JSON
summary has `null` results and the CSV summary is empty.

With `--previous`, `msqstat` also reports whether moving from the previous version of the
question to the current one requires deleting the responses already collected.

 */
