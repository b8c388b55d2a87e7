// Primitives for reading responses in CSV.

use crate::msq::*;

// Column layout: recipient, content of the "Other" field, then the answers.
const RECIPIENT_COL: usize = 0;
const OTHER_COL: usize = 1;
const FIRST_ANSWER_COL: usize = 2;

pub fn read_csv_responses(path: String) -> MsqResult<Vec<ParsedResponse>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.clone())
        .context(CsvOpenSnafu { path })?;
    read_records(rdr)
}

fn read_records<R: std::io::Read>(rdr: csv::Reader<R>) -> MsqResult<Vec<ParsedResponse>> {
    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let recipient = line
            .get(RECIPIENT_COL)
            .context(CsvLineTooShortSnafu { lineno })?
            .to_string();
        let other: Option<String> = match line.get(OTHER_COL) {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => None,
        };
        let mut selected: Vec<String> = line
            .iter()
            .skip(FIRST_ANSWER_COL)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        // Nothing at all on the line: the respondent picked "None of the above".
        if selected.is_empty() && other.is_none() {
            selected.push("".to_string());
        }
        debug!(
            "read_csv_responses: lineno: {:?} recipient: {} row: {:?} other: {:?}",
            lineno, recipient, &selected, other
        );
        res.push(ParsedResponse {
            recipient,
            selected,
            other,
        });
    }
    Ok(res)
}
