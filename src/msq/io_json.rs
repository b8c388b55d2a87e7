// Primitives for reading responses in JSON.

use serde::{Deserialize, Serialize};

use crate::msq::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct JsonResponse {
    recipient: String,
    #[serde(default)]
    answers: Vec<String>,
    #[serde(rename = "isOther", default)]
    is_other: bool,
    #[serde(rename = "otherFieldContent")]
    other_field_content: Option<String>,
}

pub fn read_json_responses(path: String) -> MsqResult<Vec<ParsedResponse>> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    parse_json_responses(contents.as_str())
}

fn parse_json_responses(contents: &str) -> MsqResult<Vec<ParsedResponse>> {
    let responses: Vec<JsonResponse> =
        serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, jr) in responses.into_iter().enumerate() {
        let other = if jr.is_other {
            Some(jr.other_field_content.unwrap_or_default())
        } else {
            None
        };
        debug!(
            "parse_json_responses: {}: {} {:?} other: {:?}",
            idx, jr.recipient, jr.answers, other
        );
        res.push(ParsedResponse {
            recipient: jr.recipient,
            selected: jr.answers,
            other,
        });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_other_content() {
        let res = parse_json_responses(
            r#"[
                {"recipient": "a", "answers": ["X", "free"], "isOther": true, "otherFieldContent": "free"},
                {"recipient": "b", "answers": [""], "otherFieldContent": "ignored"}
            ]"#,
        )
        .unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].other, Some("free".to_string()));
        assert_eq!(res[1].other, None);
        assert_eq!(res[1].selected, vec!["".to_string()]);
    }
}
