use crate::msq::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "questionName")]
    pub question_name: String,
    #[serde(rename = "questionNumber")]
    pub question_number: Option<u32>,
}

/// The question, with the keys of the storage format of the feedback system.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MsqQuestionDetails {
    #[serde(rename = "msqChoices", default)]
    pub msq_choices: Vec<String>,
    #[serde(rename = "otherEnabled", default)]
    pub other_enabled: bool,
    #[serde(rename = "generateOptionsFor")]
    pub generate_options_for: Option<String>,
    #[serde(rename = "maxSelectableChoices")]
    pub max_selectable_choices: Option<i32>,
    #[serde(rename = "minSelectableChoices")]
    pub min_selectable_choices: Option<i32>,
    #[serde(rename = "hasAssignedWeights", default)]
    pub has_assigned_weights: bool,
    #[serde(rename = "msqWeights", default)]
    pub msq_weights: Vec<f64>,
    #[serde(rename = "msqOtherWeight", default)]
    pub msq_other_weight: f64,
}

// Older exports mark a missing restriction with the smallest integer.
const LEGACY_UNSET: i32 = i32::MIN;

fn read_selectable(x: Option<i32>) -> Option<i32> {
    match x {
        Some(LEGACY_UNSET) => None,
        x => x,
    }
}

impl MsqQuestionDetails {
    pub fn generate_options_for(&self) -> MsqResult<GenerateOptionsFor> {
        let s = match &self.generate_options_for {
            None => return Ok(GenerateOptionsFor::None),
            Some(s) => s.as_str(),
        };
        match s {
            "NONE" => Ok(GenerateOptionsFor::None),
            "STUDENTS" => Ok(GenerateOptionsFor::Students),
            "STUDENTS_EXCLUDING_SELF" => Ok(GenerateOptionsFor::StudentsExcludingSelf),
            "TEAMS" => Ok(GenerateOptionsFor::Teams),
            "TEAMS_EXCLUDING_SELF" => Ok(GenerateOptionsFor::TeamsExcludingSelf),
            "INSTRUCTORS" => Ok(GenerateOptionsFor::Instructors),
            x => whatever!("unknown participant type for generated options: {}", x),
        }
    }

    pub fn to_question(&self) -> MsqResult<MsqQuestion> {
        Ok(MsqQuestion {
            choices: self.msq_choices.clone(),
            other_enabled: self.other_enabled,
            generate_options_for: self.generate_options_for()?,
            max_selectable: read_selectable(self.max_selectable_choices),
            min_selectable: read_selectable(self.min_selectable_choices),
            has_assigned_weights: self.has_assigned_weights,
            weights: self.msq_weights.clone(),
            other_weight: self.msq_other_weight,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub id: String,
    pub name: Option<String>,
    pub team: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MsqConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub question: MsqQuestionDetails,
    #[serde(rename = "numOfGeneratedMsqChoices")]
    pub num_of_generated_msq_choices: Option<usize>,
    #[serde(rename = "responseSources", default)]
    pub response_sources: Vec<ResponseSource>,
    pub recipients: Option<Vec<RecipientInfo>>,
}

impl MsqConfig {
    pub fn recipient(&self, id: &str) -> Option<&RecipientInfo> {
        self.recipients
            .as_ref()
            .and_then(|rs| rs.iter().find(|r| r.id == id))
    }
}

pub fn read_config(path: String) -> MsqResult<MsqConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    parse_config(contents.as_str())
}

pub fn parse_config(contents: &str) -> MsqResult<MsqConfig> {
    let config: MsqConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: String) -> MsqResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config = parse_config(
            r#"{
                "outputSettings": {"questionName": "q"},
                "question": {"msqChoices": ["A", "B"]}
            }"#,
        )
        .unwrap();
        let q = config.question.to_question().unwrap();
        assert_eq!(q, MsqQuestion::with_choices(&["A", "B"]));
        assert!(config.response_sources.is_empty());
        assert_eq!(config.recipient("x"), None);
    }

    #[test]
    fn legacy_unset_selectable() {
        let config = parse_config(
            r#"{
                "outputSettings": {"questionName": "q"},
                "question": {
                    "msqChoices": ["A", "B"],
                    "maxSelectableChoices": -2147483648,
                    "minSelectableChoices": 1,
                    "generateOptionsFor": "TEAMS_EXCLUDING_SELF"
                }
            }"#,
        )
        .unwrap();
        let q = config.question.to_question().unwrap();
        assert_eq!(q.max_selectable, None);
        assert_eq!(q.min_selectable, Some(1));
        assert_eq!(q.generate_options_for, GenerateOptionsFor::TeamsExcludingSelf);
    }

    #[test]
    fn unknown_generated_options() {
        let config = parse_config(
            r#"{
                "outputSettings": {"questionName": "q"},
                "question": {"generateOptionsFor": "EVERYONE"}
            }"#,
        )
        .unwrap();
        assert!(config.question.to_question().is_err());
    }
}
