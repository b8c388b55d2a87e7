use log::{debug, info, warn};

use msq_stats::builder::Builder;
use msq_stats::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::msq::config_reader::*;

mod config_reader;
mod io_csv;
mod io_json;

#[derive(Debug, Snafu)]
pub enum MsqError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} of CSV file is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Error writing CSV summary"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The question is not valid: {codes}"))]
    InvalidQuestion { codes: String },
    #[snafu(display("Error adding responses"))]
    AddingResponse { source: MsqErrors },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type MsqResult<T> = Result<T, MsqError>;

/// A response, as parsed by the readers.
/// This is before mapping the answers to the options of the question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedResponse {
    pub recipient: String,
    pub selected: Vec<String>,
    pub other: Option<String>,
}

// Two decimal places, like the tables of the feedback system.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn read_responses(root_path: &Path, source: &ResponseSource) -> MsqResult<Vec<ParsedResponse>> {
    let p = root_path.join(&source.file_path).display().to_string();
    info!("Attempting to read response file {:?}", p);
    match source.provider.as_str() {
        "json" => io_json::read_json_responses(p),
        "csv" => io_csv::read_csv_responses(p),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

// Orders the responses by team, then by recipient name, when the participants are known.
fn sort_responses(config: &MsqConfig, responses: &mut [ParsedResponse]) {
    if config.recipients.is_none() {
        return;
    }
    responses.sort_by_key(|pr| match config.recipient(&pr.recipient) {
        Some(info) => (
            info.team.clone().unwrap_or_default(),
            info.name.clone().unwrap_or_else(|| pr.recipient.clone()),
        ),
        None => (String::new(), pr.recipient.clone()),
    });
}

fn results_to_json(stats: &QuestionStatistics) -> Vec<JSValue> {
    stats
        .options
        .iter()
        .map(|o| {
            json!({
                "choice": o.label,
                "weight": o.weight.map(round2),
                "count": o.count,
                "percentage": round2(o.percentage),
                "weightedPercentage": o.weighted_percentage.map(round2),
            })
        })
        .collect()
}

fn per_recipient_to_json(config: &MsqConfig, rows: &[RecipientStats]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for row in rows.iter() {
        let mut counts: JSMap<String, JSValue> = JSMap::new();
        for (label, count) in row.counts.iter() {
            counts.insert(label.clone(), json!(count));
        }
        let info = config.recipient(&row.recipient);
        l.push(json!({
            "recipient": row.recipient,
            "name": info.and_then(|i| i.name.clone()),
            "team": info.and_then(|i| i.team.clone()),
            "counts": counts,
            "total": round2(row.total),
            "average": round2(row.average),
        }));
    }
    l
}

fn build_summary_js(
    config: &MsqConfig,
    stats: &Option<QuestionStatistics>,
    responses_invalidated: Option<bool>,
) -> JSValue {
    let c = json!({
        "question": config.output_settings.question_name,
        "questionNumber": config.output_settings.question_number,
        "totalSelections": stats.as_ref().map(|s| s.total_selections).unwrap_or(0),
        "responsesInvalidated": responses_invalidated,
    });
    let mut js = json!({
        "config": c,
        "results": stats.as_ref().map(results_to_json),
    });
    if let Some(rows) = stats.as_ref().and_then(|s| s.per_recipient.as_ref()) {
        js["perRecipient"] = JSValue::Array(per_recipient_to_json(config, rows));
    }
    js
}

fn format_figure(x: Option<f64>) -> String {
    match x {
        Some(v) => round2(v).to_string(),
        None => "-".to_string(),
    }
}

fn build_summary_csv(config: &MsqConfig, stats: &Option<QuestionStatistics>) -> MsqResult<String> {
    let stats = match stats {
        Some(s) => s,
        None => return Ok(String::new()),
    };
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "Choice",
        "Weight",
        "Response Count",
        "Percentage (%)",
        "Weighted Percentage (%)",
    ])
    .context(CsvWriteSnafu {})?;
    for o in stats.options.iter() {
        wtr.write_record([
            o.label.clone(),
            format_figure(o.weight),
            o.count.to_string(),
            format_figure(Some(o.percentage)),
            format_figure(o.weighted_percentage),
        ])
        .context(CsvWriteSnafu {})?;
    }
    let mut res = csv_to_string(wtr)?;

    if let Some(rows) = &stats.per_recipient {
        // A blank line separates the two tables.
        res.push('\n');
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(vec![]);
        wtr.write_record(["Per Recipient Statistics"])
            .context(CsvWriteSnafu {})?;
        let mut header: Vec<String> = vec!["Team".to_string(), "Recipient Name".to_string()];
        header.extend(stats.options.iter().map(|o| o.label.clone()));
        header.push("Total".to_string());
        header.push("Average".to_string());
        wtr.write_record(&header).context(CsvWriteSnafu {})?;
        for row in rows.iter() {
            let info = config.recipient(&row.recipient);
            let mut record: Vec<String> = vec![
                info.and_then(|i| i.team.clone()).unwrap_or_default(),
                info.and_then(|i| i.name.clone())
                    .unwrap_or_else(|| row.recipient.clone()),
            ];
            // Recipients do not all have the same options when some labels are unknown.
            record.extend(stats.options.iter().map(|o| {
                row.counts
                    .iter()
                    .find(|(label, _)| *label == o.label)
                    .map(|(_, c)| *c)
                    .unwrap_or(0)
                    .to_string()
            }));
            record.push(format_figure(Some(row.total)));
            record.push(format_figure(Some(row.average)));
            wtr.write_record(&record).context(CsvWriteSnafu {})?;
        }
        res.push_str(&csv_to_string(wtr)?);
    }
    Ok(res)
}

fn csv_to_string(wtr: csv::Writer<Vec<u8>>) -> MsqResult<String> {
    let bytes = match wtr.into_inner() {
        Ok(b) => b,
        Err(e) => whatever!("Could not flush the CSV summary: {}", e),
    };
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => whatever!("The CSV summary is not valid UTF-8: {}", e),
    }
}

fn write_output(out: &Option<String>, contents: &str) -> MsqResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", contents);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, contents).context(WritingSummarySnafu { path })
        }
    }
}

/// Loads and validates the question of a configuration file.
///
/// Returns the question and the number of options available to the respondents.
pub fn load_question(config: &MsqConfig) -> MsqResult<(MsqQuestion, usize)> {
    let question = config.question.to_question()?;
    let num_generated = match (
        question.generate_options_for,
        config.num_of_generated_msq_choices,
    ) {
        (_, Some(n)) => n,
        (GenerateOptionsFor::None, None) => 0,
        (x, None) => whatever!(
            "Options are generated for {:?}: numOfGeneratedMsqChoices must be given",
            x
        ),
    };
    let available = available_option_count(&question, num_generated);
    let errors = validate_question(&question, available);
    if !errors.is_empty() {
        for e in errors.iter() {
            warn!("{}: {}", e.code(), e);
        }
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        return InvalidQuestionSnafu {
            codes: codes.join(", "),
        }
        .fail();
    }
    Ok((question, available))
}

/// Tells if the edit from the previous configuration to the current one requires deleting the
/// collected responses.
pub fn check_edit(previous_path: String, config: &MsqConfig) -> MsqResult<bool> {
    let previous = read_config(previous_path)?;
    let old = previous.question.to_question()?;
    let new = config.question.to_question()?;
    let res = requires_response_deletion(&old, &new);
    if res {
        warn!("The changes to the question require deleting the existing responses");
    } else {
        info!("The existing responses can be kept");
    }
    Ok(res)
}

pub fn run_report(args: &Args) -> MsqResult<()> {
    let config_p = Path::new(args.config.as_str());
    let config: MsqConfig = read_config(args.config.clone())?;
    info!("config: {:?}", config);

    let (question, available) = load_question(&config)?;

    let responses_invalidated = match &args.previous {
        Some(p) => Some(check_edit(p.clone(), &config)?),
        None => None,
    };

    let stats: Option<QuestionStatistics> = if args.validate_only {
        None
    } else {
        let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
        let mut data: Vec<ParsedResponse> = Vec::new();
        for source in config.response_sources.iter() {
            let mut file_data = read_responses(root_p, source)?;
            data.append(&mut file_data);
        }
        sort_responses(&config, &mut data);
        debug!("data: {:?}", data);

        let mut builder = Builder::new(&question, available).context(AddingResponseSnafu {})?;
        for pr in data.iter() {
            builder
                .add_response(&pr.recipient, &pr.selected, pr.other.clone())
                .context(AddingResponseSnafu {})?;
        }
        builder.build()
    };
    info!("stats: {:?}", stats);

    let result_js = build_summary_js(&config, &stats, responses_invalidated);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let contents = match args.format.as_deref() {
        None | Some("json") => pretty_js_stats.clone(),
        Some("csv") => build_summary_csv(&config, &stats)?,
        Some(x) => whatever!("Unknown output format {:?}", x),
    };
    write_output(&args.out, contents.as_str())?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p.clone())?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args(test_name: &str) -> Args {
        let test_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");
        Args {
            config: format!("{}/{}/{}_config.json", test_dir, test_name, test_name),
            previous: None,
            reference: Some(format!(
                "{}/{}/{}_expected_summary.json",
                test_dir, test_name, test_name
            )),
            out: None,
            format: None,
            validate_only: false,
            verbose: false,
        }
    }

    fn test_wrapper(test_name: &str) {
        let _ = env_logger::builder().is_test(true).try_init();
        let res = run_report(&test_args(test_name));
        if let Err(e) = &res {
            eprintln!("An error occured {}", e);
        }
        assert!(res.is_ok());
    }

    #[test]
    fn weighted_basic() {
        test_wrapper("weighted_basic");
    }

    #[test]
    fn unweighted_other() {
        test_wrapper("unweighted_other");
    }

    #[test]
    fn invalid_question() {
        let _ = env_logger::builder().is_test(true).try_init();
        let args = Args {
            reference: None,
            ..test_args("invalid_question")
        };
        match run_report(&args) {
            Err(MsqError::InvalidQuestion { codes }) => {
                assert_eq!(codes, "DUPLICATE_CHOICE, MAX_TOO_SMALL");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn edits() {
        let args = test_args("weighted_basic");
        let config = read_config(args.config).unwrap();
        let test_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");
        let reordered = format!("{}/weighted_basic/weighted_basic_previous_config.json", test_dir);
        assert!(!check_edit(reordered, &config).unwrap());
        let other = format!("{}/unweighted_other/unweighted_other_config.json", test_dir);
        assert!(check_edit(other, &config).unwrap());
    }

    #[test]
    fn csv_summary() {
        let args = test_args("weighted_basic");
        let config = read_config(args.config).unwrap();
        let (question, available) = load_question(&config).unwrap();
        let mut builder = Builder::new(&question, available).unwrap();
        builder
            .add_response_simple("carol@example.com", &["Alpha".to_string()])
            .unwrap();
        let csv = build_summary_csv(&config, &builder.build()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Choice,Weight,Response Count,Percentage (%),Weighted Percentage (%)"
        );
        assert_eq!(lines[1], "Alpha,1,1,100,100");
        assert_eq!(lines[2], "Beta,2,0,0,0");
        assert_eq!(lines[4], "Other,4,0,0,0");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Per Recipient Statistics");
        assert_eq!(lines[7], "Team,Recipient Name,Alpha,Beta,Gamma,Other,Total,Average");
        assert_eq!(lines[8], ",carol@example.com,1,0,0,0,1,1");
        assert_eq!(build_summary_csv(&config, &None).unwrap(), "");
    }

    #[test]
    fn csv_summary_unknown_options() {
        let args = test_args("weighted_basic");
        let config = read_config(args.config).unwrap();
        let (question, _) = load_question(&config).unwrap();
        let responses = vec![
            MsqResponse {
                recipient: "x".to_string(),
                answers: vec![Answer::Option("C1".to_string())],
                other_text: None,
            },
            MsqResponse {
                recipient: "y".to_string(),
                answers: vec![Answer::Option("D1".to_string())],
                other_text: None,
            },
        ];
        let csv = build_summary_csv(&config, &run_question_stats(&question, &responses)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines.contains(&"Team,Recipient Name,Alpha,Beta,Gamma,Other,C1,D1,Total,Average"));
        assert!(lines.contains(&",x,0,0,0,0,1,0,0,0"));
        assert!(lines.contains(&",y,0,0,0,0,0,1,0,0"));
    }

    #[test]
    fn generated_options_need_a_count() {
        let config = parse_config(
            r#"{
                "outputSettings": {"questionName": "q"},
                "question": {"generateOptionsFor": "STUDENTS"}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            load_question(&config),
            Err(MsqError::Whatever { .. })
        ));

        let config = MsqConfig {
            num_of_generated_msq_choices: Some(3),
            ..config
        };
        let (_, available) = load_question(&config).unwrap();
        assert_eq!(available, 3);
    }
}
