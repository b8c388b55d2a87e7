use clap::Parser;

/// This is a statistics program for multi-select survey questions.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file describing the question and where to find its responses, in JSON.
    /// For more information about the file format, read the manual of the msq_stats crate.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path, optional) A previous version of the configuration. If provided, msqstat
    /// reports whether the changes to the question require deleting the existing responses.
    #[clap(short, long, value_parser)]
    pub previous: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided, msqstat will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written to the given
    /// location. It is written to the standard output otherwise.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default json) The format of the summary: json or csv.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// If passed as an argument, only checks the question and does not read any response.
    #[clap(long, takes_value = false)]
    pub validate_only: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
