use clap::Parser;

/// This is an interactive prize drawing program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the prizes and the preset winners. If not provided,
    /// the built-in schedule of the new year event is used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The list of participants. It can also be loaded later from the console with
    /// the `load` command.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. If not specified, it is inferred from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default Name) The column of the participant list that holds the names.
    #[clap(long, value_parser)]
    pub name_column: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first worksheet is used
    /// otherwise.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the winners list will be written to the given
    /// location once all the prizes have been drawn: an Excel workbook for a .xlsx path, CSV otherwise.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (integer, optional) Seeds the random generator. Two sessions with the same seed, the same
    /// participants and the same prizes draw the same winners.
    #[clap(short, long, value_parser)]
    pub seed: Option<u64>,

    /// If passed as an argument, all the prizes are drawn at once without waiting for the operator.
    /// Requires --input.
    #[clap(long, takes_value = false)]
    pub auto: bool,

    /// (file path) A winners list previously exported. If provided, luckydraw will check that the
    /// drawn winners match the reference. Only meaningful with --seed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
