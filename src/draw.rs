use log::{debug, info, warn};

use prize_draw::*;
use snafu::{prelude::*, Snafu};

use std::io;

use text_diff::print_diff;

use crate::args::Args;
use crate::draw::config_reader::*;

pub mod config_reader;
pub mod console;
mod io_common;
mod io_csv;
mod io_excel;
pub mod io_export;

#[derive(Debug, Snafu)]
pub enum DrawToolError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {worksheet}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("Error reading line {lineno} of the participant list"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The participant list is empty: a header row is expected"))]
    MissingHeader {},
    #[snafu(display("Please make sure that the file contains a '{column}' column"))]
    MissingNameColumn { column: String },
    #[snafu(display("Cannot understand input type {input_type:?} (expected csv or excel)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the winners list"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error writing the winners list"))]
    WritingFile { source: std::io::Error },
    #[snafu(display("Error writing the winners workbook {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error reading the operator input"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("{source}"))]
    Draw { source: DrawErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DrawToolResult<T> = Result<T, DrawToolError>;

/// How to read a participant list.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InputSettings {
    pub input_type: Option<String>,
    pub name_column: String,
    pub excel_worksheet_name: Option<String>,
}

impl InputSettings {
    pub const DEFAULT_NAME_COLUMN: &'static str = "Name";

    pub fn new(args: &Args, config: &DrawConfig) -> InputSettings {
        InputSettings {
            input_type: args.input_type.clone(),
            name_column: args
                .name_column
                .clone()
                .or_else(|| config.name_column.clone())
                .unwrap_or_else(|| InputSettings::DEFAULT_NAME_COLUMN.to_string()),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings {
            input_type: None,
            name_column: InputSettings::DEFAULT_NAME_COLUMN.to_string(),
            excel_worksheet_name: None,
        }
    }
}

/// Reads the names of a participant list, in file order.
pub fn read_participants(path: &str, settings: &InputSettings) -> DrawToolResult<Vec<String>> {
    let input_type = match settings.input_type.clone() {
        Some(x) => x,
        None => io_common::infer_input_type(path),
    };
    info!(
        "Attempting to read participant file {:?} (type {})",
        path, input_type
    );
    let names = match input_type.as_str() {
        "csv" => io_csv::read_csv_participants(path, &settings.name_column),
        "excel" | "xlsx" => io_excel::read_excel_participants(
            path,
            &settings.name_column,
            settings.excel_worksheet_name.as_deref(),
        ),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }?;
    info!(
        "Loaded {} names from {}",
        names.len(),
        io_common::simplify_file_name(path)
    );
    Ok(names)
}

/// Draws all the prizes in one go.
pub fn run_all_draws<R: rand::Rng>(
    controller: &mut SessionController<R>,
    names: Vec<String>,
) -> DrawToolResult<Vec<WinnerRecord>> {
    let mut state = controller.initial_state();
    for action in [Action::Load(names), Action::Begin] {
        state = controller.handle(&state, &action).context(DrawSnafu {})?;
    }
    while controller.current_phase(&state) == Phase::Drawing {
        state = controller
            .handle(&state, &Action::Prepare)
            .context(DrawSnafu {})?;
        state = match controller.handle(&state, &Action::Draw) {
            Ok(s) => s,
            Err(e @ DrawErrors::InsufficientParticipants { .. }) => {
                // Nobody can fix the list during an unattended run.
                warn!("run_all_draws: stopping early: {}", e);
                break;
            }
            Err(e) => return Err(e).context(DrawSnafu {}),
        };
        debug!(
            "run_all_draws: {} winners so far",
            controller.all_winners(&state).len()
        );
    }
    Ok(controller.all_winners(&state).to_vec())
}

/// Writes the winners to a file, or to the standard output for "stdout".
pub fn write_output(out: &str, winners: &[WinnerRecord]) -> DrawToolResult<()> {
    if out == "stdout" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        io_export::write_winners(&mut handle, winners)
    } else {
        info!("Writing {} winners to {:?}", winners.len(), out);
        io_export::write_winners_file(out, winners)
    }
}

/// Writes the winners of an interactive session. The list only exists once
/// all the prizes are drawn. Returns whether it was written.
pub fn write_session_output(
    phase: Phase,
    out: &str,
    winners: &[WinnerRecord],
) -> DrawToolResult<bool> {
    if phase != Phase::Finished {
        warn!(
            "The session ended before all the prizes were drawn ({} winners), {:?} is not written",
            winners.len(),
            out
        );
        return Ok(false);
    }
    write_output(out, winners)?;
    Ok(true)
}

/// Compares the winners with a previously exported list.
pub fn check_reference(reference_path: &str, winners: &[WinnerRecord]) -> DrawToolResult<()> {
    let reference = io_export::read_winners_file(reference_path)?;
    info!("reference: {} winners", reference.len());
    let ref_str = io_export::winners_to_string(&reference)?;
    let cur_str = io_export::winners_to_string(winners)?;
    if ref_str != cur_str {
        warn!("Found differences with the reference winners list");
        print_diff(ref_str.as_str(), cur_str.as_str(), "\n");
        whatever!("Difference detected between the drawn winners and the reference list")
    }
    Ok(())
}

pub fn run(args: &Args) -> DrawToolResult<()> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => {
            info!("No configuration provided, using the default prizes");
            default_config()
        }
    };
    debug!("config: {:?}", config);
    let schedule = build_schedule(&config)?;
    let settings = InputSettings::new(args, &config);
    let mut controller = SessionController::with_seed(schedule, args.seed);

    let names = match &args.input {
        Some(p) => Some(read_participants(p, &settings)?),
        None => None,
    };

    if args.auto {
        let names = match names {
            Some(n) => n,
            None => whatever!("--auto requires a participant list (--input)"),
        };
        let winners = run_all_draws(&mut controller, names)?;
        let out = args.out.clone().unwrap_or_else(|| "stdout".to_string());
        write_output(&out, &winners)?;
        if let Some(reference_path) = &args.reference {
            check_reference(reference_path, &winners)?;
        }
        return Ok(());
    }

    let mut console = console::Console::new(controller, settings, config.event_title());
    if let Some(n) = names {
        console.preload(n);
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    let winners = console::run_console(&mut console, stdin.lock(), stdout.lock())?;
    info!(
        "Session ended during {:?} with {} winners",
        console.state().phase(),
        winners.len()
    );
    if let Some(out) = &args.out {
        write_session_output(console.state().phase(), out, &winners)?;
    }
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &winners)?;
    }
    Ok(())
}
