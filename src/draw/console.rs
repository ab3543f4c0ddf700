// The terminal surface of a drawing session.
//
// Every command read from the operator is turned into one action for the
// session controller, and the page is rendered again from the new state.

use std::fmt::Write as FmtWrite;
use std::io::{BufRead, Write};

use log::{info, warn};
use prize_draw::*;
use rand::Rng;
use snafu::ResultExt;

use crate::draw::{
    io_export, read_participants, DrawToolResult, InputSettings, ReadingInputSnafu, WritingFileSnafu,
};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Load(String),
    Begin,
    Prepare,
    Draw,
    Export(String),
    Reset,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("").to_lowercase();
    let arg = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    match (verb.as_str(), arg) {
        ("load", Some(path)) => Ok(Command::Load(path)),
        ("load", None) => Err("usage: load <participant file>".to_string()),
        ("begin" | "start", _) => Ok(Command::Begin),
        ("prepare" | "p", _) => Ok(Command::Prepare),
        ("draw" | "d", _) => Ok(Command::Draw),
        ("export", Some(path)) => Ok(Command::Export(path)),
        ("export", None) => Ok(Command::Export(io_export::DEFAULT_EXPORT_FILE.to_string())),
        ("reset", _) => Ok(Command::Reset),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit" | "q", _) => Ok(Command::Quit),
        (x, _) => Err(format!("unknown command {:?}, type help for the list", x)),
    }
}

pub const HELP: &str = "commands: load <file>, begin, prepare, draw, export [file], reset, quit";

/// Renders the current page. It only depends on the state.
pub fn render<R: Rng>(
    controller: &SessionController<R>,
    state: &SessionState,
    event_name: &str,
) -> String {
    let mut out = String::new();
    match controller.current_phase(state) {
        Phase::Setup => {
            let _ = writeln!(out, "{} 🎉", event_name);
            match state.pool() {
                None => {
                    let _ = writeln!(
                        out,
                        "請上傳參加者名單 (load <file>, with a 'Name' column)"
                    );
                }
                Some(pool) => {
                    let _ = writeln!(
                        out,
                        "已載入名單，共有 {} 人 ({} participants)",
                        pool.size(),
                        pool.size()
                    );
                    let _ = writeln!(out, "主獎項分配");
                    for t in controller.schedule().main_tiers() {
                        let _ = writeln!(out, "  {}: {} 名", t.display_name, t.quantity);
                    }
                    let _ = writeln!(out, "開始抽獎 (begin)");
                }
            }
        }
        Phase::Drawing => {
            render_last_draw(&mut out, controller, state);
            if let Some(tier) = controller.current_tier(state) {
                match tier.kind {
                    TierKind::Bonus => {
                        let banner = format!("🎁 {}", tier.display_name);
                        let _ = writeln!(out, "{}", "=".repeat(40));
                        let _ = writeln!(out, "    {}", banner);
                        let _ = writeln!(out, "{}", "=".repeat(40));
                    }
                    TierKind::Main => {
                        let _ = writeln!(out, "🏆 {}", tier.display_name);
                    }
                }
                let _ = writeln!(out, "本次抽取人數：{} 名", tier.quantity);
                if controller.is_ready_to_draw(state) {
                    let _ = writeln!(out, "抽取 (draw)");
                } else {
                    let _ = writeln!(out, "準備抽取 (prepare)");
                }
            }
        }
        Phase::Finished => {
            render_last_draw(&mut out, controller, state);
            let _ = writeln!(out, "🎉 抽獎全部完成！");
            let _ = writeln!(out, "得獎名單");
            for (idx, w) in controller.all_winners(state).iter().enumerate() {
                let _ = writeln!(out, "{:>4}  {}  {}", idx + 1, w.prize, w.winner);
            }
            let _ = writeln!(
                out,
                "下載得獎名單 (export [file], {}), 返回抽獎設置 (reset)",
                io_export::DEFAULT_EXPORT_FILE
            );
        }
    }
    out
}

fn render_last_draw<R: Rng>(out: &mut String, controller: &SessionController<R>, state: &SessionState) {
    let last = match controller.last_draw(state) {
        Some(o) if !o.winners.is_empty() => o,
        _ => return,
    };
    let _ = writeln!(out, "🎉 {} 獲獎者", last.tier_label);
    for w in last.winners.iter() {
        let _ = writeln!(out, "  🎉 獲獎者：{} 🎉", w);
    }
}

/// One operator session.
pub struct Console<R: Rng> {
    controller: SessionController<R>,
    state: SessionState,
    settings: InputSettings,
    event_name: String,
}

impl<R: Rng> Console<R> {
    pub fn new(controller: SessionController<R>, settings: InputSettings, event_name: String) -> Console<R> {
        let state = controller.initial_state();
        Console {
            controller,
            state,
            settings,
            event_name,
        }
    }

    /// Loads a list that was read before the session started.
    pub fn preload(&mut self, names: Vec<String>) {
        self.apply(Action::Load(names));
    }

    pub fn render(&self) -> String {
        render(&self.controller, &self.state, &self.event_name)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn winners(&self) -> Vec<WinnerRecord> {
        self.controller.all_winners(&self.state).to_vec()
    }

    /// Runs one command. Returns a message for the operator when something
    /// went wrong; the session stays as it was in that case.
    pub fn execute(&mut self, command: Command) -> Option<String> {
        match command {
            Command::Load(path) => match read_participants(&path, &self.settings) {
                Ok(names) => self.apply(Action::Load(names)),
                Err(e) => {
                    warn!("execute: cannot load {:?}: {}", path, e);
                    Some(e.to_string())
                }
            },
            Command::Begin => self.apply(Action::Begin),
            Command::Prepare => self.apply(Action::Prepare),
            Command::Draw => self.apply(Action::Draw),
            Command::Reset => self.apply(Action::Reset),
            Command::Export(path) => {
                if self.controller.current_phase(&self.state) != Phase::Finished {
                    return Some("the winners list is available once all the prizes are drawn".to_string());
                }
                match io_export::write_winners_file(&path, self.controller.all_winners(&self.state)) {
                    Ok(()) => {
                        info!("execute: winners written to {:?}", path);
                        None
                    }
                    Err(e) => Some(e.to_string()),
                }
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        }
    }

    fn apply(&mut self, action: Action) -> Option<String> {
        match self.controller.handle(&self.state, &action) {
            Ok(next) => {
                self.state = next;
                None
            }
            Err(e) => {
                warn!("apply: {} refused: {}", action.name(), e);
                Some(match e {
                    DrawErrors::InsufficientParticipants { .. } => {
                        format!("參加者不足，無法抽取獎項！ ({})", e)
                    }
                    _ => e.to_string(),
                })
            }
        }
    }
}

/// Reads commands until the input ends or the operator quits. Returns the
/// winners drawn so far.
pub fn run_console<R: Rng, I: BufRead, O: Write>(
    console: &mut Console<R>,
    input: I,
    mut output: O,
) -> DrawToolResult<Vec<WinnerRecord>> {
    write!(output, "{}> ", console.render()).context(WritingFileSnafu {})?;
    output.flush().context(WritingFileSnafu {})?;
    for line_r in input.lines() {
        let line = line_r.context(ReadingInputSnafu {})?;
        if line.trim().is_empty() {
            write!(output, "> ").context(WritingFileSnafu {})?;
            output.flush().context(WritingFileSnafu {})?;
            continue;
        }
        let message = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => console.execute(command),
            Err(msg) => Some(msg),
        };
        if let Some(msg) = message {
            writeln!(output, "⚠ {}", msg).context(WritingFileSnafu {})?;
        }
        write!(output, "{}> ", console.render()).context(WritingFileSnafu {})?;
        output.flush().context(WritingFileSnafu {})?;
    }
    writeln!(output).context(WritingFileSnafu {})?;
    Ok(console.winners())
}
