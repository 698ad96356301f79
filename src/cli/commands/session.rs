//! Interactive form-building session.
//!
//! Each line is a verb. Verbs that set a value read the raw value from the
//! following line, so values may contain spaces or be empty.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::commands::diagnose::load_document;
use crate::cli::display::{action_failure, action_success, FormOutput, ReportOutput};
use crate::cli::output::progress::diagnosis_spinner;
use crate::cli::output::CommandOutput;
use crate::cli::AppContext;
use crate::services::{DiagnosisDispatcher, Session, SessionError};

#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Pre-fill the form from a structure file (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

/// One REPL line.
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ReplLine {
    #[command(subcommand)]
    verb: Verb,
}

/// REPL verbs. Indices are 1-based.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Verb {
    /// Set the goal (value on the next line)
    Goal,
    /// Set criterion <n> (value on the next line)
    Criterion { n: usize },
    /// Set sub-item <m> of criterion <n> (value on the next line)
    Sub { n: usize, m: usize },
    /// Add a criterion slot
    AddCriterion,
    /// Add a sub-item slot under criterion <n>
    AddSub { n: usize },
    /// Show the form
    Show,
    /// Diagnose the current structure
    Run,
    /// List verbs
    Help,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

const HELP: &str = "\
Verbs (indices start at 1; set-verbs read the value from the next line):
  goal               set the goal
  criterion <n>      set criterion n
  sub <n> <m>        set sub-item m of criterion n
  add-criterion      add a criterion slot
  add-sub <n>        add a sub-item slot under criterion n
  show               show the form
  run                diagnose the current structure
  help               show this list
  quit               leave the session";

#[derive(Debug, Serialize)]
struct ActionOutput {
    success: bool,
    message: String,
}

impl ActionOutput {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl CommandOutput for ActionOutput {
    fn to_human(&self) -> String {
        if self.success {
            action_success(&self.message)
        } else {
            action_failure(&self.message)
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Line-driven session over any reader/writer pair.
pub struct Repl<'a, R, W> {
    session: Session,
    dispatcher: &'a DiagnosisDispatcher,
    input: R,
    out: W,
    json_mode: bool,
    last_shown_rows: Option<usize>,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(
        session: Session,
        dispatcher: &'a DiagnosisDispatcher,
        input: R,
        out: W,
        json_mode: bool,
    ) -> Self {
        Self {
            session,
            dispatcher,
            input,
            out,
            json_mode,
            last_shown_rows: None,
        }
    }

    /// Run until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        if !self.json_mode {
            writeln!(self.out, "{HELP}\n")?;
        }
        self.show_form()?;

        loop {
            self.prompt("ahp> ")?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let verb = match ReplLine::try_parse_from(words) {
                Ok(parsed) => parsed.verb,
                Err(err) => {
                    let first_line = err.to_string();
                    let first_line = first_line.lines().next().unwrap_or_default();
                    self.emit(&ActionOutput::failed(format!(
                        "{first_line} (type `help` for verbs)"
                    )))?;
                    continue;
                }
            };

            debug!(?verb, "session verb");
            if let Flow::Quit = self.apply(verb).await? {
                break;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Consume the REPL, returning the session for inspection.
    pub fn into_session(self) -> Session {
        self.session
    }

    async fn apply(&mut self, verb: Verb) -> Result<Flow> {
        match verb {
            Verb::Goal => {
                let Some(value) = self.read_value("Goal")? else {
                    return Ok(Flow::Quit);
                };
                self.session.set_goal(value);
                self.after_edit("Goal set")?;
            }
            Verb::Criterion { n } => {
                let Some(index) = self.index(n)? else {
                    return Ok(Flow::Continue);
                };
                let Some(value) = self.read_value(&format!("Criterion {n}"))? else {
                    return Ok(Flow::Quit);
                };
                let result = self.session.set_criterion(index, value);
                self.after_result(result, format!("Criterion {n} set"))?;
            }
            Verb::Sub { n, m } => {
                let (Some(index), Some(sub_index)) = (self.index(n)?, self.index(m)?) else {
                    return Ok(Flow::Continue);
                };
                let Some(value) = self.read_value(&format!("Sub-item {n}.{m}"))? else {
                    return Ok(Flow::Quit);
                };
                let result = self.session.set_sub_item(index, sub_index, value);
                self.after_result(result, format!("Sub-item {n}.{m} set"))?;
            }
            Verb::AddCriterion => {
                let count = self.session.add_criterion_slot();
                self.after_edit(&format!("{count} criterion slots"))?;
            }
            Verb::AddSub { n } => {
                let Some(index) = self.index(n)? else {
                    return Ok(Flow::Continue);
                };
                match self.session.add_sub_item_slot(index) {
                    Ok(count) => {
                        self.after_edit(&format!("Criterion {n} has {count} sub-item slots"))?;
                    }
                    Err(err) => self.emit(&ActionOutput::failed(err.to_string()))?,
                }
            }
            Verb::Show => self.show_form()?,
            Verb::Run => self.run_diagnosis().await?,
            Verb::Help => writeln!(self.out, "{HELP}")?,
            Verb::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn run_diagnosis(&mut self) -> Result<()> {
        let criteria = self.session.structure().len();
        let spinner = diagnosis_spinner(criteria, self.json_mode);

        match self.session.run_diagnosis(self.dispatcher).await {
            Ok(report) => {
                spinner.finish_and_clear();
                let output = ReportOutput::new(report);
                if self.json_mode {
                    writeln!(self.out, "{}", output.to_json())?;
                } else {
                    writeln!(self.out, "{}", output.to_human())?;
                }
            }
            Err(err) => {
                spinner.finish_and_clear();
                self.emit(&ActionOutput::failed(err.to_string()))?;
            }
        }
        Ok(())
    }

    fn after_result(&mut self, result: Result<(), SessionError>, message: String) -> Result<()> {
        match result {
            Ok(()) => self.after_edit(&message),
            Err(err) => self.emit(&ActionOutput::failed(err.to_string())),
        }
    }

    /// Confirm an edit or grow action; redraw when a slot was added or the
    /// edit changed which slots are on screen.
    fn after_edit(&mut self, message: &str) -> Result<()> {
        let grown = self.session.needs_render();
        let form = FormOutput::from_view(&self.session.render());

        self.emit(&ActionOutput::ok(message))?;
        if grown || self.last_shown_rows != Some(form.rows.len()) {
            self.last_shown_rows = Some(form.rows.len());
            self.emit(&form)?;
        }
        Ok(())
    }

    fn show_form(&mut self) -> Result<()> {
        let form = FormOutput::from_view(&self.session.render());
        self.last_shown_rows = Some(form.rows.len());
        self.emit(&form)
    }

    fn index(&mut self, one_based: usize) -> Result<Option<usize>> {
        match one_based.checked_sub(1) {
            Some(index) => Ok(Some(index)),
            None => {
                self.emit(&ActionOutput::failed("indices start at 1"))?;
                Ok(None)
            }
        }
    }

    fn emit<T: CommandOutput>(&mut self, output: &T) -> Result<()> {
        if self.json_mode {
            writeln!(self.out, "{}", output.to_json())?;
        } else {
            writeln!(self.out, "{}", output.to_human())?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        if !self.json_mode {
            write!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn read_value(&mut self, what: &str) -> Result<Option<String>> {
        self.prompt(&format!("{what}> "))?;
        self.read_line()
    }

    /// Next input line without its line terminator; `None` at end of input.
    ///
    /// Reads block the runtime thread. A process runs one session and has
    /// nothing else scheduled while it waits for the user.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

pub async fn execute(args: SessionArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let session = match &args.from {
        Some(path) => Session::from_document(&load_document(path)?),
        None => Session::new(),
    };
    let dispatcher = DiagnosisDispatcher::new(ctx.generator.generator.clone());

    let stdin = std::io::stdin();
    let mut repl = Repl::new(
        session,
        &dispatcher,
        stdin.lock(),
        std::io::stdout(),
        json_mode,
    );
    repl.run().await
}
