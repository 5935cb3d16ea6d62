use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use payroll_core::RecordId;
use tracing::{debug, info};

use crate::components::{AutoConfirm, TerminalConfirm};
use crate::logging;
use crate::state::{Action, Outcome, Session};
use crate::views::{build_status_bar, hints, render_summary, render_table};

/// A line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fill in the form and save it (adds, or saves the record under edit).
    Submit,
    Edit(usize),
    Delete(usize),
    Clear,
    Reset,
    List,
    /// Swap the active log filter (`level warn`, `level payroll_core=trace`).
    LogLevel(String),
    /// Start writing logs to a file, or close it with `logfile off`.
    LogFile(Option<PathBuf>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Self::Empty;
        };
        let verb_lower = verb.to_ascii_lowercase();
        // Everything after the verb, spaces and all, for filters and paths.
        let rest = line.trim_start()[verb.len()..].trim();
        let row = words.next().and_then(|w| w.parse::<usize>().ok());

        match (verb_lower.as_str(), row) {
            ("level", _) if !rest.is_empty() => Self::LogLevel(rest.to_string()),
            ("logfile", _) if rest.eq_ignore_ascii_case("off") => Self::LogFile(None),
            ("logfile", _) if !rest.is_empty() => Self::LogFile(Some(PathBuf::from(rest))),
            ("add" | "save" | "submit", _) => Self::Submit,
            ("edit", Some(row)) => Self::Edit(row),
            ("delete" | "del", Some(row)) => Self::Delete(row),
            ("clear", _) => Self::Clear,
            ("reset" | "cancel", _) => Self::Reset,
            ("list" | "ls", _) => Self::List,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}

/// Interactive payroll session over any line-based reader and writer.
pub struct App<R, W> {
    session: Session,
    input: R,
    output: W,
    currency_symbol: String,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        session: Session,
        input: R,
        output: W,
        currency_symbol: impl Into<String>,
        assume_yes: bool,
    ) -> Self {
        Self {
            session,
            input,
            output,
            currency_symbol: currency_symbol.into(),
            assume_yes,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ends the session, handing back its state and the writer.
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!("payroll session started");
        writeln!(self.output, "{}", build_status_bar(&hints::ALL))?;
        self.render()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let command = Command::parse(&line);
            debug!(?command, "command received");

            if !self.handle(command)? {
                break;
            }
        }

        info!(records = self.session.ledger().len(), "payroll session ended");
        Ok(())
    }

    /// Executes one command. Returns `false` when the session should end.
    pub fn handle(
        &mut self,
        command: Command,
    ) -> io::Result<bool> {
        match command {
            Command::Submit => {
                if !self.fill_form()? {
                    return Ok(false);
                }
                self.apply(Action::Submit)?;
            }
            Command::Edit(row) => {
                if let Some(id) = self.row_to_id(row)? {
                    self.apply(Action::Edit(id))?;
                    write!(self.output, "{}", self.session.form)?;
                    writeln!(self.output, "Type `save` to change the values, `reset` to cancel.")?;
                }
            }
            Command::Delete(row) => {
                if let Some(id) = self.row_to_id(row)? {
                    self.apply(Action::Delete(id))?;
                }
            }
            Command::Clear => {
                self.apply(Action::ClearAll)?;
            }
            Command::Reset => {
                self.apply(Action::Reset)?;
                writeln!(self.output, "Form cleared.")?;
            }
            Command::List => self.render()?,
            Command::LogLevel(directive) => match logging::set_log_level(&directive) {
                Ok(()) => {
                    info!(%directive, "log filter changed");
                    writeln!(self.output, "Log filter set to '{directive}'.")?;
                }
                Err(e) => writeln!(self.output, "Log filter unchanged: {e:#}")?,
            },
            Command::LogFile(path) => {
                let result = match &path {
                    Some(path) => logging::enable_file_logging(path),
                    None => logging::disable_file_logging(),
                };
                match (result, path) {
                    (Ok(()), Some(path)) => writeln!(self.output, "Logging to {}.", path.display())?,
                    (Ok(()), None) => writeln!(self.output, "Log file closed.")?,
                    (Err(e), _) => writeln!(self.output, "Log file unchanged: {e:#}")?,
                }
            }
            Command::Help => {
                writeln!(self.output, "{}", build_status_bar(&hints::ALL))?;
                writeln!(self.output, "{}", build_status_bar(&hints::LOGGING))?;
            }
            Command::Quit => return Ok(false),
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(self.output, "Unknown command '{text}'. Type `help` for commands.")?;
            }
        }
        Ok(true)
    }

    fn apply(
        &mut self,
        action: Action,
    ) -> io::Result<Outcome> {
        let outcome = if self.assume_yes {
            self.session.dispatch(action, &mut AutoConfirm(true), Instant::now())
        } else {
            let mut confirm = TerminalConfirm::new(&mut self.input, &mut self.output);
            self.session.dispatch(action, &mut confirm, Instant::now())
        };

        match &outcome {
            Outcome::Declined => writeln!(self.output, "Cancelled.")?,
            Outcome::Missing(id) => writeln!(self.output, "Record {id} no longer exists.")?,
            _ => {}
        }
        if let Some(message) = self.session.status(Instant::now()) {
            writeln!(self.output, "{message}")?;
        }
        if outcome.mutated() {
            self.render()?;
        }
        Ok(outcome)
    }

    /// Prompts for every form field, offering the current value as default.
    /// Returns `false` if input ended before the form was complete.
    fn fill_form(&mut self) -> io::Result<bool> {
        let form = &self.session.form;
        let current = [
            form.name.clone(),
            form.hours.clone(),
            form.rate.clone(),
            form.tax_percent.clone(),
            form.other_deduction.clone(),
        ];
        let labels = ["Employee name", "Hours", "Rate", "Tax %", "Other deduction"];

        let mut answers = Vec::with_capacity(labels.len());
        for (label, default) in labels.iter().zip(current) {
            if default.is_empty() {
                write!(self.output, "{label}: ")?;
            } else {
                write!(self.output, "{label} [{default}]: ")?;
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let typed = line.trim();
            answers.push(if typed.is_empty() { default } else { typed.to_string() });
        }

        let form = &mut self.session.form;
        let [name, hours, rate, tax_percent, other_deduction]: [String; 5] = answers
            .try_into()
            .map_err(|_| io::Error::other("form field count mismatch"))?;
        form.name = name;
        form.hours = hours;
        form.rate = rate;
        form.tax_percent = tax_percent;
        form.other_deduction = other_deduction;
        Ok(true)
    }

    fn row_to_id(
        &mut self,
        row: usize,
    ) -> io::Result<Option<RecordId>> {
        let id = self.session.row_id(row);
        if id.is_none() {
            writeln!(self.output, "No row {row}.")?;
        }
        Ok(id)
    }

    fn render(&mut self) -> io::Result<()> {
        let ledger = self.session.ledger();
        write!(
            self.output,
            "{}\n{}",
            render_table(&ledger.list(), &self.currency_symbol),
            render_summary(&ledger.summarize(), &self.currency_symbol)
        )?;
        if let Some(id) = self.session.editing() {
            writeln!(self.output, "(editing record {id})")?;
        }
        Ok(())
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
