//! Line-oriented edit scripts
//!
//! One command per line; blank lines and `#` comments are ignored.
//! Arguments containing spaces are double-quoted (`\"` and `\\` escape).
//!
//! ```text
//! add-stage
//! add-job stage-build
//! rename-stage stage-test "Unit tests"
//! toggle-parallel stage-build
//! select job-maven-build
//! set commands "mvn -B package"
//! set-name "Maven package"
//! close
//! delete-job job-sbom
//! ```

use crate::editor::panel::{self, Field, FieldError};
use crate::editor::EditorSession;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// A parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    AddStage,
    AddJob { stage_id: String },
    RenameStage { stage_id: String, name: String },
    ToggleParallel { stage_id: String },
    Select { job_id: String },
    Close,
    SetName { name: String },
    Set { field: Field, value: String },
    /// Delete the selected job and close the panel
    Delete,
    DeleteJob { job_id: String },
    Show,
}

/// Errors raised while parsing or running a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    Arguments {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: unterminated quote")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: '{command}' needs a selected job (use 'select <job>' first)")]
    NothingSelected { line: usize, command: String },

    #[error("line {line}: {source}")]
    Field {
        line: usize,
        #[source]
        source: FieldError,
    },

    #[error("invalid tokenizer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// What running one command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The pipeline or selection changed
    Applied,
    /// The command referenced something that does not exist
    NoOp,
    /// A stage-name edit was blank or unchanged and was dropped
    Reverted,
    /// The caller should render the current state
    Show,
}

/// Counts of command outcomes over a script run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub applied: usize,
    pub no_ops: usize,
    pub reverted: usize,
}

impl ScriptReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::NoOp => self.no_ops += 1,
            Outcome::Reverted => self.reverted += 1,
            Outcome::Show => {}
        }
    }
}

/// Tokenizes and parses script lines
pub struct ScriptParser {
    token: Regex,
}

impl ScriptParser {
    pub fn new() -> Result<Self, ScriptError> {
        Ok(Self {
            token: Regex::new(r#""((?:[^"\\]|\\.)*)"|(\S+)"#)?,
        })
    }

    /// Split a line into arguments, honouring double quotes
    pub fn tokenize(&self, line: &str, line_no: usize) -> Result<Vec<String>, ScriptError> {
        let mut tokens = Vec::new();
        for caps in self.token.captures_iter(line) {
            if let Some(quoted) = caps.get(1) {
                tokens.push(unescape(quoted.as_str()));
            } else if let Some(bare) = caps.get(2) {
                if bare.as_str().starts_with('"') {
                    return Err(ScriptError::UnterminatedQuote { line: line_no });
                }
                tokens.push(bare.as_str().to_string());
            }
        }
        Ok(tokens)
    }

    /// Parse one line; `None` for blank lines and comments
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<ScriptCommand>, ScriptError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let tokens = self.tokenize(trimmed, line_no)?;
        let (name, args) = match tokens.split_first() {
            Some((name, args)) => (name.as_str(), args),
            None => return Ok(None),
        };

        let arity = |expected: &'static str| ScriptError::Arguments {
            line: line_no,
            command: name.to_string(),
            expected,
        };

        let command = match (name, args) {
            ("add-stage", []) => ScriptCommand::AddStage,
            ("add-stage", _) => return Err(arity("no arguments")),
            ("add-job", [stage_id]) => ScriptCommand::AddJob {
                stage_id: stage_id.clone(),
            },
            ("add-job", _) => return Err(arity("<stage-id>")),
            ("rename-stage", [stage_id, name]) => ScriptCommand::RenameStage {
                stage_id: stage_id.clone(),
                name: name.clone(),
            },
            ("rename-stage", _) => return Err(arity("<stage-id> <name>")),
            ("toggle-parallel", [stage_id]) => ScriptCommand::ToggleParallel {
                stage_id: stage_id.clone(),
            },
            ("toggle-parallel", _) => return Err(arity("<stage-id>")),
            ("select", [job_id]) => ScriptCommand::Select {
                job_id: job_id.clone(),
            },
            ("select", _) => return Err(arity("<job-id>")),
            ("close", []) => ScriptCommand::Close,
            ("close", _) => return Err(arity("no arguments")),
            ("set-name", [name]) => ScriptCommand::SetName { name: name.clone() },
            ("set-name", _) => return Err(arity("<name>")),
            ("set", [field, value]) => ScriptCommand::Set {
                field: field
                    .parse()
                    .map_err(|source| ScriptError::Field { line: line_no, source })?,
                value: value.clone(),
            },
            ("set", _) => return Err(arity("<field> <value>")),
            ("delete", []) => ScriptCommand::Delete,
            ("delete", _) => return Err(arity("no arguments")),
            ("delete-job", [job_id]) => ScriptCommand::DeleteJob {
                job_id: job_id.clone(),
            },
            ("delete-job", _) => return Err(arity("<job-id>")),
            ("show", []) => ScriptCommand::Show,
            ("show", _) => return Err(arity("no arguments")),
            (other, _) => {
                return Err(ScriptError::UnknownCommand {
                    line: line_no,
                    command: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }

    /// Parse a whole script into (line number, command) pairs
    pub fn parse(&self, script: &str) -> Result<Vec<(usize, ScriptCommand)>, ScriptError> {
        let mut commands = Vec::new();
        for (index, line) in script.lines().enumerate() {
            if let Some(command) = self.parse_line(line, index + 1)? {
                commands.push((index + 1, command));
            }
        }
        Ok(commands)
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Run one command against a session
pub fn execute(
    session: &mut EditorSession,
    command: &ScriptCommand,
    line: usize,
) -> Result<Outcome, ScriptError> {
    debug!("line {}: {:?}", line, command);

    let outcome = match command {
        ScriptCommand::AddStage => {
            session.add_stage();
            Outcome::Applied
        }
        ScriptCommand::AddJob { stage_id } if !panel::accepts_new_jobs(stage_id) => {
            warn!("line {}: stage '{}' does not take new jobs, nothing changed", line, stage_id);
            Outcome::NoOp
        }
        ScriptCommand::AddJob { stage_id } => applied_or_noop(
            session.add_job(stage_id).is_some(),
            line,
            || format!("no stage '{}'", stage_id),
        ),
        ScriptCommand::RenameStage { stage_id, name } => {
            let current = session.pipeline().stage(stage_id).map(|s| s.name.clone());
            match current {
                None => applied_or_noop(false, line, || format!("no stage '{}'", stage_id)),
                Some(current) => match panel::commit_stage_name(&current, name) {
                    Some(committed) => {
                        session.rename_stage(stage_id, &committed);
                        Outcome::Applied
                    }
                    None => {
                        debug!("line {}: stage name for '{}' reverted", line, stage_id);
                        Outcome::Reverted
                    }
                },
            }
        }
        ScriptCommand::ToggleParallel { stage_id } => applied_or_noop(
            session.toggle_parallel(stage_id),
            line,
            || format!("no stage '{}'", stage_id),
        ),
        ScriptCommand::Select { job_id } => {
            if session.pipeline().contains_job(job_id) {
                session.select(job_id);
                Outcome::Applied
            } else {
                applied_or_noop(false, line, || format!("no job '{}'", job_id))
            }
        }
        ScriptCommand::Close => {
            session.close();
            Outcome::Applied
        }
        ScriptCommand::SetName { name } => {
            let job = selected_job(session, line, "set-name")?;
            session.update_job(panel::with_name(&job, name));
            Outcome::Applied
        }
        ScriptCommand::Set { field, value } => {
            let job = selected_job(session, line, "set")?;
            let updated = panel::set_field(&job, *field, value)
                .map_err(|source| ScriptError::Field { line, source })?;
            session.update_job(updated);
            Outcome::Applied
        }
        ScriptCommand::Delete => {
            selected_job(session, line, "delete")?;
            session.delete_selected();
            Outcome::Applied
        }
        ScriptCommand::DeleteJob { job_id } => applied_or_noop(
            session.delete_job(job_id),
            line,
            || format!("no job '{}'", job_id),
        ),
        ScriptCommand::Show => Outcome::Show,
    };

    Ok(outcome)
}

/// Parse and run a whole script, calling `on_show` for each `show` command
///
/// Stops at the first parse or execution error.
pub fn run_script<F>(
    session: &mut EditorSession,
    script: &str,
    mut on_show: F,
) -> Result<ScriptReport, ScriptError>
where
    F: FnMut(&EditorSession),
{
    let parser = ScriptParser::new()?;
    let commands = parser.parse(script)?;

    let mut report = ScriptReport::default();
    for (line, command) in &commands {
        let outcome = execute(session, command, *line)?;
        if outcome == Outcome::Show {
            on_show(session);
        }
        report.record(outcome);
    }
    Ok(report)
}

fn applied_or_noop<F>(applied: bool, line: usize, describe: F) -> Outcome
where
    F: FnOnce() -> String,
{
    if applied {
        Outcome::Applied
    } else {
        warn!("line {}: {}, nothing changed", line, describe());
        Outcome::NoOp
    }
}

fn selected_job(
    session: &EditorSession,
    line: usize,
    command: &str,
) -> Result<crate::core::Job, ScriptError> {
    session
        .selected_job()
        .cloned()
        .ok_or_else(|| ScriptError::NothingSelected {
            line,
            command: command.to_string(),
        })
}
