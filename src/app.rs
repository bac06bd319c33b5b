//! Application state and command handling
//!
//! The runner is a line-oriented consumer of the form engine: each input
//! line is one user action (edit, focus loss, submit, ...).

use anyhow::Result;
use std::str::FromStr;
use thiserror::Error;

use crate::config::FormConfig;
use crate::error::FormError;
use crate::forms::{user_form, FormMode};
use crate::state::{FormState, SubmitOutcome};
use crate::submit::UserStore;

const HELP: &str = "\
Commands:
  set <field> [value]  change a field (empty value clears it)
  blur <field>         leave a field, validating it
  validate             validate the whole form
  submit               validate and save the user
  reset                restore the initial values
  fields               list fields with values and errors
  show                 print the full form state as JSON
  help                 show this help
  quit                 exit";

/// Errors from parsing or running a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("failed to render form state: {0}")]
    Render(#[from] serde_json::Error),
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Blur(String),
    Validate,
    Submit,
    Reset,
    Fields,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "set" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> [value]"));
                }
                Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim_end_matches(['\r', '\n']).to_string(),
                })
            }
            "blur" => match rest.trim() {
                "" => Err(CommandError::Usage("blur <field>")),
                field => Ok(Command::Blur(field.to_string())),
            },
            "validate" => Ok(Command::Validate),
            "submit" => Ok(Command::Submit),
            "reset" => Ok(Command::Reset),
            "fields" => Ok(Command::Fields),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.trim().to_string())),
        }
    }
}

/// Main application struct
pub struct App {
    /// The user form session
    pub form: FormState,
    /// Where submissions are saved
    pub store: UserStore,
    pub mode: FormMode,
    reset_after_create: bool,
    quit: bool,
}

impl App {
    /// Create a new App from configuration
    pub fn new(config: &FormConfig) -> Result<Self> {
        let mode = config.mode();
        let prefill = match mode {
            FormMode::Create => None,
            FormMode::Edit => config.prefill.as_ref(),
        };
        let form = user_form::new_form(prefill)?;

        let mut store = UserStore::new()
            .with_delay(config.submit_delay())
            .with_failures(config.fail_submissions());
        if mode == FormMode::Edit {
            store = store.editing(form.initial_values().clone());
        }

        Ok(Self {
            form,
            store,
            mode,
            reset_after_create: config.reset_after_create(),
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Parse and run one input line, returning the text to show
    pub async fn handle_line(&mut self, line: &str) -> Result<String, CommandError> {
        if line.trim().is_empty() {
            return Ok(String::new());
        }
        let command: Command = line.parse()?;
        self.handle_command(command).await
    }

    /// Run one command, returning the text to show
    pub async fn handle_command(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::Set { field, value } => {
                self.form.change_field(&field, value)?;
                Ok(String::new())
            }
            Command::Blur(field) => {
                let error = self.form.blur_field(&field)?;
                if error.is_empty() {
                    Ok(format!("{field}: ok"))
                } else {
                    Ok(format!("{field}: {error}"))
                }
            }
            Command::Validate => {
                if self.form.validate_all() {
                    Ok("Form is valid".to_string())
                } else {
                    Ok(self.render_errors())
                }
            }
            Command::Submit => Ok(self.submit().await),
            Command::Reset => {
                if !self.form.can_reset() {
                    return Ok("Nothing to reset".to_string());
                }
                self.form.reset();
                Ok("Form reset".to_string())
            }
            Command::Fields => Ok(self.render_fields()),
            Command::Show => Ok(serde_json::to_string_pretty(&self.form.snapshot())?),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => {
                self.quit = true;
                Ok(String::new())
            }
        }
    }

    async fn submit(&mut self) -> String {
        if !self.form.is_dirty() {
            return "Nothing to submit: the form has no changes".to_string();
        }

        tracing::info!("{}", self.mode.submitting_label());
        match self.form.submit(&self.store).await {
            SubmitOutcome::Invalid => self.render_errors(),
            SubmitOutcome::Failed(_) => "Error submitting form. Please try again.".to_string(),
            SubmitOutcome::Submitted => {
                let mut out = self.mode.success_message().to_string();
                if let Some(json) = self
                    .store
                    .latest()
                    .and_then(|user| serde_json::to_string_pretty(&user).ok())
                {
                    out = format!("{out}\n{json}");
                }
                if self.mode == FormMode::Create && self.reset_after_create {
                    self.form.reset();
                }
                out
            }
        }
    }

    fn render_errors(&self) -> String {
        let mut lines = vec!["Please fix the following:".to_string()];
        for field in user_form::fields() {
            if let Some(error) = self.form.visible_error(&field.name) {
                lines.push(format!("  {}: {error}", field.label));
            }
        }
        lines.join("\n")
    }

    fn render_fields(&self) -> String {
        let mut lines = vec![self.mode.title().to_string()];
        for field in user_form::fields() {
            let value = self
                .form
                .value(&field.name)
                .map(|v| v.normalized())
                .unwrap_or_default();
            let mut line = format!("  {} [{}]: {value}", field.display_label(), field.name);
            if let Some(options) = user_form::options(&field.name) {
                let choices: Vec<&str> = options
                    .iter()
                    .filter(|option| !option.value.is_empty())
                    .map(|option| option.value)
                    .collect();
                line = format!("{line} ({})", choices.join("|"));
            }
            lines.push(line);
            if let Some(error) = self.form.visible_error(&field.name) {
                lines.push(format!("    ! {error}"));
            }
        }
        lines.push(format!(
            "Valid: {}  Dirty: {}  Submitting: {}",
            yes_no(self.form.is_valid()),
            yes_no(self.form.is_dirty()),
            yes_no(self.form.is_submitting())
        ));
        lines.join("\n")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
