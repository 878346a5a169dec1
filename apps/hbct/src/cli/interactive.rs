//! # Interactive Questionnaire
//!
//! A terminal rendition of the page selector. The user picks a page, fills
//! in its form and submits; the Results page reads the session store.
//!
//! Input rules:
//! - a page is chosen by menu number or label
//! - an empty answer accepts the field default
//! - out-of-range or malformed answers are rejected and asked again
//! - `reset` forgets all answers, `quit` or end of input leaves

use hbct_core::{
    AssessmentState, HbctError, Page, ResultsView, StageOfChange, Submission, APP_TITLE,
    forms::{self, CONFIDENCE_FIELD, DURATION_FIELD, FREQUENCY_FIELD, NumberField},
};
use std::io::{BufRead, Write};

/// What the user asked for at the page prompt.
enum MenuChoice {
    Open(Page),
    Reset,
    Quit,
}

/// Questionnaire session bound to an input and an output stream.
pub struct Questionnaire<R, W> {
    input: R,
    output: W,
    state: AssessmentState,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    /// Start a session with an empty store.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: AssessmentState::new(),
        }
    }

    /// The session store.
    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Give back the output stream, consuming the session.
    pub fn into_output(self) -> W {
        self.output
    }

    // -------------------------------------------------------------------------
    // Main loop
    // -------------------------------------------------------------------------

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), HbctError> {
        self.say(APP_TITLE)?;
        self.say(&"=".repeat(APP_TITLE.len()))?;

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match parse_menu_choice(&line) {
                Ok(MenuChoice::Quit) => break,
                Ok(MenuChoice::Reset) => {
                    self.state.clear();
                    tracing::debug!("Session cleared");
                    self.say("Session cleared.")?;
                }
                Ok(MenuChoice::Open(page)) => {
                    if !self.show_page(page)? {
                        break;
                    }
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }

        self.say("Goodbye.")
    }

    fn print_menu(&mut self) -> Result<(), HbctError> {
        self.say("")?;
        self.say("Navigation")?;
        for (i, page) in Page::ALL.iter().enumerate() {
            let line = format!("  {}. {}", i + 1, page.label());
            self.say(&line)?;
        }
        self.prompt("Select a page (number or name, 'reset', 'quit'): ")
    }

    /// Show one page. Returns `false` when input ended mid-form.
    fn show_page(&mut self, page: Page) -> Result<bool, HbctError> {
        self.say("")?;
        self.say(page.header())?;
        self.say(&"-".repeat(page.header().len()))?;
        if let Some(intro) = page.intro() {
            self.say(intro)?;
            self.say("")?;
        }

        let submission = match page {
            Page::Home => return Ok(true),
            Page::Results => {
                let view = ResultsView::from_state(&self.state);
                write!(self.output, "{}", view).map_err(io_error)?;
                return Ok(true);
            }
            Page::SelfEfficacy => self.self_efficacy_form()?,
            Page::StagesOfChange => self.stage_form()?,
            Page::PhysicalActivity => self.exercise_form()?,
        };

        let Some((submission, button)) = submission else {
            return Ok(false);
        };

        match self.confirm(button)? {
            Some(true) => {
                submission.apply(&mut self.state);
                tracing::debug!(?submission, "Answer recorded");
                self.say(&submission.confirmation())?;
                Ok(true)
            }
            Some(false) => {
                self.say("Not submitted.")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -------------------------------------------------------------------------
    // Forms
    // -------------------------------------------------------------------------

    fn self_efficacy_form(&mut self) -> Result<Option<(Submission, &'static str)>, HbctError> {
        let Some(score) = self.ask_number(&CONFIDENCE_FIELD)? else {
            return Ok(None);
        };
        let submission = Submission::self_efficacy(i64::from(score))?;
        Ok(Some((submission, "Submit Self-Efficacy Score")))
    }

    fn stage_form(&mut self) -> Result<Option<(Submission, &'static str)>, HbctError> {
        self.say(forms::STAGE_QUESTION)?;
        for (i, stage) in StageOfChange::ALL.iter().enumerate() {
            let line = format!("  {}. {}", i + 1, stage);
            self.say(&line)?;
        }

        loop {
            self.prompt("Your choice (number or name): ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match forms::parse_stage_choice(&line) {
                Ok(stage) => return Ok(Some((Submission::Stage(stage), "Submit Stage of Change"))),
                Err(e) => {
                    tracing::warn!("Rejected stage choice: {}", e);
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    fn exercise_form(&mut self) -> Result<Option<(Submission, &'static str)>, HbctError> {
        let Some(frequency) = self.ask_number(&FREQUENCY_FIELD)? else {
            return Ok(None);
        };
        let Some(duration) = self.ask_number(&DURATION_FIELD)? else {
            return Ok(None);
        };
        let submission = Submission::exercise(i64::from(frequency), i64::from(duration))?;
        Ok(Some((submission, "Submit Exercise Data")))
    }

    /// Ask for a bounded number until the answer is accepted.
    fn ask_number(&mut self, field: &NumberField) -> Result<Option<u8>, HbctError> {
        loop {
            let prompt = format!(
                "{} [{}-{}, default {}]: ",
                field.question, field.min, field.max, field.default
            );
            self.prompt(&prompt)?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match field.parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::warn!("Rejected input for {}: {}", field.name, e);
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    /// Ask whether to press the submit button until the reply is a clear
    /// yes or no. Empty means yes.
    fn confirm(&mut self, button: &str) -> Result<Option<bool>, HbctError> {
        let prompt = format!("{}? [Y/n]: ", button);
        loop {
            self.prompt(&prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_confirmation(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => self.say("Please answer 'y' or 'n'.")?,
            }
        }
    }

    // -------------------------------------------------------------------------
    // I/O helpers
    // -------------------------------------------------------------------------

    fn say(&mut self, line: &str) -> Result<(), HbctError> {
        writeln!(self.output, "{}", line).map_err(io_error)
    }

    fn prompt(&mut self, text: &str) -> Result<(), HbctError> {
        write!(self.output, "{}", text).map_err(io_error)?;
        self.output.flush().map_err(io_error)
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, HbctError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn io_error(e: std::io::Error) -> HbctError {
    HbctError::IoError(e.to_string())
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_menu_choice(input: &str) -> Result<MenuChoice, HbctError> {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(MenuChoice::Quit),
        "reset" => return Ok(MenuChoice::Reset),
        _ => {}
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| Page::ALL.get(i).copied())
            .map(MenuChoice::Open)
            .ok_or_else(|| HbctError::UnknownPage(trimmed.to_string()));
    }
    trimmed.parse().map(MenuChoice::Open)
}

// =============================================================================
// TESTS
// =============================================================================
