//! Terminal prompter backed by dialoguer

use create_cp_core::resolver::{Choice, Prompter, TextPrompt};
use create_cp_core::{Error, Result};
use dialoguer::{Confirm, Input, Select};
use std::io;

use crate::output;

/// Prompts on the controlling terminal.
///
/// Esc/q on confirm and select, and Ctrl-C anywhere, count as aborting
/// the prompt.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &TextPrompt) -> Result<Option<String>> {
        let mut input = Input::<String>::new().with_prompt(&prompt.message);
        if let Some(initial) = &prompt.initial {
            input = input.default(initial.clone());
        }
        if let Some(validate) = prompt.validate {
            input = input.validate_with(move |value: &String| validate(value));
        }
        finish(input.interact_text().map(Some))
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        finish(
            Confirm::new()
                .with_prompt(message)
                .default(default)
                .interact_opt(),
        )
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>> {
        let items: Vec<String> = choices
            .iter()
            .map(|choice| output::paint(&choice.label, choice.color))
            .collect();
        finish(
            Select::new()
                .with_prompt(message)
                .items(&items)
                .default(0)
                .interact_opt(),
        )
    }
}

fn finish<T>(result: std::result::Result<Option<T>, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(answer) => Ok(answer),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(Error::prompt(e.to_string())),
    }
}
