//! Interactive prompts.
//!
//! Each prompt blocks until the user answers. The workflow asks through the
//! [`Prompter`] trait and converts raw answers into typed values with
//! [`choose`] before continuing.

use crate::error::{CliError, Result};
use dialoguer::{Input, Password, Select};

/// One selectable option carrying the typed value it stands for
#[derive(Debug, Clone)]
pub struct Choice<T> {
    /// Label shown to the user
    pub label: String,
    /// Value returned when selected
    pub value: T,
}

impl<T> Choice<T> {
    /// Build a choice
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Source of interactive answers
pub trait Prompter {
    /// Pick one item; returns its index
    fn select(&self, message: &str, items: &[String], default: usize) -> Result<usize>;

    /// Free-text input; may return an empty string
    fn input(&self, message: &str, default: &str) -> Result<String>;

    /// Masked input
    fn password(&self, message: &str) -> Result<String>;
}

/// Ask the user to pick one of `choices` and return the chosen value
pub fn choose<T: Clone, P: Prompter + ?Sized>(
    prompter: &P,
    message: &str,
    choices: &[Choice<T>],
    default: usize,
) -> Result<T> {
    let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
    let index = prompter.select(message, &labels, default.min(labels.len().saturating_sub(1)))?;

    choices.get(index).map(|c| c.value.clone()).ok_or_else(|| {
        CliError::PromptFailed {
            message: message.to_string(),
            reason: format!("selection {} out of range ({} choices)", index, choices.len()),
        }
        .into()
    })
}

/// Ask for text until a non-empty answer is given
pub fn input_non_empty<P: Prompter + ?Sized>(prompter: &P, message: &str) -> Result<String> {
    loop {
        let answer = prompter.input(message, "")?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

/// Terminal prompts via dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

fn prompt_failed(message: &str, e: dialoguer::Error) -> crate::error::PublishError {
    CliError::PromptFailed {
        message: message.to_string(),
        reason: e.to_string(),
    }
    .into()
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| prompt_failed(message, e))
    }

    fn input(&self, message: &str, default: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(message)
            .default(default.to_string())
            .allow_empty(true)
            .show_default(!default.is_empty())
            .interact_text()
            .map_err(|e| prompt_failed(message, e))
    }

    fn password(&self, message: &str) -> Result<String> {
        Password::new()
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| prompt_failed(message, e))
    }
}
