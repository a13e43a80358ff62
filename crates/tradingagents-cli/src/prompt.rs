//! Terminal prompt abstraction
//!
//! The setup steps talk to a [`Prompter`] so they can be driven by a script
//! in tests. `None` from any method means the user backed out of the prompt.

use crate::error::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Validation hook for free-text answers; `Err` carries the hint to show
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

pub trait Prompter {
    /// Free text, re-asked until `validate` accepts it
    fn text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<Option<String>>;

    /// Single choice; returns the index into `items`
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    /// Checklist; returns the checked indices
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Informational line between prompts
    fn note(&mut self, message: &str);
}

/// [`Prompter`] backed by dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        let answer = input
            .validate_with(|value: &String| validate(value.as_str()))
            .interact_text()?;
        Ok(Some(answer))
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?)
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact_opt()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?)
    }

    fn note(&mut self, message: &str) {
        println!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// One scripted answer
    #[derive(Debug, Clone)]
    pub enum Answer {
        /// `Some("")` takes the prompt's default
        Text(Option<&'static str>),
        Select(Option<usize>),
        Multi(Option<Vec<usize>>),
        Confirm(Option<bool>),
    }

    /// Replays answers in order and records what was asked
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub prompts: Vec<String>,
        pub notes: Vec<String>,
        pub rejected: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Default::default()
            }
        }

        pub fn is_exhausted(&self) -> bool {
            self.answers.is_empty()
        }

        fn next(&mut self, prompt: &str) -> Answer {
            self.prompts.push(prompt.to_string());
            self.answers
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted answer left for {prompt:?}"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn text(
            &mut self,
            prompt: &str,
            default: Option<&str>,
            validate: Validator<'_>,
        ) -> Result<Option<String>> {
            loop {
                let answer = match self.next(prompt) {
                    Answer::Text(None) => return Ok(None),
                    Answer::Text(Some("")) => default.unwrap_or_default().to_string(),
                    Answer::Text(Some(text)) => text.to_string(),
                    other => panic!("expected a text answer for {prompt:?}, got {other:?}"),
                };
                // A rejected answer is re-asked, like the terminal does.
                match validate(&answer) {
                    Ok(()) => return Ok(Some(answer)),
                    Err(hint) => self.rejected.push(hint),
                }
            }
        }

        fn select(
            &mut self,
            prompt: &str,
            items: &[String],
            _default: usize,
        ) -> Result<Option<usize>> {
            match self.next(prompt) {
                Answer::Select(choice) => {
                    if let Some(index) = choice {
                        assert!(index < items.len(), "index {index} out of range for {prompt:?}");
                    }
                    Ok(choice)
                }
                other => panic!("expected a select answer for {prompt:?}, got {other:?}"),
            }
        }

        fn multi_select(&mut self, prompt: &str, _items: &[String]) -> Result<Option<Vec<usize>>> {
            match self.next(prompt) {
                Answer::Multi(choice) => Ok(choice),
                other => panic!("expected a multi-select answer for {prompt:?}, got {other:?}"),
            }
        }

        fn confirm(&mut self, prompt: &str, _default: bool) -> Result<Option<bool>> {
            match self.next(prompt) {
                Answer::Confirm(choice) => Ok(choice),
                other => panic!("expected a confirm answer for {prompt:?}, got {other:?}"),
            }
        }

        fn note(&mut self, message: &str) {
            self.notes.push(message.to_string());
        }
    }
}
