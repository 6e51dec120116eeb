//! Interactive prompting for missing parameters
//!
//! Commands describe what they want to ask with an [`Input`] and go through a
//! [`Prompter`]. The terminal implementation uses `dialoguer`; tests script
//! the answers instead.

pub mod validation;

use crate::helper;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use std::fmt;
use thiserror::Error;
pub use validation::{ValidationError, Validator};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("no options available for '{0}'")]
    NoOptions(String),

    #[error("no answer for '{0}'")]
    NoAnswer(String),
}

/// A value entered at a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Bool(bool),
    Choices(Vec<String>),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(s) => f.write_str(s),
            Answer::Bool(b) => write!(f, "{}", b),
            Answer::Choices(values) => write!(f, "[{}]", values.join(" ")),
        }
    }
}

/// Description of a single question
#[derive(Default)]
pub struct Input {
    pub question: String,
    pub help: String,
    pub default: Option<Answer>,
    pub options: Vec<String>,
    pub required: bool,
    pub validators: Vec<Validator>,
}

impl Input {
    pub fn new(question: impl Into<String>) -> Self {
        Input {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default = Some(Answer::Text(value.into()));
        self
    }

    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(Answer::Bool(value));
        self
    }

    pub fn default_choices(mut self, values: Vec<String>) -> Self {
        self.default = Some(Answer::Choices(values));
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn default_as_text(&self) -> Option<&str> {
        match &self.default {
            Some(Answer::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn default_as_bool(&self) -> bool {
        matches!(self.default, Some(Answer::Bool(true)))
    }

    /// Run the `required` check and every attached validator
    pub fn validate(&self, answer: &Answer) -> Result<(), ValidationError> {
        if self.required {
            validation::required(answer)?;
        }
        for validator in &self.validators {
            validator(answer)?;
        }
        Ok(())
    }
}

/// Source of answers for interactive questions
///
/// Implementations must only return answers that pass `Input::validate`.
pub trait Prompter: Send + Sync {
    fn text(&self, input: &Input) -> Result<String, PromptError>;

    fn confirm(&self, input: &Input) -> Result<bool, PromptError>;

    fn select(&self, input: &Input) -> Result<String, PromptError>;

    fn multi_select(&self, input: &Input) -> Result<Vec<String>, PromptError>;
}

/// Terminal prompts backed by `dialoguer`
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    fn show_help(input: &Input) {
        if !input.help.is_empty() {
            eprintln!("{}", format!("? {}", input.help).dimmed());
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, input: &Input) -> Result<String, PromptError> {
        Self::show_help(input);
        let theme = ColorfulTheme::default();
        let mut prompt = dialoguer::Input::<String>::with_theme(&theme)
            .with_prompt(&input.question)
            .allow_empty(true);
        if let Some(default) = input.default_as_text().filter(|d| !d.is_empty()) {
            prompt = prompt.default(default.to_string());
        }
        let answer = prompt
            .validate_with(|value: &String| input.validate(&Answer::Text(value.clone())))
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&self, input: &Input) -> Result<bool, PromptError> {
        Self::show_help(input);
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(&input.question)
            .default(input.default_as_bool())
            .interact()?;
        input.validate(&Answer::Bool(answer))?;
        Ok(answer)
    }

    fn select(&self, input: &Input) -> Result<String, PromptError> {
        Self::show_help(input);
        let default = input
            .default_as_text()
            .and_then(|d| input.options.iter().position(|o| o == d))
            .unwrap_or(0);
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(&input.question)
            .items(&input.options)
            .default(default)
            .interact()?;
        let answer = input
            .options
            .get(index)
            .cloned()
            .ok_or_else(|| PromptError::NoOptions(input.question.clone()))?;
        input.validate(&Answer::Text(answer.clone()))?;
        Ok(answer)
    }

    fn multi_select(&self, input: &Input) -> Result<Vec<String>, PromptError> {
        Self::show_help(input);
        let preselected: Vec<bool> = match &input.default {
            Some(Answer::Choices(defaults)) => input
                .options
                .iter()
                .map(|o| defaults.contains(o))
                .collect(),
            _ => vec![false; input.options.len()],
        };
        loop {
            let picked = MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt(&input.question)
                .items(&input.options)
                .defaults(&preselected)
                .interact()?;
            let answer: Vec<String> = picked
                .into_iter()
                .filter_map(|i| input.options.get(i).cloned())
                .collect();
            match input.validate(&Answer::Choices(answer.clone())) {
                Ok(()) => return Ok(answer),
                Err(e) => eprintln!("{} {}", "✘".red(), e),
            }
        }
    }
}

pub fn get_string(prompter: &dyn Prompter, input: Input) -> Result<String, PromptError> {
    let answer = prompter.text(&input)?;
    Ok(helper::handle_escaped_empty_string(answer.trim()))
}

pub fn get_bool(prompter: &dyn Prompter, input: Input) -> Result<bool, PromptError> {
    prompter.confirm(&input)
}

pub fn get_int(prompter: &dyn Prompter, input: Input) -> Result<i32, PromptError> {
    let input = input.validator(Box::new(validation::is_integer));
    let answer = prompter.text(&input)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(0);
    }
    answer.parse::<i32>().map_err(|_| {
        PromptError::Invalid(ValidationError::Invalid(format!(
            "'{}' is not a valid integer",
            answer
        )))
    })
}

pub fn get_option(prompter: &dyn Prompter, input: Input) -> Result<String, PromptError> {
    if input.options.is_empty() {
        return Err(PromptError::NoOptions(input.question));
    }
    prompter.select(&input)
}

pub fn get_multiple_options(
    prompter: &dyn Prompter,
    input: Input,
) -> Result<Vec<String>, PromptError> {
    if input.options.is_empty() {
        return Err(PromptError::NoOptions(input.question));
    }
    prompter.multi_select(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn test_get_string_unescapes_empty_value() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text("\"\"".to_string())]);

        let value = get_string(&prompter, Input::new("Label match for ingress")).unwrap();

        assert_eq!(value, "");
    }

    #[test]
    fn test_get_string_falls_back_to_default() {
        let prompter = ScriptedPrompter::new(vec![]);

        let value = get_string(
            &prompter,
            Input::new("OIDC Private Key Secret ARN").default_text("arn:aws:x:y:z:w"),
        )
        .unwrap();

        assert_eq!(value, "arn:aws:x:y:z:w");
    }

    #[test]
    fn test_required_input_rejects_empty_answer() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text(String::new())]);

        let err = get_string(&prompter, Input::new("Name").required()).unwrap_err();

        assert!(matches!(err, PromptError::Invalid(ValidationError::Required)));
    }

    #[test]
    fn test_get_int_parses_answer() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text("4".to_string())]);
        assert_eq!(get_int(&prompter, Input::new("Replicas")).unwrap(), 4);
    }

    #[test]
    fn test_get_int_rejects_non_numeric() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text("four".to_string())]);
        assert!(get_int(&prompter, Input::new("Replicas")).is_err());
    }

    #[test]
    fn test_get_option_requires_options() {
        let prompter = ScriptedPrompter::new(vec![]);

        let err = get_option(&prompter, Input::new("Mode")).unwrap_err();

        assert!(matches!(err, PromptError::NoOptions(q) if q == "Mode"));
    }

    #[test]
    fn test_get_option_rejects_unknown_choice() {
        let prompter = ScriptedPrompter::new(vec![Answer::Text("hosted".to_string())]);

        let err = get_option(
            &prompter,
            Input::new("Mode").options(vec!["auto".to_string(), "manual".to_string()]),
        )
        .unwrap_err();

        assert!(matches!(err, PromptError::Invalid(_)));
    }

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::Bool(true).to_string(), "true");
        assert_eq!(
            Answer::Choices(vec!["a".to_string(), "b".to_string()]).to_string(),
            "[a b]"
        );
    }
}
