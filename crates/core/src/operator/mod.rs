//! Operator abstraction
//!
//! The person at the keyboard: answers prompts and reads what the session
//! displays. The session never touches stdin/stdout directly.

mod console;

pub use console::ConsoleOperator;

use async_trait::async_trait;
use std::collections::VecDeque;

use crate::Result;

/// Interactive collaborator of a session
#[async_trait]
pub trait Operator: Send {
    /// Show `prompt` and wait for one line of input.
    ///
    /// Returns `None` once the input source is exhausted.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show text to the operator
    fn display(&mut self, text: &str);
}

/// Operator replaying a fixed list of input lines
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    displayed: Vec<String>,
}

impl ScriptedOperator {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything displayed so far, in order
    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// True if some displayed text contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.displayed.iter().any(|text| text.contains(needle))
    }

    /// Inputs not consumed yet
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn display(&mut self, text: &str) {
        self.displayed.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_operator() {
        let mut operator = ScriptedOperator::new(["one", "two"]);
        assert_eq!(operator.read_line("> ").await.unwrap().as_deref(), Some("one"));
        operator.display("shown");
        assert_eq!(operator.read_line("> ").await.unwrap().as_deref(), Some("two"));
        assert_eq!(operator.read_line("> ").await.unwrap(), None);

        assert_eq!(operator.prompts().len(), 3);
        assert!(operator.saw("show"));
        assert_eq!(operator.remaining(), 0);
    }
}
