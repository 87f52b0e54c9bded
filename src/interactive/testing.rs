use std::collections::{HashMap, VecDeque};

use ethers::types::Address;
use eyre::{bail, ContextCompat};
use semver::Version;

use super::{ChainView, Prompter};

#[derive(Debug, Clone)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(String),
    Password(String),
    /// The operator pressed Esc.
    Cancel,
}

impl Answer {
    pub fn text(value: impl ToString) -> Self {
        Answer::Text(value.to_string())
    }
}

/// Replays canned answers and records what the operator would have seen.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Every prompt message with the default it offered.
    pub shown: Vec<(String, Option<String>)>,
    pub notices: Vec<String>,
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

    fn next(
        &mut self,
        message: &str,
        default: Option<&str>,
    ) -> eyre::Result<Answer> {
        self.shown
            .push((message.to_owned(), default.map(ToOwned::to_owned)));

        match self.answers.pop_front() {
            Some(Answer::Cancel) => {
                Err(inquire::InquireError::OperationCanceled.into())
            }
            answer => answer
                .with_context(|| format!("No scripted answer for '{message}'")),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
    ) -> eyre::Result<String> {
        match self.next(message, default)? {
            Answer::Text(value) if value.is_empty() => {
                Ok(default.unwrap_or_default().to_owned())
            }
            Answer::Text(value) => Ok(value),
            other => bail!("Expected text for '{message}', got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str) -> eyre::Result<bool> {
        match self.next(message, None)? {
            Answer::Confirm(value) => Ok(value),
            other => bail!("Expected confirm for '{message}', got {other:?}"),
        }
    }

    fn select(
        &mut self,
        message: &str,
        options: Vec<String>,
    ) -> eyre::Result<String> {
        match self.next(message, None)? {
            Answer::Select(value) if options.contains(&value) => Ok(value),
            other => bail!("Cannot select {other:?} from {options:?}"),
        }
    }

    fn password(&mut self, message: &str) -> eyre::Result<String> {
        match self.next(message, None)? {
            Answer::Password(value) => Ok(value),
            other => bail!("Expected password for '{message}', got {other:?}"),
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

pub struct FakeChain {
    names: HashMap<String, Address>,
    symbols: HashMap<Address, String>,
    latest_release: Version,
}

impl FakeChain {
    pub fn new(
        names: HashMap<String, Address>,
        symbols: HashMap<Address, String>,
        latest_release: Version,
    ) -> Self {
        Self {
            names,
            symbols,
            latest_release,
        }
    }

    pub fn with_latest_release(mut self, latest_release: Version) -> Self {
        self.latest_release = latest_release;
        self
    }
}

impl ChainView for FakeChain {
    async fn resolve_name(&self, name: &str) -> eyre::Result<Option<Address>> {
        Ok(self.names.get(name).copied())
    }

    async fn token_symbol(&self, token: Address) -> eyre::Result<String> {
        self.symbols
            .get(&token)
            .cloned()
            .with_context(|| format!("{token:?} is not a token"))
    }

    async fn latest_release(&self, _registry: Address) -> eyre::Result<Version> {
        Ok(self.latest_release.clone())
    }
}
