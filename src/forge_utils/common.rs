use std::fmt;
use std::path::PathBuf;

/// A contract as forge addresses it: `Name` or `path/to/Source:Name`.
#[derive(Debug, Clone)]
pub struct ContractSpec {
    pub path: Option<PathBuf>,
    pub name: String,
}

impl ContractSpec {
    pub fn name(name: impl ToString) -> Self {
        Self {
            path: None,
            name: name.to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ContractSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path.as_deref() {
            write!(f, "{}:{}", path.display(), self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
