use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StructuralError;

/// Network a node reports metrics for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Testnet,
    Mainnet,
    Local,
}

impl Environment {
    /// All environments, in the order they are listed in error messages.
    pub const ALL: [Environment; 3] = [Self::Testnet, Self::Mainnet, Self::Local];

    /// The literal used in serialized records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = StructuralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| StructuralError::UnknownEnvironment(s.to_string()))
    }
}
