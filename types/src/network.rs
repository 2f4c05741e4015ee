//! Network identifier, selecting which genesis account and epoch-signer keys apply.

use serde::{Deserialize, Serialize};

/// Identifies which network a node is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public beta network.
    Beta,
    /// Local/test network used by the test suite.
    Test,
}

impl NetworkId {
    /// Default port for this network.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Live => 7075,
            Self::Beta => 54000,
            Self::Test => 17075,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Beta => "beta",
            Self::Test => "test",
        }
    }
}

impl std::str::FromStr for NetworkId {
    type Err = crate::TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(Self::Live),
            "beta" => Ok(Self::Beta),
            "test" => Ok(Self::Test),
            other => Err(crate::TypesError::InvalidNetworkId(other.to_string())),
        }
    }
}
