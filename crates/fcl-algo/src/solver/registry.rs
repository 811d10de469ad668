use super::{GoodLpBackend, LpEngine, MilpBackend};
use fcl_core::FclError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Registry of solver backends selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    #[default]
    Microlp,
    Highs,
    Cbc,
}

impl SolverKind {
    pub fn build_backend(self) -> Arc<dyn MilpBackend> {
        match self {
            SolverKind::Microlp => Arc::new(GoodLpBackend::new(LpEngine::Microlp)),
            SolverKind::Highs => Arc::new(GoodLpBackend::new(LpEngine::Highs)),
            SolverKind::Cbc => Arc::new(GoodLpBackend::new(LpEngine::Cbc)),
        }
    }

    pub fn all() -> &'static [SolverKind] {
        &[SolverKind::Microlp, SolverKind::Highs, SolverKind::Cbc]
    }

    pub fn available() -> &'static [&'static str] {
        &["microlp", "highs", "cbc"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Microlp => "microlp",
            SolverKind::Highs => "highs",
            SolverKind::Cbc => "cbc",
        }
    }
}

impl FromStr for SolverKind {
    type Err = FclError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "microlp" | "default" => Ok(SolverKind::Microlp),
            "highs" => Ok(SolverKind::Highs),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverKind::Cbc),
            other => Err(FclError::InvalidParameter(format!(
                "unknown solver '{}'; supported values: {}",
                other,
                Self::available().join(", ")
            ))),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
