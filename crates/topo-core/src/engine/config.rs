use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown bond endpoint check '{0}'. Expected 'as-observed' or 'both-endpoints'.")]
    UnknownBondEndpointCheck(String),
}

/// How the right endpoint of a disulfide bond is tested against an outside segment.
///
/// The left endpoint always has to satisfy `start <= left <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondEndpointCheck {
    /// `right >= start && left <= end`, the rule applied by the curated reference data.
    #[default]
    AsObserved,
    /// `start <= right <= end`, the same inclusive test as the left endpoint.
    BothEndpoints,
}

impl BondEndpointCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            BondEndpointCheck::AsObserved => "as-observed",
            BondEndpointCheck::BothEndpoints => "both-endpoints",
        }
    }
}

impl fmt::Display for BondEndpointCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BondEndpointCheck {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "as-observed" => Ok(BondEndpointCheck::AsObserved),
            "both-endpoints" => Ok(BondEndpointCheck::BothEndpoints),
            other => Err(ConfigError::UnknownBondEndpointCheck(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub bond_endpoint_check: BondEndpointCheck,
    /// Log a warning for records whose topology segments run past the sequence length.
    pub warn_on_length_overflow: bool,
    /// Abort on the first unusable row instead of skipping it.
    pub fail_fast: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bond_endpoint_check: BondEndpointCheck::default(),
            warn_on_length_overflow: true,
            fail_fast: false,
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    bond_endpoint_check: Option<BondEndpointCheck>,
    warn_on_length_overflow: Option<bool>,
    fail_fast: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_endpoint_check(mut self, check: BondEndpointCheck) -> Self {
        self.bond_endpoint_check = Some(check);
        self
    }
    pub fn warn_on_length_overflow(mut self, enabled: bool) -> Self {
        self.warn_on_length_overflow = Some(enabled);
        self
    }
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = Some(enabled);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let defaults = AnalysisConfig::default();
        AnalysisConfig {
            bond_endpoint_check: self
                .bond_endpoint_check
                .unwrap_or(defaults.bond_endpoint_check),
            warn_on_length_overflow: self
                .warn_on_length_overflow
                .unwrap_or(defaults.warn_on_length_overflow),
            fail_fast: self.fail_fast.unwrap_or(defaults.fail_fast),
        }
    }
}
