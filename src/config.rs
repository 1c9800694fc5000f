use crate::errors::NatResult;
use serde::Deserialize;

/// Settings for the randomized law checker.
///
/// ```toml
/// cases = 512
/// max_operand_bits = 1024
/// max_index = 1100
/// seed = 7
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LawConfig {
    /// Samples drawn per law.
    pub cases: u32,
    /// Operands are drawn below `2^max_operand_bits`.
    pub max_operand_bits: u64,
    /// Bit indices, shift amounts and exponents are drawn below this.
    pub max_index: u64,
    /// Fixes the sample stream; `None` uses proptest's default RNG.
    pub seed: Option<u64>,
}

impl Default for LawConfig {
    fn default() -> Self {
        LawConfig { cases: 256, max_operand_bits: 256, max_index: 320, seed: None }
    }
}

impl LawConfig {
    pub fn from_toml_str(s: &str) -> NatResult<Self> {
        let config: LawConfig = toml::from_str(s)?;
        Ok(config)
    }

    pub fn with_cases(mut self, cases: u32) -> Self {
        self.cases = cases;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
