use std::{fs, path::Path};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::account::{CheckingPolicy, DEFAULT_BRANCH};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BankConfig {
    /// Branch code stamped on every new account.
    pub branch: String,
    pub overdraft_limit: Decimal,
    pub withdrawal_cap: u32,
    /// Only used when printing amounts.
    pub currency_symbol: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        let policy = CheckingPolicy::default();
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            overdraft_limit: policy.overdraft_limit,
            withdrawal_cap: policy.withdrawal_cap,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl BankConfig {
    pub fn checking_policy(&self) -> CheckingPolicy {
        CheckingPolicy {
            overdraft_limit: self.overdraft_limit,
            withdrawal_cap: self.withdrawal_cap,
        }
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<BankConfig> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading config");
    let source = fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    BankConfig::from_toml(&source).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BankConfig::from_toml("").unwrap();
        assert_eq!(config, BankConfig::default());
        assert_eq!(config.branch, "0001");
        assert_eq!(config.checking_policy(), CheckingPolicy::default());
    }

    #[test]
    fn partial_config() {
        let config = BankConfig::from_toml(
            r#"
            branch = "0042"
            withdrawal_cap = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.branch, "0042");
        assert_eq!(config.withdrawal_cap, 5);
        assert_eq!(config.overdraft_limit, Decimal::from_u32(1000).unwrap());
        assert_eq!(config.currency_symbol, "R$");
    }

    #[test]
    fn overdraft_as_string() {
        let config = BankConfig::from_toml(r#"overdraft_limit = "250.50""#).unwrap();
        assert_eq!(config.overdraft_limit, Decimal::new(25050, 2));
    }

    #[test]
    fn reject_unknown_fields() {
        assert!(BankConfig::from_toml("interest_rate = 2").is_err());
    }

    #[test]
    fn missing_file() {
        let err = load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Could not read config"));
    }
}
