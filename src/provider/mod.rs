//! Mail hosting provider inference from an MX hostname.
//!
//! [`ProviderRules`] is an ordered table of [`ProviderRule`]s; the first rule
//! whose pattern matches the resolved exchange names the provider.

mod rules;

pub use rules::{ProviderRule, ProviderRules, RuleParseError};
