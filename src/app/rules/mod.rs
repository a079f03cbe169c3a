pub mod credit_limit;
pub mod prerequisite;
pub mod schedule_conflict;

pub use credit_limit::{CreditLimitRule, DEFAULT_MAX_CREDITS};
pub use prerequisite::PrerequisiteRule;
pub use schedule_conflict::ScheduleConflictRule;

use crate::config::plan_config::PolicyConfig;
use crate::domain::ports::ValidationRule;
use crate::utils::error::{RegistrationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    CreditLimit,
    Prerequisite,
    ScheduleConflict,
}

impl RuleKind {
    pub const DEFAULT_ORDER: [RuleKind; 3] = [
        RuleKind::CreditLimit,
        RuleKind::Prerequisite,
        RuleKind::ScheduleConflict,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::CreditLimit => CreditLimitRule::NAME,
            RuleKind::Prerequisite => PrerequisiteRule::NAME,
            RuleKind::ScheduleConflict => ScheduleConflictRule::NAME,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a rule name as written in `policy.rules` or on the `--rules` command-line option.
impl FromStr for RuleKind {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| RegistrationError::InvalidConfigValue {
                field: "rules".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown rule. Valid rules: {}",
                    Self::DEFAULT_ORDER.map(RuleKind::as_str).join(", ")
                ),
            })
    }
}

/// Instantiates the rules named by the policy, in the policy's order.
pub fn build_rules(policy: &PolicyConfig) -> Result<Vec<Box<dyn ValidationRule>>> {
    let mut seen = HashSet::new();
    let mut rules: Vec<Box<dyn ValidationRule>> = Vec::new();

    for kind in policy.rule_order() {
        if !seen.insert(kind) {
            return Err(RegistrationError::InvalidConfigValue {
                field: "policy.rules".to_string(),
                value: kind.to_string(),
                reason: "Rule listed more than once".to_string(),
            });
        }

        let rule: Box<dyn ValidationRule> = match kind {
            RuleKind::CreditLimit => Box::new(CreditLimitRule::new(policy.max_credits())?),
            RuleKind::Prerequisite => Box::new(PrerequisiteRule::new()),
            RuleKind::ScheduleConflict => {
                Box::new(ScheduleConflictRule::with_boundary(policy.boundary()))
            }
        };
        tracing::debug!("Configured rule #{}: {}", rules.len() + 1, rule.name());
        rules.push(rule);
    }

    Ok(rules)
}
