use crate::domain::model::{Course, Student};
use crate::domain::outcome::{Verdict, Violation};
use crate::domain::ports::ValidationRule;
use crate::utils::error::{RegistrationError, Result};

/// Maximum SKS a student may take in one term unless the policy says otherwise.
pub const DEFAULT_MAX_CREDITS: u32 = 24;

/// Rejects plans whose total credit weight exceeds `max_credits` (inclusive).
#[derive(Debug, Clone)]
pub struct CreditLimitRule {
    max_credits: u32,
}

impl CreditLimitRule {
    pub const NAME: &'static str = "credit_limit";

    pub fn new(max_credits: u32) -> Result<Self> {
        if max_credits == 0 {
            return Err(RegistrationError::InvalidConfigValue {
                field: "policy.max_credits".to_string(),
                value: max_credits.to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        Ok(Self { max_credits })
    }

    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }
}

impl Default for CreditLimitRule {
    fn default() -> Self {
        Self {
            max_credits: DEFAULT_MAX_CREDITS,
        }
    }
}

impl ValidationRule for CreditLimitRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, _student: &Student, requested: &[Course]) -> Result<Verdict> {
        let total: u64 = requested.iter().map(|c| u64::from(c.credits())).sum();

        if total > u64::from(self.max_credits) {
            let breakdown: Vec<String> = requested
                .iter()
                .map(|c| format!("{} ({})", c.code(), c.credits()))
                .collect();
            let summary = format!(
                "Total credits ({}) exceed the maximum ({})",
                total, self.max_credits
            );
            let violation = Violation::new(
                requested.iter().map(Course::code),
                format!("requested {}", breakdown.join(", ")),
            );
            return Ok(Verdict::fail(Self::NAME, &summary, vec![violation]));
        }

        Ok(Verdict::pass(
            Self::NAME,
            format!("Total credits {}/{} within limit", total, self.max_credits),
        ))
    }
}
