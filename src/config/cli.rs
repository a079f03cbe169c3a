use crate::app::rules::RuleKind;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "krs-check")]
#[command(about = "Validate a student's course-registration plan")]
pub struct CliConfig {
    /// Path to the TOML registration plan
    #[arg(short, long, default_value = "krs-plan.toml")]
    pub plan: String,

    /// Override policy.max_credits from the plan
    #[arg(long)]
    pub max_credits: Option<u32>,

    /// Override policy.rules from the plan, e.g. `--rules prerequisite,credit_limit`
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<RuleKind>,

    /// How to print the validation result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}
