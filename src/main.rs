use anyhow::Context;
use clap::Parser;
use krs_validator::utils::error::{RegistrationError, EXIT_ACCEPTED, EXIT_REJECTED};
use krs_validator::utils::logger;
use krs_validator::{
    validate_plan, CliConfig, OutputFormat, PlanConfig, TracingLogSink, ValidationReport,
};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("📁 Loading registration plan from: {}", config.plan);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let mut plan = match PlanConfig::from_file(&config.plan) {
        Ok(plan) => plan,
        Err(e) => return Ok(report_error(&e)),
    };

    if let Some(max_credits) = config.max_credits {
        plan.policy.max_credits = Some(max_credits);
        tracing::info!("🔧 Credit limit overridden to: {}", max_credits);
    }

    if !config.rules.is_empty() {
        let names: Vec<&str> = config.rules.iter().map(|k| k.as_str()).collect();
        tracing::info!("🔧 Rules overridden to: {}", names.join(", "));
        plan.policy.rules = Some(config.rules.clone());
    }

    let report = match validate_plan(&plan, Box::new(TracingLogSink)) {
        Ok(report) => report,
        Err(e) => return Ok(report_error(&e)),
    };

    match config.format {
        OutputFormat::Text => print_text(plan.student.name(), &report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        ),
    }

    Ok(ExitCode::from(if report.is_pass() {
        EXIT_ACCEPTED
    } else {
        EXIT_REJECTED
    }))
}

fn print_text(student: &str, report: &ValidationReport) {
    if report.is_pass() {
        println!("✅ Registration accepted for {}", student);
        return;
    }

    println!("❌ Registration rejected for {}", student);
    for verdict in report.failures() {
        println!("- [{}] {}", verdict.rule, verdict.message);
    }
}

fn report_error(e: &RegistrationError) -> ExitCode {
    tracing::error!("❌ Registration check failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    ExitCode::from(e.exit_code())
}
