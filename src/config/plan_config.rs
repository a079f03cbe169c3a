use crate::adapters::catalog_csv::load_catalog_csv;
use crate::app::rules::{RuleKind, DEFAULT_MAX_CREDITS};
use crate::core::catalog::CourseCatalog;
use crate::domain::model::{Boundary, Course, Student};
use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A registration plan file: institution policy, one student and the course offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    #[serde(default)]
    pub policy: PolicyConfig,
    pub student: Student,
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Directory relative catalog paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    pub max_credits: Option<u32>,
    pub boundary: Option<Boundary>,
    pub rules: Option<Vec<RuleKind>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub csv: Option<String>,
}

impl PolicyConfig {
    pub fn max_credits(&self) -> u32 {
        self.max_credits.unwrap_or(DEFAULT_MAX_CREDITS)
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary.unwrap_or_default()
    }

    pub fn rule_order(&self) -> Vec<RuleKind> {
        self.rules
            .clone()
            .unwrap_or_else(|| RuleKind::DEFAULT_ORDER.to_vec())
    }
}

impl Validate for PolicyConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("policy.max_credits", self.max_credits(), 1)?;

        if self.rules.as_ref().is_some_and(Vec::is_empty) {
            return Err(RegistrationError::InvalidConfigValue {
                field: "policy.rules".to_string(),
                value: "[]".to_string(),
                reason: "At least one rule must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

impl PlanConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RegistrationError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn csv_path(&self) -> Option<PathBuf> {
        let csv = self.catalog.as_ref()?.csv.as_ref()?;
        let path = PathBuf::from(csv);
        match &self.base_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path),
        }
    }

    /// Inline `[[courses]]` plus the CSV catalog, if one is configured.
    pub fn load_catalog(&self) -> Result<CourseCatalog> {
        let mut catalog = CourseCatalog::from_courses(self.courses.iter().cloned())?;
        if let Some(path) = self.csv_path() {
            tracing::debug!("Loading course catalog from {}", path.display());
            catalog.extend(load_catalog_csv(&path)?)?;
        }
        Ok(catalog)
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Result<()> {
        self.policy.validate()?;

        if let Some(csv) = self.catalog.as_ref().and_then(|c| c.csv.as_deref()) {
            validate_path("catalog.csv", csv)?;
        }

        if self.courses.is_empty() && self.csv_path().is_none() {
            return Err(RegistrationError::InvalidConfigValue {
                field: "courses".to_string(),
                value: "[]".to_string(),
                reason: "No [[courses]] and no catalog.csv given".to_string(),
            });
        }

        Ok(())
    }
}

/// Replaces `${VAR}` with the environment value, leaving unknown names untouched.
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
