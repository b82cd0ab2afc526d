use crate::domain::model::{AllocationRequest, Participant, PizzaSettings};
use crate::domain::ports::OrderSource;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An order as written in a TOML file: pizza settings, participants and what to compute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFile {
    #[serde(default)]
    pub settings: PizzaSettings,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub request: AllocationRequest,
}

impl OrderFile {
    /// 從 TOML 檔案載入訂單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SplitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析訂單
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ORDER_TOTAL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SplitError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl OrderSource for OrderFile {
    fn settings(&self) -> &PizzaSettings {
        &self.settings
    }

    fn participants(&self) -> &[Participant] {
        &self.participants
    }

    fn request(&self) -> AllocationRequest {
        self.request.clone()
    }
}

impl Validate for OrderFile {
    fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        self.participants.as_slice().validate()?;
        self.request.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PlanVariant, Scheme};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_order() {
        let toml_content = r#"
[settings]
large_pizza_slices = 8
small_pizza_slices = 6
large_pizza_price = 900
calculation_scheme = "proportional-price"

[[participants]]
id = "anna"
required_slices = 3
can_take_extra = true

[[participants]]
id = "boris"
required_slices = 4

[request]
variant = "reduced"
order_total = 1500.0
"#;

        let order = OrderFile::from_toml_str(toml_content).unwrap();

        assert_eq!(order.settings.large_pizza_price, 900.0);
        assert_eq!(order.settings.free_pizza_threshold, 3);
        assert_eq!(order.settings.calculation_scheme, Scheme::ProportionalPrice);
        assert_eq!(order.participants.len(), 2);
        assert!(!order.participants[1].can_take_extra);
        assert_eq!(order.request.variant, PlanVariant::Reduced);
        assert_eq!(order.request.order_total, Some(1500.0));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_missing_tables() {
        let order = OrderFile::from_toml_str("").unwrap();
        assert_eq!(order.settings, PizzaSettings::default());
        assert!(order.participants.is_empty());
        assert_eq!(order.request, AllocationRequest::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PIZZA_SPLIT_TEST_TOTAL", "1234.5");

        let toml_content = r#"
[request]
order_total = ${PIZZA_SPLIT_TEST_TOTAL}
"#;

        let order = OrderFile::from_toml_str(toml_content).unwrap();
        assert_eq!(order.request.order_total, Some(1234.5));

        std::env::remove_var("PIZZA_SPLIT_TEST_TOTAL");
    }

    #[test]
    fn test_unknown_scheme_is_config_error() {
        let toml_content = r#"
[settings]
calculation_scheme = "cheapest"
"#;
        let err = OrderFile::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, SplitError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_settings_fail_validation() {
        let toml_content = r#"
[settings]
free_pizza_threshold = 1
"#;
        let order = OrderFile::from_toml_str(toml_content).unwrap();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_order_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[[participants]]
id = "file-test"
required_slices = 2
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let order = OrderFile::from_file(temp_file.path()).unwrap();
        assert_eq!(order.participants[0].id, "file-test");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OrderFile::from_file("/definitely/not/here/order.toml").unwrap_err();
        assert!(matches!(err, SplitError::IoError(_)));
    }
}
