use crate::config::toml_config::OrderFile;
use crate::domain::model::{PlanVariant, Scheme};
use clap::Parser;
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[command(name = "pizza-split")]
#[command(about = "Plan a pizza order and split slices and cost between participants")]
pub struct CliArgs {
    /// Path to the TOML order file
    #[arg(short, long, default_value = "order.toml")]
    pub config: String,

    /// Purchase strategy: large, small, optimal or reduced
    #[arg(long)]
    pub variant: Option<PlanVariant>,

    /// Calculation scheme: equal-price, proportional-price or mixed
    #[arg(long)]
    pub scheme: Option<Scheme>,

    /// Actual amount on the receipt
    #[arg(long)]
    pub order_total: Option<f64>,

    /// Split the cost of unassigned slices evenly
    #[arg(long)]
    pub split_common: bool,

    /// List the available purchase strategies instead of allocating
    #[arg(long)]
    pub options: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, order: &mut OrderFile) {
        if let Some(variant) = self.variant {
            order.request.variant = variant;
            info!("🔧 Variant overridden to: {}", variant);
        }
        if let Some(scheme) = self.scheme {
            order.settings.calculation_scheme = scheme;
            info!("🔧 Scheme overridden to: {}", scheme);
        }
        if let Some(total) = self.order_total {
            order.request.order_total = Some(total);
            info!("🔧 Order total overridden to: {}", total);
        }
        if self.split_common {
            order.request.split_common_slices = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let args = CliArgs::parse_from([
            "pizza-split",
            "--variant",
            "small",
            "--scheme",
            "mixed",
            "--order-total",
            "999.5",
            "--split-common",
        ]);
        let mut order = OrderFile::default();
        args.apply_overrides(&mut order);

        assert_eq!(order.request.variant, PlanVariant::Small);
        assert_eq!(order.settings.calculation_scheme, Scheme::Mixed);
        assert_eq!(order.request.order_total, Some(999.5));
        assert!(order.request.split_common_slices);
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let args = CliArgs::parse_from(["pizza-split", "--config", "lunch.toml"]);
        let mut order = OrderFile::default();
        order.request.variant = PlanVariant::Reduced;
        args.apply_overrides(&mut order);

        assert_eq!(args.config, "lunch.toml");
        assert_eq!(order.request.variant, PlanVariant::Reduced);
        assert!(!order.request.split_common_slices);
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(CliArgs::try_parse_from(["pizza-split", "--variant", "huge"]).is_err());
    }
}
