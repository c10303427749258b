use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Campaign {
    /// `central_european`, or a whole-hour UTC offset such as `+2`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "central_european".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vouchers {
    /// Regex identifying voucher codes that come without the reward.
    #[serde(default)]
    pub without_reward_pattern: Option<String>,
}

/// Line-item names sent to the payment gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Checkout {
    pub entry_fee_product: String,
    pub donation_product: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log: Log,
    #[serde(default)]
    pub campaign: Campaign,
    #[serde(default)]
    pub vouchers: Vouchers,
    pub checkout: Checkout,
}

impl Settings {
    /// Loads settings from `APP_CONFIG_DIR`, or the workspace `config/`
    /// directory when it is not set.
    pub fn new() -> rtw_error::Result<Self> {
        let dir = match env::var("APP_CONFIG_DIR") {
            Ok(dir) => Utf8PathBuf::from(dir),
            Err(_) => workspace_config_dir(),
        };
        Self::from_dir(&dir)
    }

    /// Layers `default`, the `RUN_MODE` file and `local` from `dir`, then
    /// `APP_`-prefixed environment variables (`APP_LOG__LEVEL=debug`).
    pub fn from_dir(dir: &Utf8Path) -> rtw_error::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name(dir.join("default").as_str()))
            .add_source(File::with_name(dir.join(&run_mode).as_str()).required(false))
            .add_source(File::with_name(dir.join("local").as_str()).required(false));
        Self::build(builder, Self::environment())
    }

    /// Settings from a single TOML document, still overridable from the
    /// environment.
    pub fn from_toml(source: &str) -> rtw_error::Result<Self> {
        Self::build(
            Config::builder().add_source(File::from_str(source, FileFormat::Toml)),
            Self::environment(),
        )
    }

    fn environment() -> Environment {
        Environment::with_prefix("app")
            .prefix_separator("_")
            .separator("__")
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        environment: Environment,
    ) -> rtw_error::Result<Self> {
        let s = builder
            .add_source(environment)
            .build()
            .map_err(|e| rtw_error::Error::Config(e.to_string()))?;

        s.try_deserialize()
            .map_err(|e| rtw_error::Error::Config(e.to_string()))
    }
}

fn workspace_config_dir() -> Utf8PathBuf {
    let mut path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.pop();
    path.pop();
    path.join("config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_defaults() {
        let settings = Settings::from_dir(&workspace_config_dir());
        assert!(settings.is_ok());
        let settings = settings.unwrap();
        assert_eq!(settings.campaign.timezone, "central_european");
        assert_eq!(settings.checkout.entry_fee_product, "Entry fee");
        assert_eq!(settings.checkout.donation_product, "Donation");
    }

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml(
            r#"
            [log]
            level = "debug"

            [campaign]
            timezone = "+2"

            [vouchers]
            without_reward_pattern = "^NR-"

            [checkout]
            entry_fee_product = "Startovne"
            donation_product = "Dar"
            "#,
        )
        .expect("failed to load settings from toml");

        assert_eq!(settings.campaign.timezone, "+2");
        assert_eq!(
            settings.vouchers.without_reward_pattern.as_deref(),
            Some("^NR-")
        );
        assert_eq!(settings.checkout.donation_product, "Dar");
    }

    #[test]
    fn test_optional_sections_default() {
        let settings = Settings::from_toml(
            r#"
            [log]
            level = "warn"

            [checkout]
            entry_fee_product = "Entry fee"
            donation_product = "Donation"
            "#,
        )
        .unwrap();
        assert_eq!(settings.campaign.timezone, "central_european");
        assert!(settings.vouchers.without_reward_pattern.is_none());
    }

    #[test]
    fn test_missing_checkout_section_is_an_error() {
        let result = Settings::from_toml("[log]\nlevel = \"info\"\n");
        assert!(matches!(result, Err(rtw_error::Error::Config(_))));
    }

    #[test]
    fn test_missing_default_file_is_an_error() {
        let result = Settings::from_dir(Utf8Path::new("/nonexistent/rtw-config"));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let vars = config::Map::from_iter([
            ("APP_LOG__LEVEL".to_string(), "debug".to_string()),
            ("APP_CAMPAIGN__TIMEZONE".to_string(), "-5".to_string()),
            ("OTHER_LOG__LEVEL".to_string(), "trace".to_string()),
        ]);
        let file = Config::builder().add_source(File::from_str(
            r#"
            [log]
            level = "info"

            [checkout]
            entry_fee_product = "Entry fee"
            donation_product = "Donation"
            "#,
            FileFormat::Toml,
        ));

        let settings = Settings::build(file, Settings::environment().source(Some(vars))).unwrap();
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.campaign.timezone, "-5");
        assert_eq!(settings.checkout.entry_fee_product, "Entry fee");
    }
}
