use std::{
    collections::BTreeMap,
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    chart::Color,
    currency::{CurrencyCode, CurrencyFormatter, LocaleConfig},
    domain::Category,
    errors::WidgetError,
    messages::Messages,
};

pub const CONFIG_PATH_ENV: &str = "EXPENSE_WIDGET_CONFIG";

const APP_DIR: &str = "expense-widget";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences for the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub locale: String,
    pub currency: String,
    #[serde(default = "WidgetConfig::default_success_flash_ms")]
    pub success_flash_ms: u64,
    #[serde(default)]
    pub chart: ChartSettings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            success_flash_ms: Self::default_success_flash_ms(),
            chart: ChartSettings::default(),
        }
    }
}

impl WidgetConfig {
    pub fn default_success_flash_ms() -> u64 {
        2000
    }

    pub fn success_flash(&self) -> Duration {
        Duration::from_millis(self.success_flash_ms)
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(
            LocaleConfig::for_tag(&self.locale),
            CurrencyCode::new(self.currency.as_str()),
        )
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(&self.locale)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.locale.trim().is_empty() {
            return Err(WidgetError::InvalidConfig("locale must not be empty".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(WidgetError::InvalidConfig(
                "currency must not be empty".into(),
            ));
        }
        let chart = &self.chart;
        if !(chart.width > 0.0 && chart.height > 0.0) {
            return Err(WidgetError::InvalidConfig(format!(
                "chart surface must have a positive size (got {}x{})",
                chart.width, chart.height
            )));
        }
        if !(chart.margin >= 0.0) {
            return Err(WidgetError::InvalidConfig(format!(
                "chart margin must not be negative (got {})",
                chart.margin
            )));
        }
        for (category, value) in &chart.palette {
            if Color::new(value.as_str()).rgb().is_none() {
                return Err(WidgetError::InvalidConfig(format!(
                    "palette color for {category} must be #rrggbb (got {value:?})"
                )));
            }
        }
        Ok(())
    }
}

/// Drawing surface and palette settings for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Per-category fill colors replacing the built-in palette.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<Category, String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            margin: 10.0,
            palette: BTreeMap::new(),
        }
    }
}

/// Loads and stores [`WidgetConfig`] as pretty JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `EXPENSE_WIDGET_CONFIG` when set, otherwise the platform config
    /// directory.
    pub fn new() -> Result<Self, WidgetError> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(Self::with_path(PathBuf::from(path)));
        }
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| WidgetError::InvalidConfig("no configuration directory".into()))?;
        Ok(Self::with_path(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<WidgetConfig, WidgetError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(WidgetConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: WidgetConfig = serde_json::from_str(&data)?;
        config.validate()?;
        tracing::info!(path = %self.path.display(), locale = %config.locale, "config loaded");
        Ok(config)
    }

    pub fn save(&self, config: &WidgetConfig) -> Result<(), WidgetError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), WidgetError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::AmountFormatter;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_path(dir.path().join("config.json"));
        let config = manager.load().expect("load defaults");
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.success_flash(), Duration::from_millis(2000));
    }

    #[test]
    fn save_then_load_keeps_palette_overrides() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));
        let mut config = WidgetConfig::default();
        config.locale = "zh-TW".into();
        config.chart.palette.insert(Category::Food, "#000000".into());

        manager.save(&config).expect("save config");
        let loaded = manager.load().expect("load config");

        assert_eq!(loaded, config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"locale":"de-DE","currency":"EUR"}"#).expect("write");
        let config = ConfigManager::with_path(path).load().expect("load");
        assert_eq!(config.success_flash_ms, 2000);
        assert_eq!(config.chart, ChartSettings::default());
        assert_eq!(config.formatter().format_amount(1234), "€1.234");
    }

    #[test]
    fn rejects_palette_values_that_are_not_hex() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"locale":"en-US","currency":"USD","chart":{"width":300,"height":300,"margin":10,"palette":{"Food":"red\" onload=\"x"}}}"#,
        )
        .expect("write");

        let err = ConfigManager::with_path(path).load().unwrap_err();

        assert!(matches!(err, WidgetError::InvalidConfig(_)));
        assert!(err.to_string().contains("palette color for Food"));
    }

    #[test]
    fn rejects_empty_surface() {
        let mut config = WidgetConfig::default();
        config.chart.width = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("positive size"));
    }
}
