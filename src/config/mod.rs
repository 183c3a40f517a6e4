use config::{builder::DefaultState, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Порог расстояния между соседними рядами (в единицах плана зала).
pub const DEFAULT_MAX_CROSS_ROW_DISTANCE: f64 = 60.0;
/// Максимальное количество мест в одной выборке.
pub const DEFAULT_MAX_SELECTION: usize = 10;
/// Ряды считаются соседними, только если их номера отличаются не больше чем на это значение.
pub const DEFAULT_MAX_ROW_GAP: u32 = 1;

const CONFIG_FILE: &str = "seat_engine";
const ENV_PREFIX: &str = "SEAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub engine: EngineConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Пороговые значения движка выбора мест.
///
/// Значения по умолчанию совпадают с поведением витрины; площадки с другим
/// масштабом плана переопределяют их через `SEAT_ENGINE__*` переменные или файл
/// `seat_engine.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    pub max_cross_row_distance: f64,
    pub max_selection: usize,
    pub max_row_gap: u32,
    /// Можно ли выбирать места со статусом `reserved`.
    pub reserved_is_selectable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cross_row_distance: DEFAULT_MAX_CROSS_ROW_DISTANCE,
            max_selection: DEFAULT_MAX_SELECTION,
            max_row_gap: DEFAULT_MAX_ROW_GAP,
            reserved_is_selectable: true,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_cross_row_distance.is_finite() || self.max_cross_row_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "engine.max_cross_row_distance must be a positive number, got {}",
                self.max_cross_row_distance
            )));
        }
        if self.max_selection == 0 {
            return Err(ConfigError::Invalid("engine.max_selection must be > 0".to_string()));
        }
        if self.max_row_gap == 0 {
            return Err(ConfigError::Invalid("engine.max_row_gap must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Defaults, затем `seat_engine.toml` (если есть), затем окружение.
    ///
    /// Вложенные ключи задаются через `__`: `SEAT_APP__PORT`, `SEAT_ENGINE__MAX_SELECTION`.
    /// Старые плоские переменные `HOST`, `PORT` и `RUST_LOG` имеют наивысший приоритет.
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.host", env::var("HOST").ok())?
            .set_override_option("app.port", env::var("PORT").ok())?
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?;

        finish(builder)
    }

    /// Defaults, перекрытые TOML-документом. Окружение не читается.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        finish(defaults()?.add_source(File::from_str(source, FileFormat::Toml)))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let engine = EngineConfig::default();
    let builder = config::Config::builder()
        .set_default("app.host", "0.0.0.0")?
        .set_default("app.port", 8000_i64)?
        .set_default("app.environment", "development")?
        .set_default("app.rust_log", "seat_engine=debug,tower_http=debug")?
        .set_default("app.log_format", "pretty")?
        .set_default("engine.max_cross_row_distance", engine.max_cross_row_distance)?
        .set_default("engine.max_selection", engine.max_selection as i64)?
        .set_default("engine.max_row_gap", i64::from(engine.max_row_gap))?
        .set_default("engine.reserved_is_selectable", engine.reserved_is_selectable)?;
    Ok(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let config: Config = builder.build()?.try_deserialize()?;
    config.engine.validate()?;
    Ok(config)
}
