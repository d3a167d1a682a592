use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuração principal do ETL
///
/// Toda a superfície de configuração é lida uma vez na partida do
/// processo e passada explicitamente aos construtores dos componentes;
/// o núcleo (transformador e pipeline) nunca lê configuração. A string
/// de conexão do banco vem apenas do ambiente (`DATABASE_URL`), nunca
/// do arquivo.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ETLConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub quarantine: QuarantineConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Pastas de entrada e de arquivamento
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub input_folder: String,
    pub archive_folder: String,
}

/// Destino de quarentena para registros inválidos
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuarantineConfig {
    pub folder: String,
    pub file_prefix: String,
    /// Formato chrono do timestamp no nome do arquivo de quarentena
    pub date_format: String,
}

/// Destino relacional para registros válidos
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub table_name: String,
}

/// Configuração de observabilidade
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Default for ETLConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            quarantine: QuarantineConfig::default(),
            database: DatabaseConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_folder: "data/input".to_string(),
            archive_folder: "data/archive".to_string(),
        }
    }
}

impl Default for QuarantineConfig {
    fn default() -> Self {
        Self {
            folder: "data/quarantine".to_string(),
            file_prefix: "garbage_records".to_string(),
            date_format: "%Y%m%d_%H%M%S".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            table_name: "records".to_string(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ETLConfig {
    /// Cria um novo builder para configuração
    pub fn builder() -> ETLConfigBuilder {
        ETLConfigBuilder::default()
    }

    /// Carrega configuração do ambiente (variáveis `FLUXO_*`)
    pub fn from_env() -> Result<Self, crate::error::ETLError> {
        let mut builder = Self::builder();

        if let Ok(folder) = std::env::var("FLUXO_INPUT_FOLDER") {
            builder = builder.input_folder(folder);
        }

        if let Ok(folder) = std::env::var("FLUXO_ARCHIVE_FOLDER") {
            builder = builder.archive_folder(folder);
        }

        if let Ok(folder) = std::env::var("FLUXO_QUARANTINE_FOLDER") {
            builder = builder.quarantine_folder(folder);
        }

        if let Ok(prefix) = std::env::var("FLUXO_QUARANTINE_PREFIX") {
            builder = builder.quarantine_prefix(prefix);
        }

        if let Ok(table) = std::env::var("FLUXO_TABLE_NAME") {
            builder = builder.table_name(table);
        }

        if let Ok(level) = std::env::var("FLUXO_LOG_LEVEL") {
            builder = builder.log_level(level);
        }

        builder.build()
    }

    /// Carrega configuração de arquivo
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::ETLError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Carrega configuração de string TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, crate::error::ETLError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()?;

        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Valida a configuração
    pub fn validate(&self) -> Result<(), crate::error::ETLError> {
        use crate::error::{ConfigError, ETLError};

        let required = [
            ("pipeline.input_folder", &self.pipeline.input_folder),
            ("pipeline.archive_folder", &self.pipeline.archive_folder),
            ("quarantine.folder", &self.quarantine.folder),
            ("quarantine.file_prefix", &self.quarantine.file_prefix),
            ("quarantine.date_format", &self.quarantine.date_format),
            ("database.table_name", &self.database.table_name),
        ];

        for (param, value) in required {
            if value.trim().is_empty() {
                return Err(ETLError::Config(ConfigError::InvalidValue {
                    param: param.to_string(),
                    value: value.clone(),
                }));
            }
        }

        Ok(())
    }
}

/// Builder para configuração ETL
#[derive(Default)]
pub struct ETLConfigBuilder {
    config: ETLConfig,
}

impl ETLConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.pipeline.input_folder = folder.into();
        self
    }

    pub fn archive_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.pipeline.archive_folder = folder.into();
        self
    }

    pub fn quarantine_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.quarantine.folder = folder.into();
        self
    }

    pub fn quarantine_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.quarantine.file_prefix = prefix.into();
        self
    }

    pub fn quarantine_date_format(mut self, format: impl Into<String>) -> Self {
        self.config.quarantine.date_format = format.into();
        self
    }

    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.config.database.table_name = table.into();
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.observability.log_level = level.into();
        self
    }

    pub fn build(self) -> Result<ETLConfig, crate::error::ETLError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
