//! Ponto de entrada do processo de ingestão em lote.
//!
//! Lê a configuração e o ambiente uma única vez, monta os componentes e
//! entrega a execução ao runner. Nenhuma lógica de negócio vive aqui.

use fluxo::config::ETLConfig;
use fluxo::error::{ConfigError, Result};
use fluxo::load::postgres::PostgresLoader;
use fluxo::load::quarantine::QuarantineCsvLoader;
use fluxo::runner::Runner;
use fluxo::transform::quality::QualityTransform;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config/fluxo.toml";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("FLUXO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ETLConfig::from_file(&config_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Configuração carregada de '{}'", config_path);

    // A string de conexão vem apenas do ambiente, nunca do arquivo
    let connection_string = std::env::var("DATABASE_URL")
        .map_err(|_| ConfigError::MissingRequiredParameter("DATABASE_URL".to_string()))?;

    let valid_loader =
        PostgresLoader::connect(&connection_string, &config.database.table_name).await?;
    let invalid_loader = QuarantineCsvLoader::new(
        &config.quarantine.folder,
        &config.quarantine.file_prefix,
        &config.quarantine.date_format,
    )?;

    let runner = Runner::new(
        &config.pipeline.input_folder,
        &config.pipeline.archive_folder,
        QualityTransform::new(),
        valid_loader,
        invalid_loader,
    );

    let summary = runner.run().await?;
    tracing::info!(
        "{} arquivos processados ({} registros válidos, {} em quarentena)",
        summary.files_processed,
        summary.rows_valid,
        summary.rows_invalid
    );

    Ok(())
}
