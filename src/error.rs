use thiserror::Error;

/// Tipo Result principal da biblioteca
pub type Result<T> = std::result::Result<T, ETLError>;

/// Erro principal da biblioteca fluxo
#[derive(Error, Debug)]
pub enum ETLError {
    #[error("Erro de extração: {0}")]
    Extract(#[from] ExtractError),

    #[error("Erro de transformação: {0}")]
    Transform(#[from] TransformError),

    #[error("Erro de carga: {0}")]
    Load(#[from] LoadError),

    #[error("Erro de configuração: {0}")]
    Config(#[from] ConfigError),

    #[error("Erro de pipeline: {0}")]
    Pipeline(String),

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erro genérico: {0}")]
    Generic(#[from] anyhow::Error),
}

/// Erros relacionados à extração de dados
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Arquivo ou pasta não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato inválido: {0}")]
    InvalidFormat(String),

    #[error("Erro de parsing: {0}")]
    ParseError(String),

    #[error("Tipo de arquivo não suportado: {0}")]
    UnsupportedType(String),
}

/// Erros relacionados à transformação de dados
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Erro de processamento: {0}")]
    ProcessingError(String),
}

/// Erros relacionados ao carregamento de dados
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Erro de conexão de destino: {0}")]
    DestinationConnection(String),

    #[error("Erro de escrita: {0}")]
    WriteError(String),
}

/// Erros relacionados à configuração
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuração inválida: {0}")]
    InvalidConfig(String),

    #[error("Parâmetro obrigatório ausente: {0}")]
    MissingRequiredParameter(String),

    #[error("Valor inválido para {param}: {value}")]
    InvalidValue { param: String, value: String },

    #[error("Erro de parsing de configuração: {0}")]
    ParseError(String),
}

impl ETLError {
    /// Verifica se o erro é recuperável no nível de arquivo
    ///
    /// Arquivos com extensão não suportada são pulados pelo runner; os
    /// demais erros de um arquivo apenas impedem o seu arquivamento.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ETLError::Extract(ExtractError::UnsupportedType(_)) => true,
            ETLError::Load(LoadError::DestinationConnection(_)) => true,
            _ => false,
        }
    }

    /// Retorna o código de erro
    pub fn error_code(&self) -> &'static str {
        match self {
            ETLError::Extract(_) => "EXTRACT_ERROR",
            ETLError::Transform(_) => "TRANSFORM_ERROR",
            ETLError::Load(_) => "LOAD_ERROR",
            ETLError::Config(_) => "CONFIG_ERROR",
            ETLError::Pipeline(_) => "PIPELINE_ERROR",
            ETLError::Io(_) => "IO_ERROR",
            ETLError::Serialization(_) => "SERIALIZATION_ERROR",
            ETLError::Generic(_) => "GENERIC_ERROR",
        }
    }
}

impl From<config::ConfigError> for ETLError {
    fn from(err: config::ConfigError) -> Self {
        ETLError::Config(ConfigError::ParseError(err.to_string()))
    }
}

impl From<sqlx::Error> for ETLError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                ETLError::Load(LoadError::WriteError(db_err.to_string()))
            }
            sqlx::Error::Io(io_err) => ETLError::Io(io_err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ETLError::Load(LoadError::DestinationConnection(err.to_string()))
            }
            _ => ETLError::Generic(anyhow::anyhow!(err)),
        }
    }
}

impl From<csv::Error> for ETLError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(io_err) => {
                ETLError::Io(std::io::Error::new(io_err.kind(), io_err.to_string()))
            }
            csv::ErrorKind::Utf8 { .. } => {
                ETLError::Extract(ExtractError::InvalidFormat("UTF-8 inválido".to_string()))
            }
            _ => ETLError::Extract(ExtractError::ParseError(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ETLError::Extract(ExtractError::UnsupportedType(".xml".to_string()));
        assert_eq!(err.error_code(), "EXTRACT_ERROR");

        let err = ETLError::Config(ConfigError::MissingRequiredParameter(
            "DATABASE_URL".to_string(),
        ));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_unsupported_type_is_recoverable() {
        let err = ETLError::Extract(ExtractError::UnsupportedType(".xml".to_string()));
        assert!(err.is_recoverable());

        let err = ETLError::Extract(ExtractError::ParseError("linha 3".to_string()));
        assert!(!err.is_recoverable());
    }
}
