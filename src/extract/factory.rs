use crate::error::{ExtractError, Result};
use crate::extract::csv::CsvExtractor;
use crate::extract::json::JsonExtractor;
use crate::traits::Extractor;
use std::path::Path;

/// Seleciona o extrator adequado pela extensão do arquivo
///
/// Extensões não suportadas resultam em `ExtractError::UnsupportedType`,
/// que o runner trata como recuperável (pula o arquivo e continua).
pub fn for_path<P: AsRef<Path>>(path: P) -> Result<Box<dyn Extractor>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvExtractor::new(path))),
        "json" => Ok(Box::new(JsonExtractor::new(path))),
        _ => Err(ExtractError::UnsupportedType(format!(".{}", extension)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ETLError;

    #[test]
    fn test_factory_dispatches_by_extension() {
        assert_eq!(for_path("dados.csv").unwrap().source_name(), "dados.csv");
        assert_eq!(for_path("dados.json").unwrap().source_name(), "dados.json");
        // Extensão é comparada sem diferenciar maiúsculas
        assert!(for_path("dados.CSV").is_ok());
    }

    #[test]
    fn test_factory_rejects_unsupported_extension() {
        let result = for_path("dados.xml");
        assert!(matches!(
            result,
            Err(ETLError::Extract(ExtractError::UnsupportedType(_)))
        ));

        assert!(for_path("sem_extensao").is_err());
    }
}
