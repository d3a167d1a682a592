use crate::error::{ExtractError, Result};
use crate::traits::Extractor;
use crate::types::{DataValue, Record};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Extrator para arquivos JSON
///
/// O arquivo deve conter um array de objetos no nível raiz; cada objeto
/// vira um registro. Escalares JSON são mapeados diretamente; arrays e
/// objetos aninhados são reserializados como texto JSON.
#[derive(Debug, Clone)]
pub struct JsonExtractor {
    file_path: PathBuf,
    source_name: String,
}

impl JsonExtractor {
    /// Cria um novo extrator JSON
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let source_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        Self {
            file_path,
            source_name,
        }
    }

    /// Converte serde_json::Value para DataValue
    fn json_to_data_value(&self, value: &serde_json::Value) -> DataValue {
        match value {
            serde_json::Value::String(s) => DataValue::String(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    DataValue::String(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => DataValue::Boolean(*b),
            serde_json::Value::Null => DataValue::Null,
            nested => DataValue::String(nested.to_string()),
        }
    }

    /// Converte um objeto JSON para Record
    fn json_object_to_record(&self, obj: &serde_json::Map<String, serde_json::Value>) -> Record {
        let mut record = Record::new();
        for (key, value) in obj {
            record.insert(key.clone(), self.json_to_data_value(value));
        }
        record
    }
}

#[async_trait]
impl Extractor for JsonExtractor {
    async fn extract(&self) -> Result<Vec<Record>> {
        let content = tokio::fs::read_to_string(&self.file_path).await?;
        let json: serde_json::Value = serde_json::from_str(&content)?;

        let items = match json {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(ExtractError::InvalidFormat(format!(
                    "'{}' deve conter um array de objetos no nível raiz",
                    self.source_name
                ))
                .into());
            }
        };

        let mut records = Vec::with_capacity(items.len());

        for item in &items {
            match item {
                serde_json::Value::Object(obj) => {
                    records.push(self.json_object_to_record(obj));
                }
                _ => {
                    return Err(ExtractError::InvalidFormat(format!(
                        "'{}' contém um item que não é objeto no array raiz",
                        self.source_name
                    ))
                    .into());
                }
            }
        }

        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}
