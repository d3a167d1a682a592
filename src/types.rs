use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Representa um registro genérico: campo → valor, sem esquema imposto
pub type Record = HashMap<String, DataValue>;

/// Metadados opcionais passados junto a uma chamada de carga
/// (atualmente: `source_file`, o nome do arquivo de origem)
pub type LoadContext = HashMap<String, String>;

/// Chave do contexto que carrega o nome do arquivo de origem
pub const SOURCE_FILE_KEY: &str = "source_file";

/// Valores escalares suportados em um registro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Eq for DataValue {}

impl Hash for DataValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            DataValue::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            DataValue::Integer(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            DataValue::Float(f) => {
                2u8.hash(state);
                // Para f64, convertemos para bits para hash
                f.to_bits().hash(state);
            }
            DataValue::Boolean(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            DataValue::Null => {
                4u8.hash(state);
            }
        }
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Boolean(value)
    }
}

impl DataValue {
    /// Converte para string se possível
    pub fn as_string(&self) -> Option<String> {
        match self {
            DataValue::String(s) => Some(s.clone()),
            DataValue::Integer(i) => Some(i.to_string()),
            DataValue::Float(f) => Some(f.to_string()),
            DataValue::Boolean(b) => Some(b.to_string()),
            DataValue::Null => None,
        }
    }

    /// Verifica se é nulo
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Verifica se o valor conta como ausente ou lixo para a validação
    ///
    /// Sentinelas reconhecidas: nulo, string vazia, "NA" e "NULL"
    /// (comparação exata, sensível a maiúsculas).
    pub fn is_missing(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::String(s) => s.is_empty() || s == "NA" || s == "NULL",
            _ => false,
        }
    }
}

/// Partição valida/inválida produzida pelo transformador
///
/// As duas sequências são disjuntas, preservam a ordem relativa da
/// entrada e juntas cobrem o lote de entrada exatamente uma vez.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub valid: Vec<Record>,
    pub invalid: Vec<Record>,
}

impl Partition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total de registros nas duas partições
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}

/// Resultado de uma execução de pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    pub rows_extracted: usize,
    pub rows_valid: usize,
    pub rows_invalid: usize,
    pub execution_time_ms: u64,
}

impl PipelineResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fração dos registros extraídos que foi para a quarentena
    pub fn rejection_rate(&self) -> f64 {
        if self.rows_extracted == 0 {
            0.0
        } else {
            self.rows_invalid as f64 / self.rows_extracted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_sentinels() {
        assert!(DataValue::Null.is_missing());
        assert!(DataValue::String("".to_string()).is_missing());
        assert!(DataValue::String("NA".to_string()).is_missing());
        assert!(DataValue::String("NULL".to_string()).is_missing());

        // Comparação exata: variantes de caixa não são sentinelas
        assert!(!DataValue::String("na".to_string()).is_missing());
        assert!(!DataValue::String("null".to_string()).is_missing());
        assert!(!DataValue::String("N/A".to_string()).is_missing());
        assert!(!DataValue::Integer(0).is_missing());
        assert!(!DataValue::Boolean(false).is_missing());
    }

    #[test]
    fn test_as_string() {
        assert_eq!(
            DataValue::String("abc".to_string()).as_string(),
            Some("abc".to_string())
        );
        assert_eq!(DataValue::Integer(42).as_string(), Some("42".to_string()));
        assert_eq!(DataValue::Null.as_string(), None);
    }

    #[test]
    fn test_rejection_rate() {
        let mut result = PipelineResult::new();
        assert_eq!(result.rejection_rate(), 0.0);

        result.rows_extracted = 4;
        result.rows_valid = 3;
        result.rows_invalid = 1;
        assert_eq!(result.rejection_rate(), 0.25);
    }
}
