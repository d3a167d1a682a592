use crate::error::Result;
use crate::traits::Extractor;
use crate::types::{DataValue, Record};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Extrator para arquivos CSV
///
/// Cada linha vira um registro mapeando nome de coluna do cabeçalho →
/// valor da célula como string, na ordem do arquivo. Nenhuma coerção de
/// tipo é feita: células vazias permanecem como string vazia e são
/// classificadas pelo transformador, não aqui.
#[derive(Debug, Clone)]
pub struct CsvExtractor {
    file_path: PathBuf,
    source_name: String,
    delimiter: u8,
    has_headers: bool,
}

impl CsvExtractor {
    /// Cria um novo extrator CSV
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let source_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        Self {
            file_path,
            source_name,
            delimiter: b',',
            has_headers: true,
        }
    }

    /// Define o delimitador
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Define se tem cabeçalhos
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

#[async_trait]
impl Extractor for CsvExtractor {
    async fn extract(&self) -> Result<Vec<Record>> {
        use std::fs::File;
        use std::io::BufReader;

        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .from_reader(reader);

        let mut records = Vec::new();

        if self.has_headers {
            let headers = csv_reader.headers()?.clone();

            for result in csv_reader.records() {
                let row = result?;
                let mut record = Record::new();

                for (i, field) in row.iter().enumerate() {
                    if let Some(header) = headers.get(i) {
                        record.insert(header.to_string(), DataValue::String(field.to_string()));
                    }
                }

                records.push(record);
            }
        } else {
            for result in csv_reader.records() {
                let row = result?;
                let mut record = Record::new();

                for (i, field) in row.iter().enumerate() {
                    record.insert(format!("column_{}", i), DataValue::String(field.to_string()));
                }

                records.push(record);
            }
        }

        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_csv_extractor() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,age").unwrap();
        writeln!(temp_file, "Alice,30").unwrap();
        writeln!(temp_file, "Bob,25").unwrap();

        let extractor = CsvExtractor::new(temp_file.path());
        let records = extractor.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("name"),
            Some(&DataValue::String("Alice".to_string()))
        );
        // Células ficam como string, sem coerção de tipo
        assert_eq!(
            records[0].get("age"),
            Some(&DataValue::String("30".to_string()))
        );
    }

    #[tokio::test]
    async fn test_csv_extractor_empty_cell_stays_string() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,age").unwrap();
        writeln!(temp_file, "Alice,").unwrap();

        let extractor = CsvExtractor::new(temp_file.path());
        let records = extractor.extract().await.unwrap();

        assert_eq!(
            records[0].get("age"),
            Some(&DataValue::String("".to_string()))
        );
    }

    #[tokio::test]
    async fn test_csv_extractor_without_headers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Alice,30").unwrap();

        let extractor = CsvExtractor::new(temp_file.path()).with_headers(false);
        let records = extractor.extract().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("column_0"),
            Some(&DataValue::String("Alice".to_string()))
        );
    }

    #[tokio::test]
    async fn test_csv_extractor_custom_delimiter() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name;age").unwrap();
        writeln!(temp_file, "Alice;30").unwrap();

        let extractor = CsvExtractor::new(temp_file.path()).with_delimiter(b';');
        let records = extractor.extract().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("name"),
            Some(&DataValue::String("Alice".to_string()))
        );
    }

    #[tokio::test]
    async fn test_csv_extractor_source_name() {
        let extractor = CsvExtractor::new("data/input/clientes.csv");
        assert_eq!(extractor.source_name(), "clientes.csv");
    }
}
