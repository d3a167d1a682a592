//! # Quarantine Loader
//!
//! Carregador de quarentena para registros inválidos: anexa a um CSV
//! delimitado, um arquivo por execução do processo.

use crate::error::Result;
use crate::traits::Loader;
use crate::types::{DataValue, LoadContext, Record, SOURCE_FILE_KEY};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Marcador usado quando a chamada de carga não traz proveniência
const UNKNOWN_SOURCE: &str = "UNKNOWN";

/// Carregador que anexa registros inválidos a um arquivo CSV
///
/// O caminho `<pasta>/<prefixo>_<timestamp>.csv` é fixado na construção,
/// então todas as cargas de uma execução compartilham o mesmo arquivo. O
/// cabeçalho só é escrito se o arquivo ainda não existia no momento do
/// append. Cada registro recebe um campo `source_file_name` vindo do
/// contexto (`source_file`), com `UNKNOWN` como padrão.
#[derive(Debug, Clone)]
pub struct QuarantineCsvLoader {
    file_path: PathBuf,
}

impl QuarantineCsvLoader {
    /// Cria um novo carregador de quarentena
    ///
    /// Cria a pasta se necessário e resolve o timestamp do nome do
    /// arquivo com o formato chrono recebido.
    pub fn new<P: AsRef<Path>>(folder: P, file_prefix: &str, date_format: &str) -> Result<Self> {
        let folder = folder.as_ref();
        std::fs::create_dir_all(folder)?;

        let timestamp = Local::now().format(date_format).to_string();
        let file_path = folder.join(format!("{}_{}.csv", file_prefix, timestamp));

        Ok(Self { file_path })
    }

    /// Caminho do arquivo de quarentena desta execução
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Formata um valor para a célula CSV; nulo vira célula vazia
    fn csv_field(value: &DataValue) -> String {
        match value {
            DataValue::String(s) => s.clone(),
            DataValue::Integer(i) => i.to_string(),
            DataValue::Float(f) => f.to_string(),
            DataValue::Boolean(b) => b.to_string(),
            DataValue::Null => String::new(),
        }
    }
}

#[async_trait]
impl Loader for QuarantineCsvLoader {
    async fn load(&self, records: Vec<Record>, context: Option<&LoadContext>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let source_file = context
            .and_then(|ctx| ctx.get(SOURCE_FILE_KEY))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        // Colunas canônicas: campos do primeiro registro em ordem
        // alfabética, com a proveniência por último
        let mut columns: Vec<String> = records[0].keys().cloned().collect();
        columns.sort();

        let file_existed = self.file_path.exists();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;
        let mut writer = csv::Writer::from_writer(file);

        if !file_existed {
            let mut header: Vec<&str> = columns.iter().map(String::as_str).collect();
            header.push("source_file_name");
            writer.write_record(&header)?;
        }

        let mut written = 0;
        for record in &records {
            let mut row: Vec<String> = columns
                .iter()
                .map(|column| record.get(column).map(Self::csv_field).unwrap_or_default())
                .collect();
            row.push(source_file.clone());
            writer.write_record(&row)?;
            written += 1;
        }

        writer.flush()?;
        tracing::debug!(
            "{} registros anexados à quarentena '{}'",
            written,
            self.file_path.display()
        );

        Ok(written)
    }
}
