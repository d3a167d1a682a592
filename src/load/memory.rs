//! # Memory Loader
//!
//! Carregador em memória, usado pelos testes para inspecionar as
//! chamadas de carga feitas pelo pipeline e pelo runner.

use crate::error::Result;
use crate::traits::Loader;
use crate::types::{LoadContext, Record};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Uma chamada de carga capturada: lote e contexto recebidos
#[derive(Debug, Clone)]
pub struct LoadCall {
    pub records: Vec<Record>,
    pub context: Option<LoadContext>,
}

/// Carregador que acumula as chamadas de carga em memória
///
/// Clones compartilham o mesmo armazenamento, então o mesmo loader pode
/// ser entregue a vários pipelines e inspecionado depois.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    calls: Arc<Mutex<Vec<LoadCall>>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Todas as chamadas de carga recebidas, na ordem
    pub fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Número de chamadas de carga recebidas
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Todos os registros recebidos, achatados na ordem de chegada
    pub fn records(&self) -> Vec<Record> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .flat_map(|call| call.records.clone())
            .collect()
    }

    /// Remove todas as chamadas acumuladas
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl Loader for MemoryLoader {
    async fn load(&self, records: Vec<Record>, context: Option<&LoadContext>) -> Result<usize> {
        let written = records.len();
        self.calls.lock().unwrap().push(LoadCall {
            records,
            context: context.cloned(),
        });
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataValue;

    #[tokio::test]
    async fn test_memory_loader_captures_calls() {
        let loader = MemoryLoader::new();

        let mut record = Record::new();
        record.insert("id".to_string(), DataValue::Integer(1));

        let written = loader.load(vec![record], None).await.unwrap();
        assert_eq!(written, 1);
        assert_eq!(loader.call_count(), 1);
        assert_eq!(loader.records().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_loader_clones_share_storage() {
        let loader = MemoryLoader::new();
        let clone = loader.clone();

        let mut record = Record::new();
        record.insert("id".to_string(), DataValue::Integer(1));
        clone.load(vec![record], None).await.unwrap();

        assert_eq!(loader.call_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_loader_captures_context() {
        let loader = MemoryLoader::new();

        let mut ctx = LoadContext::new();
        ctx.insert("source_file".to_string(), "a.csv".to_string());

        let mut record = Record::new();
        record.insert("id".to_string(), DataValue::Integer(1));
        loader.load(vec![record], Some(&ctx)).await.unwrap();

        let calls = loader.calls();
        assert_eq!(
            calls[0].context.as_ref().and_then(|c| c.get("source_file")),
            Some(&"a.csv".to_string())
        );
    }

    #[tokio::test]
    async fn test_memory_loader_clear() {
        let loader = MemoryLoader::new();
        loader.load(vec![], None).await.unwrap();
        assert_eq!(loader.call_count(), 1);

        loader.clear();
        assert_eq!(loader.call_count(), 0);
    }
}
