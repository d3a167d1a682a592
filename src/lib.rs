//! # fluxo - Ingestão ETL em lote com quarentena
//!
//! Biblioteca para pipelines ETL (Extract, Transform, Load) em lote:
//! move registros tabulares de arquivos CSV/JSON para um banco
//! relacional, separando em quarentena os registros que falham nas
//! verificações básicas de qualidade.
//!
//! ## Características Principais
//!
//! - 📁 **Lote por arquivo**: um pipeline por arquivo de entrada, com
//!   arquivamento dos processados
//! - ✅ **Validação e deduplicação**: registros com valores ausentes ou
//!   repetidos dentro do lote vão para a quarentena
//! - 🗄️ **Destino relacional**: inserção parametrizada via sqlx
//! - 🔌 **Extensível**: sistema de traits para novos extratores e
//!   destinos
//!
//! ## Exemplo Rápido
//!
//! ```rust,no_run
//! use fluxo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Pipeline de um arquivo: CSV → validação → memória
//!     let pipeline = Pipeline::builder()
//!         .extract(CsvExtractor::new("clientes.csv"))
//!         .transform(QualityTransform::new())
//!         .load_valid(MemoryLoader::new())
//!         .load_invalid(MemoryLoader::new())
//!         .build();
//!
//!     let resultado = pipeline.run().await?;
//!     println!(
//!         "{} válidos, {} em quarentena",
//!         resultado.rows_valid, resultado.rows_invalid
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Arquitetura
//!
//! A biblioteca é estruturada em três componentes principais:
//!
//! ### Extractors
//! Leem um arquivo de origem (CSV ou JSON) e produzem a sequência
//! ordenada de registros brutos. A seleção por extensão fica em
//! [`extract::factory`].
//!
//! ### Transformers
//! Particionam o lote em registros válidos e inválidos; a implementação
//! padrão é [`transform::quality::QualityTransform`].
//!
//! ### Loaders
//! Persistem cada partição no seu destino: tabela PostgreSQL para os
//! válidos, CSV de quarentena para os inválidos.
//!
//! O [`runner::Runner`] amarra tudo: descobre os arquivos da pasta de
//! entrada, executa um pipeline por arquivo e arquiva os processados.

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod runner;
pub mod traits;
pub mod transform;
pub mod types;

// Re-exports para facilitar o uso
pub use config::ETLConfig;
pub use error::{ETLError, Result};
pub use pipeline::Pipeline;
pub use runner::{RunSummary, Runner};
pub use traits::*;
pub use types::{DataValue, LoadContext, Partition, PipelineResult, Record};

/// Prelude com imports mais comuns
pub mod prelude {
    pub use crate::config::ETLConfig;
    pub use crate::error::{ETLError, Result};
    pub use crate::pipeline::Pipeline;
    pub use crate::runner::{RunSummary, Runner};
    pub use crate::traits::{Extractor, Loader, Transformer};
    pub use crate::types::{DataValue, LoadContext, Partition, PipelineResult, Record};

    // Extractors
    pub use crate::extract::csv::CsvExtractor;
    pub use crate::extract::factory;
    pub use crate::extract::json::JsonExtractor;

    // Transformers
    pub use crate::transform::quality::QualityTransform;

    // Loaders
    pub use crate::load::memory::MemoryLoader;
    pub use crate::load::postgres::PostgresLoader;
    pub use crate::load::quarantine::QuarantineCsvLoader;
}

/// Informações sobre a versão da biblioteca
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Informações sobre a biblioteca
pub fn about() -> &'static str {
    env!("CARGO_PKG_DESCRIPTION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_about() {
        assert!(!about().is_empty());
    }
}
