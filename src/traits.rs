use crate::error::Result;
use crate::types::{LoadContext, Partition, Record};
use async_trait::async_trait;

/// Trait para componentes que extraem dados de um arquivo de origem
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extrai a sequência ordenada de registros da fonte
    async fn extract(&self) -> Result<Vec<Record>>;

    /// Identificador da fonte (nome do arquivo), usado como proveniência
    fn source_name(&self) -> &str;
}

/// Trait para componentes que classificam um lote de registros
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Particiona o lote em registros válidos e inválidos
    ///
    /// Qualquer estado interno (ex.: chaves de duplicata já vistas) deve
    /// ser restrito a uma única chamada; o mesmo transformador é
    /// reutilizado sequencialmente entre arquivos.
    async fn transform(&self, records: Vec<Record>) -> Result<Partition>;
}

/// Trait para componentes que persistem registros em um destino
#[async_trait]
pub trait Loader: Send + Sync {
    /// Carrega os registros no destino e retorna quantos foram gravados
    ///
    /// O pipeline nunca chama com lote vazio, mas implementações devem
    /// tolerar e retornar 0.
    async fn load(&self, records: Vec<Record>, context: Option<&LoadContext>) -> Result<usize>;
}

#[async_trait]
impl<E: Extractor + ?Sized> Extractor for Box<E> {
    async fn extract(&self) -> Result<Vec<Record>> {
        (**self).extract().await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}
