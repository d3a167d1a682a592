use crate::error::Result;
use crate::traits::Transformer;
use crate::types::{DataValue, Partition, Record};
use async_trait::async_trait;
use std::collections::HashSet;

/// Transformador que particiona um lote em registros válidos e inválidos
///
/// Um registro é inválido quando qualquer valor é uma sentinela de
/// ausência (nulo, "", "NA", "NULL") ou quando é uma repetição exata de
/// um registro anterior do mesmo lote. A verificação de ausência tem
/// precedência sobre a de duplicata. As duas partições preservam a
/// ordem relativa da entrada e nenhum registro é alterado aqui; a
/// injeção de proveniência acontece no loader de quarentena.
#[derive(Debug, Clone, Default)]
pub struct QualityTransform;

impl QualityTransform {
    pub fn new() -> Self {
        Self
    }
}

/// Chave de identidade canônica de um registro: pares (campo, valor)
/// ordenados pelo nome do campo, para resultado determinístico
/// independente da ordem interna do mapa
fn canonical_key(record: &Record) -> Vec<(String, DataValue)> {
    let mut pairs: Vec<(String, DataValue)> = record
        .iter()
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

#[async_trait]
impl Transformer for QualityTransform {
    async fn transform(&self, records: Vec<Record>) -> Result<Partition> {
        let mut partition = Partition::new();
        // Escopo de uma única chamada: nada vaza entre lotes
        let mut seen: HashSet<Vec<(String, DataValue)>> = HashSet::new();

        for record in records {
            if record.values().any(DataValue::is_missing) {
                partition.invalid.push(record);
                continue;
            }

            let key = canonical_key(&record);
            if seen.contains(&key) {
                partition.invalid.push(record);
                continue;
            }

            seen.insert(key);
            partition.valid.push(record);
        }

        Ok(partition)
    }
}
