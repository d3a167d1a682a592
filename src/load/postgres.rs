//! # Postgres Loader
//!
//! Carregador relacional: um INSERT parametrizado de linha única por
//! registro, em uma conexão aberta na construção do loader.

use crate::error::{LoadError, Result};
use crate::traits::Loader;
use crate::types::{DataValue, LoadContext, Record};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Carregador que insere registros em uma tabela PostgreSQL
///
/// As colunas vêm dos nomes de campo do primeiro registro, em ordem
/// alfabética. Cada linha confirma individualmente: uma falha no meio do
/// lote mantém as linhas anteriores gravadas e propaga o erro.
#[derive(Debug, Clone)]
pub struct PostgresLoader {
    pool: PgPool,
    table_name: String,
}

impl PostgresLoader {
    /// Conecta ao banco e cria o carregador
    ///
    /// Uma conexão por tempo de vida do loader; clones compartilham a
    /// mesma conexão.
    pub async fn connect(connection_string: &str, table_name: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(connection_string)
            .await
            .map_err(|err| LoadError::DestinationConnection(err.to_string()))?;

        Ok(Self {
            pool,
            table_name: table_name.to_string(),
        })
    }

    /// Escapa um identificador SQL com aspas duplas
    fn quote_ident(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Monta o INSERT parametrizado de linha única
    fn insert_statement(table_name: &str, columns: &[String]) -> String {
        let column_list = columns
            .iter()
            .map(|column| Self::quote_ident(column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::quote_ident(table_name),
            column_list,
            placeholders
        )
    }
}

#[async_trait]
impl Loader for PostgresLoader {
    async fn load(&self, records: Vec<Record>, _context: Option<&LoadContext>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut columns: Vec<String> = records[0].keys().cloned().collect();
        columns.sort();

        let statement = Self::insert_statement(&self.table_name, &columns);

        let mut written = 0;
        for record in &records {
            let mut query = sqlx::query(&statement);
            for column in &columns {
                query = match record.get(column).unwrap_or(&DataValue::Null) {
                    DataValue::String(s) => query.bind(s.clone()),
                    DataValue::Integer(i) => query.bind(*i),
                    DataValue::Float(f) => query.bind(*f),
                    DataValue::Boolean(b) => query.bind(*b),
                    DataValue::Null => query.bind(Option::<String>::None),
                };
            }

            // Auto-commit por linha; sem transação envolvendo o lote
            query.execute(&self.pool).await?;
            written += 1;
        }

        tracing::debug!(
            "{} registros inseridos na tabela '{}'",
            written,
            self.table_name
        );

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement() {
        let columns = vec!["age".to_string(), "name".to_string()];
        let statement = PostgresLoader::insert_statement("clientes", &columns);

        assert_eq!(
            statement,
            r#"INSERT INTO "clientes" ("age", "name") VALUES ($1, $2)"#
        );
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(PostgresLoader::quote_ident("ab"), r#""ab""#);
        assert_eq!(PostgresLoader::quote_ident(r#"a"b"#), r#""a""b""#);
    }
}
