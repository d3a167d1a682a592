//! # Runner
//!
//! Percorre a pasta de entrada, executa um pipeline por arquivo e
//! arquiva os processados com sucesso.

use crate::error::{ETLError, ExtractError, Result};
use crate::extract::factory;
use crate::pipeline::Pipeline;
use crate::traits::{Loader, Transformer};
use crate::types::PipelineResult;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Resumo de uma execução do runner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub rows_valid: usize,
    pub rows_invalid: usize,
}

/// Driver de execução: um pipeline por arquivo descoberto
///
/// O transformador e os dois loaders são compartilhados entre todos os
/// arquivos; cada pipeline recebe um clone. Os arquivos são processados
/// sequencialmente em ordem de nome. Uma falha em um arquivo não impede
/// os seguintes: o arquivo fica na pasta de entrada para a próxima
/// execução e o erro é registrado.
pub struct Runner<T, LV, LI> {
    input_folder: PathBuf,
    archive_folder: PathBuf,
    transformer: T,
    valid_loader: LV,
    invalid_loader: LI,
}

impl<T, LV, LI> Runner<T, LV, LI>
where
    T: Transformer + Clone,
    LV: Loader + Clone,
    LI: Loader + Clone,
{
    /// Cria um novo runner
    pub fn new(
        input_folder: impl AsRef<Path>,
        archive_folder: impl AsRef<Path>,
        transformer: T,
        valid_loader: LV,
        invalid_loader: LI,
    ) -> Self {
        Self {
            input_folder: input_folder.as_ref().to_path_buf(),
            archive_folder: archive_folder.as_ref().to_path_buf(),
            transformer,
            valid_loader,
            invalid_loader,
        }
    }

    /// Processa todos os arquivos da pasta de entrada
    ///
    /// Pasta de entrada ausente é fatal; pasta vazia encerra cedo sem
    /// erro. Extensões não suportadas são puladas com aviso.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if !self.input_folder.is_dir() {
            return Err(
                ExtractError::FileNotFound(self.input_folder.display().to_string()).into(),
            );
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.input_folder)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        if files.is_empty() {
            tracing::info!(
                "Nenhum arquivo de entrada em '{}'; nada a fazer",
                self.input_folder.display()
            );
            return Ok(summary);
        }

        // Uma subpasta de arquivamento por dia de execução
        let archive_dir = self
            .archive_folder
            .join(Local::now().format("%Y%m%d").to_string());
        std::fs::create_dir_all(&archive_dir)?;

        for path in files {
            match self.process_file(&path, &archive_dir).await {
                Ok(result) => {
                    summary.files_processed += 1;
                    summary.rows_valid += result.rows_valid;
                    summary.rows_invalid += result.rows_invalid;
                }
                Err(ETLError::Extract(ExtractError::UnsupportedType(extension))) => {
                    tracing::warn!(
                        "Pulando arquivo não suportado '{}' ({})",
                        path.display(),
                        extension
                    );
                    summary.files_skipped += 1;
                }
                Err(err) => {
                    tracing::error!(
                        "Falha ao processar '{}': {}; arquivo mantido para a próxima execução",
                        path.display(),
                        err
                    );
                    summary.files_failed += 1;
                }
            }
        }

        tracing::info!(
            "Execução concluída: {} processados, {} pulados, {} com falha",
            summary.files_processed,
            summary.files_skipped,
            summary.files_failed
        );

        Ok(summary)
    }

    /// Executa o pipeline de um arquivo e o arquiva em caso de sucesso
    async fn process_file(&self, path: &Path, archive_dir: &Path) -> Result<PipelineResult> {
        let extractor = factory::for_path(path)?;

        let pipeline = Pipeline::builder()
            .extract(extractor)
            .transform(self.transformer.clone())
            .load_valid(self.valid_loader.clone())
            .load_invalid(self.invalid_loader.clone())
            .build();

        let result = pipeline.run().await?;

        let file_name = path.file_name().ok_or_else(|| {
            ETLError::Pipeline(format!("caminho sem nome de arquivo: {}", path.display()))
        })?;
        std::fs::rename(path, archive_dir.join(file_name))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::memory::MemoryLoader;
    use crate::transform::quality::QualityTransform;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn runner_for(
        input: &Path,
        archive: &Path,
    ) -> (
        Runner<QualityTransform, MemoryLoader, MemoryLoader>,
        MemoryLoader,
        MemoryLoader,
    ) {
        let valid_loader = MemoryLoader::new();
        let invalid_loader = MemoryLoader::new();
        let runner = Runner::new(
            input,
            archive,
            QualityTransform::new(),
            valid_loader.clone(),
            invalid_loader.clone(),
        );
        (runner, valid_loader, invalid_loader)
    }

    #[tokio::test]
    async fn test_runner_missing_input_folder_is_fatal() {
        let archive = tempdir().unwrap();
        let (runner, _, _) = runner_for(Path::new("/nao/existe"), archive.path());

        let result = runner.run().await;
        assert!(matches!(
            result,
            Err(ETLError::Extract(ExtractError::FileNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_runner_empty_folder_returns_early() {
        let input = tempdir().unwrap();
        let archive = tempdir().unwrap();
        let (runner, valid_loader, _) = runner_for(input.path(), archive.path());

        let summary = runner.run().await.unwrap();

        assert_eq!(summary, RunSummary::default());
        assert_eq!(valid_loader.call_count(), 0);
    }

    #[tokio::test]
    async fn test_runner_processes_and_archives_files() {
        let input = tempdir().unwrap();
        let archive = tempdir().unwrap();

        write_file(input.path(), "clientes.csv", "a,b\n1,x\n1,x\nNA,y\n");
        write_file(input.path(), "pedidos.json", r#"[{"a": "2", "b": "z"}]"#);

        let (runner, valid_loader, invalid_loader) = runner_for(input.path(), archive.path());
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.rows_valid, 2);
        assert_eq!(summary.rows_invalid, 2);

        // Um lote válido por arquivo, um lote inválido só do CSV
        assert_eq!(valid_loader.call_count(), 2);
        assert_eq!(invalid_loader.call_count(), 1);

        // Arquivos processados vão para a subpasta datada do arquivo
        let dated_dir = archive
            .path()
            .join(Local::now().format("%Y%m%d").to_string());
        assert!(dated_dir.join("clientes.csv").exists());
        assert!(dated_dir.join("pedidos.json").exists());
        assert!(!input.path().join("clientes.csv").exists());
    }

    #[tokio::test]
    async fn test_runner_skips_unsupported_extension() {
        let input = tempdir().unwrap();
        let archive = tempdir().unwrap();

        write_file(input.path(), "notas.txt", "sem formato");
        write_file(input.path(), "clientes.csv", "a\n1\n");

        let (runner, valid_loader, _) = runner_for(input.path(), archive.path());
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(valid_loader.call_count(), 1);

        // O arquivo pulado permanece intocado na entrada
        assert!(input.path().join("notas.txt").exists());
    }

    #[tokio::test]
    async fn test_runner_isolates_failing_file() {
        let input = tempdir().unwrap();
        let archive = tempdir().unwrap();

        write_file(input.path(), "quebrado.json", r#"[{"a": "1""#);
        write_file(input.path(), "valido.csv", "a\n1\n");

        let (runner, valid_loader, _) = runner_for(input.path(), archive.path());
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(valid_loader.call_count(), 1);

        // O arquivo com falha fica para a próxima execução
        assert!(input.path().join("quebrado.json").exists());
        let dated_dir = archive
            .path()
            .join(Local::now().format("%Y%m%d").to_string());
        assert!(dated_dir.join("valido.csv").exists());
    }

    #[tokio::test]
    async fn test_runner_dedup_state_does_not_leak_across_files() {
        let input = tempdir().unwrap();
        let archive = tempdir().unwrap();

        // O mesmo registro em dois arquivos deve ser válido nos dois
        write_file(input.path(), "um.csv", "a\n1\n");
        write_file(input.path(), "dois.csv", "a\n1\n");

        let (runner, valid_loader, invalid_loader) = runner_for(input.path(), archive.path());
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.rows_valid, 2);
        assert_eq!(summary.rows_invalid, 0);
        assert_eq!(valid_loader.call_count(), 2);
        assert_eq!(invalid_loader.call_count(), 0);
    }
}
