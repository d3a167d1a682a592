use crate::error::Result;
use crate::traits::{Extractor, Loader, Transformer};
use crate::types::{LoadContext, PipelineResult, SOURCE_FILE_KEY};
use std::time::Instant;

/// Pipeline ETL de um arquivo: Extract → Transform → Load
///
/// Orquestra uma execução sobre um arquivo de origem: extrai o lote
/// bruto, particiona em válidos/inválidos e entrega cada partição não
/// vazia ao seu loader. A partição inválida recebe um contexto com a
/// proveniência (`source_file`). Nenhum erro é tratado aqui: extração,
/// transformação e carga propagam a falha ao chamador, que conhece o
/// arquivo e decide o destino dele.
pub struct Pipeline<E, T, LV, LI> {
    extractor: E,
    transformer: T,
    valid_loader: LV,
    invalid_loader: LI,
}

impl Pipeline<(), (), (), ()> {
    /// Cria um novo builder de pipeline
    pub fn builder() -> PipelineBuilder<(), (), (), ()> {
        PipelineBuilder::new()
    }
}

impl<E, T, LV, LI> Pipeline<E, T, LV, LI>
where
    E: Extractor,
    T: Transformer,
    LV: Loader,
    LI: Loader,
{
    /// Executa o pipeline uma vez
    pub async fn run(&self) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let source = self.extractor.source_name();

        tracing::info!("Iniciando pipeline para '{}'", source);

        let raw_records = self.extractor.extract().await?;
        let rows_extracted = raw_records.len();
        tracing::info!("Extraídos {} registros de '{}'", rows_extracted, source);

        let partition = self.transformer.transform(raw_records).await?;
        let rows_valid = partition.valid.len();
        let rows_invalid = partition.invalid.len();
        tracing::info!(
            "Transformação de '{}': {} válidos, {} inválidos",
            source,
            rows_valid,
            rows_invalid
        );

        let mut context = LoadContext::new();
        context.insert(SOURCE_FILE_KEY.to_string(), source.to_string());

        // Partições vazias não geram chamada de carga
        if !partition.valid.is_empty() {
            self.valid_loader.load(partition.valid, None).await?;
        }

        if !partition.invalid.is_empty() {
            self.invalid_loader
                .load(partition.invalid, Some(&context))
                .await?;
        }

        let result = PipelineResult {
            rows_extracted,
            rows_valid,
            rows_invalid,
            execution_time_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Pipeline de '{}' concluído em {}ms",
            source,
            result.execution_time_ms
        );

        Ok(result)
    }
}

/// Builder para criação de pipelines
///
/// Cada componente troca o parâmetro de tipo correspondente; `build` só
/// existe quando os quatro colaboradores foram definidos.
pub struct PipelineBuilder<E, T, LV, LI> {
    extractor: E,
    transformer: T,
    valid_loader: LV,
    invalid_loader: LI,
}

impl PipelineBuilder<(), (), (), ()> {
    /// Cria um novo builder
    pub fn new() -> Self {
        Self {
            extractor: (),
            transformer: (),
            valid_loader: (),
            invalid_loader: (),
        }
    }
}

impl Default for PipelineBuilder<(), (), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, T, LV, LI> PipelineBuilder<E, T, LV, LI> {
    /// Define o extrator
    pub fn extract<NewE: Extractor>(self, extractor: NewE) -> PipelineBuilder<NewE, T, LV, LI> {
        PipelineBuilder {
            extractor,
            transformer: self.transformer,
            valid_loader: self.valid_loader,
            invalid_loader: self.invalid_loader,
        }
    }

    /// Define o transformador
    pub fn transform<NewT: Transformer>(
        self,
        transformer: NewT,
    ) -> PipelineBuilder<E, NewT, LV, LI> {
        PipelineBuilder {
            extractor: self.extractor,
            transformer,
            valid_loader: self.valid_loader,
            invalid_loader: self.invalid_loader,
        }
    }

    /// Define o carregador da partição válida
    pub fn load_valid<NewL: Loader>(self, loader: NewL) -> PipelineBuilder<E, T, NewL, LI> {
        PipelineBuilder {
            extractor: self.extractor,
            transformer: self.transformer,
            valid_loader: loader,
            invalid_loader: self.invalid_loader,
        }
    }

    /// Define o carregador da partição inválida (quarentena)
    pub fn load_invalid<NewL: Loader>(self, loader: NewL) -> PipelineBuilder<E, T, LV, NewL> {
        PipelineBuilder {
            extractor: self.extractor,
            transformer: self.transformer,
            valid_loader: self.valid_loader,
            invalid_loader: loader,
        }
    }
}

impl<E, T, LV, LI> PipelineBuilder<E, T, LV, LI>
where
    E: Extractor,
    T: Transformer,
    LV: Loader,
    LI: Loader,
{
    /// Constrói o pipeline
    pub fn build(self) -> Pipeline<E, T, LV, LI> {
        Pipeline {
            extractor: self.extractor,
            transformer: self.transformer,
            valid_loader: self.valid_loader,
            invalid_loader: self.invalid_loader,
        }
    }
}
