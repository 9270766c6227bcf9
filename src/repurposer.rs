//! Format dispatch and all-format aggregation

use std::sync::Arc;
use log::{debug, error, info};

use crate::providers::BackendTable;
use crate::request::{
  FormatSummary, GenerationOutcome, GenerationRequest, RepurposeResults,
  Target,
};
use crate::templates::TemplateRegistry;

/// Renders format templates and hands them to the selected backend.
/// Holds no mutable state; share freely behind an `Arc`.
#[derive(Clone)]
pub struct Repurposer
{   registry: Arc<TemplateRegistry>
  , backends: BackendTable
  , min_content_chars: usize
}

impl Repurposer
{   /// Build with every built-in backend, resolving credentials now
    pub fn new(config: &crate::config::RepurposerConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Initializing Repurposer");
        let mut repurposer = Repurposer::with_backends(
          Arc::new(TemplateRegistry::new()),
          BackendTable::from_config(config)?
        );
        repurposer.min_content_chars = config.min_content_chars;
        Ok(repurposer)
    }

    /// Build over an explicit registry and backend table
    pub fn with_backends(
      registry: Arc<TemplateRegistry>
    , backends: BackendTable
    ) -> Self
    {   Repurposer
        {   registry
          , backends
          , min_content_chars: crate::config::DEFAULT_MIN_CONTENT_CHARS
        }
    }

    pub fn registry(&self) -> &TemplateRegistry
    {   &self.registry
    }

    /// Repurpose content for one format.
    ///
    /// Format is checked before backend. Backend errors come back
    /// unchanged.
    pub async fn repurpose(
      &self
    , content: &str
    , format_id: &str
    , backend_id: &str
    ) -> Result<String, crate::error::Error>
    {   let format = self.registry.lookup(format_id)?;
        let prompt = format.render(content);
        let backend = self.backends.get(backend_id)?;

        debug!(
          "Dispatching {} to {} ({} prompt chars)",
          format.id, backend.name(), prompt.len()
        );
        backend.generate(&prompt).await
    }

    /// Repurpose content for every format, in registry order.
    /// A failed format is recorded and the rest still run.
    pub async fn repurpose_all(
      &self
    , content: &str
    , backend_id: &str
    ) -> RepurposeResults
    {   let mut results = RepurposeResults::new();
        for format in self.registry.list_all()
        {   let result = self
              .repurpose(content, format.id.as_str(), backend_id)
              .await;
            if let Err(e) = &result
            {   error!("{} failed: {}", format.id, e);
            }
            results.insert(format.id, GenerationOutcome::from(result));
        }
        info!(
          "Repurposed {}/{} formats with {}",
          results.values().filter(|o| o.is_generated()).count(),
          results.len(),
          backend_id
        );
        results
    }

    /// Request boundary: validate content, then one format or all.
    /// A single-format failure propagates; "all" never fails.
    pub async fn handle(&self, request: &GenerationRequest)
      -> Result<RepurposeResults, crate::error::Error>
    {   request.validate(self.min_content_chars)?;

        match &request.target
        {   Target::All => {
              Ok(self.repurpose_all(&request.content, &request.backend).await)
            }
          , Target::Format(format_id) => {
              let text = self
                .repurpose(&request.content, format_id, &request.backend)
                .await?;
              let id = self.registry.lookup(format_id)?.id;
              let mut results = RepurposeResults::new();
              results.insert(id, GenerationOutcome::Generated { text });
              Ok(results)
            }
        }
    }

    /// Format metadata in registry order
    pub fn formats(&self) -> Vec<FormatSummary>
    {   self.registry.list_all().iter().map(FormatSummary::from).collect()
    }
}
