use std::path::Path;

use anyhow::Context;
use utoipa::OpenApi;

use crate::app::controller::{ClientesControllerApi, HealthControllerApi};

#[derive(OpenApi)]
#[openapi(info(title = "clientes", description = "API Docs"))]
pub struct MainApiDoc;

/// The service document: `MainApiDoc` with every controller's paths merged in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = MainApiDoc::openapi();
    doc.merge(HealthControllerApi::openapi());
    doc.merge(ClientesControllerApi::openapi());
    doc
}

pub async fn generate_docs(path: &Path) -> anyhow::Result<()> {
    let docs = api_doc().to_pretty_json()?;

    tokio::fs::write(path, docs)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;

    tracing::info!("OpenAPI document written to {}", path.display());

    Ok(())
}
