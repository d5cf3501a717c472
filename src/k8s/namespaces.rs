//! Namespace management

use k8s_openapi::api::core::v1::Namespace;
use kube::{
    Api, Client,
    api::{ObjectMeta, PostParams},
};
use tracing::{debug, info, instrument};

use crate::error::{AdapterError, Result};

/// Make sure `namespace` exists, creating it when the lookup finds nothing.
/// Lookup errors other than not-found are returned as they are.
#[instrument(skip(client))]
pub async fn ensure_namespace(client: &Client, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    if namespaces.get_opt(namespace).await?.is_some() {
        debug!("Namespace {} already exists", namespace);
        return Ok(());
    }

    info!("Creating namespace {}", namespace);
    let ns = Namespace {
        metadata: ObjectMeta {
            name: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    namespaces.create(&PostParams::default(), &ns).await?;
    info!("Namespace {} created", namespace);

    Ok(())
}

/// Blocking variant of [`ensure_namespace`] using the inferred kubeconfig
pub fn ensure_namespace_blocking(namespace: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AdapterError::Runtime)?;

    runtime.block_on(async {
        let client = Client::try_default().await?;
        ensure_namespace(&client, namespace).await
    })
}
