//! LSP backend implementation for spring-props.
//!
//! Implements the Language Server Protocol using tower-lsp. Every request is
//! answered from the in-memory text of an open document; the property
//! catalog and settings are fixed during `initialize` and only replaced
//! wholesale afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_i18n::t;
use spring_props_core::{Catalog, Settings};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::client_config::ClientSettings;
use crate::completion_provider::{completion_items_for_document, TRIGGER_CHARACTERS};
use crate::diagnostic_mapper::to_lsp_diagnostics;
use crate::hover_provider::hover_at_position;
use crate::position::full_document_range;

/// Path used for dialect detection.
///
/// Non-file URIs (untitled buffers, remote schemes) still carry a path whose
/// extension decides the dialect.
fn document_path(uri: &Url) -> PathBuf {
    uri.to_file_path()
        .unwrap_or_else(|_| PathBuf::from(uri.path()))
}

/// LSP backend that answers completion, hover and formatting requests and
/// publishes syntax diagnostics.
pub struct Backend {
    client: Client,
    /// Effective settings: `.spring-props.toml` with client overrides applied.
    settings: RwLock<Arc<Settings>>,
    /// Read-only after `initialize`.
    catalog: RwLock<Arc<Catalog>>,
    documents: RwLock<HashMap<Url, String>>,
}

impl Backend {
    /// Create a new backend instance with the given client connection.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            settings: RwLock::new(Arc::new(Settings::default())),
            catalog: RwLock::new(Arc::new(Catalog::builtin().clone())),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Get cached document content for a URI.
    async fn get_document_content(&self, uri: &Url) -> Option<String> {
        self.documents.read().await.get(uri).cloned()
    }

    async fn settings(&self) -> Arc<Settings> {
        Arc::clone(&*self.settings.read().await)
    }

    async fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    /// Load `.spring-props.toml` and the metadata files it names.
    ///
    /// Problems are reported to the client and the defaults stay in place.
    async fn load_workspace(&self, root: &Path) {
        let settings = match Settings::discover(root) {
            Ok(settings) => settings,
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        t!("lsp.settings_load_failed", error = e.to_string()).to_string(),
                    )
                    .await;
                return;
            }
        };

        match settings.build_catalog(root) {
            Ok(catalog) => {
                tracing::debug!(properties = catalog.len(), "property catalog ready");
                *self.catalog.write().await = Arc::new(catalog);
            }
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        t!("lsp.metadata_load_failed", error = e.to_string()).to_string(),
                    )
                    .await;
            }
        }

        *self.settings.write().await = Arc::new(settings);
    }

    /// Merge a client settings payload into the effective settings.
    async fn apply_client_settings(&self, payload: serde_json::Value) {
        let client_settings = match ClientSettings::from_json(payload) {
            Ok(client_settings) => client_settings,
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        t!("lsp.invalid_client_settings", error = e.to_string()).to_string(),
                    )
                    .await;
                return;
            }
        };

        client_settings.apply_locale();

        let mut settings = self.settings.write().await;
        let mut updated = (**settings).clone();
        client_settings.merge_into_settings(&mut updated);
        *settings = Arc::new(updated);
    }

    /// Validate cached content and publish the result.
    ///
    /// Documents that are not open get no diagnostics.
    async fn publish_diagnostics_for(&self, uri: Url) {
        let Some(content) = self.get_document_content(&uri).await else {
            return;
        };

        let diagnostics = if self.settings().await.diagnostics.enabled {
            let path = document_path(&uri);
            to_lsp_diagnostics(spring_props_core::validate(&path, &content))
        } else {
            Vec::new()
        };

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    async fn republish_all(&self) {
        let uris: Vec<Url> = self.documents.read().await.keys().cloned().collect();
        for uri in uris {
            self.publish_diagnostics_for(uri).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root_path) = params.root_uri.and_then(|uri| uri.to_file_path().ok()) {
            self.load_workspace(&root_path).await;
        }

        if let Some(options) = params.initialization_options {
            self.apply_client_settings(options).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(
                        TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect(),
                    ),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "spring-props-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, t!("lsp.initialized").to_string())
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        {
            let mut docs = self.documents.write().await;
            docs.insert(
                params.text_document.uri.clone(),
                params.text_document.text,
            );
        }
        self.publish_diagnostics_for(params.text_document.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            {
                let mut docs = self.documents.write().await;
                docs.insert(params.text_document.uri.clone(), change.text);
            }
            self.publish_diagnostics_for(params.text_document.uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(text) = params.text {
            let mut docs = self.documents.write().await;
            docs.insert(params.text_document.uri.clone(), text);
        }
        self.publish_diagnostics_for(params.text_document.uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        {
            let mut docs = self.documents.write().await;
            docs.remove(&params.text_document.uri);
        }
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.apply_client_settings(params.settings).await;
        self.republish_all().await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(content) = self.get_document_content(uri).await else {
            return Ok(None);
        };

        let catalog = self.catalog().await;
        let settings = self.settings().await;
        let items = completion_items_for_document(
            &document_path(uri),
            &content,
            position,
            &catalog,
            &settings,
        );

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(content) = self.get_document_content(uri).await else {
            return Ok(None);
        };

        let catalog = self.catalog().await;
        Ok(hover_at_position(
            &document_path(uri),
            &content,
            position,
            &catalog,
        ))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = &params.text_document.uri;

        let Some(content) = self.get_document_content(uri).await else {
            return Ok(None);
        };

        Ok(
            spring_props_core::format_document(&document_path(uri), &content).map(|new_text| {
                vec![TextEdit {
                    range: full_document_range(&content),
                    new_text,
                }]
            }),
        )
    }
}
