use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

use crate::analysis::code_action::{lowercase_edit, quick_fixes, workspace_edit};
use crate::analysis::completion;
use crate::analysis::diagnostics::validate;
use crate::config::Settings;
use crate::document::{DocumentStore, TextDocument};
use crate::lsp::commands::{CommandError, FIX_COMMAND, FixArguments};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    settings: RwLock<Settings>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::build(client, Settings::default())
    }

    /// Creates a backend with explicit settings (used by tests)
    pub fn build(client: Client, settings: Settings) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            settings: RwLock::new(settings),
        }
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::INCREMENTAL),
                    will_save_wait_until: Some(false),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(false),
                    })),
                    ..Default::default()
                },
            )),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(true),
                ..Default::default()
            }),
            code_action_provider: Some(CodeActionProviderCapability::Options(
                CodeActionOptions {
                    code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                    ..Default::default()
                },
            )),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![FIX_COMMAND.to_string()],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    async fn publish_diagnostics(&self, document: &TextDocument) {
        let diagnostics = {
            let settings = self.settings.read().await;
            validate(document, &settings)
        };

        debug!(
            "Publishing {} diagnostics for {}",
            diagnostics.len(),
            document.uri()
        );

        self.client
            .publish_diagnostics(
                document.uri().clone(),
                diagnostics,
                Some(document.version()),
            )
            .await;
    }

    async fn run_fix_command(&self, arguments: Vec<serde_json::Value>) -> Result<()> {
        let FixArguments { uri, range } = FixArguments::parse(arguments)?;

        let document = self
            .documents
            .get(&uri)
            .await
            .ok_or_else(|| CommandError::DocumentNotOpen(uri.clone()))?;

        let edit = workspace_edit(&document, vec![lowercase_edit(&document, range)]);
        let response = self.client.apply_edit(edit).await?;

        if !response.applied {
            let reason = response
                .failure_reason
                .unwrap_or_else(|| "no reason given".to_string());
            warn!("Client rejected {} edit for {}: {}", FIX_COMMAND, uri, reason);
            return Err(CommandError::EditRejected(reason).into());
        }

        Ok(())
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = &params.initialization_options {
            let settings = Settings::from_value(options);
            info!("Initial settings: {:?}", settings);
            *self.settings.write().await = settings;
        }

        self.client
            .log_message(MessageType::INFO, "LSP server initializing")
            .await;
        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("LSP server shutting down");
        self.client
            .log_message(MessageType::INFO, "LSP server shutting down")
            .await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.client
            .log_message(
                MessageType::LOG,
                format!("Document opened: {}", params.text_document.uri),
            )
            .await;

        let document = self.documents.open(params.text_document).await;
        self.publish_diagnostics(&document).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let VersionedTextDocumentIdentifier { uri, version } = params.text_document;

        match self
            .documents
            .change(&uri, version, params.content_changes)
            .await
        {
            Ok(document) => self.publish_diagnostics(&document).await,
            Err(e) => warn!("Ignoring change: {}", e),
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document saved: {}", uri);

        let Some(document) = self.documents.get(&uri).await else {
            warn!("Saved document is not open: {}", uri);
            return;
        };
        self.publish_diagnostics(&document).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.close(&uri).await;

        self.client
            .log_message(MessageType::LOG, format!("Document closed: {}", uri))
            .await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings = Settings::from_value(&params.settings);
        info!("Settings changed: {:?}", settings);
        *self.settings.write().await = settings;

        for document in self.documents.all().await {
            self.publish_diagnostics(&document).await;
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let TextDocumentPositionParams {
            text_document,
            position,
        } = params.text_document_position;

        let Some(document) = self.documents.get(&text_document.uri).await else {
            debug!("Completion requested for unknown document {}", text_document.uri);
            return Ok(None);
        };

        let items = completion::complete(&document, position);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(completion::resolve(item))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let Some(document) = self.documents.get(&params.text_document.uri).await else {
            return Ok(None);
        };

        let actions = quick_fixes(&document, &params.context.diagnostics);
        if actions.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            actions
                .into_iter()
                .map(CodeActionOrCommand::CodeAction)
                .collect(),
        ))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        info!("Executing command {}", params.command);

        match params.command.as_str() {
            FIX_COMMAND => self.run_fix_command(params.arguments).await?,
            other => return Err(CommandError::Unknown(other.to_string()).into()),
        }

        Ok(None)
    }
}
