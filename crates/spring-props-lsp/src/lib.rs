//! # spring-props-lsp
//!
//! Language Server Protocol implementation for Spring Boot configuration
//! files (`application.properties`, `application.yml`).
//!
//! ## Features
//!
//! - Completion of property keys, groups and enum values
//! - Hover documentation for documented properties
//! - Document formatting
//! - YAML syntax diagnostics on open, change, and save
//!
//! ## Usage
//!
//! Run the LSP server:
//!
//! ```bash
//! spring-props-lsp
//! ```
//!
//! The server communicates over stdin/stdout using the LSP protocol.

rust_i18n::i18n!("../../locales", fallback = "en");

mod backend;
mod client_config;
mod completion_provider;
mod diagnostic_mapper;
mod hover_provider;
mod position;

pub use backend::Backend;
pub use client_config::ClientSettings;

use tower_lsp::{LspService, Server};

/// Start the LSP server.
///
/// This function sets up stdin/stdout communication and runs the server
/// until shutdown is requested. Locale is initialized from environment
/// variables before the server starts.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a fatal error.
pub async fn start_server() -> anyhow::Result<()> {
    // SPRING_PROPS_LOCALE > LC_ALL/LANG > system > "en"
    spring_props_core::locale::init_from_env();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}
