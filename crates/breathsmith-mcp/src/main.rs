//! breathsmith-mcp: MCP server binary.
//!
//! Serves the breathsmith tool set over stdio.
//!
//! # Usage
//!
//! ```bash
//! # Run directly
//! breathsmith-mcp
//!
//! # Configure in an MCP host's .mcp.json:
//! # {
//! #   "mcpServers": {
//! #     "breathsmith": {
//! #       "command": "breathsmith-mcp"
//! #     }
//! #   }
//! # }
//! ```

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider;
use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use breathsmith_mcp::server::{BreathsmithHandler, McpServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // If OTEL_EXPORTER_OTLP_ENDPOINT is set, export spans via OTLP.
    // Otherwise just the fmt layer on stderr; stdout belongs to the protocol.
    let provider = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()
            .context("building OTLP exporter")?;
        let resource = Resource::builder()
            .with_attributes([
                KeyValue::new("service.name", "breathsmith-mcp"),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ])
            .build();
        let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build();
        opentelemetry::global::set_tracer_provider(provider.clone());
        Some(provider)
    } else {
        None
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("breathsmith-mcp")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(otel_layer)
        .with(EnvFilter::from_default_env().add_directive("breathsmith_mcp=info".parse()?))
        .init();

    tracing::info!("starting breathsmith MCP server");

    let config = McpServerConfig::load().context("loading configuration")?;
    tracing::info!(name = %config.name, version = %config.version, "server config loaded");

    let handler = BreathsmithHandler::new(config).context("creating server handler")?;

    tracing::info!("serving on stdio");
    let service = handler
        .serve(stdio())
        .await
        .context("starting MCP service")?;

    service.waiting().await?;

    tracing::info!("server shutdown complete");

    if let Some(provider) = provider {
        // Shutdown errors are non-fatal at process exit.
        let _ = provider.shutdown();
    }

    Ok(())
}
