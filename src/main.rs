use std::sync::Arc;

use tokio::io::AsyncBufReadExt;

use mail_triage::classify::{Classifier, HttpClassifier, KeywordClassifier};
use mail_triage::config::ServiceConfig;
use mail_triage::pipeline::{Pipeline, TriggerOutcome};
use mail_triage::render::{TerminalRenderer, TracingNotifier};
use mail_triage::server::analyze_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env()?;

    eprintln!("📬 mail-triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   API: http://0.0.0.0:{}/api/analyze (upload: /api/analyze/upload)",
        config.port
    );
    match &config.endpoint {
        Some(endpoint) => eprintln!("   Classifier: remote ({endpoint})"),
        None => eprintln!("   Classifier: local keyword heuristic"),
    }
    eprintln!("   Timeout: {:?}", config.request_timeout);
    eprintln!("   Paste an email and press Enter. /reset to clear, /quit to exit.\n");

    // Spawn the demo classification service
    let app = analyze_routes(Arc::new(KeywordClassifier::new()), &config.cors_origins);
    let port = config.port;
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .expect("Failed to bind analyze service port");
        tracing::info!(port, "Analyze service started");
        axum::serve(listener, app).await.ok();
    });

    // Pipeline: remote client if an endpoint is configured, local otherwise
    let classifier: Arc<dyn Classifier> = match &config.endpoint {
        Some(endpoint) => Arc::new(HttpClassifier::new(
            endpoint.clone(),
            config.request_timeout,
        )?),
        None => Arc::new(KeywordClassifier::new()),
    };
    let pipeline = Pipeline::new(
        classifier,
        Arc::new(TerminalRenderer),
        Arc::new(TracingNotifier),
        config.request_timeout,
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                pipeline.reset().await;
                continue;
            }
            _ => {}
        }

        pipeline.set_text(line).await;
        match pipeline.trigger().await {
            Ok(TriggerOutcome::Completed(_)) => {} // renderer already printed
            Ok(TriggerOutcome::Ignored) => {
                eprintln!("   (a classification is already running)");
            }
            Err(e) => {
                eprintln!("   Error: {e}");
            }
        }
    }

    Ok(())
}
