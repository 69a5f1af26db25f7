//! Interactive console loop.
//!
//! Wires the file-backed repository and the scripted/template collaborators
//! into a stdin/stdout conversation for local exercise of the engine.
//! Commands: `/stress <text>` enters the relief workflow, `/end` closes the
//! session, `/quit` exits; anything else runs the empathetic-strategy path.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use stride_coach::adapters::collaborators::{ScriptedClassifier, TemplateGenerator};
use stride_coach::adapters::storage::JsonFileProfileRepository;
use stride_coach::application::{InterventionSelector, SessionWorkflow, TurnService};
use stride_coach::config::AppConfig;
use stride_coach::domain::foundation::UserId;
use stride_coach::domain::relief::UcbPolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let repository = Arc::new(JsonFileProfileRepository::new(config.storage.profile_path()));
    let selector = InterventionSelector::new(
        UcbPolicy::new(config.policy.epsilon),
        config.policy.item_epsilon,
    );
    let workflow = Arc::new(SessionWorkflow::new(
        repository,
        selector,
        config.policy.favorite_threshold,
    ));
    let service = TurnService::new(
        Arc::new(ScriptedClassifier::new()),
        Arc::new(TemplateGenerator::new()),
        workflow.clone(),
        config.collaborators.timeout(),
    );

    let user_id = UserId::new("console-user")?;
    println!("stride-coach console. /stress <text>, /end, /quit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = if line == "/quit" {
            break;
        } else if line == "/end" {
            workflow.end_session(&user_id).await?;
            "Session closed.".to_string()
        } else if let Some(text) = line.strip_prefix("/stress ") {
            service.begin_relief_turn(&user_id, text).await?
        } else {
            service.handle_turn(&user_id, line).await?
        };

        println!("{}", reply);
    }

    Ok(())
}
