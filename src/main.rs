//! Assistant webhook server.
//!
//! Serves a small number-guessing fulfillment over the conversation
//! adapter. Configuration comes from `ASSISTANT_WEBHOOK__*` variables.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use assistant_webhook::adapters::http::{webhook_router, FulfillmentHandler, HttpConversation, WebhookAppState};
use assistant_webhook::adapters::TracingErrorSink;
use assistant_webhook::config::{AppConfig, LogFormat, LoggingConfig};
use assistant_webhook::domain::conversation::{NamedState, State, StandardIntent};

const TARGET: i64 = 7;

#[derive(Debug, Clone, Copy)]
enum Step {
    Guessing,
}

impl NamedState for Step {
    fn name(&self) -> &str {
        match self {
            Step::Guessing => "GUESSING",
        }
    }
}

/// Asks for a number until the user guesses it.
struct NumberGame;

#[async_trait]
impl FulfillmentHandler for NumberGame {
    async fn handle(&self, conversation: &mut HttpConversation) {
        if conversation.standard_intent() == Some(StandardIntent::Main) {
            conversation.set_state(State::named(Step::Guessing));
            conversation.set_data(json!({ "guesses": 0 }));
            conversation.ask("<speak>Hi! Guess a number between 1 and 10.</speak>", None);
            return;
        }

        let guess = conversation
            .raw_input()
            .and_then(|query| query.trim().parse::<i64>().ok());
        let guesses = conversation.data()["guesses"].as_i64().unwrap_or(0) + 1;
        conversation.set_data(json!({ "guesses": guesses }));

        match guess {
            Some(TARGET) => {
                conversation.tell(&format!("You got it in {guesses} guesses!"));
            }
            Some(n) if n < TARGET => {
                conversation.ask("Higher. Try again.", None);
            }
            Some(_) => {
                conversation.ask("Lower. Try again.", None);
            }
            None => {
                conversation.ask("That wasn't a number. Guess again.", None);
            }
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(config.env_filter());
    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let state = WebhookAppState::new(
        Arc::new(NumberGame),
        Arc::new(TracingErrorSink::new()),
        config.webhook.api_version(),
    );
    let app = webhook_router(&config.webhook.path, state, config.server.request_timeout());

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, path = %config.webhook.path, "Assistant webhook listening");
    axum::serve(listener, app).await?;
    Ok(())
}
