//! A terminal chat with Gemini, built on the `chat-widget` library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::sync::Arc;

use chat_widget::SessionBuilder;
use chat_widget::command::{Command, HELP_TEXT};
use chat_widget::render::TerminalRenderer;
use chat_widget_gemini_model::{GeminiConfigBuilder, GeminiProvider};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config_builder = GeminiConfigBuilder::new();
    if let Ok(model) = env::var("GEMINI_MODEL") {
        config_builder = config_builder.with_model(model);
    }
    if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
        config_builder = config_builder.with_base_url(base_url);
    }
    let config = config_builder.build();
    info!("using model {} at {}", config.model(), config.base_url());
    let model_provider = GeminiProvider::new(config);

    let renderer = Arc::new(TerminalRenderer::new());
    let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();

    let mut session = SessionBuilder::with_model_provider(
        model_provider.clone(),
        Arc::clone(&renderer),
    )
    .with_credential(env::var("GEMINI_API_KEY").unwrap_or_default())
    .on_idle(move || {
        idle_tx.send(()).ok();
    })
    .build();

    print_mode(&renderer, session.is_demo());

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        if let Err(err) = std::io::stdout().flush() {
            error!("error writing output: {err}");
            break;
        }

        let Some(line) = read_line(&mut lines).await else {
            break;
        };
        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => renderer.println(HELP_TEXT),
            Command::SetKey(credential) => {
                session.set_credential(credential.unwrap_or_default());
                print_mode(&renderer, session.is_demo());
            }
            Command::ListModels => {
                if session.is_demo() {
                    renderer.println("Set an API key with /key first.");
                    continue;
                }
                match model_provider.list_models(session.credential()).await {
                    Ok(models) => {
                        for model in models {
                            let methods =
                                model.supported_generation_methods.join(", ");
                            renderer.println(&format!(
                                "{} {} [{}]",
                                model.name.bright_white().bold(),
                                model.display_name.unwrap_or_default(),
                                methods.dimmed(),
                            ));
                        }
                    }
                    Err(err) => {
                        renderer.println(&format!(
                            "{} {err}",
                            "Could not list models:".bright_red()
                        ));
                    }
                }
            }
            Command::Say(text) => {
                session.send_message(&text);
                // Wait for the reply before asking for more input.
                if idle_rx.recv().await.is_none() {
                    break;
                }
            }
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

fn print_mode(renderer: &TerminalRenderer, demo: bool) {
    if demo {
        renderer.println(&format!(
            "{} replies are canned until you set an API key with /key.",
            "Demo mode:".bright_yellow()
        ));
    } else {
        renderer.println(&format!(
            "{} messages are sent to Gemini.",
            "Live mode:".bright_green()
        ));
    }
}
