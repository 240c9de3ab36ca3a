use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_widget::SessionBuilder;
use chat_widget::core::{DEFAULT_WELCOME_MESSAGE, Message, Renderer, Sender};
use chat_widget_test_model::{PresetResponse, TestModelProvider};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

#[derive(Default)]
struct TextRenderer {
    lines: Mutex<Vec<String>>,
}

impl Renderer for TextRenderer {
    fn render_message(&self, message: &Message) {
        let who = match message.sender() {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        };
        self.lines
            .lock()
            .unwrap()
            .push(format!("{who}: {}", message.text()));
    }

    fn show_pending(&self) {}

    fn clear_pending(&self) {}
}

fn idle_channel() -> (
    impl Fn() + Send + Sync + 'static,
    mpsc::UnboundedReceiver<()>,
) {
    let (idle_tx, idle_rx) = mpsc::unbounded_channel();
    let on_idle = move || {
        idle_tx.send(()).ok();
    };
    (on_idle, idle_rx)
}

#[tokio::test(start_paused = true)]
async fn test_welcome_then_demo() {
    let renderer = Arc::new(TextRenderer::default());
    let (on_idle, mut idle_rx) = idle_channel();
    let session = SessionBuilder::with_model_provider(
        TestModelProvider::default(),
        Arc::clone(&renderer),
    )
    .with_demo_replies(["Recycling helps!"])
    .on_idle(on_idle)
    .build();
    assert!(session.is_demo());

    sleep(Duration::from_millis(1100)).await;
    session.send_message("Any tips?");
    timeout(Duration::from_secs(5), idle_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        *renderer.lines.lock().unwrap(),
        [
            format!("assistant: {DEFAULT_WELCOME_MESSAGE}"),
            "user: Any tips?".to_owned(),
            "assistant: Recycling helps!".to_owned(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_switch_to_live() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(PresetResponse::reply("From Gemini"));
    let observer = model_provider.clone();
    let (on_idle, mut idle_rx) = idle_channel();
    let mut session = SessionBuilder::with_model_provider(
        model_provider,
        TextRenderer::default(),
    )
    .without_welcome_message()
    .with_demo_replies(["canned"])
    .with_demo_delay(Duration::from_millis(10))
    .on_idle(on_idle)
    .build();

    session.send_message("one");
    idle_rx.recv().await.unwrap();

    session.set_credential("secret");
    assert!(!session.is_demo());
    session.send_message("two");
    idle_rx.recv().await.unwrap();

    session.set_credential("");
    assert!(session.is_demo());
    session.send_message("three");
    idle_rx.recv().await.unwrap();

    let texts: Vec<_> = session
        .transcript()
        .await
        .unwrap()
        .iter()
        .map(|m| m.text().to_owned())
        .collect();
    assert_eq!(
        texts,
        ["one", "canned", "two", "From Gemini", "three", "canned"]
    );

    let received = observer.received_requests();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].message, "two");
    assert_eq!(received[0].credential, "secret");
}

#[tokio::test(start_paused = true)]
async fn test_custom_welcome() {
    let session = SessionBuilder::with_model_provider(
        TestModelProvider::default(),
        TextRenderer::default(),
    )
    .with_welcome_message("Hello there")
    .build();

    sleep(Duration::from_secs(2)).await;
    let transcript = session.transcript().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.last().unwrap().text(), "Hello there");
    assert_eq!(transcript.last().unwrap().sender(), Sender::Assistant);
}
