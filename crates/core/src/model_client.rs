use std::pin::Pin;
use std::sync::Arc;

use chat_widget_model::{
    ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use tracing::Instrument;

type SendRequestResult = Result<ModelReply, Box<dyn ModelProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased interface
/// for the controller.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // Erase `P` so that the controller state doesn't need a generic
        // parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {req:?}");
                    match fut.await {
                        Ok(reply) => {
                            trace!("got a reply of {} bytes", reply.text.len());
                            Ok(reply)
                        }
                        Err(err) => {
                            debug!("got an error: {err}");
                            Err(Box::new(err) as Box<dyn ModelProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns a future for the reply.
    ///
    /// The request is issued right away; the returned future doesn't borrow
    /// the client, so it can be moved into a spawned task.
    #[inline]
    pub fn send_request(&self, req: ModelRequest) -> BoxedSendRequestFuture {
        (self.handler_fn)(req)
    }
}

#[cfg(test)]
mod tests {
    use chat_widget_model::ErrorKind;
    use chat_widget_test_model::{PresetResponse, TestModelProvider};

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_response(PresetResponse::reply("How are you?"));
        let observer = model_provider.clone();

        let model_client = ModelClient::new(model_provider);
        let reply = model_client
            .send_request(ModelRequest::new("Hi", "key"))
            .await
            .unwrap();
        assert_eq!(reply.text, "How are you?");
        assert_eq!(observer.received_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut model_provider = TestModelProvider::default();
        model_provider
            .add_response(PresetResponse::failure(ErrorKind::MissingCandidate));
        let model_client = ModelClient::new(model_provider);

        let err = model_client
            .send_request(ModelRequest::new("Hi", "key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCandidate);

        // The script is exhausted now.
        let err = model_client
            .send_request(ModelRequest::new("Hi", "key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
