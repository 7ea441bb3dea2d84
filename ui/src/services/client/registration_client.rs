use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, error, info, instrument, warn};

use super::transport::RegistrationTransport;
use super::types::{HttpExchange, RegistrationRequest, ServerResponse};
use super::xml::{encode_registration, parse_reply};
use crate::services::config::RegistrationConfig;
use crate::services::errors::RegistrationResult;

pub const REGISTER_METHOD: &str = "register";

pub const UNAUTHORIZED_TITLE: &str = "Unauthorized";
pub const UNAUTHORIZED_MESSAGE: &str = "An authentication error occurred.";
pub const BAD_REQUEST_TITLE: &str = "Bad Request";
pub const NETWORK_ERROR_TITLE: &str = "Network Error";
pub const REGISTRATION_COMPLETE_TITLE: &str = "Registration Complete";
pub const REGISTRATION_COMPLETE_MESSAGE: &str = "Your account has been set up.";

/// Modal message region
pub trait DialogHandle {
    /// Replace title and message and make the dialog visible
    fn show(&self, title: &str, message: &str);
    /// Hide the dialog. No-op when already hidden.
    fn dismiss(&self);
}

/// The registration form the request was read from
pub trait FormHandle {
    fn reset(&self);
}

/// Why a completed request produced no feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Request lifecycle had not reached `Done`
    Incomplete,
    EmptyBody,
    /// 200 reply whose method/status pair is not a finished registration
    UnrecognizedReply,
}

/// Terminal state of one registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Unauthorized,
    BadRequest { status: String, message: String },
    NetworkError { status_text: String, status: u16 },
    Success,
    Ignored(IgnoreReason),
}

impl RegistrationOutcome {
    /// Title and message to display, if any
    pub fn dialog(&self) -> Option<(&'static str, String)> {
        match self {
            RegistrationOutcome::Unauthorized => {
                Some((UNAUTHORIZED_TITLE, UNAUTHORIZED_MESSAGE.to_string()))
            }
            RegistrationOutcome::BadRequest { message, .. } => {
                Some((BAD_REQUEST_TITLE, message.clone()))
            }
            RegistrationOutcome::NetworkError {
                status_text,
                status,
            } => Some((
                NETWORK_ERROR_TITLE,
                format!("Error status: '{}' ({})", status_text, status),
            )),
            RegistrationOutcome::Success => Some((
                REGISTRATION_COMPLETE_TITLE,
                REGISTRATION_COMPLETE_MESSAGE.to_string(),
            )),
            RegistrationOutcome::Ignored(_) => None,
        }
    }
}

/// Map a transport exchange to an outcome.
///
/// The empty-body check runs before any status branch, so a 401 without a
/// body is ignored like every other bodiless reply. Bodies that cannot be
/// parsed, or that lack an element the matching branch reads, are errors.
pub fn classify(exchange: &HttpExchange) -> RegistrationResult<RegistrationOutcome> {
    if !exchange.is_complete() {
        return Ok(RegistrationOutcome::Ignored(IgnoreReason::Incomplete));
    }
    let Some(body) = exchange.non_empty_body() else {
        return Ok(RegistrationOutcome::Ignored(IgnoreReason::EmptyBody));
    };

    info!(
        "Network status: '{}' ({})",
        exchange.status_text, exchange.status
    );

    match exchange.status {
        401 => {
            warn!("{}", UNAUTHORIZED_MESSAGE);
            Ok(RegistrationOutcome::Unauthorized)
        }
        400 => {
            let doc = parse_reply(body)?;
            let status = doc.require_status()?.to_string();
            let message = doc.require_message()?.to_string();
            Ok(RegistrationOutcome::BadRequest { status, message })
        }
        200 => {
            debug!("{}", body);
            let doc = parse_reply(body)?;
            let response = ServerResponse {
                http_status: exchange.status,
                status_text: exchange.status_text.clone(),
                body_status: Some(doc.require_status()?.to_string()),
                body_message: doc.message.clone(),
                method: doc.method.clone(),
            };
            if response.method_is(REGISTER_METHOD) && response.status_is_ok() {
                Ok(RegistrationOutcome::Success)
            } else {
                debug!(
                    "Unrecognized reply: method={:?} status={:?}",
                    response.method, response.body_status
                );
                Ok(RegistrationOutcome::Ignored(IgnoreReason::UnrecognizedReply))
            }
        }
        status => Ok(RegistrationOutcome::NetworkError {
            status_text: exchange.status_text.clone(),
            status,
        }),
    }
}

/// Orchestrates registration attempts and renders their outcome.
///
/// Every attempt is independent. Two attempts in flight both write to the
/// same dialog and whichever finishes last wins.
#[derive(Clone)]
pub struct RegistrationClient {
    config: RegistrationConfig,
    transport: Rc<dyn RegistrationTransport>,
    dialog: Rc<dyn DialogHandle>,
    form: Rc<dyn FormHandle>,
}

impl RegistrationClient {
    pub fn new(
        config: RegistrationConfig,
        transport: Rc<dyn RegistrationTransport>,
        dialog: Rc<dyn DialogHandle>,
        form: Rc<dyn FormHandle>,
    ) -> Self {
        Self {
            config,
            transport,
            dialog,
            form,
        }
    }

    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Start a registration attempt.
    ///
    /// The request body is built here; sending and handling the reply happen
    /// in the future passed to `spawn`. Always returns `false` so the caller
    /// can suppress native form submission.
    pub fn submit<S>(&self, request: RegistrationRequest, spawn: S) -> bool
    where
        S: FnOnce(LocalBoxFuture<'static, ()>),
    {
        match encode_registration(&request) {
            Ok(body) => {
                let client = self.clone();
                spawn(Box::pin(async move {
                    match client.send(body).await {
                        Ok(outcome) => debug!("Registration attempt finished: {:?}", outcome),
                        Err(e) => error!("Registration attempt failed: {}", e),
                    }
                }));
            }
            Err(e) => error!("Failed to build registration request: {}", e),
        }
        false
    }

    /// Awaitable form of [`submit`](Self::submit)
    #[instrument(skip(self, request), fields(username = %request.username), err)]
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> RegistrationResult<RegistrationOutcome> {
        let body = encode_registration(&request)?;
        self.send(body).await
    }

    async fn send(&self, body: String) -> RegistrationResult<RegistrationOutcome> {
        let url = self.config.endpoint_url();
        let exchange = self
            .transport
            .post_xml(&url, &self.config.content_type, body)
            .await?;
        self.handle_response(&exchange)
    }

    /// Classify a finished exchange and update the form and dialog
    pub fn handle_response(&self, exchange: &HttpExchange) -> RegistrationResult<RegistrationOutcome> {
        let outcome = classify(exchange)?;
        self.render(&outcome);
        Ok(outcome)
    }

    fn render(&self, outcome: &RegistrationOutcome) {
        if *outcome == RegistrationOutcome::Success {
            self.form.reset();
        }
        if let Some((title, message)) = outcome.dialog() {
            self.dialog.show(title, &message);
        }
    }

    pub fn dismiss(&self) {
        self.dialog.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::types::ReadyState;
    use crate::services::errors::RegistrationError;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use tracing_test::traced_test;

    struct MockTransport {
        reply: Result<HttpExchange, String>,
        requests: RefCell<Vec<(String, String, String)>>,
    }

    impl MockTransport {
        fn replying(reply: HttpExchange) -> Self {
            Self {
                reply: Ok(reply),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl RegistrationTransport for MockTransport {
        async fn post_xml(
            &self,
            url: &str,
            content_type: &str,
            body: String,
        ) -> RegistrationResult<HttpExchange> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), content_type.to_string(), body));
            self.reply
                .clone()
                .map_err(|message| RegistrationError::Transport { message })
        }
    }

    #[derive(Default)]
    struct RecordingView {
        shown: RefCell<Vec<(String, String)>>,
        dismissed: Cell<usize>,
        resets: Cell<usize>,
    }

    impl DialogHandle for RecordingView {
        fn show(&self, title: &str, message: &str) {
            self.shown
                .borrow_mut()
                .push((title.to_string(), message.to_string()));
        }

        fn dismiss(&self) {
            self.dismissed.set(self.dismissed.get() + 1);
        }
    }

    impl FormHandle for RecordingView {
        fn reset(&self) {
            self.resets.set(self.resets.get() + 1);
        }
    }

    fn setup(transport: MockTransport) -> (RegistrationClient, Rc<MockTransport>, Rc<RecordingView>) {
        let transport = Rc::new(transport);
        let view = Rc::new(RecordingView::default());
        let client = RegistrationClient::new(
            RegistrationConfig::default(),
            transport.clone(),
            view.clone(),
            view.clone(),
        );
        (client, transport, view)
    }

    fn last_dialog(view: &RecordingView) -> Option<(String, String)> {
        view.shown.borrow().last().cloned()
    }

    #[tokio::test]
    async fn test_submit_returns_false_and_posts_once() {
        let (client, transport, _view) =
            setup(MockTransport::replying(HttpExchange::done(200, "OK", "<r><status>ok</status></r>")));

        let mut spawned = Vec::new();
        let allow_native = client.submit(
            RegistrationRequest::new("alice", "pw1", "pw2"),
            |task| spawned.push(task),
        );
        assert!(!allow_native);
        assert_eq!(spawned.len(), 1);
        // Nothing is sent until the spawned task runs
        assert!(transport.requests.borrow().is_empty());

        for task in spawned {
            task.await;
        }

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        let (url, content_type, body) = &requests[0];
        assert_eq!(url, "/CAFrontEnd/rest/user/register");
        assert_eq!(content_type, "text/xml");
        assert_eq!(
            body,
            "<registration><username>alice</username><password>pw1</password>\
             <registerPassword>pw2</registerPassword></registration>"
        );
    }

    #[tokio::test]
    async fn test_submit_with_empty_fields_still_posts() {
        let (client, transport, _view) =
            setup(MockTransport::replying(HttpExchange::done(200, "OK", "")));

        let mut spawned = Vec::new();
        assert!(!client.submit(RegistrationRequest::default(), |task| spawned.push(task)));
        for task in spawned {
            task.await;
        }

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].2.contains("<username></username>"));
        assert!(requests[0].2.contains("<registerPassword></registerPassword>"));
    }

    #[tokio::test]
    async fn test_unauthorized_ignores_body() {
        let (client, _transport, view) =
            setup(MockTransport::replying(HttpExchange::done(401, "Unauthorized", "garbage <<<")));

        let outcome = client
            .register(RegistrationRequest::new("a", "b", "b"))
            .await
            .unwrap();
        assert_eq!(outcome, RegistrationOutcome::Unauthorized);
        assert_eq!(
            last_dialog(&view),
            Some((
                "Unauthorized".to_string(),
                "An authentication error occurred.".to_string()
            ))
        );
        assert_eq!(view.resets.get(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_with_empty_body_is_ignored() {
        let (client, _transport, view) =
            setup(MockTransport::replying(HttpExchange::done(401, "Unauthorized", "")));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(outcome, RegistrationOutcome::Ignored(IgnoreReason::EmptyBody));
        assert!(view.shown.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_bad_request_relays_server_message() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            400,
            "Bad Request",
            "<result><status>fail</status><message>Username taken</message></result>",
        )));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::BadRequest {
                status: "fail".to_string(),
                message: "Username taken".to_string()
            }
        );
        assert_eq!(
            last_dialog(&view),
            Some(("Bad Request".to_string(), "Username taken".to_string()))
        );
    }

    #[tokio::test]
    async fn test_success_resets_form_for_any_ok_case() {
        for token in ["OK", "ok", "Ok"] {
            let body = format!("<result method=\"register\"><status>{}</status></result>", token);
            let (client, _transport, view) =
                setup(MockTransport::replying(HttpExchange::done(200, "OK", body)));

            let outcome = client.register(RegistrationRequest::default()).await.unwrap();
            assert_eq!(outcome, RegistrationOutcome::Success);
            assert_eq!(view.resets.get(), 1);
            assert_eq!(
                last_dialog(&view),
                Some((
                    "Registration Complete".to_string(),
                    "Your account has been set up.".to_string()
                ))
            );
        }
    }

    #[tokio::test]
    async fn test_wrong_method_is_silent() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            200,
            "OK",
            "<result method=\"login\"><status>ok</status></result>",
        )));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::Ignored(IgnoreReason::UnrecognizedReply)
        );
        assert!(view.shown.borrow().is_empty());
        assert_eq!(view.resets.get(), 0);
    }

    #[tokio::test]
    async fn test_method_token_is_case_sensitive() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            200,
            "OK",
            "<result method=\"Register\"><status>ok</status></result>",
        )));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::Ignored(IgnoreReason::UnrecognizedReply)
        );
        assert_eq!(view.resets.get(), 0);
    }

    #[tokio::test]
    async fn test_non_ok_status_on_success_path_is_silent() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            200,
            "OK",
            "<result method=\"register\"><status>pending</status></result>",
        )));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::Ignored(IgnoreReason::UnrecognizedReply)
        );
        assert!(view.shown.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_shows_network_error() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            500,
            "Internal Server Error",
            "<html>boom</html>",
        )));

        let outcome = client.register(RegistrationRequest::default()).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::NetworkError {
                status_text: "Internal Server Error".to_string(),
                status: 500
            }
        );
        assert_eq!(
            last_dialog(&view),
            Some((
                "Network Error".to_string(),
                "Error status: 'Internal Server Error' (500)".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error_without_dialog() {
        let (client, _transport, view) =
            setup(MockTransport::replying(HttpExchange::done(200, "OK", "not xml")));

        let result = client.register(RegistrationRequest::default()).await;
        assert!(matches!(result, Err(RegistrationError::MalformedXml { .. })));
        assert!(view.shown.borrow().is_empty());
        assert_eq!(view.resets.get(), 0);
    }

    #[tokio::test]
    async fn test_bad_request_without_message_is_an_error() {
        let (client, _transport, view) = setup(MockTransport::replying(HttpExchange::done(
            400,
            "Bad Request",
            "<result><status>fail</status></result>",
        )));

        let result = client.register(RegistrationRequest::default()).await;
        assert!(matches!(
            result,
            Err(RegistrationError::MissingElement { ref element }) if element == "message"
        ));
        assert!(view.shown.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_shows_nothing() {
        let (client, transport, view) = setup(MockTransport::failing("connection refused"));

        let mut spawned = Vec::new();
        assert!(!client.submit(RegistrationRequest::default(), |task| spawned.push(task)));
        for task in spawned {
            task.await;
        }

        assert_eq!(transport.requests.borrow().len(), 1);
        assert!(view.shown.borrow().is_empty());
    }

    #[test]
    fn test_incomplete_exchange_is_ignored() {
        let (client, _transport, view) =
            setup(MockTransport::replying(HttpExchange::done(200, "OK", "")));

        for ready_state in [
            ReadyState::Unsent,
            ReadyState::Opened,
            ReadyState::HeadersReceived,
            ReadyState::Loading,
        ] {
            let exchange = HttpExchange {
                ready_state,
                status: 401,
                status_text: "Unauthorized".to_string(),
                body: Some("<r/>".to_string()),
            };
            let outcome = client.handle_response(&exchange).unwrap();
            assert_eq!(outcome, RegistrationOutcome::Ignored(IgnoreReason::Incomplete));
        }
        assert!(view.shown.borrow().is_empty());
    }

    #[test]
    fn test_dismiss_forwards_to_dialog() {
        let (client, _transport, view) =
            setup(MockTransport::replying(HttpExchange::done(200, "OK", "")));
        client.dismiss();
        assert_eq!(view.dismissed.get(), 1);
    }

    #[test]
    fn test_outcome_dialog_text() {
        assert_eq!(RegistrationOutcome::Ignored(IgnoreReason::EmptyBody).dialog(), None);
        assert_eq!(
            RegistrationOutcome::NetworkError {
                status_text: "".to_string(),
                status: 0
            }
            .dialog(),
            Some(("Network Error", "Error status: '' (0)".to_string()))
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_reply_body_logged_only_on_ok_status() {
        let (client, _transport, _view) = setup(MockTransport::replying(HttpExchange::done(
            502,
            "Bad Gateway",
            "<upstream>gateway-detail</upstream>",
        )));
        client.register(RegistrationRequest::default()).await.unwrap();
        assert!(logs_contain("Network status: 'Bad Gateway' (502)"));
        assert!(!logs_contain("gateway-detail"));

        let (client, _transport, _view) = setup(MockTransport::replying(HttpExchange::done(
            200,
            "OK",
            "<response><method>register</method><status>ok</status></response>",
        )));
        client.register(RegistrationRequest::default()).await.unwrap();
        assert!(logs_contain("<method>register</method>"));
    }
}
