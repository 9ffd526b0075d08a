//! ConversationAdapter - Per-turn facade over the conversation protocol.
//!
//! One adapter handles exactly one webhook turn: it parses the body,
//! classifies the dialect, restores the dialog state from the token, runs
//! the optional session-start hook, and then lets the application's
//! callback read fields and reply with "ask" or "tell".
//!
//! Every validation failure is reported to the [`ErrorSink`] and surfaces
//! to the caller as `None` (or `false`), never as a panic.

use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use crate::domain::conversation::{
    self, dialog_state, extractor, ApiVersion, Argument, ArgumentValue, AskPrompt,
    AssistantResponse, DeviceLocation, Dialect, DialogState, ExpectedIntent, Input, InputPrompt,
    Permission, PermissionSpec, RequestBody, StandardIntent, State, TurnPhase, UserInfo,
    AGENT_VERSION_LABEL_HEADER,
};
use crate::domain::foundation::{ConversationError, StateMachine};
use crate::ports::{ErrorSink, WebhookTransport};

/// Hook run once, before any handler logic, when a new session starts.
///
/// It may seed the dialog state. Returning an error puts the adapter in
/// its terminal failed phase.
pub type SessionStartHook = Box<dyn FnOnce(&mut DialogState) -> Result<(), String> + Send>;

/// Construction options for [`ConversationAdapter`].
pub struct AdapterOptions {
    /// Version assumed when neither headers nor body declare one.
    pub default_api_version: ApiVersion,
    pub session_started: Option<SessionStartHook>,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            default_api_version: ApiVersion::new(1),
            session_started: None,
        }
    }
}

impl fmt::Debug for AdapterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("default_api_version", &self.default_api_version)
            .field("session_started", &self.session_started.is_some())
            .finish()
    }
}

/// Adapter for one webhook turn.
pub struct ConversationAdapter<T: WebhookTransport> {
    transport: T,
    error_sink: Arc<dyn ErrorSink>,
    body: RequestBody,
    api_version: ApiVersion,
    agent_version_label: Option<String>,
    dialog_state: DialogState,
    phase: TurnPhase,
}

impl<T: WebhookTransport> ConversationAdapter<T> {
    /// Creates an adapter with default options.
    pub fn new(transport: T, body: Value, error_sink: Arc<dyn ErrorSink>) -> Self {
        Self::with_options(transport, body, error_sink, AdapterOptions::default())
    }

    /// Creates an adapter for the turn carried by `transport` and `body`.
    pub fn with_options(
        transport: T,
        body: Value,
        error_sink: Arc<dyn ErrorSink>,
        options: AdapterOptions,
    ) -> Self {
        let api_version = conversation::classify(
            |name| transport.header(name),
            &body,
            &options.default_api_version,
        );
        let agent_version_label = transport
            .header(AGENT_VERSION_LABEL_HEADER)
            .map(str::to_string);

        let (body, malformed) = RequestBody::from_sections(body);
        for error in &malformed {
            error_sink.report(error);
        }

        let mut adapter = Self {
            transport,
            error_sink,
            body,
            api_version,
            agent_version_label,
            dialog_state: DialogState::default(),
            phase: TurnPhase::Initializing,
        };
        adapter.restore_dialog_state();
        adapter.start(options.session_started);
        adapter
    }

    fn restore_dialog_state(&mut self) {
        match dialog_state::decode(extractor::dialog_state_token(&self.body)) {
            Ok(state) => self.dialog_state = state,
            Err(e) => {
                self.report(&e);
                self.dialog_state = DialogState::default();
            }
        }
        tracing::debug!(
            state = self.dialog_state.state.as_ref().map(State::name),
            "Restored dialog state"
        );
    }

    fn start(&mut self, session_started: Option<SessionStartHook>) {
        let mut next = TurnPhase::AwaitingCallback;
        if let Some(hook) = session_started {
            if extractor::is_new_conversation(&self.body) {
                if let Err(reason) = hook(&mut self.dialog_state) {
                    self.report(&ConversationError::session_start_failed(reason));
                    next = TurnPhase::Failed;
                }
            }
        }
        // Initializing reaches both targets.
        if let Ok(phase) = self.phase.transition_to(next) {
            self.phase = phase;
        }
    }

    fn report(&self, error: &ConversationError) {
        self.error_sink.report(error);
    }

    fn reported<V>(&self, result: Result<V, ConversationError>) -> Option<V> {
        result.map_err(|e| self.report(&e)).ok()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Version
    // ════════════════════════════════════════════════════════════════════════

    /// True when the turn uses the current (camelCase) dialect.
    pub fn is_current_version(&self) -> bool {
        self.dialect().is_current()
    }

    pub fn dialect(&self) -> Dialect {
        self.api_version.dialect()
    }

    /// Resolved API version label.
    pub fn api_version(&self) -> &str {
        self.api_version.label()
    }

    /// Agent version label header, if the platform sent one.
    pub fn agent_version_label(&self) -> Option<&str> {
        self.agent_version_label.as_deref()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Turn state
    // ════════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&State> {
        self.dialog_state.state.as_ref()
    }

    pub fn set_state(&mut self, state: impl Into<State>) {
        self.dialog_state.state = Some(state.into());
    }

    pub fn clear_state(&mut self) {
        self.dialog_state.state = None;
    }

    pub fn data(&self) -> &Value {
        &self.dialog_state.data
    }

    pub fn data_mut(&mut self) -> &mut Value {
        &mut self.dialog_state.data
    }

    pub fn set_data(&mut self, data: Value) {
        self.dialog_state.data = data;
    }

    pub fn dialog_state(&self) -> &DialogState {
        &self.dialog_state
    }

    /// Releases the transport, e.g. to read the captured reply.
    pub fn into_transport(self) -> T {
        self.transport
    }

    // ════════════════════════════════════════════════════════════════════════
    // Request extraction
    // ════════════════════════════════════════════════════════════════════════

    /// First entry of the request's inputs.
    pub fn top_input(&self) -> Option<&Input> {
        self.reported(extractor::top_input(&self.body))
    }

    pub fn intent(&self) -> Option<&str> {
        self.reported(extractor::intent(&self.body))
    }

    /// Intent as a platform built-in, if it is one.
    pub fn standard_intent(&self) -> Option<StandardIntent> {
        self.intent().and_then(StandardIntent::from_name)
    }

    pub fn raw_input(&self) -> Option<&str> {
        self.reported(extractor::raw_input(&self.body))
    }

    pub fn arguments(&self) -> Option<&[Argument]> {
        self.reported(extractor::arguments(&self.body))
    }

    /// Raw argument object with the given name.
    pub fn argument_object(&self, name: &str) -> Option<&Argument> {
        self.reported(extractor::argument(&self.body, name))
    }

    /// Unwrapped argument value, rendered in the turn's dialect.
    pub fn argument(&self, name: &str) -> Option<ArgumentValue> {
        self.reported(extractor::argument_value(&self.body, name, self.dialect()))
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.reported(extractor::user(&self.body))
    }

    /// Device location; absence is not an error.
    pub fn device_location(&self) -> Option<DeviceLocation> {
        extractor::device_location(&self.body)
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.reported(extractor::conversation_id(&self.body))
    }

    pub fn is_permission_granted(&self) -> bool {
        self.reported(extractor::permission_granted(&self.body, self.dialect()))
            .unwrap_or(false)
    }

    pub fn is_new_conversation(&self) -> bool {
        extractor::is_new_conversation(&self.body)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Response building
    // ════════════════════════════════════════════════════════════════════════

    pub fn build_input_prompt(
        &self,
        is_ssml: bool,
        initial_prompt: &str,
        no_inputs: &[&str],
    ) -> Option<InputPrompt> {
        self.reported(conversation::build_input_prompt(
            is_ssml,
            initial_prompt,
            no_inputs,
        ))
    }

    pub fn build_expected_intent(&self, intent: &str) -> Option<ExpectedIntent> {
        self.reported(conversation::build_expected_intent(intent))
    }

    /// Builds an "ask" without sending it.
    ///
    /// The token carries `dialog_state` when given, otherwise the adapter's
    /// current state and data.
    pub fn build_ask_response(
        &self,
        prompt: impl Into<AskPrompt>,
        possible_intents: Vec<ExpectedIntent>,
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        self.reported(conversation::build_ask_response(
            prompt,
            possible_intents,
            dialog_state,
            &self.dialog_state,
        ))
    }

    pub fn build_tell_response(&self, text: &str) -> Option<AssistantResponse> {
        self.reported(conversation::build_tell_response(text))
    }

    pub fn build_permission_request(
        &self,
        spec: &PermissionSpec,
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        self.reported(conversation::build_permission_request(
            self.dialect(),
            spec,
            dialog_state,
            &self.dialog_state,
        ))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Replies
    // ════════════════════════════════════════════════════════════════════════

    /// Asks for free-form text and keeps the conversation open.
    pub fn ask(
        &mut self,
        prompt: impl Into<AskPrompt>,
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        let text_intent = ExpectedIntent::named(StandardIntent::Text.name(self.dialect()));
        self.ask_with_intents(prompt, vec![text_intent], dialog_state)
    }

    /// Asks with an explicit set of possible intents.
    pub fn ask_with_intents(
        &mut self,
        prompt: impl Into<AskPrompt>,
        possible_intents: Vec<ExpectedIntent>,
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        if let Err(e) = self.ensure_can_respond() {
            self.report(&e);
            return None;
        }
        let response = self.build_ask_response(prompt, possible_intents, dialog_state)?;
        self.respond(response)
    }

    /// Speaks `text` and ends the conversation.
    pub fn tell(&mut self, text: &str) -> Option<AssistantResponse> {
        if let Err(e) = self.ensure_can_respond() {
            self.report(&e);
            return None;
        }
        let response = self.build_tell_response(text)?;
        self.respond(response)
    }

    /// Asks the user to grant one or more permissions.
    pub fn ask_for_permissions(
        &mut self,
        context: &str,
        permissions: &[Permission],
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        if let Err(e) = self.ensure_can_respond() {
            self.report(&e);
            return None;
        }
        let spec = self.reported(PermissionSpec::new(context, permissions.iter().copied()))?;
        let response = self.build_permission_request(&spec, dialog_state)?;
        self.respond(response)
    }

    /// Asks the user to grant a single permission.
    pub fn ask_for_permission(
        &mut self,
        context: &str,
        permission: Permission,
        dialog_state: Option<&Value>,
    ) -> Option<AssistantResponse> {
        self.ask_for_permissions(context, &[permission], dialog_state)
    }

    fn ensure_can_respond(&self) -> Result<(), ConversationError> {
        match self.phase {
            TurnPhase::AwaitingCallback => Ok(()),
            TurnPhase::Failed => Err(ConversationError::AdapterFailed),
            TurnPhase::Initializing | TurnPhase::Responded => {
                Err(ConversationError::AlreadyResponded)
            }
        }
    }

    fn respond(&mut self, response: AssistantResponse) -> Option<AssistantResponse> {
        let body = self.reported(serde_json::to_value(&response).map_err(ConversationError::from))?;
        let sent = self.transport.send_json(StatusCode::OK, body);
        self.reported(sent)?;

        match self.phase.transition_to(TurnPhase::Responded) {
            Ok(phase) => self.phase = phase,
            Err(e) => tracing::warn!(error = %e, "Unexpected turn phase after responding"),
        }
        tracing::debug!(
            expect_user_response = response.expect_user_response(),
            dialect = ?self.dialect(),
            "Sent assistant response"
        );
        Some(response)
    }
}
