//! In-process doubles shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{ChatCompletionRequest, GatewayError, LlmGateway, StreamHandle};
use crate::ports::session_store::{SessionStore, StoreError};
use async_trait::async_trait;
use relay_domain::{Message, SessionId, StreamEvent, SystemPromptChange, Transcript};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// What the gateway does for one call
pub(crate) enum Script {
    /// Emit these events, then close the stream
    Events(Vec<StreamEvent>),
    /// Forward whatever the test pushes into the paired sender
    Manual(mpsc::Receiver<StreamEvent>),
    /// Fail before streaming starts
    Reject(GatewayError),
}

pub(crate) struct ScriptedGateway {
    configured: bool,
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedGateway {
    pub(crate) fn new(scripts: Vec<Script>) -> Self {
        Self {
            configured: true,
            scripts: Mutex::new(scripts.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(vec![])
        }
    }

    pub(crate) fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn stream_chat(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<StreamHandle, GatewayError> {
        self.requests.lock().unwrap().push(request);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Other("no script left".into()))?;

        match script {
            Script::Events(events) => {
                let (tx, rx) = mpsc::channel(events.len().max(1));
                for event in events {
                    tx.try_send(event).unwrap();
                }
                Ok(StreamHandle::new(rx))
            }
            Script::Manual(rx) => Ok(StreamHandle::new(rx)),
            Script::Reject(error) => Err(error),
        }
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    sessions: Mutex<HashMap<SessionId, Transcript>>,
    next_id: AtomicUsize,
}

impl MemoryStore {
    /// Pre-populate a session with committed exchanges
    pub(crate) fn seed(&self, id: &str, exchanges: &[(Option<&str>, &str, &str)]) {
        let mut sessions = self.sessions.lock().unwrap();
        let transcript = sessions
            .entry(SessionId::try_new(id).unwrap())
            .or_default();
        for (system, user, assistant) in exchanges {
            transcript.commit_exchange(*system, *user, *assistant);
        }
    }

    pub(crate) fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl SessionStore for MemoryStore {
    fn create(&self) -> Result<SessionId, StoreError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = SessionId::try_new(format!("test-session-{}", n)).unwrap();
        self.sessions
            .lock()
            .unwrap()
            .insert(id.clone(), Transcript::new());
        Ok(id)
    }

    fn ensure_initialized(&self, session_id: &SessionId) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .entry(session_id.clone())
            .or_default();
        Ok(())
    }

    fn clear(&self, session_id: &SessionId) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        let existed = sessions.contains_key(session_id);
        sessions.entry(session_id.clone()).or_default().clear();
        Ok(existed)
    }

    fn read_snapshot(&self, session_id: &SessionId) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(session_id)
            .map(|transcript| transcript.messages().to_vec())
            .unwrap_or_default())
    }

    fn commit_exchange(
        &self,
        session_id: &SessionId,
        system_prompt: Option<&str>,
        user: &str,
        assistant: &str,
    ) -> Result<SystemPromptChange, StoreError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .entry(session_id.clone())
            .or_default()
            .commit_exchange(system_prompt, user, assistant))
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type());
    }
}
