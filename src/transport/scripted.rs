// Scripted transport for unit tests: replays queued results and records requests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::Transport;
use crate::error_handling::RequestError;
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse, RequestError>>>,
    seen: Mutex<Vec<(RequestDescriptor, Option<Duration>)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, response: RawResponse) -> Self {
        self.replies.lock().expect("lock poisoned").push_back(Ok(response));
        self
    }

    pub(crate) fn fail(self, error: RequestError) -> Self {
        self.replies.lock().expect("lock poisoned").push_back(Err(error));
        self
    }

    pub(crate) fn redirect(self, location: &str) -> Self {
        self.reply(RawResponse::new(
            302,
            vec![("location".to_string(), location.to_string())],
            Vec::new(),
        ))
    }

    pub(crate) fn ok(self, body: &str) -> Self {
        self.reply(RawResponse::new(200, Vec::new(), body))
    }

    pub(crate) fn requests(&self) -> Vec<RequestDescriptor> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    pub(crate) fn timeouts(&self) -> Vec<Option<Duration>> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(_, timeout)| *timeout)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, RequestError> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .push((request.clone(), timeout));
        self.replies
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {}", request.url()))
    }
}
