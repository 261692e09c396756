//! In-memory scripted transport for tests.
//!
//! Responses are queued per operation and consumed in order. Once an
//! operation's queue is empty its fallback (if any) is returned for every
//! further call, which suits timer-driven tests that poll many times.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{TransportError, TransportResult};
use crate::message::{RemoteRequest, RemoteResponse};
use crate::operations::Operation;
use crate::traits::Transport;

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with this response.
    Respond(RemoteResponse),
    /// Fail below the HTTP level.
    Fail(TransportError),
    /// Never answer; resolves only when the call is cancelled.
    Hang,
}

#[derive(Debug, Default)]
struct Script {
    queued: VecDeque<Scripted>,
    fallback: Option<Scripted>,
}

/// Transport that replays scripted answers and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<&'static str, Script>>,
    requests: Mutex<Vec<RemoteRequest>>,
}

impl ScriptedTransport {
    /// Empty script; every call fails until answers are pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw answer for operation `O`.
    pub fn push<O: Operation>(&self, answer: Scripted) -> &Self {
        self.scripts
            .lock()
            .entry(O::NAME)
            .or_default()
            .queued
            .push_back(answer);
        self
    }

    /// Queue a `200 OK` carrying `body`.
    ///
    /// # Panics
    ///
    /// Panics if `body` cannot be serialized to JSON.
    pub fn push_ok<O: Operation>(&self, body: impl Serialize) -> &Self {
        let body = serde_json::to_value(body).expect("scripted body must serialize");
        self.push::<O>(Scripted::Respond(RemoteResponse::ok(body)))
    }

    /// Queue a bodiless response with `status`.
    pub fn push_status<O: Operation>(&self, status: StatusCode) -> &Self {
        self.push::<O>(Scripted::Respond(RemoteResponse::status(status)))
    }

    /// Queue a transport-level failure.
    pub fn push_error<O: Operation>(&self, error: TransportError) -> &Self {
        self.push::<O>(Scripted::Fail(error))
    }

    /// Queue a call that never answers.
    pub fn push_hang<O: Operation>(&self) -> &Self {
        self.push::<O>(Scripted::Hang)
    }

    /// Answer used for `O` once its queue is drained.
    pub fn set_fallback<O: Operation>(&self, answer: Scripted) -> &Self {
        self.scripts.lock().entry(O::NAME).or_default().fallback = Some(answer);
        self
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().clone()
    }

    /// Requests executed for operation `O`, in order.
    pub fn requests_for<O: Operation>(&self) -> Vec<RemoteRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.operation == O::NAME)
            .cloned()
            .collect()
    }

    /// Number of calls made for operation `O`.
    pub fn calls<O: Operation>(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.operation == O::NAME)
            .count()
    }

    fn next_answer(&self, operation: &'static str) -> Option<Scripted> {
        let mut scripts = self.scripts.lock();
        let script = scripts.get_mut(operation)?;
        script.queued.pop_front().or_else(|| script.fallback.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: RemoteRequest,
        cancel: CancellationToken,
    ) -> TransportResult<RemoteResponse> {
        let operation = request.operation;
        self.requests.lock().push(request);

        match self.next_answer(operation) {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Hang) => {
                cancel.cancelled().await;
                Err(TransportError::Cancelled)
            }
            None => Err(TransportError::Internal(format!(
                "no scripted answer for {operation}"
            ))),
        }
    }
}
