use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{PinError, PinRequest, RawResponse, Transport};

/// In-memory [`Transport`] that records every request and replays queued responses.
///
/// When the queue is empty, requests are answered with a `200` carrying a CID derived from
/// the number of requests seen so far.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    requests: Vec<PinRequest>,
    responses: VecDeque<Result<RawResponse, String>>,
}

impl RecordingTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.lock().responses.push_back(Ok(RawResponse { status, body: body.into() }));
        self
    }

    /// Queues a transport failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.lock().responses.push_back(Err(message.into()));
        self
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<PinRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: PinRequest) -> Result<RawResponse, PinError> {
        let mut recorded = self.lock();
        recorded.requests.push(request);
        let count = recorded.requests.len();

        match recorded.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(PinError::Transport(message)),
            None => Ok(RawResponse {
                status: 200,
                body: format!(
                    r#"{{"IpfsHash":"QmRecorded{}","PinSize":1,"Timestamp":"2024-01-01T00:00:00Z"}}"#,
                    count
                ),
            }),
        }
    }
}
