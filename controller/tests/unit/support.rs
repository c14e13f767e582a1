//! Shared test fixtures

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use marathonctl::errors::ControllerError;
use marathonctl::http::client::{HttpReply, Orchestrator};
use marathonctl::task::descriptor::TaskDescriptor;

/// A request seen by the fake orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Get(String),
    Put(String, Value),
}

enum Scripted {
    Reply(HttpReply),
    TransportError,
}

#[derive(Default)]
struct FakeState {
    replies: VecDeque<Scripted>,
    requests: Vec<Recorded>,
}

/// Orchestrator returning scripted replies in order and recording requests
#[derive(Clone, Default)]
pub struct FakeOrchestrator {
    state: Arc<Mutex<FakeState>>,
}

impl FakeOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Scripted::Reply(HttpReply::new(status, body)));
        self
    }

    pub fn transport_error(self) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Scripted::TransportError);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    fn next(&self, request: Recorded) -> Result<HttpReply, ControllerError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        match state.replies.pop_front() {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::TransportError) => Err(ControllerError::IoError(
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            )),
            None => panic!("unexpected request"),
        }
    }
}

#[async_trait]
impl Orchestrator for FakeOrchestrator {
    async fn get(&self, url: &str) -> Result<HttpReply, ControllerError> {
        self.next(Recorded::Get(url.to_string()))
    }

    async fn put(&self, url: &str, body: &Value) -> Result<HttpReply, ControllerError> {
        self.next(Recorded::Put(url.to_string(), body.clone()))
    }
}

pub const APP_URL: &str = "http://marathon:8080/v2/apps//team/web";

pub fn descriptor() -> TaskDescriptor {
    let mut descriptor = TaskDescriptor::from_value(
        json!({
            "endpoint": "http://marathon:8080",
            "id": "/team/web",
            "instances": 2,
            "cpus": 0.5,
        }),
        2,
        "registry/web:1",
    )
    .unwrap();
    descriptor.prepare_for_submission("alice", "build-01");
    descriptor
}
