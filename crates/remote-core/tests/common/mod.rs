//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use remote_core::error::TransportError;
use remote_core::traits::Query;
use remote_core::{RemoteClient, Response, Result, Transport};

/// A request as seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What the mock does with a request.
pub enum Reply {
    /// Answer with a status and a body.
    Status(u16, Vec<u8>),
    /// Fail before any response exists.
    Fail(TransportError),
    /// Never answer.
    Hang,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Reply::Status(status, body.to_string().into_bytes())
    }

    pub fn empty(status: u16) -> Self {
        Reply::Status(status, Vec::new())
    }

    pub fn panel_error(status: u16, code: &str, detail: &str) -> Self {
        Reply::json(
            status,
            json!({"errors": [{"code": code, "status": status.to_string(), "detail": detail}]}),
        )
    }

    pub fn connection_refused() -> Self {
        Reply::Fail(TransportError::Connection {
            message: "connection refused".to_string(),
        })
    }
}

type Handler = Box<dyn Fn(&RecordedRequest) -> Reply + Send + Sync>;

/// Transport that answers from a handler and tracks body handles.
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<RecordedRequest>>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&RecordedRequest) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            opened: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Every body handed out has been released exactly once.
    pub fn assert_all_released(&self) {
        assert_eq!(
            self.opened(),
            self.released(),
            "response bodies opened vs released"
        );
    }

    async fn respond(&self, request: RecordedRequest) -> Result<Response> {
        let reply = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);

        match reply {
            Reply::Status(status, body) => {
                self.opened.fetch_add(1, Ordering::SeqCst);
                let released = self.released.clone();
                Ok(Response::new(status, body).on_release(move || {
                    released.fetch_add(1, Ordering::SeqCst);
                }))
            }
            Reply::Fail(err) => Err(err.into()),
            Reply::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: Query<'_>) -> Result<Response> {
        let request = RecordedRequest {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: None,
        };
        self.respond(request).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Response> {
        let request = RecordedRequest {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body,
        };
        self.respond(request).await
    }
}

pub fn client(
    handler: impl Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
) -> RemoteClient<MockTransport> {
    RemoteClient::new(MockTransport::new(handler))
}

/// A server record with a predictable uuid.
pub fn server(n: usize) -> Value {
    json!({
        "uuid": format!("server-{n:04}"),
        "settings": {"uuid": format!("server-{n:04}")},
        "process_configuration": {"stop": {"type": "command", "value": "stop"}}
    })
}

/// Body of one `GET /servers` page.
pub fn servers_page(
    current_page: u32,
    last_page: u32,
    servers: impl IntoIterator<Item = usize>,
) -> Value {
    let data: Vec<Value> = servers.into_iter().map(server).collect();
    json!({
        "data": data,
        "meta": {"current_page": current_page, "last_page": last_page}
    })
}

/// Serves `total` servers the way the Panel paginates them: pages are
/// 1-based and page 0 is treated as page 1.
pub fn paginated(total: usize) -> impl Fn(&RecordedRequest) -> Reply + Send + Sync + 'static {
    move |req| {
        assert_eq!(req.path, "/servers");
        let page: usize = req.query_param("page").unwrap().parse().unwrap();
        let per_page: usize = req.query_param("per_page").unwrap().parse().unwrap();

        let page = page.max(1);
        let last_page = total.div_ceil(per_page).max(1);
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total);

        Reply::json(200, servers_page(page as u32, last_page as u32, start..end.max(start)))
    }
}
