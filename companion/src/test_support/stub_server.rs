//! Actix server answering canned JSON responses.
//!
//! Routes match on method and a prefix of the request target (path and
//! query). Every request is recorded so tests can assert on what was sent.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    body: String,
    delay: Duration,
}

impl StubResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

struct StubState {
    routes: Vec<(String, String, StubResponse)>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubState {
    fn route(&self, request: &RecordedRequest) -> StubResponse {
        self.routes
            .iter()
            .find(|(method, prefix, _)| {
                *method == request.method && request.target.starts_with(prefix.as_str())
            })
            .map(|(_, _, response)| response.clone())
            .unwrap_or_else(|| StubResponse::json(404, r#"{"code":"NotFound"}"#))
    }
}

pub struct StubServer {
    base_url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<(&str, &str, StubResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            routes: routes
                .into_iter()
                .map(|(method, prefix, response)| (method.to_owned(), prefix.to_owned(), response))
                .collect(),
            requests: Arc::clone(&requests),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .listen(listener)
        .expect("bind stub server")
        .disable_signals()
        .run();
        tokio::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("stub url"),
            requests,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests mutex").clone()
    }
}

async fn respond(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    let recorded = RecordedRequest {
        method: request.method().as_str().to_owned(),
        target: request
            .uri()
            .path_and_query()
            .map_or_else(|| request.path().to_owned(), ToString::to_string),
        headers: request
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let response = state.route(&recorded);
    state.requests.lock().expect("requests mutex").push(recorded);

    tokio::time::sleep(response.delay).await;
    let status = StatusCode::from_u16(response.status).expect("valid stub status");
    HttpResponse::build(status)
        .content_type("application/json")
        .body(response.body)
}
