#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::http::{header, StatusCode};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use risk_client::FormFields;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Copy)]
struct Reply {
    status: u16,
    body: &'static str,
}

/// Stand-in prediction service answering every `POST /predict` with one canned reply.
pub struct StubService {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubService {
    pub fn start(status: u16, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let reply = Reply { status, body };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(recorded.clone()))
                .app_data(web::Data::new(reply))
                .route("/predict", web::post().to(predict))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub service");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("stub lock").clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn predict(
    req: HttpRequest,
    body: web::Bytes,
    recorded: web::Data<Arc<Mutex<Vec<RecordedRequest>>>>,
    reply: web::Data<Reply>,
) -> HttpResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorded.lock().expect("stub lock").push(RecordedRequest {
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    HttpResponse::build(StatusCode::from_u16(reply.status).expect("valid status"))
        .content_type("application/json")
        .body(reply.body)
}

/// A base URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn sample_fields() -> FormFields {
    FormFields::new("30", "120", "80", "70", "98.6", "7.0")
}
