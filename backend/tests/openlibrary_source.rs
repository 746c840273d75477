//! Drives `OpenLibraryHttpSource` against a local HTTP server that records
//! every request it receives.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use book_reviews::domain::Isbn;
use book_reviews::domain::ports::{BookMetadataSource, BookMetadataSourceError};
use book_reviews::outbound::openlibrary::{
    CUSTOM_AUTH_HEADER, CUSTOMER_ID_HEADER, OpenLibraryCredentials, OpenLibraryHttpSource,
};
use reqwest::Url;
use rstest::rstest;

const ISBN: &str = "9780596004651";
const EXPECTED_QUERY: &str = "jscmd=data&format=json&bibkeys=9780596004651";
const BOOK_BODY: &str = r#"{
    "9780596004651": {
        "publishers": [{ "name": "O'Reilly" }],
        "title": "Head first Java",
        "authors": [{ "name": "Kathy Sierra" }],
        "number_of_pages": 619,
        "subjects": [{ "name": "Java (Computer program language)" }],
        "cover": { "small": "https://covers.openlibrary.org/b/id/388761-S.jpg" }
    }
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedRequest {
    path: String,
    query: String,
    custom_auth: Option<String>,
    customer_id: Option<String>,
    accept: Option<String>,
}

struct Reply {
    status: StatusCode,
    body: &'static str,
}

struct StubState {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn record(req: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            path: req.path().to_owned(),
            query: req.query_string().to_owned(),
            custom_auth: header(&req, CUSTOM_AUTH_HEADER),
            customer_id: header(&req, CUSTOMER_ID_HEADER),
            accept: header(&req, "accept"),
        });
    HttpResponse::build(state.reply.status)
        .content_type("application/json")
        .body(state.reply.body)
}

struct StubServer {
    address: String,
    state: web::Data<StubState>,
    handle: ServerHandle,
}

impl StubServer {
    fn start(reply: Reply) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let address = format!("http://{}", listener.local_addr()?);
        let state = web::Data::new(StubState {
            reply,
            requests: Mutex::new(Vec::new()),
        });
        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .default_service(web::to(record))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Ok(Self {
            address,
            state,
            handle,
        })
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn source_for(base: &str) -> OpenLibraryHttpSource {
    OpenLibraryHttpSource::new(
        Url::parse(base).expect("stub base url"),
        Duration::from_secs(5),
        OpenLibraryCredentials {
            custom_auth: Some("Duke42".to_owned()),
            customer_id: Some("42".to_owned()),
        },
    )
    .expect("client builds")
}

fn isbn() -> Isbn {
    Isbn::new(ISBN).expect("valid isbn")
}

#[rstest]
#[actix_web::test]
async fn lookup_sends_bibkeys_query_and_credentials() {
    let server = StubServer::start(Reply {
        status: StatusCode::OK,
        body: BOOK_BODY,
    })
    .expect("stub server starts");
    let source = source_for(&server.address);

    let metadata = source
        .fetch_metadata_for_book(&isbn())
        .await
        .expect("metadata fetched");

    assert_eq!(metadata.title, "Head first Java");
    assert_eq!(metadata.pages, 619);
    assert_eq!(
        server.requests(),
        vec![RecordedRequest {
            path: "/api/books".to_owned(),
            query: EXPECTED_QUERY.to_owned(),
            custom_auth: Some("Duke42".to_owned()),
            customer_id: Some("42".to_owned()),
            accept: Some("application/json".to_owned()),
        }]
    );
    server.stop().await;
}

#[rstest]
#[actix_web::test]
async fn server_errors_surface_as_upstream_status() {
    let server = StubServer::start(Reply {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: r#"{"error":"boom"}"#,
    })
    .expect("stub server starts");
    let source = source_for(&server.address);

    let error = source
        .fetch_metadata_for_book(&isbn())
        .await
        .expect_err("500 must fail the lookup");

    assert!(
        matches!(
            &error,
            BookMetadataSourceError::UpstreamStatus { status: 500, message }
                if message.contains("boom")
        ),
        "unexpected error: {error:?}"
    );
    assert_eq!(server.requests().len(), 1);
    server.stop().await;
}

#[rstest]
#[actix_web::test]
async fn empty_lookup_result_is_not_found() {
    let server = StubServer::start(Reply {
        status: StatusCode::OK,
        body: "{}",
    })
    .expect("stub server starts");
    let source = source_for(&server.address);

    let error = source
        .fetch_metadata_for_book(&isbn())
        .await
        .expect_err("missing book must fail");

    assert!(
        matches!(&error, BookMetadataSourceError::NotFound { isbn } if isbn == ISBN),
        "unexpected error: {error:?}"
    );
    server.stop().await;
}

#[rstest]
#[case::without_trailing_slash("/openlibrary")]
#[case::with_trailing_slash("/openlibrary/")]
#[actix_web::test]
async fn base_path_prefix_is_kept(#[case] prefix: &str) {
    let server = StubServer::start(Reply {
        status: StatusCode::OK,
        body: BOOK_BODY,
    })
    .expect("stub server starts");
    let source = source_for(&format!("{}{prefix}", server.address));

    source
        .fetch_metadata_for_book(&isbn())
        .await
        .expect("metadata fetched");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/openlibrary/api/books");
    assert_eq!(requests[0].query, EXPECTED_QUERY);
    server.stop().await;
}
