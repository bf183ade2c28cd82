use super::{drive_until_idle, setup_widget};
use crate::backend::{Backend, HttpBackend, Question, FALLBACK_ANSWER};
use crate::widget::{ASK_LABEL, ERROR_MESSAGE};
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

/// (content type, body) of every request the stub server saw
type Captured = Arc<Mutex<Vec<(String, String)>>>;

/// Test helper to run a stub backend that always replies with `status` and `body`
async fn spawn_stub(status: StatusCode, body: &'static str) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let seen = captured.clone();
    let app = Router::new().route(
        "/",
        post(move |headers: HeaderMap, request_body: String| {
            let seen = seen.clone();
            async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push((content_type, request_body));
                (status, body)
            }
        }),
    );
    (serve(app).await, captured)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn backend(endpoint: String) -> HttpBackend {
    HttpBackend::new(endpoint, Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_posts_url_encoded_form() {
    let (endpoint, captured) = spawn_stub(StatusCode::OK, r#"{"answer": "4"}"#).await;
    let question = Question::parse("What is 2+2?").unwrap();

    let answer = assert_ok!(backend(endpoint).ask(&question).await);

    assert_eq!(answer.as_str(), "4");
    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "application/x-www-form-urlencoded");
    assert_eq!(requests[0].1, "question=What%20is%202%2B2%3F");
}

#[tokio::test]
async fn test_missing_answer_falls_back() {
    let (endpoint, _captured) = spawn_stub(StatusCode::OK, "{}").await;
    let question = Question::parse("hi").unwrap();

    let answer = backend(endpoint).ask(&question).await.unwrap();

    assert_eq!(answer.as_str(), FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_error_status_is_request_failure() {
    let (endpoint, _captured) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, r#"{"answer": "x"}"#).await;
    let question = Question::parse("hi").unwrap();

    let err = assert_err!(backend(endpoint).ask(&question).await);

    assert!(err.cause().contains("500"));
}

#[tokio::test]
async fn test_malformed_json_is_request_failure() {
    let (endpoint, _captured) = spawn_stub(StatusCode::OK, "<html>not json</html>").await;
    let question = Question::parse("hi").unwrap();

    let err = backend(endpoint).ask(&question).await.unwrap_err();

    assert!(err.cause().starts_with("decode error"));
}

#[tokio::test]
async fn test_unreachable_server_is_request_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    let question = Question::parse("hi").unwrap();

    let err = backend(endpoint).ask(&question).await.unwrap_err();

    assert!(err.cause().starts_with("network error"));
}

#[tokio::test]
async fn test_hung_server_times_out() {
    let app = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "{}"
        }),
    );
    let endpoint = serve(app).await;
    let question = Question::parse("hi").unwrap();

    let slow = HttpBackend::new(endpoint, Some(Duration::from_millis(200))).unwrap();
    let err = slow.ask(&question).await.unwrap_err();

    assert!(err.cause().starts_with("no response after"));
}

#[tokio::test]
async fn test_widget_round_trip_over_http() {
    let (endpoint, captured) = spawn_stub(StatusCode::OK, "{}").await;
    let (mut widget, mut receiver) = setup_widget(Arc::new(backend(endpoint)));

    widget.submit_question("What is 2+2?");
    drive_until_idle(&mut widget, &mut receiver).await;

    assert_eq!(captured.lock().unwrap().len(), 1);
    assert_eq!(widget.display().text(), format!("Q: What is 2+2?\n{}", FALLBACK_ANSWER));
    assert_eq!(widget.submit_control().label, ASK_LABEL);
}

#[tokio::test]
async fn test_widget_shows_error_when_server_fails() {
    let (endpoint, _captured) = spawn_stub(StatusCode::BAD_GATEWAY, "").await;
    let (mut widget, mut receiver) = setup_widget(Arc::new(backend(endpoint)));

    widget.submit_question("What is 2+2?");
    drive_until_idle(&mut widget, &mut receiver).await;

    assert_eq!(widget.display().nodes()[1].text, ERROR_MESSAGE);
    assert!(widget.submit_control().enabled);
}
