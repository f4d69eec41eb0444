//! Exercises the Session wait/lookup semantics against an in-process HTTP
//! stub speaking just enough of the WebDriver wire protocol. Elements whose
//! selector contains "present" exist; everything else does not.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server};

use storefront_tester::browser::{new_session, BrowserConfig, Locator, Session};
use storefront_tester::error::FailureKind;

const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

async fn stub_webdriver(req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if method == Method::POST && path == "/session" {
        return Ok(json_response(
            r#"{"value":{"sessionId":"stub-session","capabilities":{}}}"#.to_string(),
        ));
    }

    if method == Method::POST && path.ends_with("/element") {
        let bytes = hyper::body::to_bytes(req.into_body())
            .await
            .unwrap_or_default();
        let payload = String::from_utf8_lossy(&bytes);
        if payload.contains("present") {
            return Ok(json_response(format!(
                r#"{{"value":{{"{ELEMENT_KEY}":"stub-element"}}}}"#
            )));
        }
        let body = r#"{"value":{"error":"no such element","message":"no such element: stub","stacktrace":""}}"#;
        let resp = Response::builder()
            .status(404)
            .header("content-type", "application/json; charset=utf-8")
            .body(Body::from(body))
            .expect("error response");
        return Ok(resp);
    }

    if method == Method::GET && path.ends_with("/text") {
        return Ok(json_response(
            r#"{"value":"Invalid credentials"}"#.to_string(),
        ));
    }

    if method == Method::GET && (path.ends_with("/displayed") || path.ends_with("/enabled")) {
        return Ok(json_response(r#"{"value":true}"#.to_string()));
    }

    Ok(json_response(r#"{"value":null}"#.to_string()))
}

fn json_response(body: String) -> Response<Body> {
    Response::builder()
        .header("content-type", "application/json; charset=utf-8")
        .body(Body::from(body))
        .expect("stub response")
}

fn spawn_stub() -> SocketAddr {
    let make =
        make_service_fn(|_| async { Ok::<_, Infallible>(service_fn(stub_webdriver)) });
    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make);
    let addr = server.local_addr();
    tokio::spawn(async move {
        let _ = server.await;
    });
    addr
}

async fn stub_session(wait_timeout: Duration) -> Session {
    let addr = spawn_stub();
    let cfg = BrowserConfig {
        webdriver_url: format!("http://{addr}"),
        wait_timeout,
        ..BrowserConfig::default()
    };
    let driver = new_session(&cfg).await.expect("stub session should start");
    Session::new(driver, "http://storefront.test/", cfg.wait_timeout)
}

#[tokio::test]
async fn wait_for_reports_timeout_when_element_never_appears() {
    let session = stub_session(Duration::from_millis(400)).await;

    let err = session
        .wait_for(&Locator::id("missing-banner"))
        .await
        .expect_err("element never appears");
    assert_eq!(err.kind(), FailureKind::Timeout);
    assert!(err.to_string().contains("missing-banner"));

    session.close().await.expect("close");
}

#[tokio::test]
async fn zero_wait_deadline_reports_timeout_without_hanging() {
    let session = stub_session(Duration::from_millis(400)).await;

    let err = session
        .wait_for_with(&Locator::class("slow-widget"), Duration::ZERO)
        .await
        .expect_err("deadline already passed");
    assert_eq!(err.kind(), FailureKind::Timeout);

    session.close().await.expect("close");
}

#[tokio::test]
async fn unwaited_find_reports_element_not_found() {
    let session = stub_session(Duration::from_millis(400)).await;

    let err = session
        .find(&Locator::id("missing-banner"))
        .await
        .expect_err("absent element");
    assert_eq!(err.kind(), FailureKind::ElementNotFound);

    session.close().await.expect("close");
}

#[tokio::test]
async fn wait_for_returns_the_element_and_reads_its_text() {
    let session = stub_session(Duration::from_millis(400)).await;

    session.open("/login").await.expect("navigate");
    let banner = session
        .wait_for(&Locator::id("present-banner"))
        .await
        .expect("element exists");
    let text = session.text_of(&banner).await.expect("text");
    assert_eq!(text, "Invalid credentials");
    session.click(&banner).await.expect("click");

    session.close().await.expect("close");
}

#[tokio::test]
async fn base_url_join_strips_duplicate_slash() {
    let session = stub_session(Duration::from_millis(400)).await;
    assert_eq!(session.base_url(), "http://storefront.test");
    session.close().await.expect("close");
}
