//! End-to-end tests against a throwaway local HTTP responder.

use calc_core::{
    ApiError, CalculationApi, CalculatorKind, EndpointConfig, FormState, ResultsView,
    StalePolicy, SubmissionController,
};
use calc_http::HttpCalculationApi;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the responder.
struct Captured {
    head: String,
    body: Value,
}

/// Accepts exactly one connection, records the request, and answers with
/// `status` and `body`.
async fn one_shot(
    status: u16,
    body: &'static str,
) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().unwrap())
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            head,
            body: serde_json::from_slice(&buf[header_end..header_end + content_length])
                .unwrap_or(Value::Null),
        }
    });

    (base, handle)
}

fn api_for(base: &str) -> HttpCalculationApi {
    HttpCalculationApi::new(&EndpointConfig::with_base_url(base)).unwrap()
}

#[tokio::test]
async fn posts_default_form_to_page_endpoint() {
    let (base, server) = one_shot(
        200,
        r#"{"numericalResults":{"Number of Cells":"116"},"aiExplanation":"ok"}"#,
    )
    .await;
    let api = api_for(&base);

    let form = FormState::with_defaults(CalculatorKind::CellularDesign);
    api.calculate(CalculatorKind::CellularDesign, &form)
        .await
        .unwrap();

    let captured = server.await.unwrap();
    assert!(
        captured.head.starts_with("POST /api/cellular-design "),
        "unexpected request line: {}",
        captured.head
    );
    assert!(captured.head.to_ascii_lowercase().contains("application/json"));
    assert_eq!(
        captured.body,
        json!({
            "totalAreaSqkm": "1000",
            "cellRadiusKm": "2",
            "numSubscribers": "50000",
            "callsPerHour": "2",
            "callDurationMin": "1.5",
            "blockingProb": "0.02",
            "sirDb": "9",
            "pathLossExp": "4"
        })
    );
}

#[tokio::test]
async fn success_renders_metrics_and_paragraphs() {
    let (base, server) = one_shot(
        200,
        r#"{"numericalResults":{"X":"5"},"aiExplanation":"line1\nline2"}"#,
    )
    .await;
    let api = api_for(&base);
    let form = FormState::with_defaults(CalculatorKind::Ofdm);
    let mut ctl = SubmissionController::new(CalculatorKind::Ofdm, StalePolicy::default());

    let view = ResultsView::from_state(ctl.submit(&form, &api).await);
    server.await.unwrap();

    let ResultsView::Report {
        metrics,
        paragraphs,
    } = view
    else {
        panic!("expected a report");
    };
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].to_string(), "X: 5");
    assert_eq!(paragraphs, vec!["line1", "line2"]);
}

#[tokio::test]
async fn error_status_shows_server_message() {
    let (base, server) = one_shot(400, r#"{"error":"bad input"}"#).await;
    let api = api_for(&base);
    let form = FormState::with_defaults(CalculatorKind::LinkBudget);
    let mut ctl = SubmissionController::new(CalculatorKind::LinkBudget, StalePolicy::default());

    let state = ctl.submit(&form, &api).await.clone();
    server.await.unwrap();

    assert_eq!(state.error(), Some("bad input"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn error_status_without_message_falls_back() {
    let (base, server) = one_shot(500, r#"{"detail":"trace"}"#).await;
    let api = api_for(&base);

    let err = api
        .calculate(
            CalculatorKind::WirelessSystem,
            &FormState::with_defaults(CalculatorKind::WirelessSystem),
        )
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: None
        }
    );
    assert_eq!(err.user_message(), "An error occurred.");
}

#[tokio::test]
async fn undecodable_success_body_is_an_error() {
    let (base, server) = one_shot(200, r#"{"unexpected":true}"#).await;
    let api = api_for(&base);

    let err = api
        .calculate(
            CalculatorKind::Ofdm,
            &FormState::with_defaults(CalculatorKind::Ofdm),
        )
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = api_for(&base);
    let form = FormState::with_defaults(CalculatorKind::Ofdm);
    let mut ctl = SubmissionController::new(CalculatorKind::Ofdm, StalePolicy::default());

    let state = ctl.submit(&form, &api).await;

    assert_eq!(state.error(), Some("An error occurred."));
}

#[tokio::test]
async fn configured_timeout_fails_the_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    // Accept and then sit on the connection without answering.
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        drop(socket);
    });

    let cfg = EndpointConfig {
        timeout_secs: Some(1),
        ..EndpointConfig::with_base_url(&base)
    };
    let api = HttpCalculationApi::new(&cfg).unwrap();

    let err = api
        .calculate(
            CalculatorKind::LinkBudget,
            &FormState::with_defaults(CalculatorKind::LinkBudget),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
