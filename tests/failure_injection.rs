//! Failure injection tests for the translating proxy.

use std::time::{Duration, Instant};

mod common;

use common::MockResponse;

const DOC: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>News &amp; Views</title>\n<style>h1 { color: red }</style>\n</head>\n\
<body>\n<h1>Headline</h1>\n<p>First <em>para</em>graph.</p>\n<noscript>Please enable scripts</noscript>\n\
<script>document.write('<p>dynamic</p>');</script>\n<p>Last</p>\n</body>\n</html>\n";

fn with_base(doc: &str, upstream: std::net::SocketAddr) -> String {
    doc.replace("</head>", &format!("<base href=\"http://{}/\"></head>", upstream))
}

#[tokio::test]
async fn test_translation_service_down() {
    let (upstream, _) = common::start_mock(|_| MockResponse::html(DOC)).await;
    let translator = common::dead_addr().await;
    let (proxy, shutdown) = common::start_proxy(common::test_config(upstream, translator)).await;

    let res = common::client()
        .get(format!("http://{}/proxy?lang=es", proxy))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), with_base(DOC, upstream));

    shutdown.trigger();
}

#[tokio::test]
async fn test_translation_service_errors() {
    let (upstream, _) = common::start_mock(|_| MockResponse::html(DOC)).await;
    let (translator, calls) = common::start_translator(|q, _| match q {
        "Headline" => MockResponse::new(429, "application/json", r#"{"error":"slow down"}"#),
        "First " => MockResponse::new(200, "application/json", "not json"),
        "para" => MockResponse::new(200, "application/json", r#"{"translatedText":""}"#),
        "graph." => MockResponse::new(200, "application/json", r#"{"something":"else"}"#),
        _ => MockResponse::new(500, "text/plain", "boom"),
    })
    .await;
    let mut config = common::test_config(upstream, translator);
    config.translation.concurrency = 4;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let body = common::client()
        .get(format!("http://{}/proxy?lang=zh-CN", proxy))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, with_base(DOC, upstream));

    let mut sent: Vec<String> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.json()["q"].as_str().unwrap_or_default().to_string())
        .collect();
    sent.sort();
    assert_eq!(sent, vec!["First ", "Headline", "Last", "News & Views", "graph.", "para"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_hung_translation_times_out() {
    let (upstream, _) = common::start_mock(|_| MockResponse::html("<p>Slow</p><p>Fast</p>")).await;
    let (translator, _) = common::start_translator(|q, _| match q {
        "Slow" => MockResponse::translated("never").delayed(Duration::from_secs(30)),
        _ => MockResponse::translated("rápido"),
    })
    .await;
    let mut config = common::test_config(upstream, translator);
    config.translation.timeout_ms = 300;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let start = Instant::now();
    let body = common::within(10, async {
        common::client()
            .get(format!("http://{}/proxy?lang=es", proxy))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    })
    .await;

    assert_eq!(body, "<p>Slow</p><p>rápido</p>");
    assert!(start.elapsed() < Duration::from_secs(5));

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_unreachable_is_bad_gateway() {
    let upstream = common::dead_addr().await;
    let translator = common::dead_addr().await;
    let (proxy, shutdown) = common::start_proxy(common::test_config(upstream, translator)).await;

    let res = common::client()
        .get(format!("http://{}/proxy", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    assert_eq!(res.text().await.unwrap(), "Upstream request failed");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_timeout_is_gateway_timeout() {
    let (upstream, _) = common::start_mock(|_| {
        MockResponse::html("<p>late</p>").delayed(Duration::from_secs(10))
    })
    .await;
    let translator = common::dead_addr().await;
    let mut config = common::test_config(upstream, translator);
    config.proxy.upstream_timeout_secs = 1;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let res = common::within(8, common::client().get(format!("http://{}/proxy", proxy)).send())
        .await
        .unwrap();

    assert_eq!(res.status(), 504);

    shutdown.trigger();
}

#[tokio::test]
async fn test_stalled_upstream_body_is_cut_off() {
    let (upstream, _) = common::start_mock(|_| {
        MockResponse::html("<p>partial").stalled(Duration::from_secs(60))
    })
    .await;
    let translator = common::dead_addr().await;
    let mut config = common::test_config(upstream, translator);
    config.proxy.upstream_idle_timeout_secs = 1;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let start = Instant::now();
    let body = common::within(8, async {
        let res = common::client()
            .get(format!("http://{}/proxy?lang=es", proxy))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        res.bytes().await
    })
    .await;

    assert!(body.is_err(), "a cut-off body must not look complete");
    assert!(start.elapsed() < Duration::from_secs(6));

    shutdown.trigger();
}

#[tokio::test]
async fn test_stalled_non_html_body_is_cut_off() {
    let (upstream, _) = common::start_mock(|_| {
        MockResponse::new(200, "application/octet-stream", vec![7u8; 100]).stalled(Duration::from_secs(60))
    })
    .await;
    let translator = common::dead_addr().await;
    let mut config = common::test_config(upstream, translator);
    config.proxy.upstream_idle_timeout_secs = 1;
    let (proxy, shutdown) = common::start_proxy(config).await;

    let body = common::within(8, async {
        common::client()
            .get(format!("http://{}/proxy", proxy))
            .send()
            .await
            .unwrap()
            .bytes()
            .await
    })
    .await;

    assert!(body.is_err());

    shutdown.trigger();
}

#[tokio::test]
async fn test_unsupported_language_falls_back_to_english() {
    let (upstream, _) = common::start_mock(|_| MockResponse::html("<b>Hi</b>")).await;
    let (translator, calls) = common::start_translator(|_, target| MockResponse::translated(target)).await;
    let mut config = common::test_config(upstream, translator);
    config.translation.languages = vec![
        translating_proxy::Language::En,
        translating_proxy::Language::ZhCn,
    ];
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();

    let body = client
        .get(format!("http://{}/proxy?lang=es", proxy))
        .header("accept-language", "es-ES")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "<b>en</b>");
    assert_eq!(calls.lock().unwrap().len(), 1);

    shutdown.trigger();
}
