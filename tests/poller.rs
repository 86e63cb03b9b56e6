// tests/poller.rs

//! Timing behaviour of the URL readiness poller, exercised against real
//! local listeners with a short retry interval.

use std::error::Error;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::sleep;

use waitrun::errors::PipelineError;
use waitrun::wait::poller::{poll_all_every, poll_url_every};

type TestResult = Result<(), Box<dyn Error>>;

const INTERVAL: Duration = Duration::from_millis(50);
const HTTP_OK: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
const HTTP_ERROR: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
const NOT_HTTP: &[u8] = b"definitely not http\n";

/// Answer every connection with a fixed byte response.
async fn serve(listener: TcpListener, body: &'static [u8]) {
    loop {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(body).await;
            let _ = socket.shutdown().await;
        });
    }
}

/// Grab a local port nothing is listening on.
async fn closed_port() -> Result<u16, Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

#[tokio::test]
async fn reachable_url_is_ready_immediately() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://127.0.0.1:{}/", listener.local_addr()?.port());
    tokio::spawn(serve(listener, HTTP_OK));

    let client = reqwest::Client::new();
    let started = Instant::now();
    poll_url_every(&client, &url, Duration::from_secs(5), INTERVAL).await?;

    assert!(started.elapsed() < Duration::from_secs(1));
    Ok(())
}

#[tokio::test]
async fn non_2xx_responses_count_as_ready() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://127.0.0.1:{}/", listener.local_addr()?.port());
    tokio::spawn(serve(listener, HTTP_ERROR));

    let client = reqwest::Client::new();
    poll_url_every(&client, &url, Duration::from_secs(5), INTERVAL).await?;
    Ok(())
}

#[tokio::test]
async fn a_non_http_responder_counts_as_ready() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://127.0.0.1:{}/", listener.local_addr()?.port());
    tokio::spawn(serve(listener, NOT_HTTP));

    let client = reqwest::Client::new();
    poll_url_every(&client, &url, Duration::from_secs(5), INTERVAL).await?;
    Ok(())
}

#[tokio::test]
async fn url_becomes_ready_only_after_the_server_starts() -> TestResult {
    let port = closed_port().await?;
    let url = format!("http://127.0.0.1:{port}/");

    let delay = Duration::from_millis(300);
    let server = tokio::spawn(async move {
        sleep(delay).await;
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("rebinding the reserved port");
        serve(listener, HTTP_OK).await;
    });

    let client = reqwest::Client::new();
    let started = Instant::now();
    poll_url_every(&client, &url, Duration::from_secs(5), INTERVAL).await?;
    let elapsed = started.elapsed();

    assert!(
        elapsed >= delay,
        "reported ready after {elapsed:?}, before the server was up"
    );
    server.abort();
    Ok(())
}

#[tokio::test]
async fn unreachable_url_times_out_near_the_deadline() -> TestResult {
    let port = closed_port().await?;
    let url = format!("http://127.0.0.1:{port}/");

    let client = reqwest::Client::new();
    let timeout = Duration::from_millis(500);
    let started = Instant::now();
    let err = poll_url_every(&client, &url, timeout, INTERVAL)
        .await
        .expect_err("nothing listens on the port");
    let elapsed = started.elapsed();

    assert!(matches!(err, PipelineError::WaitTimeout { .. }));
    assert!(elapsed >= timeout, "timed out early at {elapsed:?}");
    assert!(
        elapsed < timeout + Duration::from_millis(400),
        "timed out too late at {elapsed:?}"
    );
    Ok(())
}

#[tokio::test]
async fn sequential_urls_each_get_the_full_budget() -> TestResult {
    let ready = TcpListener::bind("127.0.0.1:0").await?;
    let ready_port = ready.local_addr()?.port();
    tokio::spawn(serve(ready, HTTP_OK));

    let dead_port = closed_port().await?;
    let urls = vec![
        format!("http://127.0.0.1:{ready_port}/"),
        format!("http://127.0.0.1:{dead_port}/"),
    ];

    let client = reqwest::Client::new();
    let timeout = Duration::from_millis(400);
    let started = Instant::now();
    let err = poll_all_every(&client, &urls, timeout, INTERVAL)
        .await
        .expect_err("the second url never comes up");
    let elapsed = started.elapsed();

    match err {
        PipelineError::WaitTimeout { url, .. } => {
            assert!(url.contains(&dead_port.to_string()))
        }
        other => panic!("expected WaitTimeout, got {other}"),
    }

    // The ready url contributes negligible time; the dead one burns its own
    // full budget.
    assert!(elapsed >= timeout);
    assert!(
        elapsed < timeout * 3,
        "sequential wait took too long: {elapsed:?}"
    );
    Ok(())
}
