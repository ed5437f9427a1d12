use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coin_dashboard::{
    Coin, CoinGeckoClient, FetchError, FetchOutcome, MarketDataSource, MemoizedSource, PriceQuery,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const DAY_MS: i64 = 86_400_000;

/// Serves the same canned response to every connection and counts requests.
async fn serve(status: &'static str, body: String) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}/api/v3"), hits)
}

fn chart_body(prices: &[f64]) -> String {
    let rows: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| format!("[{}, {}]", 1_700_000_000_000 + i as i64 * DAY_MS, p))
        .collect();
    format!(
        r#"{{"prices": [{}], "market_caps": [], "total_volumes": []}}"#,
        rows.join(", ")
    )
}

fn query(days: u16) -> PriceQuery {
    PriceQuery::new(Coin::Bitcoin, days).unwrap()
}

#[tokio::test]
async fn price_history_is_parsed_in_order() {
    let (base_url, hits) = serve("200 OK", chart_body(&[100.0, 102.0, 104.0])).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    let outcome = client.price_history(&query(3)).await;
    let series = outcome.ready().expect("ready series");
    assert_eq!(series.len(), 3);
    assert_eq!(series.prices(), vec![100.0, 102.0, 104.0]);
    assert!(series.iter().zip(series.iter().skip(1)).all(|(a, b)| a.date < b.date));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_price_array_is_empty_not_failed() {
    let (base_url, _) = serve("200 OK", chart_body(&[])).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    assert!(client.price_history(&query(7)).await.is_empty());
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let (base_url, _) = serve("500 Internal Server Error", "{}".to_string()).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    let outcome = client.price_history(&query(7)).await;
    assert_eq!(outcome.error(), Some(&FetchError::Status { code: 500 }));
}

#[tokio::test]
async fn rate_limit_is_recognised() {
    let (base_url, _) = serve("429 Too Many Requests", "{}".to_string()).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    let outcome = client.coin_info(Coin::Ethereum).await;
    assert!(outcome.error().is_some_and(FetchError::is_rate_limited));
}

#[tokio::test]
async fn unknown_coin_is_empty() {
    let (base_url, _) = serve("404 Not Found", r#"{"error":"coin not found"}"#.to_string()).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    assert!(client.coin_info(Coin::Litecoin).await.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let (base_url, _) = serve("200 OK", "<html>maintenance</html>".to_string()).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    let outcome = client.price_history(&query(30)).await;
    assert!(matches!(outcome, FetchOutcome::Failed(FetchError::Decode(_))));
}

#[tokio::test]
async fn coin_info_fields_come_through() {
    let body = r#"{
        "id": "cardano",
        "symbol": "ada",
        "name": "Cardano",
        "description": {"en": "Cardano is a proof-of-stake blockchain."},
        "links": {"homepage": ["https://cardano.org", ""]},
        "image": {"large": "https://example.org/ada.png"}
    }"#;
    let (base_url, _) = serve("200 OK", body.to_string()).await;
    let client = CoinGeckoClient::with_base_url(base_url).unwrap();

    let info = client.coin_info(Coin::Cardano).await.into_ready().unwrap();
    assert_eq!(info.name, "Cardano");
    assert_eq!(info.ticker(), "ADA");
    assert!(info.has_homepage());
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    // Bind then drop so the port is closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CoinGeckoClient::with_base_url(format!("http://{addr}")).unwrap();
    let outcome = client.price_history(&query(1)).await;
    assert!(outcome.error().is_some_and(FetchError::is_network));
}

#[tokio::test]
async fn memoized_client_hits_the_network_once_per_window() {
    let (base_url, hits) = serve("200 OK", chart_body(&[1.0, 2.0])).await;
    let source = MemoizedSource::new(CoinGeckoClient::with_base_url(base_url).unwrap());

    let first = source.price_history(&query(2)).await;
    let second = source.price_history(&query(2)).await;
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    source.price_history(&query(3)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
