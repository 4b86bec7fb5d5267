//! Behavior-driven tests for the daily-series pipeline.
//!
//! These tests drive `StockDataPipeline::fetch` through a recording transport
//! and check what the caller sees for each kind of upstream payload.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;
use stockscope_core::{
    Credential, FetchError, FetchErrorKind, HttpClient, HttpError, HttpRequest, HttpResponse,
    NoDataReason, PipelineConfig, StockDataPipeline, Symbol,
};
use time::macros::date;

#[derive(Debug)]
struct RecordingHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn responding(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn json(body: serde_json::Value) -> Arc<Self> {
        Self::responding(Ok(HttpResponse::ok_json(body.to_string())))
    }

    fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn keyed_pipeline(client: Arc<RecordingHttpClient>) -> StockDataPipeline {
    let config = PipelineConfig::default()
        .with_credential(Credential::ApiKey(String::from("test-key")))
        .with_base_url("https://av.example.test/query");
    StockDataPipeline::with_http_client(config, client)
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn entry(open: &str, high: &str, low: &str, close: &str, volume: &str) -> serde_json::Value {
    json!({
        "1. open": open,
        "2. high": high,
        "3. low": low,
        "4. close": close,
        "5. volume": volume,
    })
}

// =============================================================================
// Successful payloads
// =============================================================================

#[tokio::test]
async fn when_payload_is_newest_first_series_comes_back_ascending() {
    // Given: the provider lists the newest day first
    let client = RecordingHttpClient::json(json!({
        "Time Series (Daily)": {
            "2024-01-02": entry("10", "12", "9", "11", "1000"),
            "2024-01-01": entry("9", "10", "8", "9.5", "800"),
        }
    }));
    let pipeline = keyed_pipeline(client);

    // When: the series is fetched
    let series = pipeline.fetch(&symbol("IBM")).await.expect("series");

    // Then: bars are oldest first with parsed values
    let bars = series.bars();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].date, date!(2024 - 01 - 01));
    assert_eq!(bars[0].close, 9.5);
    assert_eq!(bars[0].volume, 800.0);
    assert_eq!(bars[1].date, date!(2024 - 01 - 02));
    assert_eq!(bars[1].open, 10.0);
    assert_eq!(bars[1].high, 12.0);
    assert_eq!(bars[1].low, 9.0);
    assert_eq!(bars[1].close, 11.0);
    assert_eq!(series.symbol().as_str(), "IBM");
}

#[tokio::test]
async fn when_some_entries_are_invalid_only_valid_bars_survive() {
    // Given: a zero volume, a negative price, a NaN, an overflow and a non-number
    let client = RecordingHttpClient::json(json!({
        "Time Series (Daily)": {
            "2024-01-08": entry("10", "12", "9", "1e400", "100"),
            "2024-01-05": entry("10", "12", "9", "11", "0"),
            "2024-01-04": entry("10", "12", "-9", "11", "100"),
            "2024-01-03": entry("NaN", "12", "9", "11", "100"),
            "2024-01-02": entry("10", "twelve", "9", "11", "100"),
            "2024-01-01": entry("10", "12", "9", "11", "100"),
            "2023-12-29": entry("8", "9", "7", "8.5", "50"),
        }
    }));
    let pipeline = keyed_pipeline(client);

    // When: the series is fetched
    let series = pipeline.fetch(&symbol("IBM")).await.expect("series");

    // Then: only the fully valid days remain, still ascending
    let dates = series.bars().iter().map(|bar| bar.date).collect::<Vec<_>>();
    assert_eq!(dates, vec![date!(2023 - 12 - 29), date!(2024 - 01 - 01)]);
    for bar in series.bars() {
        for value in [bar.open, bar.high, bar.low, bar.close, bar.volume] {
            assert!(value.is_finite() && value > 0.0);
        }
    }
    assert!(series.bars().windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[tokio::test]
async fn each_fetch_sends_exactly_one_daily_series_request() {
    // Given: a keyed pipeline
    let client = RecordingHttpClient::json(json!({
        "Time Series (Daily)": { "2024-01-01": entry("1", "1", "1", "1", "1") }
    }));
    let pipeline = keyed_pipeline(Arc::clone(&client));

    // When: one fetch runs
    pipeline.fetch(&symbol("aapl")).await.expect("series");

    // Then: one GET with function, symbol, and key
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://av.example.test/query?function=TIME_SERIES_DAILY&symbol=AAPL&apikey=test-key"
    );
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn when_status_is_not_2xx_fetch_fails_with_transport_error() {
    let client = RecordingHttpClient::responding(Ok(HttpResponse::new(503, "unavailable")));
    let pipeline = keyed_pipeline(client);

    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    assert_eq!(error, FetchError::Transport { status: 503 });
    assert_eq!(error.to_string(), "HTTP error! status: 503");
}

#[tokio::test]
async fn when_connection_fails_fetch_fails_with_network_error() {
    let client = RecordingHttpClient::responding(Err(HttpError::new("connection refused")));
    let pipeline = keyed_pipeline(client);

    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    assert_eq!(error.kind(), FetchErrorKind::Network);
    assert!(error.to_string().contains("connection refused"));
}

#[tokio::test]
async fn when_payload_has_error_message_it_is_surfaced_verbatim() {
    let client = RecordingHttpClient::json(json!({
        "Error Message": "Invalid API call. Please retry or visit the documentation."
    }));
    let pipeline = keyed_pipeline(client);

    let error = pipeline.fetch(&symbol("NOPE")).await.expect_err("must fail");

    assert_eq!(
        error,
        FetchError::Api {
            message: String::from("Invalid API call. Please retry or visit the documentation."),
        }
    );
}

#[tokio::test]
async fn when_payload_has_note_fetch_fails_with_rate_limit_and_hint() {
    // Given: the provider's throttling advisory
    let client = RecordingHttpClient::json(json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
    }));
    let pipeline = keyed_pipeline(client);

    // When: the series is fetched
    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    // Then: the rate-limit kind is distinguishable and carries the hint
    assert_eq!(error, FetchError::RateLimited);
    assert_eq!(error.code(), "fetch.rate_limited");
    assert!(error.hint().is_some_and(|hint| hint.contains("5 calls per minute")));
}

#[tokio::test]
async fn when_payload_has_only_information_fetch_fails_with_no_data_not_rate_limit() {
    // Given: a premium-endpoint notice and no series
    let client = RecordingHttpClient::json(json!({
        "Information": "Thank you for using Alpha Vantage! This is a premium endpoint."
    }));
    let pipeline = keyed_pipeline(client);

    // When: the series is fetched
    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    // Then: it is reported as missing data, without the throttling hint
    assert_eq!(
        error,
        FetchError::NoData {
            symbol: String::from("IBM"),
            reason: NoDataReason::Empty,
        }
    );
    assert!(error.hint().is_none());
}

#[tokio::test]
async fn when_note_is_empty_series_is_still_returned() {
    let client = RecordingHttpClient::json(json!({
        "Note": "",
        "Time Series (Daily)": {
            "2024-01-02": entry("10", "12", "9", "11", "100"),
        }
    }));
    let pipeline = keyed_pipeline(client);

    let series = pipeline.fetch(&symbol("IBM")).await.expect("series");

    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn when_time_series_is_missing_fetch_fails_with_no_data() {
    let client = RecordingHttpClient::json(json!({ "Meta Data": {} }));
    let pipeline = keyed_pipeline(client);

    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    assert_eq!(
        error,
        FetchError::NoData {
            symbol: String::from("IBM"),
            reason: NoDataReason::Empty,
        }
    );
}

#[tokio::test]
async fn when_every_entry_is_invalid_fetch_never_returns_empty_success() {
    let client = RecordingHttpClient::json(json!({
        "Time Series (Daily)": {
            "2024-01-02": entry("10", "12", "9", "11", "0"),
            "2024-01-01": entry("0", "12", "9", "11", "10"),
        }
    }));
    let pipeline = keyed_pipeline(client);

    let error = pipeline.fetch(&symbol("IBM")).await.expect_err("must fail");

    assert_eq!(
        error.to_string(),
        "No valid price data found for symbol: IBM"
    );
}

// =============================================================================
// Demo credential
// =============================================================================

#[tokio::test]
async fn demo_credential_rejects_other_symbols_without_network_call() {
    // Given: no API key configured
    let client = RecordingHttpClient::json(json!({}));
    let pipeline =
        StockDataPipeline::with_http_client(PipelineConfig::default(), Arc::clone(&client) as _);

    // When: a non-demo symbol is requested
    let error = pipeline.fetch(&symbol("TSLA")).await.expect_err("must fail");

    // Then: a config error explains the restriction and nothing was sent
    assert_eq!(error.kind(), FetchErrorKind::Config);
    assert!(error.to_string().contains("MSFT"));
    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn demo_credential_serves_msft() {
    let client = RecordingHttpClient::json(json!({
        "Time Series (Daily)": { "2024-01-01": entry("1", "2", "0.5", "1.5", "10") }
    }));
    let pipeline =
        StockDataPipeline::with_http_client(PipelineConfig::default(), Arc::clone(&client) as _);

    let series = pipeline.fetch(&symbol("msft")).await.expect("series");

    assert_eq!(series.len(), 1);
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("symbol=MSFT&apikey=demo"));
}
