//! Daily time-series pipeline.
//!
//! [`StockDataPipeline::fetch`] issues one `TIME_SERIES_DAILY` request and
//! turns the payload into a [`StockSeries`]: remote errors and throttling
//! notices are surfaced as [`FetchError`] variants, bars with any missing,
//! non-finite or non-positive field are dropped, and the survivors are sorted
//! oldest first. Nothing is retried.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::config::{PipelineConfig, DEMO_SYMBOL};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{DailyBar, FetchError, NoDataReason, StockSeries, Symbol};

const TIME_SERIES_KEY: &str = "Time Series (Daily)";
const OPEN_KEY: &str = "1. open";
const HIGH_KEY: &str = "2. high";
const LOW_KEY: &str = "3. low";
const CLOSE_KEY: &str = "4. close";
const VOLUME_KEY: &str = "5. volume";

/// Fetches and normalizes daily bars for one symbol per call.
#[derive(Clone)]
pub struct StockDataPipeline {
    config: PipelineConfig,
    http_client: Arc<dyn HttpClient>,
}

impl StockDataPipeline {
    /// Pipeline over the default reqwest transport.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: PipelineConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch, validate and sort the daily series for `symbol`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Config`] when running on the demo key for any symbol
    ///   other than [`DEMO_SYMBOL`]; no request is sent.
    /// - [`FetchError::Network`] / [`FetchError::Transport`] for transport
    ///   failures and non-2xx statuses.
    /// - [`FetchError::Decode`], [`FetchError::Api`],
    ///   [`FetchError::RateLimited`], [`FetchError::NoData`] from
    ///   [`normalize_daily_payload`].
    pub async fn fetch(&self, symbol: &Symbol) -> Result<StockSeries, FetchError> {
        if self.config.credential.is_demo() && symbol.as_str() != DEMO_SYMBOL {
            warn!(%symbol, "demo credential cannot serve symbol");
            return Err(FetchError::Config {
                message: format!(
                    "Alpha Vantage demo API key only supports {DEMO_SYMBOL}. Please use a valid API key."
                ),
            });
        }

        let url = daily_series_url(
            &self.config.base_url,
            symbol,
            self.config.credential.as_str(),
        );
        debug!(
            %symbol,
            url = %daily_series_url(&self.config.base_url, symbol, "<redacted>"),
            "requesting daily series"
        );

        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(%symbol, error = error.message(), "daily series request failed");
            FetchError::Network {
                message: error.message().to_owned(),
            }
        })?;

        if !response.is_success() {
            warn!(%symbol, status = response.status, "daily series returned error status");
            return Err(FetchError::Transport {
                status: response.status,
            });
        }

        let series = normalize_daily_payload(symbol, &response.body)?;
        debug!(%symbol, bars = series.len(), "daily series normalized");
        Ok(series)
    }
}

/// Build the `TIME_SERIES_DAILY` query URL.
pub fn daily_series_url(base_url: &str, symbol: &Symbol, api_key: &str) -> String {
    format!(
        "{base_url}?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
        urlencoding::encode(symbol.as_str()),
        urlencoding::encode(api_key)
    )
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: Option<Value>,
}

/// Turn a raw `TIME_SERIES_DAILY` body into a validated ascending series.
///
/// An `"Error Message"` wins over a non-empty `"Note"` throttling notice, and
/// both are checked before the series itself. `"Information"` is only logged.
pub fn normalize_daily_payload(symbol: &Symbol, body: &str) -> Result<StockSeries, FetchError> {
    let response: DailySeriesResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode {
            message: e.to_string(),
        })?;

    if let Some(message) = response.error_message {
        warn!(%symbol, %message, "alphavantage returned an error payload");
        return Err(FetchError::Api { message });
    }

    if let Some(note) = response.note.filter(|note| !note.trim().is_empty()) {
        warn!(%symbol, %note, "alphavantage throttled the request");
        return Err(FetchError::RateLimited);
    }

    if let Some(information) = &response.information {
        warn!(%symbol, %information, "alphavantage attached an information notice");
    }

    let entries = match response.time_series.as_ref().and_then(Value::as_object) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            debug!(%symbol, key = TIME_SERIES_KEY, "time series missing or empty");
            return Err(FetchError::NoData {
                symbol: symbol.to_string(),
                reason: NoDataReason::Empty,
            });
        }
    };

    let bars = entries
        .iter()
        .filter_map(|(date, fields)| {
            let bar = parse_entry(date, fields);
            if bar.is_none() {
                trace!(%symbol, %date, "dropping invalid daily bar");
            }
            bar
        })
        .collect::<Vec<_>>();

    let dropped = entries.len() - bars.len();
    if dropped > 0 {
        debug!(%symbol, dropped, kept = bars.len(), "filtered invalid daily bars");
    }

    if bars.is_empty() {
        return Err(FetchError::NoData {
            symbol: symbol.to_string(),
            reason: NoDataReason::NoValidPrices,
        });
    }

    Ok(StockSeries::from_unsorted(symbol.clone(), bars))
}

fn parse_entry(date: &str, fields: &Value) -> Option<DailyBar> {
    let fields = fields.as_object()?;
    let date = DailyBar::parse_date(date).ok()?;
    DailyBar::new(
        date,
        parse_number(fields, OPEN_KEY)?,
        parse_number(fields, HIGH_KEY)?,
        parse_number(fields, LOW_KEY)?,
        parse_number(fields, CLOSE_KEY)?,
        parse_number(fields, VOLUME_KEY)?,
    )
    .ok()
}

/// Fields arrive as stringified numbers; plain JSON numbers are accepted too.
fn parse_number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}
