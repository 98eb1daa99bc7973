use crate::config::LedgerRpcConfig;
use crate::errors::{RpcError, RpcResult};
use crate::rpc::traits::LedgerClient;
use crate::rpc::types::{
    AccountInfo, ContextValue, ParsedTransaction, PerformanceSample, SignatureInfo,
};
use crate::rpc::{calculate_next_backoff, execute_with_timeout};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcErrorObject {
    fn describe(&self) -> String {
        format!("{} (code {})", self.message, self.code)
    }
}

/// Outcome of one HTTP attempt, split by whether retrying can help
enum AttemptError {
    Retryable(String),
    Fatal(RpcError),
}

/// Solana-style JSON-RPC client with timeout, retry and request batching
pub struct SolanaRpcClient {
    http: reqwest::Client,
    config: LedgerRpcConfig,
    next_id: AtomicU64,
    error_count: AtomicU64,
}

impl SolanaRpcClient {
    /// Build the HTTP client; no request is sent until the first call
    pub fn new(config: LedgerRpcConfig) -> RpcResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                RpcError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            config,
            next_id: AtomicU64::new(1),
            error_count: AtomicU64::new(0),
        })
    }

    /// Round-trip a cheap call to check the endpoint is reachable
    pub async fn test_connection(&self) -> RpcResult<u64> {
        let slot = self.get_slot().await?;
        debug!("Ledger RPC connection test successful - slot {}", slot);
        Ok(slot)
    }

    /// Get the current error count from RPC operations
    pub fn get_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn endpoint(&self) -> &str {
        &self.config.url
    }

    /// Single JSON-RPC call
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> RpcResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });

        let raw = self.post_with_retry(method, &body).await?;
        let response: RpcResponse = serde_json::from_value(raw)?;

        if let Some(err) = response.error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
            return Err(RpcError::CallFailed {
                method: method.to_string(),
                message: err.describe(),
            });
        }

        serde_json::from_value(response.result.unwrap_or(Value::Null)).map_err(|e| {
            RpcError::DeserialisationFailed(format!("{} result: {}", method, e))
        })
    }

    /// Several calls of one method in a single HTTP request
    ///
    /// Returns one entry per element of `params`, in input order; responses are
    /// matched back by id since providers may answer out of order.
    async fn call_batch(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> RpcResult<Vec<Result<Value, String>>> {
        let count = params.len() as u64;
        let first_id = self.next_id.fetch_add(count, Ordering::Relaxed);

        let body = Value::Array(
            params
                .into_iter()
                .enumerate()
                .map(|(i, params)| {
                    json!({
                        "jsonrpc": "2.0",
                        "id": first_id + i as u64,
                        "method": method,
                        "params": params,
                    })
                })
                .collect(),
        );

        let raw = self.post_with_retry(method, &body).await?;

        let responses: Vec<RpcResponse> = match raw {
            Value::Array(_) => serde_json::from_value(raw)?,
            other => {
                // Providers that reject batching answer with a single error object
                let response: RpcResponse = serde_json::from_value(other)?;
                let message = response
                    .error
                    .map(|e| e.describe())
                    .unwrap_or_else(|| "expected a batch response array".to_string());
                self.error_count.fetch_add(1, Ordering::Relaxed);
                return Err(RpcError::CallFailed {
                    method: method.to_string(),
                    message,
                });
            }
        };

        let mut slots: Vec<Result<Value, String>> = (0..count)
            .map(|i| Err(format!("no response for request id {}", first_id + i)))
            .collect();

        for response in responses {
            let Some(index) = response
                .id
                .and_then(|id| id.checked_sub(first_id))
                .filter(|offset| *offset < count)
            else {
                debug!("Ignoring batch response with unexpected id {:?}", response.id);
                continue;
            };

            slots[index as usize] = match response.error {
                Some(err) => Err(err.describe()),
                None => Ok(response.result.unwrap_or(Value::Null)),
            };
        }

        Ok(slots)
    }

    async fn post_with_retry(&self, operation: &str, body: &Value) -> RpcResult<Value> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);

        loop {
            attempts += 1;

            let failure = match execute_with_timeout(
                self.config.timeout_seconds,
                self.post_once(operation, body),
            )
            .await
            {
                Ok(Ok(value)) => {
                    if attempts > 1 {
                        debug!("{} succeeded after {} attempts", operation, attempts);
                    }
                    return Ok(value);
                }
                Ok(Err(AttemptError::Fatal(e))) => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    return Err(e);
                }
                Ok(Err(AttemptError::Retryable(message))) => {
                    if attempts >= max_attempts {
                        self.error_count.fetch_add(1, Ordering::Relaxed);
                        error!(
                            "{} failed after {} attempts: {}",
                            operation, attempts, message
                        );
                        return Err(RpcError::MaxRetriesExceeded {
                            operation: operation.to_string(),
                        });
                    }
                    message
                }
                Err(_) => {
                    if attempts >= max_attempts {
                        self.error_count.fetch_add(1, Ordering::Relaxed);
                        error!(
                            "{} timed out after {} attempts ({}s timeout)",
                            operation, attempts, self.config.timeout_seconds
                        );
                        return Err(RpcError::Timeout {
                            timeout_seconds: self.config.timeout_seconds,
                            operation: operation.to_string(),
                        });
                    }
                    format!("timed out after {}s", self.config.timeout_seconds)
                }
            };

            self.error_count.fetch_add(1, Ordering::Relaxed);
            warn!(
                "RPC attempt {} failed for {}, retrying in {:?}: {}",
                attempts, operation, backoff, failure
            );
            sleep(backoff).await;

            backoff = calculate_next_backoff(
                backoff,
                self.config.backoff_multiplier,
                self.config.max_backoff_seconds,
            );
        }
    }

    async fn post_once(&self, operation: &str, body: &Value) -> Result<Value, AttemptError> {
        let response = self
            .http
            .post(&self.config.url)
            .json(body)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(AttemptError::Retryable(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(RpcError::CallFailed {
                method: operation.to_string(),
                message: format!("HTTP {}", status),
            }));
        }

        response.json::<Value>().await.map_err(|e| {
            AttemptError::Fatal(RpcError::DeserialisationFailed(format!(
                "{} response body: {}",
                operation, e
            )))
        })
    }

    fn commitment(&self) -> Value {
        json!({ "commitment": self.config.commitment })
    }
}

#[async_trait]
impl LedgerClient for SolanaRpcClient {
    async fn get_signatures_for_addresses(
        &self,
        addresses: &[String],
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        let params_for = |address: &String| {
            json!([address, { "limit": limit, "commitment": self.config.commitment }])
        };

        match addresses {
            [] => Ok(Vec::new()),
            [address] => {
                self.call("getSignaturesForAddress", params_for(address))
                    .await
            }
            _ => {
                let params = addresses.iter().map(params_for).collect();
                let results = self.call_batch("getSignaturesForAddress", params).await?;

                let mut lists = Vec::with_capacity(results.len());
                let mut last_failure = None;
                for (address, result) in addresses.iter().zip(results) {
                    let parsed = result.and_then(|value| {
                        serde_json::from_value::<Vec<SignatureInfo>>(value)
                            .map_err(|e| e.to_string())
                    });
                    match parsed {
                        Ok(list) => lists.push(list),
                        Err(message) => {
                            warn!("Signature listing for {} failed: {}", address, message);
                            last_failure = Some(message);
                        }
                    }
                }

                if lists.is_empty() {
                    return Err(RpcError::CallFailed {
                        method: "getSignaturesForAddress".to_string(),
                        message: last_failure.unwrap_or_default(),
                    });
                }

                Ok(merge_newest_first(lists, limit))
            }
        }
    }

    async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> RpcResult<Vec<Option<ParsedTransaction>>> {
        if signatures.is_empty() {
            return Ok(Vec::new());
        }

        let params = signatures
            .iter()
            .map(|signature| {
                json!([signature, {
                    "encoding": "jsonParsed",
                    "maxSupportedTransactionVersion": 0,
                    "commitment": self.config.commitment,
                }])
            })
            .collect();

        let results = self.call_batch("getTransaction", params).await?;

        // An error object on any item fails the whole batch; only `null` is absence
        let mut bodies = Vec::with_capacity(results.len());
        for (signature, result) in signatures.iter().zip(results) {
            let value = result.map_err(|message| {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                warn!("Transaction {} not returned: {}", signature, message);
                RpcError::CallFailed {
                    method: "getTransaction".to_string(),
                    message,
                }
            })?;

            bodies.push(match value {
                Value::Null => None,
                value => match serde_json::from_value::<ParsedTransaction>(value) {
                    Ok(tx) => Some(tx),
                    Err(e) => {
                        debug!("Unparseable transaction {}: {}", signature, e);
                        None
                    }
                },
            });
        }

        Ok(bodies)
    }

    async fn get_slot(&self) -> RpcResult<u64> {
        self.call("getSlot", json!([self.commitment()])).await
    }

    async fn get_recent_performance_samples(
        &self,
        limit: usize,
    ) -> RpcResult<Vec<PerformanceSample>> {
        self.call("getRecentPerformanceSamples", json!([limit]))
            .await
    }

    async fn get_balance(&self, address: &str) -> RpcResult<u64> {
        let response: ContextValue<u64> = self
            .call("getBalance", json!([address, self.commitment()]))
            .await?;
        Ok(response.value)
    }

    async fn get_account_info(&self, address: &str) -> RpcResult<Option<AccountInfo>> {
        let response: ContextValue<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                json!([address, { "encoding": "base64", "commitment": self.config.commitment }]),
            )
            .await?;
        Ok(response.value)
    }
}

/// Merge per-address signature lists into one newest-first list
///
/// Entries without a block time are the most recent ones the node knows
/// about, so they sort ahead of timestamped entries.
pub(crate) fn merge_newest_first(lists: Vec<Vec<SignatureInfo>>, limit: usize) -> Vec<SignatureInfo> {
    let mut seen = HashSet::new();
    let mut merged: Vec<SignatureInfo> = lists
        .into_iter()
        .flatten()
        .filter(|info| seen.insert(info.signature.clone()))
        .collect();

    merged.sort_by_key(|info| Reverse((info.block_time.unwrap_or(i64::MAX), info.slot)));
    merged.truncate(limit);
    merged
}
