//! REST client for the transaction backend
//!
//! The backend exposes two endpoints under its base URL:
//! - `GET  /transactions` returns `{"transactions": [...]}`
//! - `POST /add_transaction` accepts a JSON transaction and answers
//!   `{"status": "success"}` when it was stored
//!
//! The dashboard only talks to [`TransactionBackend`], so handlers can be
//! tested against an in-memory implementation.

pub mod error;

use std::time::Duration;

use async_trait::async_trait;
use finweb_config::Config;
use finweb_core::{NewTransaction, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::{ClientError, ClientErrorCode, ClientResult};

/// `status` value the backend uses for an accepted add
pub const STATUS_SUCCESS: &str = "success";

/// Body of `GET /transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// Raw records; decoded leniently one by one
    pub transactions: Vec<Value>,
}

/// Body of `POST /add_transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AddTransactionResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Source and sink of transactions
#[async_trait]
pub trait TransactionBackend: Send + Sync {
    /// Fetch the full transaction list
    async fn fetch_transactions(&self) -> ClientResult<Vec<Transaction>>;

    /// Submit one new transaction
    ///
    /// Succeeds only when the backend answers with `status == "success"`.
    async fn add_transaction(&self, transaction: &NewTransaction) -> ClientResult<AddTransactionResponse>;
}

/// [`TransactionBackend`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Backend client with no request timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::Setup { message: e.to_string() })?;

        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::with_timeout(
            config.backend_base_url(),
            config.backend.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Http { status: status.as_u16() });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse { message: e.to_string() })
}

#[async_trait]
impl TransactionBackend for HttpBackend {
    async fn fetch_transactions(&self) -> ClientResult<Vec<Transaction>> {
        let url = self.endpoint("transactions");
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body: TransactionsResponse = read_json(response).await?;
        let transactions = Transaction::decode_list(body.transactions);

        log::debug!("Fetched {} transactions", transactions.len());
        Ok(transactions)
    }

    async fn add_transaction(&self, transaction: &NewTransaction) -> ClientResult<AddTransactionResponse> {
        let url = self.endpoint("add_transaction");
        log::debug!("POST {} ({} {})", url, transaction.kind, transaction.amount);

        let response = self.client.post(&url).json(transaction).send().await?;
        let body: AddTransactionResponse = read_json(response).await?;

        if !body.is_success() {
            log::warn!("Backend rejected transaction: status={}", body.status);
            return Err(ClientError::Rejected {
                status: body.status,
                message: body.message,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use finweb_core::{TransactionId, TransactionType};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Recorded add requests plus the canned replies
    #[derive(Clone, Default)]
    struct FakeBackend {
        list: Value,
        add_reply: Value,
        received: Arc<Mutex<Vec<Value>>>,
    }

    async fn list_handler(State(fake): State<FakeBackend>) -> Json<Value> {
        Json(fake.list.clone())
    }

    async fn add_handler(State(fake): State<FakeBackend>, Json(body): Json<Value>) -> Json<Value> {
        fake.received.lock().unwrap().push(body);
        Json(fake.add_reply.clone())
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_fake(fake: FakeBackend) -> String {
        let router = Router::new()
            .route("/transactions", get(list_handler))
            .route("/add_transaction", post(add_handler))
            .with_state(fake);
        spawn(router).await
    }

    #[tokio::test]
    async fn test_fetch_decodes_leniently() {
        let fake = FakeBackend {
            list: json!({"transactions": [
                {"id": 1, "type": "income", "amount": 100.0, "description": "Salary", "date": "2024-01-01"},
                {"id": "b", "type": "expense", "amount": "40", "description": "Food", "date": "2024-01-03"},
                {"id": 3, "type": "transfer", "amount": 5},
                "garbage"
            ]}),
            ..Default::default()
        };
        let base = spawn_fake(fake).await;
        let backend = HttpBackend::new(format!("{}/", base)).unwrap();

        let list = backend.fetch_transactions().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].kind, TransactionType::Income);
        assert_eq!(list[1].id, TransactionId::Text("b".to_string()));
        assert_eq!(list[1].amount, 40.0);
        assert_eq!(list[2].kind, TransactionType::Other("transfer".to_string()));
        assert!(list[2].date.is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_list_is_parse_error() {
        let fake = FakeBackend { list: json!({"items": []}), ..Default::default() };
        let base = spawn_fake(fake).await;
        let backend = HttpBackend::new(base).unwrap();

        let err = backend.fetch_transactions().await.unwrap_err();
        assert_eq!(err.code(), ClientErrorCode::BackendPayload);
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn(router).await;
        let backend = HttpBackend::new(base).unwrap();

        let err = backend.fetch_transactions().await.unwrap_err();
        assert_eq!(err, ClientError::Http { status: 500 });
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(format!("http://{}", addr)).unwrap();
        let err = backend.fetch_transactions().await.unwrap_err();
        assert_eq!(err.code(), ClientErrorCode::BackendUnreachable);
    }

    #[tokio::test]
    async fn test_add_sends_json_body() {
        let fake = FakeBackend {
            add_reply: json!({"status": "success"}),
            ..Default::default()
        };
        let received = fake.received.clone();
        let base = spawn_fake(fake).await;
        let backend = HttpBackend::new(base).unwrap();

        let new_tx = NewTransaction {
            kind: TransactionType::Expense,
            amount: 12.5,
            description: "Lunch".to_string(),
            date: None,
        };
        let reply = backend.add_transaction(&new_tx).await.unwrap();
        assert!(reply.is_success());

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], json!({"type": "expense", "amount": 12.5, "description": "Lunch"}));
    }

    #[tokio::test]
    async fn test_add_rejected_unless_success() {
        let fake = FakeBackend {
            add_reply: json!({"status": "error", "message": "duplicate"}),
            ..Default::default()
        };
        let base = spawn_fake(fake).await;
        let backend = HttpBackend::new(base).unwrap();

        let new_tx = NewTransaction {
            kind: TransactionType::Income,
            amount: 1.0,
            description: String::new(),
            date: None,
        };
        let err = backend.add_transaction(&new_tx).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Rejected {
                status: "error".to_string(),
                message: Some("duplicate".to_string()),
            }
        );
    }

    #[test]
    fn test_from_config_trims_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "http://localhost:5000///".to_string();
        config.backend.timeout_secs = Some(5);
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.endpoint("transactions"), "http://localhost:5000/transactions");
    }
}
