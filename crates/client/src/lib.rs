//! HTTP client for the ledger REST API.
//!
//! [`Client`] is a thin typed wrapper around the endpoints. [`TransactionCache`]
//! keeps a local copy of the transaction list for UIs and keeps it fresh after
//! every write.

use api_types::{
    error::ErrorBody,
    installment::InstallmentPlanNew,
    summary::{Summary, SummaryQuery},
    transaction::{CollapsedView, HistoryQuery, TransactionInput, TransactionView},
};
use chrono::NaiveDate;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

pub use cache::TransactionCache;

mod cache;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request, `code` is e.g. `invalid_amount`.
    #[error("{code}: {message}")]
    Validation { code: String, message: String },
    #[error("not found")]
    NotFound,
    #[error("server error: {0}")]
    Server(String),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    fn from_response(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_else(|| ErrorBody {
            error: "unknown".to_string(),
            message: "unknown error".to_string(),
        });

        match status {
            StatusCode::BAD_REQUEST => ClientError::Validation {
                code: body.error,
                message: body.message,
            },
            StatusCode::NOT_FOUND => ClientError::NotFound,
            _ => ClientError::Server(body.message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn execute(&self, req: RequestBuilder) -> Result<reqwest::Response> {
        let res = req.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let body = res.json::<ErrorBody>().await.ok();
        let err = ClientError::from_response(status, body);
        tracing::debug!(%status, "request failed: {err}");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        Ok(self.execute(req).await?.json::<T>().await?)
    }

    pub async fn list_transactions(&self) -> Result<Vec<TransactionView>> {
        let endpoint = self.endpoint("transactions")?;
        self.fetch(self.http.get(endpoint)).await
    }

    pub async fn transaction(&self, id: Uuid) -> Result<TransactionView> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        self.fetch(self.http.get(endpoint)).await
    }

    pub async fn create_transaction(&self, input: &TransactionInput) -> Result<TransactionView> {
        let endpoint = self.endpoint("transactions")?;
        self.fetch(self.http.post(endpoint).json(input)).await
    }

    pub async fn replace_transaction(
        &self,
        id: Uuid,
        input: &TransactionInput,
    ) -> Result<TransactionView> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        self.fetch(self.http.put(endpoint).json(input)).await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<()> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        self.execute(self.http.delete(endpoint)).await?;
        Ok(())
    }

    pub async fn create_installment_plan(
        &self,
        plan: &InstallmentPlanNew,
    ) -> Result<Vec<TransactionView>> {
        let endpoint = self.endpoint("installments")?;
        self.fetch(self.http.post(endpoint).json(plan)).await
    }

    pub async fn summary(&self, as_of: Option<NaiveDate>) -> Result<Summary> {
        let endpoint = self.endpoint("summary")?;
        self.fetch(self.http.get(endpoint).query(&SummaryQuery { as_of }))
            .await
    }

    pub async fn history(&self, query: &HistoryQuery) -> Result<Vec<TransactionView>> {
        let endpoint = self.endpoint("transactions/history")?;
        self.fetch(self.http.get(endpoint).query(query)).await
    }

    pub async fn collapsed(&self, as_of: Option<NaiveDate>) -> Result<Vec<CollapsedView>> {
        let endpoint = self.endpoint("transactions/collapsed")?;
        self.fetch(self.http.get(endpoint).query(&SummaryQuery { as_of }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_is_validation() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            Some(ErrorBody {
                error: "invalid_amount".to_string(),
                message: "amount must be positive".to_string(),
            }),
        );
        assert!(matches!(
            err,
            ClientError::Validation { ref code, .. } if code == "invalid_amount"
        ));
    }

    #[test]
    fn other_statuses() {
        assert!(matches!(
            ClientError::from_response(StatusCode::NOT_FOUND, None),
            ClientError::NotFound
        ));
        assert!(matches!(
            ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, None),
            ClientError::Server(_)
        ));
    }

    #[test]
    fn invalid_base_url() {
        assert!(Client::new("not a url").is_err());
    }
}
