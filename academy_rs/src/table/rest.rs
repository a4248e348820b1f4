//! PostgREST client.
//!
//! Talks to `{base}/rest/v1/{table}` with the project's public API key. Reads
//! use query-string filters (`col=eq.value`, `order=col.asc`), writes post a
//! JSON array with `Prefer: return=minimal`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RemoteTable, Select, TableError};
use crate::config::BackendConfig;

const REST_PATH: &str = "rest/v1/";

/// HTTP-backed [`RemoteTable`].
#[derive(Debug, Clone)]
pub struct RestTable {
    http: Client,
    endpoint: Url,
    api_key: String,
}

/// Error body PostgREST sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    hint: Option<String>,
}

impl RestTable {
    /// Build a client for the configured project.
    pub fn new(config: &BackendConfig) -> Result<Self, TableError> {
        let (Some(url), Some(key)) = (config.url.as_deref(), config.anon_key.as_deref()) else {
            return Err(TableError::InvalidConfig(
                "backend url and anon key are both required".to_string(),
            ));
        };
        Self::with_client(Client::new(), url, key)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str, api_key: &str) -> Result<Self, TableError> {
        let base = format!("{}/", base_url.trim().trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(REST_PATH))
            .map_err(|err| TableError::InvalidConfig(format!("bad backend url '{base_url}': {err}")))?;
        if api_key.trim().is_empty() {
            return Err(TableError::InvalidConfig("anon key is empty".to_string()));
        }
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.trim().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, TableError> {
        self.endpoint
            .join(table)
            .map_err(|err| TableError::InvalidConfig(format!("bad table name '{table}': {err}")))
    }

    /// The URL a select is sent to.
    pub fn select_url(&self, query: &Select) -> Result<Url, TableError> {
        let mut url = self.table_url(query.table)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for filter in &query.filters {
                pairs.append_pair(filter.column, &format!("eq.{}", filter.value));
            }
            if let Some(order) = query.order {
                let direction = if order.ascending { "asc" } else { "desc" };
                pairs.append_pair("order", &format!("{}.{}", order.column, direction));
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

fn transport(err: reqwest::Error) -> TableError {
    TableError::Transport(err.to_string())
}

/// Pass 2xx responses through; turn everything else into [`TableError::Status`].
async fn check(response: Response) -> Result<Response, TableError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(message),
            hint,
        }) => match hint {
            Some(hint) => format!("{message} ({hint})"),
            None => message,
        },
        _ if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        _ => body,
    };
    warn!(status = status.as_u16(), %message, "backend rejected request");
    Err(TableError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl RemoteTable for RestTable {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, TableError> {
        let url = self.select_url(query)?;
        debug!(table = query.table, %url, "select");
        let response = self
            .authorized(self.http.get(url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|source| TableError::Decode {
            table: query.table.to_string(),
            source,
        })
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), TableError> {
        let url = self.table_url(table)?;
        debug!(table, rows = rows.len(), "insert");
        let response = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SpecialLecture, columns};

    fn client() -> RestTable {
        RestTable::with_client(Client::new(), "https://demo.supabase.co/", "anon").unwrap()
    }

    #[test]
    fn select_url_encodes_filters_and_order() {
        let query = Select::rows::<SpecialLecture>()
            .eq(columns::IS_FEATURED, true)
            .eq(columns::IS_UPCOMING, true)
            .order_by(columns::LECTURE_DATE, true);
        let url = client().select_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/special_lectures?select=*&is_featured=eq.true&is_upcoming=eq.true&order=lecture_date.asc"
        );
    }

    #[test]
    fn descending_order_is_spelled_out() {
        let query = Select::rows::<SpecialLecture>().order_by(columns::LECTURE_DATE, false);
        let url = client().select_url(&query).unwrap();
        assert_eq!(url.query(), Some("select=*&order=lecture_date.desc"));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let config = BackendConfig {
            url: Some("https://demo.supabase.co".into()),
            anon_key: None,
        };
        assert!(matches!(RestTable::new(&config), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let result = RestTable::with_client(Client::new(), "not a url", "anon");
        assert!(matches!(result, Err(TableError::InvalidConfig(_))));
    }
}
