use chrono::NaiveDate;
use models_policy::{ListResponse, PageResponse, RawRecord};
use policy_client_errors::Result;
use serde::Serialize;

use super::PolicyServiceClient;

/// Filters for `/api/v1/policy/search`. Blank filter fields are omitted
/// from the query string entirely.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl SearchQuery {
    fn normalized(&self) -> Self {
        Self {
            policy_number: trimmed(&self.policy_number),
            person_name: trimmed(&self.person_name),
            group_code: trimmed(&self.group_code),
            page: self.page,
            size: self.size,
        }
    }
}

/// Date window for `/api/v1/policy/maturity`. Open bounds are omitted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_to: Option<NaiveDate>,
    pub page: u32,
    pub size: u32,
}

fn trimmed(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl PolicyServiceClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_all_policies(&self, page: u32, size: u32) -> Result<PageResponse<RawRecord>> {
        let list: ListResponse<RawRecord> = self
            .get_json("/api/v1/policy/all", &[("page", page), ("size", size)])
            .await?;
        Ok(list.into_page())
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_policies(&self, query: &SearchQuery) -> Result<PageResponse<RawRecord>> {
        let list: ListResponse<RawRecord> = self
            .get_json("/api/v1/policy/search", &query.normalized())
            .await?;
        Ok(list.into_page())
    }

    #[tracing::instrument(skip(self))]
    pub async fn maturity_window(&self, query: &MaturityQuery) -> Result<PageResponse<RawRecord>> {
        let list: ListResponse<RawRecord> =
            self.get_json("/api/v1/policy/maturity", query).await?;
        Ok(list.into_page())
    }

    /// Looks a policy up by number via the search endpoint; the backend
    /// exposes no fetch-by-id route.
    #[tracing::instrument(skip(self))]
    pub async fn find_policy(&self, policy_number: &str) -> Result<Option<RawRecord>> {
        let query = SearchQuery {
            policy_number: Some(policy_number.to_string()),
            page: 0,
            size: 1,
            ..SearchQuery::default()
        };
        let page = self.search_policies(&query).await?;
        Ok(page.content.into_iter().next())
    }
}
