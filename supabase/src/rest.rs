// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! `PostgREST` query builder.

use std::fmt::Display;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SupabaseError;
use crate::http::HttpClient;

/// A query against one `PostgREST`-exposed table.
///
/// Filters accumulate as query parameters; the query runs when [`fetch`]
/// or [`update`] is awaited.
///
/// [`fetch`]: TableQuery::fetch
/// [`update`]: TableQuery::update
#[derive(Debug)]
pub struct TableQuery {
    http: Arc<HttpClient>,
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery {
    pub(crate) fn new(http: Arc<HttpClient>, table: &str) -> Self {
        Self {
            http,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    /// Restricts the returned columns (`select=` parameter).
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Adds an equality filter: `column=eq.value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Adds a membership filter: `column=in.(v1,v2,...)`.
    #[must_use]
    pub fn in_list<T: Display>(mut self, column: &str, values: &[T]) -> Self {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.params
            .push((column.to_string(), format!("in.({joined})")));
        self
    }

    /// Adds a disjunction filter: `or=(clause)`. The clause is given in
    /// `PostgREST` syntax without the outer parentheses, e.g.
    /// `status.eq.pending,status.eq.done`.
    #[must_use]
    pub fn or(mut self, clause: &str) -> Self {
        self.params.push(("or".to_string(), format!("({clause})")));
        self
    }

    /// Executes the query as a read, decoding the rows into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        self,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let path = format!("/rest/v1/{}", self.table);
        tracing::debug!(table = %self.table, params = ?self.params, "select");
        let req = self
            .http
            .build_request(Method::GET, &path, access_token)
            .query(&self.params);

        let resp = self.http.execute(req).await?;
        let rows = resp.json().await?;
        Ok(rows)
    }

    /// Executes the query as a PATCH applying `patch` to every matching
    /// row, returning the updated rows.
    pub async fn update<T: DeserializeOwned>(
        self,
        patch: &impl Serialize,
        access_token: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let path = format!("/rest/v1/{}", self.table);
        tracing::debug!(table = %self.table, params = ?self.params, "update");
        let req = self
            .http
            .build_request(Method::PATCH, &path, access_token)
            .header("Prefer", "return=representation")
            .query(&self.params)
            .json(patch);

        let resp = self.http.execute(req).await?;
        let rows = resp.json().await?;
        Ok(rows)
    }

    #[cfg(test)]
    fn rendered_params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupabaseConfig;

    fn query() -> TableQuery {
        let config = SupabaseConfig {
            base_url: "http://localhost".to_string(),
            anon_key: "anon".to_string(),
            ..Default::default()
        };
        TableQuery::new(Arc::new(HttpClient::new(config).unwrap()), "appointments")
    }

    #[test]
    fn eq_renders_postgrest_operator() {
        let q = query().eq("user_id", "u1");
        assert_eq!(
            q.rendered_params(),
            &[("user_id".to_string(), "eq.u1".to_string())]
        );
    }

    #[test]
    fn in_list_joins_values() {
        let q = query().in_list("id", &[3_i64, 5, 8]);
        assert_eq!(
            q.rendered_params(),
            &[("id".to_string(), "in.(3,5,8)".to_string())]
        );
    }

    #[test]
    fn or_wraps_clause_in_parens() {
        let q = query().or("status.eq.pending,status.eq.done");
        assert_eq!(
            q.rendered_params(),
            &[("or".to_string(), "(status.eq.pending,status.eq.done)".to_string())]
        );
    }
}
