// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! `PostgREST` query tests with wiremock.

use agendo_supabase::{SupabaseClient, SupabaseConfig, SupabaseError};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(SupabaseConfig {
        base_url: server.uri(),
        anon_key: "anon-key".to_string(),
        ..Default::default()
    })
    .expect("client")
}

#[tokio::test]
async fn select_renders_eq_and_or_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param(
            "or",
            "(status.eq.pending,and(status.eq.cancelado,scheduled_for.gte.2024-01-01T03:00:00Z,scheduled_for.lt.2024-01-02T03:00:00Z))",
        ))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "status": "pending" },
            { "id": 2, "status": "cancelado" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Value> = client(&server)
        .from("appointments")
        .select("*")
        .eq("user_id", "u1")
        .or("status.eq.pending,and(status.eq.cancelado,scheduled_for.gte.2024-01-01T03:00:00Z,scheduled_for.lt.2024-01-02T03:00:00Z)")
        .fetch(Some("user-jwt"))
        .await
        .expect("fetch");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], 1);
}

#[tokio::test]
async fn update_patches_matching_rows() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "in.(3,5)"))
        .and(query_param("user_id", "eq.u1"))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!({ "status": "cancelado" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "status": "cancelado" },
            { "id": 5, "status": "cancelado" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Value> = client(&server)
        .from("appointments")
        .in_list("id", &[3_i64, 5])
        .eq("user_id", "u1")
        .update(&json!({ "status": "cancelado" }), Some("user-jwt"))
        .await
        .expect("update");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["status"], "cancelado");
}

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .from("appointments")
        .select("*")
        .fetch::<Value>(None)
        .await
        .expect_err("should fail");

    assert!(matches!(err, SupabaseError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
        .mount(&server)
        .await;

    let err = client(&server)
        .from("appointments")
        .select("*")
        .fetch::<Value>(Some("stale-jwt"))
        .await
        .expect_err("should fail");

    assert!(matches!(err, SupabaseError::Auth(_)), "got {err:?}");
}
