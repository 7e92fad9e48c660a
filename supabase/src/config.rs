// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Supabase project configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SupabaseConfig {
    /// Base URL of the project (e.g., `https://xyzcompany.supabase.co`).
    pub base_url: String,
    /// Anonymous (publishable) API key, sent with every request.
    pub anon_key: String,
    /// Database schema exposed over `PostgREST`.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_schema() -> String {
    "public".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("agendo-supabase/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            anon_key: String::new(),
            schema: default_schema(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl SupabaseConfig {
    /// The WebSocket endpoint of the Realtime service.
    #[must_use]
    pub fn realtime_url(&self) -> String {
        let ws_base = self
            .base_url
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        format!(
            "{}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            ws_base.trim_end_matches('/'),
            self.anon_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realtime_url_swaps_scheme_and_keeps_key() {
        let config = SupabaseConfig {
            base_url: "https://demo.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.realtime_url(),
            "wss://demo.supabase.co/realtime/v1/websocket?apikey=anon&vsn=1.0.0"
        );
    }

    #[test]
    fn defaults_fill_schema_and_timeout() {
        let config: SupabaseConfig =
            serde_json::from_str(r#"{"base_url":"http://x","anon_key":"k"}"#).unwrap();
        assert_eq!(config.schema, "public");
        assert_eq!(config.timeout_secs, 30);
    }
}
