use serde::{Deserialize, Serialize};

const RPC_URL_ENV: &str = "BALLOT_RPC_URL";
const API_KEY_ENV: &str = "ALCHEMY_API_KEY";

fn default_rpc_url() -> String {
    "https://solana-devnet.g.alchemy.com/v2".to_string()
}

/// Client connectivity settings.
///
/// The third-party RPC provider key comes from `ALCHEMY_API_KEY`. A
/// missing key degrades connectivity but is not validated at startup -
/// the endpoint is built from whatever is present.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            rpc_url: std::env::var(RPC_URL_ENV).unwrap_or_else(|_| default_rpc_url()),
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }

    /// Full RPC endpoint, with the provider key appended when present.
    pub fn endpoint(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}/{}", self.rpc_url.trim_end_matches('/'), key),
            None => self.rpc_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_without_key_is_the_bare_url() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint(), default_rpc_url());
    }

    #[test]
    fn endpoint_appends_the_provider_key() {
        let config = ClientConfig {
            rpc_url: "https://solana-devnet.g.alchemy.com/v2/".to_string(),
            api_key: Some("secret".to_string()),
        };
        assert_eq!(
            config.endpoint(),
            "https://solana-devnet.g.alchemy.com/v2/secret"
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.rpc_url, default_rpc_url());
        assert_eq!(config.api_key, None);
    }
}
