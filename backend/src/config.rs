//! Runtime configuration.
//!
//! Built-in defaults, then an optional `storefront.toml`, then `STOREFRONT_*`
//! and `TYPESENSE_*` environment variables, merged with Figment.

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypesenseConfig {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub search_only_api_key: String,
    pub connection_timeout_seconds: u64,
}

impl Default for TypesenseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8108,
            protocol: "http".to_string(),
            search_only_api_key: "xyz".to_string(),
            connection_timeout_seconds: 10,
        }
    }
}

impl TypesenseConfig {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub collection: String,
    pub listen_addr: String,
    pub typesense: TypesenseConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            collection: common::search_const::PRODUCTS_COLLECTION.to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            typesense: TypesenseConfig::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(StorefrontConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("STOREFRONT_"))
            .merge(Env::prefixed("TYPESENSE_").map(|key| format!("typesense.{key}").into()))
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        figment
            .extract()
            .context("Failed to load storefront configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_typesense() {
        let config = StorefrontConfig::from_figment(Figment::from(Serialized::defaults(
            StorefrontConfig::default(),
        )))
        .unwrap();
        assert_eq!(config.collection, "products");
        assert_eq!(config.typesense.base_url(), "http://localhost:8108");
        assert_eq!(config.typesense.connection_timeout_seconds, 10);
    }

    #[test]
    fn toml_overrides_nested_values() {
        let figment = Figment::from(Serialized::defaults(StorefrontConfig::default())).merge(
            Toml::string(
                r#"
                collection = "catalogue"
                [typesense]
                host = "search.internal"
                protocol = "https"
                port = 443
                "#,
            ),
        );
        let config = StorefrontConfig::from_figment(figment).unwrap();
        assert_eq!(config.collection, "catalogue");
        assert_eq!(config.typesense.base_url(), "https://search.internal:443");
        assert_eq!(config.typesense.search_only_api_key, "xyz");
    }
}
