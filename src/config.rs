use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Search index connection
    pub index: IndexConfig,
}

/// Where the module documents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub host: String,
    pub port: u16,
    /// Index (collection) name
    pub name: String,
    /// Document type. Empty for clusters without mapping types.
    pub doc_type: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds. None waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            index: IndexConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: "elasticsearch".to_string(),
            port: 9200,
            name: "modularity".to_string(),
            doc_type: "module".to_string(),
            connect_timeout_secs: 10,
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("MODULE_BROWSER_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(host) = lookup("ELASTICSEARCH_HOST") {
            config.index.host = host;
        }
        if let Some(val) = lookup("ELASTICSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                config.index.port = port;
            }
        }
        if let Some(name) = lookup("ELASTICSEARCH_INDEX") {
            config.index.name = name;
        }
        if let Some(doc_type) = lookup("ELASTICSEARCH_DOC_TYPE") {
            config.index.doc_type = doc_type;
        }
        if let Some(val) = lookup("ELASTICSEARCH_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.index.connect_timeout_secs = v;
            }
        }
        if let Some(val) = lookup("ELASTICSEARCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.index.timeout_secs = Some(v);
            }
        }

        config
    }
}

impl IndexConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// URL of an index endpoint such as `_search` or `_mget`.
    pub fn endpoint(&self, action: &str) -> String {
        if self.doc_type.is_empty() {
            format!("{}/{}/{action}", self.base_url(), self.name)
        } else {
            format!("{}/{}/{}/{action}", self.base_url(), self.name, self.doc_type)
        }
    }
}
