use std::env;

/// Process-wide configuration, assembled once at startup and threaded down via `Arc` rather than
/// read from an ambient global.
///
/// The required keys (namespace, port, store URIs, KMS credentials) come straight from the
/// process environment. The tunables that govern transaction construction (node URL, base fee,
/// ledger increment, hash size, prefixes, explorer template) live in the same flat, typed struct,
/// populated once before the server starts accepting requests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Logical namespace this deployment runs under (used in logging and metrics).
    pub namespace: String,
    /// Port the HTTP API listens on.
    pub api_port: u16,
    /// MongoDB connection URI for the operation/reference-data document store.
    pub document_store_uri: String,
    /// Database name within the document store.
    pub document_store_database: String,

    /// The custodial signer's base URL.
    pub kms_base_url: String,
    /// The custodial signer's API key, carried as `X-API-Key`.
    pub kms_api_key: String,
    /// Path to the PEM-encoded RSA private key used to sign request JWTs.
    pub kms_api_secret_path: String,

    /// The XRPL node's JSON-RPC URL.
    pub xrpl_node_url: String,
    /// An explorer URL template; the transaction hash is appended directly (no placeholder
    /// token).
    pub xrpl_explorer_base_url: String,
    /// Base fee, in drops, applied to every transaction this system builds.
    pub xrpl_base_fee_drops: u64,
    /// Added to the node's `ledger_current_index` to compute `LastLedgerSequence`.
    pub xrpl_ledger_increment: u32,
    /// Number of hex characters kept from the full SHA-512 pre-image digest.
    pub xrpl_hash_size: usize,
    /// Domain-prefix hex for unsigned-transaction pre-images.
    pub xrpl_prefix_unsigned: String,
    /// Domain-prefix hex for signed-transaction (transaction-id) hashes.
    pub xrpl_prefix_signed: String,

    /// How often the completion worker polls the KMS for a transaction's status.
    pub kms_poll_interval_secs: u64,
    /// The upper bound on total time spent polling before the worker aborts with a timeout.
    pub kms_poll_timeout_secs: u64,
}

/// Errors raised while assembling [`Config`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    /// An environment variable was set but could not be parsed as the expected type.
    #[error("invalid value for environment variable {key}: {value}")]
    Invalid {
        /// The variable name.
        key: &'static str,
        /// The value that failed to parse.
        value: String,
    },
}

impl Config {
    /// Load configuration from the process environment, applying typed defaults where a value is
    /// optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            namespace: env_or("NAMESPACE", "xrpl-mint-burn"),
            api_port: env_parsed_or("API_PORT", 8080)?,
            document_store_uri: required_env("DOCUMENT_STORE_URI")?,
            document_store_database: env_or("DOCUMENT_STORE_DATABASE", "xrpl_mint_burn"),

            kms_base_url: required_env("KMS_API_URL")?,
            kms_api_key: required_env("KMS_API_KEY")?,
            kms_api_secret_path: required_env("KMS_API_SECRET_PATH")?,

            xrpl_node_url: required_env("XRP_NODE_API_URL")?,
            xrpl_explorer_base_url: required_env("XRP_LEDGER_EXPLORER_URL")?,
            xrpl_base_fee_drops: env_parsed_or("XRP_BASE_FEE", 12)?,
            xrpl_ledger_increment: env_parsed_or("XRP_LEDGER_INCREMENT", 20)?,
            xrpl_hash_size: env_parsed_or("XRP_HASH_SIZE", 64)?,
            xrpl_prefix_unsigned: env_or("XRP_PREFIX_UNSIGNED", "53545800"),
            xrpl_prefix_signed: env_or("XRP_PREFIX_SIGNED", "534E4400"),

            kms_poll_interval_secs: env_parsed_or("KMS_POLL_INTERVAL_SECS", 5)?,
            kms_poll_timeout_secs: env_parsed_or("KMS_POLL_TIMEOUT_SECS", 600)?,
        })
    }
}

fn required_env(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn env_or(key: &'static str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
