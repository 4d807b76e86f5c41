//! `Config::from_env` covers required-var enforcement, defaulting, and type parsing. All
//! scenarios run inside a single test function: the process environment is shared mutable state,
//! and running these as separate `#[test]` functions would race across threads.

use orchestrator::Config;

const REQUIRED_VARS: &[(&str, &str)] = &[
    ("DOCUMENT_STORE_URI", "mongodb://localhost:27017"),
    ("KMS_API_URL", "https://kms.example.com"),
    ("KMS_API_KEY", "test-api-key"),
    ("KMS_API_SECRET_PATH", "/etc/xrpl-mint-burn/kms.pem"),
    ("XRP_NODE_API_URL", "https://xrpl-node.example.com"),
    ("XRP_LEDGER_EXPLORER_URL", "https://explorer.example.com/transactions/"),
];

const OPTIONAL_VARS: &[&str] = &[
    "NAMESPACE",
    "API_PORT",
    "DOCUMENT_STORE_DATABASE",
    "XRP_BASE_FEE",
    "XRP_LEDGER_INCREMENT",
    "XRP_HASH_SIZE",
    "XRP_PREFIX_UNSIGNED",
    "XRP_PREFIX_SIGNED",
    "KMS_POLL_INTERVAL_SECS",
    "KMS_POLL_TIMEOUT_SECS",
];

fn clear_all() {
    for (key, _) in REQUIRED_VARS {
        std::env::remove_var(key);
    }
    for key in OPTIONAL_VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn from_env_scenarios() {
    clear_all();

    // Missing every required variable fails on the first one encountered.
    assert!(Config::from_env().is_err());

    // Setting all required variables and nothing else fills in defaults.
    for (key, value) in REQUIRED_VARS {
        std::env::set_var(key, value);
    }
    let config = Config::from_env().expect("all required vars set");
    assert_eq!(config.namespace, "xrpl-mint-burn");
    assert_eq!(config.api_port, 8080);
    assert_eq!(config.document_store_database, "xrpl_mint_burn");
    assert_eq!(config.xrpl_base_fee_drops, 12);
    assert_eq!(config.xrpl_ledger_increment, 20);
    assert_eq!(config.xrpl_hash_size, 64);
    assert_eq!(config.xrpl_prefix_unsigned, "53545800");
    assert_eq!(config.xrpl_prefix_signed, "534E4400");
    assert_eq!(config.kms_poll_interval_secs, 5);
    assert_eq!(config.kms_poll_timeout_secs, 600);
    assert_eq!(config.kms_base_url, "https://kms.example.com");

    // An overridden numeric value is honored.
    std::env::set_var("API_PORT", "9090");
    std::env::set_var("KMS_POLL_TIMEOUT_SECS", "120");
    let config = Config::from_env().expect("overrides parse");
    assert_eq!(config.api_port, 9090);
    assert_eq!(config.kms_poll_timeout_secs, 120);

    // A malformed numeric value is rejected rather than silently defaulted.
    std::env::set_var("API_PORT", "not-a-port");
    assert!(Config::from_env().is_err());

    clear_all();
}
