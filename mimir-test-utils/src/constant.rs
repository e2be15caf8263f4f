//! Placeholder credentials used by every test client. None of these are real.

/// User agent sent by test clients.
pub static TEST_USER_AGENT: &str =
    "Mimir/1.0 (contact@example.com; +https://github.com/autumn-order/mimir)";

/// Game API key; mock game endpoints only match requests carrying it.
pub static TEST_API_KEY: &str = "00000000-test-key-0000-000000000000";
