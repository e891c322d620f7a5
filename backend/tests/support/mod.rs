//! Helpers shared by integration tests that need a real database.
//!
//! Suites that cannot start the embedded cluster fail loudly unless
//! `SKIP_TEST_CLUSTER` is set to `1`, `true`, or `yes` (any case).

pub mod pg_embed;

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .is_ok_and(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Skip with a marker line when allowed, otherwise fail the test.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        return None;
    }
    panic!("embedded PostgreSQL unavailable: {reason}; set SKIP_TEST_CLUSTER=1 to skip");
}
