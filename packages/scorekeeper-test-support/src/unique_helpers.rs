//! Unique test data built from ULIDs so parallel tests never share ids.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use scorekeeper_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `count` unique player ids sharing one prefix, in seating order.
pub fn unique_player_ids(prefix: &str, count: usize) -> Vec<String> {
    let batch = Ulid::new();
    (1..=count).map(|seat| format!("{prefix}-{batch}-{seat}")).collect()
}
