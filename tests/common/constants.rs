//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the fake provider's data changes, update only this file.

// ============================================================================
// Fake provider catalog
// ============================================================================

/// Provider id of "Daft Punk"
pub const ARTIST_ID: u64 = 27;
pub const ARTIST_NAME: &str = "Daft Punk";

/// Provider id of an artist the fake provider does not know
pub const UNKNOWN_ARTIST_ID: u64 = 9_999_999;

/// "Human After All" by Daft Punk
pub const ALBUM_1_ID: u64 = 3_155_975;

/// "Discovery" by Daft Punk
pub const ALBUM_2_ID: u64 = 302_127;

/// "Human After All", track 1 of album 1
pub const TRACK_1_ID: u64 = 3_135_553;

/// "The Prime Time of Your Life", track 2 of album 1
pub const TRACK_2_ID: u64 = 3_135_554;

/// "One More Time", track 1 of album 2
pub const TRACK_3_ID: u64 = 3_135_556;

/// Search query with hits in the fake provider
pub const MATCHING_QUERY: &str = "daft punk";

/// Search query the fake provider answers with an error envelope
pub const FAILING_QUERY: &str = "quota";

// ============================================================================
// Timeouts
// ============================================================================

/// Time to wait for a spawned server to answer its first request
pub const SERVER_READY_TIMEOUT_MS: u64 = 5_000;

/// Delay between readiness probes
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout applied to every request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Cache age configured on test servers
pub const TEST_CACHE_AGE_SEC: usize = 60;
