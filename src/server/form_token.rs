//! Signed, time-limited tokens embedded in the add and edit forms.
//!
//! A token is `<unix_ts>.<hex sha256(secret ":" unix_ts)>`. Submissions must
//! carry a token issued by this server no longer than `max_age` ago.

use sha2::{Digest, Sha256};
use std::time::Duration;

pub const DEFAULT_TOKEN_MAX_AGE: Duration = Duration::from_secs(3600);

/// Tolerated clock drift for tokens stamped slightly in the future.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

pub struct FormTokens {
    secret: String,
    max_age: Duration,
}

impl FormTokens {
    pub fn new(secret: &str) -> Self {
        Self::with_max_age(secret, DEFAULT_TOKEN_MAX_AGE)
    }

    pub fn with_max_age(secret: &str, max_age: Duration) -> Self {
        Self {
            secret: secret.to_string(),
            max_age,
        }
    }

    pub fn issue(&self) -> String {
        self.issue_at(chrono::Utc::now().timestamp())
    }

    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    fn issue_at(&self, timestamp: i64) -> String {
        format!("{}.{}", timestamp, self.digest(timestamp))
    }

    fn verify_at(&self, token: &str, now: i64) -> bool {
        let Some((timestamp, digest)) = token.split_once('.') else {
            return false;
        };
        let Ok(timestamp) = timestamp.parse::<i64>() else {
            return false;
        };
        let age = now - timestamp;
        if age < -MAX_CLOCK_SKEW_SECS || age > self.max_age.as_secs() as i64 {
            return false;
        }
        constant_time_eq(digest.as_bytes(), self.digest(timestamp).as_bytes())
    }

    fn digest(&self, timestamp: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(timestamp.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
