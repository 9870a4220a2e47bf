//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Bearer session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Hours a newly issued session token stays valid
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 168_i64)]
    pub session_ttl_hours: i64,
}

impl SessionConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.session_ttl_hours)
    }
}
