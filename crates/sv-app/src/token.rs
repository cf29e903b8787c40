//! Bearer token caching.
//!
//! Tokens are refreshed once the current time reaches the expiry minus a
//! safety margin. Time is passed in by the caller, as with the other
//! clock-driven pieces of the service layer.

use chrono::TimeDelta;
use sv_core::Timestamp;

use crate::error::SourceError;
use crate::source::TokenProvider;

/// Margin subtracted from the issued lifetime.
pub const DEFAULT_EXPIRY_MARGIN_S: i64 = 20;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Timestamp,
}

/// Caches the provider's token until shortly before it expires.
#[derive(Debug)]
pub struct TokenCache<P> {
    provider: P,
    margin: TimeDelta,
    cached: Option<CachedToken>,
}

impl<P: TokenProvider> TokenCache<P> {
    pub fn new(provider: P) -> Self {
        Self::with_margin(provider, TimeDelta::seconds(DEFAULT_EXPIRY_MARGIN_S))
    }

    pub fn with_margin(provider: P, margin: TimeDelta) -> Self {
        Self {
            provider,
            margin,
            cached: None,
        }
    }

    /// Check if the cached token must be replaced at `now`.
    pub fn needs_refresh(&self, now: Timestamp) -> bool {
        match &self.cached {
            Some(token) => now >= token.expires_at,
            None => true,
        }
    }

    /// Current token, fetching a new one if needed.
    pub fn bearer(&mut self, now: Timestamp) -> Result<String, SourceError> {
        if self.needs_refresh(now) {
            self.force_refresh(now)?;
        }
        self.cached
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or(SourceError::Unauthorized)
    }

    /// Fetch a new token regardless of the cached one.
    pub fn force_refresh(&mut self, now: Timestamp) -> Result<(), SourceError> {
        let issued = self.provider.fetch_token()?;
        let expires_at = TimeDelta::try_seconds(issued.expires_in_s)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .and_then(|at| at.checked_sub_signed(self.margin))
            .ok_or_else(|| SourceError::Malformed("token lifetime out of range".to_string()))?;
        tracing::debug!(%expires_at, "refreshed bearer token");
        self.cached = Some(CachedToken {
            access_token: issued.access_token,
            expires_at,
        });
        Ok(())
    }

    /// Expiry of the cached token, margin applied.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.cached.as_ref().map(|t| t.expires_at)
    }

    pub fn header_value(&mut self, now: Timestamp) -> Result<String, SourceError> {
        Ok(format!("Bearer {}", self.bearer(now)?))
    }
}

/// Run `op` with a bearer token, refreshing once and retrying if it is
/// rejected as unauthorized.
pub fn with_token_retry<P, T, F>(
    cache: &mut TokenCache<P>,
    now: Timestamp,
    mut op: F,
) -> Result<T, SourceError>
where
    P: TokenProvider,
    F: FnMut(&str) -> Result<T, SourceError>,
{
    let token = cache.bearer(now)?;
    match op(&token) {
        Err(SourceError::Unauthorized) => {
            tracing::info!("token rejected, refreshing");
            cache.force_refresh(now)?;
            let token = cache.bearer(now)?;
            op(&token)
        }
        other => other,
    }
}
