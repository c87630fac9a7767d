//! Current page location providers.

use std::sync::{Arc, RwLock};

use url::Url;

use crate::error::CaptureError;

/// Supplies the page location recorded in every record's `url` field.
pub trait PageLocation: Send + Sync {
    fn href(&self) -> String;
}

impl<F> PageLocation for F
where
    F: Fn() -> String + Send + Sync,
{
    fn href(&self) -> String {
        self()
    }
}

/// A location that changes as the app navigates.
#[derive(Debug, Clone)]
pub struct SharedLocation {
    inner: Arc<RwLock<Url>>,
}

impl SharedLocation {
    /// Parse the initial location.
    pub fn parse(location: &str) -> Result<Self, CaptureError> {
        let url = Url::parse(location).map_err(|source| CaptureError::InvalidLocation {
            location: location.to_string(),
            source,
        })?;
        Ok(Self {
            inner: Arc::new(RwLock::new(url)),
        })
    }

    /// Navigate to a location relative to the current one.
    pub fn navigate(&self, target: &str) -> Result<(), CaptureError> {
        let mut current = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let next = current.join(target).map_err(|source| CaptureError::InvalidLocation {
            location: target.to_string(),
            source,
        })?;
        log::debug!("Location changed: {} -> {}", current, next);
        *current = next;
        Ok(())
    }
}

impl PageLocation for SharedLocation {
    fn href(&self) -> String {
        self.inner
            .read()
            .map(|url| url.to_string())
            .unwrap_or_else(|e| e.into_inner().to_string())
    }
}
