//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! services, so nothing reads process-wide environment variables during
//! request handling.

use crate::error::{BookingError, BookingResult};

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: String,
    namespace: String,
    seed_demo: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the bind address or namespace label
    /// is blank.
    pub fn new(rest_addr: String, namespace: String, seed_demo: bool) -> BookingResult<Self> {
        if rest_addr.trim().is_empty() {
            return Err(BookingError::validation("rest_addr cannot be empty"));
        }
        if namespace.trim().is_empty() {
            return Err(BookingError::validation("namespace cannot be empty"));
        }

        Ok(Self {
            rest_addr,
            namespace,
            seed_demo,
        })
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    /// Deployment label included in startup logs.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether to seed demonstration doctors at startup.
    pub fn seed_demo(&self) -> bool {
        self.seed_demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_fields() {
        assert!(CoreConfig::new("".into(), "medibook.dev".into(), false).is_err());
        assert!(CoreConfig::new("0.0.0.0:3000".into(), "  ".into(), false).is_err());
        let cfg = CoreConfig::new("0.0.0.0:3000".into(), "medibook.dev".into(), true)
            .expect("valid config");
        assert_eq!(cfg.rest_addr(), "0.0.0.0:3000");
        assert!(cfg.seed_demo());
    }
}
