use crate::dto::HealthRes;

/// Simple health service shared by API surfaces.
///
/// Provides a standardised way to report liveness for monitoring and load
/// balancer health checks.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MediBook is alive".into(),
        }
    }
}
