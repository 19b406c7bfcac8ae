use crate::HealthRes;

/// Simple health service shared by the board API front ends.
///
/// This is a liveness probe only: it does not touch the admission source, so a failing
/// export does not make the process look dead.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is up.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            status: "UP".into(),
        }
    }
}
