pub mod dashboard;
pub mod health;
pub mod public;

pub use health::{AppStartTime, HealthService, health_routes};
pub use public::{get_public_profile, public_routes};
