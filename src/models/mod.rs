pub mod greeting;
pub mod health;

pub use greeting::Greeting;
pub use health::HealthStatus;
