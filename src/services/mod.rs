pub mod broadcasts;
pub mod media;
pub mod metrics;
pub mod notifications;
pub mod outcome;
pub mod targets;
