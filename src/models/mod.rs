pub mod biometrics;
pub mod daily_log;
pub mod partial;
pub mod schema;
pub mod source;
