pub mod app;
pub mod diagnostics;
pub mod errors;
