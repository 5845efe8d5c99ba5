use clap::Parser;
use ftail::Ftail;
use log::LevelFilter;

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The API key to validate. If omitted, the key is read from an
    /// interactive prompt.
    pub key: Option<String>,

    /// Log level
    #[arg(long, default_value_t = String::from("off"))]
    pub log_level: String,
}

/// Initialize console logging at `level`. Fails if a logger was already set,
/// which callers are free to ignore.
pub fn setup_logger(level: LevelFilter) -> Result<(), String> {
    Ftail::new()
        .console(level)
        .init()
        .map_err(|e| e.to_string())
}
