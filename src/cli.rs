use clap::Parser;

/// Setup ONDK (Oxidized NDK) under the Android SDK
#[derive(Debug, Parser)]
#[command(name = "ondk-setup")]
pub struct Cli {
    /// ONDK version to install (e.g., r29.5)
    #[arg(long, value_parser = non_empty)]
    pub version: String,
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("version must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}
