use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "feedgate", about = "Social feed backend")]
pub struct Cli {
    /// Path to a settings TOML file.
    #[arg(long)]
    pub settings: Option<String>,
}
