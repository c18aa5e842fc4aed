//! nl2ui command-line front end
//!
//! ```bash
//! nl2ui config set api_key sk-...
//! nl2ui generate "生成一个用户注册表单" --out Register.vue
//! nl2ui compile page.json
//! nl2ui validate page.json
//! ```

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nl2ui")]
#[command(about = "Turn natural-language UI requests into Vue single-file components", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/nl2ui/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a component from a natural-language request
    Generate {
        /// The request, e.g. "生成一个用户注册表单"
        #[arg(value_name = "TEXT")]
        text: String,

        /// Write the generated source here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write the DSL as JSON
        #[arg(long, value_name = "FILE")]
        dsl_out: Option<PathBuf>,

        /// Emit real import declarations instead of commented ones
        #[arg(long)]
        live_imports: bool,

        /// Reject model output that violates the DSL rules
        #[arg(long)]
        strict: bool,
    },

    /// Compile a DSL JSON file
    Compile {
        #[arg(value_name = "DSL_FILE")]
        dsl: PathBuf,

        /// Write the generated source here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Emit real import declarations instead of commented ones
        #[arg(long)]
        live_imports: bool,
    },

    /// Check a DSL JSON file against the component vocabulary and grid rules
    Validate {
        #[arg(value_name = "DSL_FILE")]
        dsl: PathBuf,
    },

    /// Read or change the model settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set a value (keys: api_key, base_url, model)
    Set { key: String, value: String },
    /// Remove a value
    Unset { key: String },
    /// Show the current values (the API key is masked)
    Show,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
