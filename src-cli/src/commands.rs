//! Command implementations
//!
//! Each command returns the process exit code; hard errors bubble up as
//! `CliError` and are logged by `main`.

use std::path::Path;
use std::sync::Arc;

use nl_parser::constants::settings_keys;
use nl_parser::{
    decode_dsl, FileSettingsStore, GenerationStatus, NlParser, ParseError, ParserOptions,
    ParserSession, SettingsError, ValidationMode,
};
use ui_codegen::{validate, GeneratorOptions, ImportMode, SfcGenerator, UiDsl};

use crate::{Cli, Commands, ConfigAction};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Invalid DSL file: {0}")]
    Dsl(#[from] ParseError),
    #[error("Failed to serialize DSL: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("No config directory available; pass --settings")]
    NoSettingsPath,
    #[error("Unknown settings key '{0}' (expected api_key, base_url or model)")]
    UnknownKey(String),
}

pub async fn run(cli: Cli) -> Result<i32, CliError> {
    let settings_path = match cli.settings {
        Some(path) => path,
        None => FileSettingsStore::default_path().ok_or(CliError::NoSettingsPath)?,
    };

    match cli.command {
        Commands::Generate {
            text,
            out,
            dsl_out,
            live_imports,
            strict,
        } => {
            generate(
                &settings_path,
                &text,
                out.as_deref(),
                dsl_out.as_deref(),
                generator(live_imports),
                strict,
            )
            .await
        }
        Commands::Compile {
            dsl,
            out,
            live_imports,
        } => {
            let dsl = read_dsl(&dsl).await?;
            let source = generator(live_imports).generate(Some(&dsl));
            emit(&source, out.as_deref()).await?;
            Ok(0)
        }
        Commands::Validate { dsl } => {
            let dsl = read_dsl(&dsl).await?;
            let violations = validate(&dsl);
            if violations.is_empty() {
                println!("OK: no violations");
                return Ok(0);
            }
            for violation in &violations {
                println!("{}", violation);
            }
            Ok(1)
        }
        Commands::Config { action } => config(&settings_path, action).await,
    }
}

fn generator(live_imports: bool) -> SfcGenerator {
    SfcGenerator::with_options(GeneratorOptions {
        import_mode: if live_imports {
            ImportMode::Live
        } else {
            ImportMode::Advisory
        },
        ..Default::default()
    })
}

async fn generate(
    settings_path: &Path,
    text: &str,
    out: Option<&Path>,
    dsl_out: Option<&Path>,
    generator: SfcGenerator,
    strict: bool,
) -> Result<i32, CliError> {
    let settings = FileSettingsStore::load(settings_path).await?;
    let options = ParserOptions {
        validation: if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        },
        ..Default::default()
    };
    let session = ParserSession::new(NlParser::new(Arc::new(settings)).with_options(options));

    let Some(outcome) = session.run_command(text).await else {
        return Ok(1);
    };
    eprintln!("{}", outcome.message);
    for violation in &outcome.violations {
        eprintln!("  warning: {}", violation);
    }

    if matches!(outcome.status, GenerationStatus::Failure { .. }) {
        return Ok(1);
    }
    let Some(dsl) = session.current_dsl() else {
        return Ok(1);
    };

    if let Some(path) = dsl_out {
        write_file(path, &serde_json::to_string_pretty(&dsl)?).await?;
    }
    emit(&session.compile_current(&generator), out).await?;
    Ok(0)
}

async fn config(settings_path: &Path, action: ConfigAction) -> Result<i32, CliError> {
    let store = FileSettingsStore::load(settings_path).await?;

    match action {
        ConfigAction::Set { key, value } => {
            store.set(resolve_key(&key)?, value);
            store.save().await?;
        }
        ConfigAction::Unset { key } => {
            if store.remove(resolve_key(&key)?).is_some() {
                store.save().await?;
            }
        }
        ConfigAction::Show => {
            println!("# {}", store.path().display());
            let entries = store.entries();
            for key in settings_keys::ALL {
                let value = match entries.get(*key) {
                    Some(value) if *key == settings_keys::API_KEY => mask_secret(value),
                    Some(value) => value.clone(),
                    None => "(unset)".to_string(),
                };
                println!("{} = {}", key, value);
            }
        }
    }

    Ok(0)
}

/// Map a short or full key name to its settings key
fn resolve_key(name: &str) -> Result<&'static str, CliError> {
    let normalized = name.replace('-', "_");
    let short = normalized.strip_prefix("nl2ui_").unwrap_or(&normalized);
    match short {
        "api_key" => Ok(settings_keys::API_KEY),
        "base_url" => Ok(settings_keys::BASE_URL),
        "model" => Ok(settings_keys::MODEL),
        _ => Err(CliError::UnknownKey(name.to_string())),
    }
}

fn mask_secret(value: &str) -> String {
    let visible: String = value.chars().take(3).collect();
    format!("{}***", visible)
}

async fn read_dsl(path: &Path) -> Result<UiDsl, CliError> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(decode_dsl(&contents)?)
}

async fn emit(source: &str, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) => write_file(path, source).await,
        None => {
            println!("{}", source);
            Ok(())
        }
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
