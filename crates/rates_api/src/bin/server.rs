use rates_api::run_server;
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Settings file location from the environment (with a sane default)
    let settings_path_raw =
        env::var("SETTINGS_PATH").unwrap_or_else(|_| "settings.json".to_string());

    // settings.json ships at the workspace root; a crate-local copy is only used when that one is missing.
    let crate_root = env::current_dir()?;
    let workspace_root = find_workspace_root().unwrap_or_else(|| crate_root.clone());
    let settings_path =
        resolve_with_fallback(&settings_path_raw, &[&workspace_root, &crate_root]);

    let settings = settings_loader::load_runtime_settings(Some(&settings_path))?;

    println!("DolarBot Rates API Server");
    println!("=========================");
    println!("Crate root: {}", crate_root.display());
    println!("Workspace root: {}", workspace_root.display());
    println!("Settings path (resolved): {}", settings_path.display());
    println!("Version: {}", settings.version);
    println!("Listening on: {}:{}", settings.host, settings.port);
    println!(
        "Environment overrides: SETTINGS_PATH='{}' HOST/PORT/TAX_PERCENT/GIT_REPO",
        settings_path_raw
    );
    println!();

    // Start the server
    run_server(settings).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root() -> Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    // Give up after ten parent directories
    for _ in 0..10 {
        let candidate = dir.join("Cargo.toml");
        if candidate.exists() {
            if let Ok(content) = std::fs::read_to_string(&candidate) {
                if content.contains("[workspace]") {
                    return Some(dir.clone());
                }
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Resolve a raw path string against a list of base directories, returning the first existing match, or the first constructed path.
fn resolve_with_fallback(raw: &str, bases: &[&PathBuf]) -> PathBuf {
    let input = PathBuf::from(raw);
    if input.is_absolute() {
        return input;
    }
    for base in bases {
        let candidate = base.join(&input);
        if candidate.exists() {
            return candidate;
        }
    }
    // If none exist yet, just use the first base.
    match bases.first() {
        Some(base) => base.join(input),
        None => input,
    }
}
