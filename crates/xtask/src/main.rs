use std::path::{Path, PathBuf};

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

/// Crates the domain crate must never depend on
const DOMAIN_FORBIDDEN: &[&str] = &[
    "dioxus",
    "web-sys",
    "js-sys",
    "wasm-bindgen",
    "wasm-bindgen-futures",
    "gloo-timers",
    "tracing-wasm",
    "turbo-racing-player",
];

/// Player sources allowed to touch browser bindings directly
const BROWSER_BINDING_ALLOWED: &[&str] = &[
    "src/main.rs",
    "src/infrastructure/platform/",
    "src/ui/presentation/components/error_fallback.rs",
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = domain_violations(&metadata)?;
    let player_src = metadata.workspace_root.join("crates/player/src");
    violations.extend(binding_violations(&player_src)?);

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

fn domain_violations(metadata: &Metadata) -> anyhow::Result<Vec<String>> {
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == "turbo-racing-domain")
        .context("turbo-racing-domain not found in workspace")?;

    Ok(domain
        .dependencies
        .iter()
        .filter(|d| DOMAIN_FORBIDDEN.contains(&d.name.as_str()))
        .map(|d| format!("turbo-racing-domain depends on {}", d.name))
        .collect())
}

fn binding_violations(src_root: &Path) -> anyhow::Result<Vec<String>> {
    let pattern = Regex::new(r"\b(web_sys|js_sys|wasm_bindgen(_futures)?)::")
        .context("compiling binding pattern")?;
    let mut violations = Vec::new();
    for file in rust_files(src_root)? {
        let relative = file
            .strip_prefix(src_root.parent().unwrap_or(src_root))
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        if is_binding_allowed(&relative) {
            continue;
        }
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        for (index, line) in text.lines().enumerate() {
            if pattern.is_match(line) {
                violations.push(format!(
                    "{}:{} uses browser bindings outside infrastructure",
                    relative,
                    index + 1
                ));
            }
        }
    }
    Ok(violations)
}

fn is_binding_allowed(relative: &str) -> bool {
    BROWSER_BINDING_ALLOWED
        .iter()
        .any(|allowed| relative == *allowed || (allowed.ends_with('/') && relative.starts_with(allowed)))
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
