use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => UNKNOWN,
    };
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version =
        command_stdout(&rustc, &["--version"]).unwrap_or_else(|| UNKNOWN.to_string());
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    emit("HASH", &hash);
    emit("STATUS", status);
    emit("TIMESTAMP", &timestamp);
    emit("TARGET", &env::var("TARGET").unwrap_or_else(|_| UNKNOWN.to_string()));
    emit("PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()));
    emit("RUSTC", &rustc_version);
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env=HOUSEHOLD_LEDGER_BUILD_{key}={value}");
}

/// Trimmed stdout of a successful run, `None` if the tool is missing or fails.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
