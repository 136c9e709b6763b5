//! Doctor command - validate configuration and show status

use anyhow::Result;
use folio_adapters::sources::FsContentSource;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::load_cms_key;
use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    content: CheckResult,
    cms: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        content: CheckResult::error("Not checked"),
        cms: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    match AppConfig::load(config_path.as_deref()) {
        Ok(config) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            report.content = check_content(&config.content.dir).await;
            report.cms = check_cms(&config);
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
        }
    }

    let checks = [&report.config, &report.content, &report.cms];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

// A missing directory only means the listing renders empty, so it warns.
async fn check_content(dir: &Path) -> CheckResult {
    let source = match FsContentSource::new(dir) {
        Ok(source) => source,
        Err(e) => return CheckResult::warn(e.to_string()),
    };

    match source.scan().await {
        Ok(report) if report.rejected.is_empty() => {
            CheckResult::ok(format!("{} posts in {}", report.posts.len(), dir.display()))
                .with_details(serde_json::json!({
                    "count": report.posts.len(),
                    "slugs": report.posts.iter().map(|p| &p.slug).collect::<Vec<_>>(),
                }))
        }
        Ok(report) => CheckResult::warn(format!(
            "{} posts, {} invalid records skipped (run 'folio content validate')",
            report.posts.len(),
            report.rejected.len()
        ))
        .with_details(serde_json::json!({
            "rejected": report.rejected.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        })),
        Err(e) => CheckResult::error(format!("Failed to scan content: {}", e)),
    }
}

fn check_cms(config: &AppConfig) -> CheckResult {
    if !config.cms_configured() {
        return CheckResult::ok("CMS disabled, using local content");
    }

    let env_var = &config.cms.key_env;
    if env_var.trim().is_empty() {
        return CheckResult::error("No content API key env var configured");
    }

    // Only report presence; never print the key
    match load_cms_key(env_var) {
        Some(_) => CheckResult::ok(format!(
            "URL: {}, Content key: {} (set)",
            config.cms.url, env_var
        )),
        None => CheckResult::warn(format!(
            "URL: {}, Content key: {} (not set, falling back to local content)",
            config.cms.url, env_var
        )),
    }
}

fn print_report(report: &DoctorReport) {
    println!("folio Doctor Report");
    println!("===================");
    println!();

    print_check("Config", &report.config);
    print_check("Content", &report.content);
    print_check("CMS", &report.cms);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready! Try: folio list");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
