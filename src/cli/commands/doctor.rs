//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::gemini::API_KEY_VAR;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("      {}", style(hint).dim());
        }
    }
}

/// Run the doctor command.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("System checks");

    let mut results = Vec::new();

    results.push(match preflight::check_api_key() {
        Ok(()) => CheckResult::ok(API_KEY_VAR, "configured"),
        Err(e) => CheckResult::error(
            API_KEY_VAR,
            "not configured",
            &format!("{}", e),
        ),
    });

    for tool in ["ffmpeg", "ffprobe"] {
        results.push(match preflight::check_tool(tool) {
            Ok(()) => CheckResult::ok(tool, "available"),
            Err(_) => CheckResult::error(
                tool,
                "not found",
                "Install ffmpeg and ensure it's in your PATH.",
            ),
        });
    }

    let config_path = Settings::default_config_path();
    results.push(if config_path.exists() {
        CheckResult::ok("config", &format!("{}", config_path.display()))
    } else {
        CheckResult::ok(
            "config",
            "using defaults (run 'skrift config edit' to customize)",
        )
    });

    for result in &results {
        result.print();
    }

    Output::header("Configuration");
    Output::kv("model", &settings.gemini.model);
    Output::kv("output_dir", &settings.general.output_dir);
    Output::kv(
        "chunk_duration",
        &format!("{}s", settings.transcription.chunk_duration_seconds),
    );

    let failed = results.iter().filter(|r| r.status == CheckStatus::Error).count();
    println!();
    if failed == 0 {
        Output::success("All checks passed.");
    } else {
        Output::error(&format!("{} check(s) failed.", failed));
    }

    Ok(())
}
