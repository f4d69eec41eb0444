use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::runner::ScenarioResult;

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Smoke Test Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let success_rate = (passed as f64 / total as f64) * 100.0;
        writeln!(out, "Success rate: {success_rate:.1}%")?;
    }
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.status_line().bold())?;
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.passed {
            writeln!(out, "   • {}", result.message.red())?;
        }
    }

    if !results.is_empty() {
        let fastest = results.iter().min_by_key(|r| r.duration).unwrap();
        let slowest = results.iter().max_by_key(|r| r.duration).unwrap();
        writeln!(out)?;
        writeln!(out, "{}", "⚡ Timing".bright_yellow().bold())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.duration
        )?;
    }

    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Storefront Smoke Test Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", total - passed)?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(out, "- **Status**: {}", result.status_line())?;
        writeln!(out, "- **Time**: {:?}", result.duration)?;
        if !result.passed {
            writeln!(out, "- **Failure**: {}", result.message)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
