// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Terminal rendering of API responses and automation results.
//!
//! Every formatter returns a `String` so callers decide where it goes.

use owo_colors::OwoColorize;
use serde_json::Value;
use std::fmt::Write as _;
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::Service;
use crate::automation::{ConnectionTarget, ExecutionResult, Outcome};

const NOT_AVAILABLE: &str = "N/A";

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Render a scalar JSON value the way a person would type it.
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field of `object` as display text, `N/A` when absent or null.
fn field(object: &Value, key: &str) -> String {
    object
        .get(key)
        .map(scalar)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {} {}", format!("{label}:").blue(), value);
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", format!("=== {title} ===").cyan().bold());
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_header(title: &str) -> String {
        let terminal_width = terminal_width();

        let border = "─".repeat(terminal_width);
        let title_text = format!(" {title} ");
        let title_styled = title_text.cyan().bold().to_string();
        let padding = (terminal_width.saturating_sub(title.width() + 2)) / 2;

        format!(
            "{}\n{}{}\n{}",
            border.dimmed(),
            " ".repeat(padding),
            title_styled,
            border.dimmed()
        )
    }

    /// Generic rendering for any JSON payload.
    ///
    /// Nested containers print a `key:` heading and recurse; scalars print
    /// `  key: value`. Array items are separated by a blank line.
    pub fn format_value(value: &Value) -> String {
        let mut out = String::new();
        Self::write_value(&mut out, value);
        out
    }

    fn write_value(out: &mut String, value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    if value.is_object() || value.is_array() {
                        let _ = writeln!(out, "\n{}", format!("{key}:").cyan());
                        Self::write_value(out, value);
                    } else {
                        line(out, key, scalar(value));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    Self::write_value(out, item);
                    out.push('\n');
                }
            }
            other => {
                let _ = writeln!(out, "  {}", scalar(other));
            }
        }
    }

    /// Numbered service list; numbers are valid `<service>` selectors.
    pub fn format_services(services: &[Service]) -> String {
        if services.is_empty() {
            return format!("{}\n", "No services found.".red());
        }

        let id_width = services
            .iter()
            .map(|s| s.internal_id.width())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for (index, service) in services.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<id_width$}  {:<9} {}",
                (index + 1).to_string().blue(),
                service.internal_id,
                service.service_type.as_str(),
                service.name.bold(),
            );
        }
        out
    }

    pub fn format_account(data: &Value) -> String {
        if !data.is_object() {
            return format!("{}\n", "No account data available".red());
        }

        let mut out = String::new();
        section(&mut out, "ACCOUNT INFORMATION");
        line(
            &mut out,
            "Name",
            format!("{} {}", field(data, "firstname"), field(data, "lastname")),
        );
        line(&mut out, "Email", field(data, "email"));
        line(&mut out, "Profile Image", field(data, "profile_image"));

        let balance = data.get("balance").and_then(Value::as_f64).unwrap_or(0.0);
        let balance_text = format!("€{}", field(data, "balance"));
        let balance_text = if balance > 0.0 {
            balance_text.green().to_string()
        } else if balance < 0.0 {
            balance_text.red().to_string()
        } else {
            balance_text.yellow().to_string()
        };
        line(&mut out, "Balance", balance_text);

        let plus = data
            .get("is_plus_user")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        line(
            &mut out,
            "Plus User",
            if plus {
                "Yes".green().to_string()
            } else {
                "No".yellow().to_string()
            },
        );
        line(&mut out, "Registry Date", field(data, "registry_date"));

        let discord = data
            .get("discord_id")
            .filter(|v| !v.is_null() && v.as_str() != Some(""))
            .map(scalar);
        line(
            &mut out,
            "Discord ID",
            match discord {
                Some(id) => id.green().to_string(),
                None => "Not linked".yellow().to_string(),
            },
        );

        if let Some(address) = data
            .get("invoice_address")
            .filter(|a| a.as_object().is_some_and(|m| !m.is_empty()))
        {
            section(&mut out, "INVOICE ADDRESS");
            line(&mut out, "Name", field(address, "name"));
            let number = address.get("number").map(scalar).unwrap_or_default();
            line(
                &mut out,
                "Street",
                format!("{} {}", field(address, "street"), number)
                    .trim_end()
                    .to_string(),
            );
            line(&mut out, "ZIP Code", field(address, "zip"));
            line(&mut out, "City", field(address, "city"));
            line(&mut out, "Country", field(address, "country"));
        }
        out
    }

    pub fn format_donations(data: &Value) -> String {
        if !data.is_object() {
            return format!("{}\n", "No donation data available".red());
        }
        let empty = Value::Null;
        let info = data.get("information").unwrap_or(&empty);

        let mut out = String::new();
        section(&mut out, "DONATION PAGE INFORMATION");
        line(&mut out, "Enabled", field(info, "enabled"));
        line(&mut out, "Description", field(info, "description"));
        line(&mut out, "Link", field(info, "link"));
        line(&mut out, "Background Image", field(info, "background_image"));

        section(&mut out, "DONATIONS");
        match data.get("donations").and_then(Value::as_array) {
            Some(donations) if !donations.is_empty() => {
                for donation in donations {
                    let _ = writeln!(
                        out,
                        "\n  {} {}",
                        "Donation ID:".magenta(),
                        field(donation, "id")
                    );
                    line(&mut out, "Date", field(donation, "date"));
                    line(&mut out, "Donator", field(donation, "donator"));
                    line(&mut out, "Amount", format!("€{}", field(donation, "amount")));
                    let status = field(donation, "status");
                    let status = if status == "paid" {
                        status.green().to_string()
                    } else {
                        status.yellow().to_string()
                    };
                    line(&mut out, "Status", status);
                }
            }
            _ => {
                let _ = writeln!(out, "  {}", "No donations found".yellow());
            }
        }
        out
    }

    pub fn format_affiliate(data: &Value) -> String {
        if !data.is_object() {
            return format!("{}\n", "No affiliate data available".red());
        }
        let empty = Value::Null;
        let info = data.get("information").unwrap_or(&empty);
        let summary = data.get("summary").unwrap_or(&empty);

        let mut out = String::new();
        section(&mut out, "AFFILIATE INFORMATION");
        line(&mut out, "Referral Link", field(info, "link"));

        section(&mut out, "SUMMARY");
        line(&mut out, "Confirmed Leads", field(summary, "confirmed_leads"));
        line(&mut out, "URL Clicks", field(summary, "url_clicks"));
        line(
            &mut out,
            "Balance Paid",
            format!("€{}", field(summary, "balance_paid")),
        );
        line(
            &mut out,
            "Balance Pending",
            format!("€{}", field(summary, "balance_pending")),
        );

        section(&mut out, "LEADS");
        match data.get("leads").and_then(Value::as_array) {
            Some(leads) if !leads.is_empty() => {
                for lead in leads {
                    let _ = writeln!(
                        out,
                        "\n  {} {}",
                        "Customer:".magenta(),
                        field(lead, "customer")
                    );
                    line(&mut out, "Date", field(lead, "date"));
                    line(&mut out, "Buy Price", format!("€{}", field(lead, "buy_price")));
                    line(&mut out, "Product", field(lead, "product_name"));
                    let status = field(lead, "status");
                    let status = match status.as_str() {
                        "confirmed" => status.green().to_string(),
                        "canceled" => status.red().to_string(),
                        _ => status.yellow().to_string(),
                    };
                    line(&mut out, "Status", status);
                }
            }
            _ => {
                let _ = writeln!(out, "  {}", "No leads found".yellow());
            }
        }
        out
    }

    /// One-line confirmation for mutating requests.
    pub fn format_success(message: Option<&str>, fallback: &str) -> String {
        let text = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback);
        format!("{} {}", "✓".green(), text)
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message.red())
    }

    /// Report of one automation run.
    pub fn format_execution_result(target: &ConnectionTarget, result: &ExecutionResult) -> String {
        let mut out = String::new();

        let symbol = if result.is_success() {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        let outcome = match result.outcome {
            Outcome::Success => result.outcome.to_string().green().to_string(),
            _ => result.outcome.to_string().red().to_string(),
        };
        let _ = writeln!(
            out,
            "\n{} {} {} ({})",
            symbol,
            target.to_string().bold(),
            outcome,
            format_duration(result.elapsed).dimmed()
        );

        if let Some(ref error) = result.error {
            let _ = writeln!(out, "{} {}", "✗".red(), error.red());
        }

        let stdout = result.stdout_string();
        if !stdout.is_empty() {
            out.push_str(&Self::format_output_box(&stdout, false));
        }

        let stderr = result.stderr_string();
        if !stderr.is_empty() {
            let _ = writeln!(out, "\n{}", "stderr:".red());
            out.push_str(&Self::format_output_box(&stderr, true));
        }

        if let Some(ref cleanup) = result.cleanup_error {
            let _ = writeln!(out, "{} {}", "⚠".yellow(), cleanup.yellow());
        }

        out
    }

    fn format_output_box(content: &str, is_error: bool) -> String {
        let mut output = String::new();
        let indent = "  ";
        let max_width = terminal_width().saturating_sub(4).max(1);

        let mut push = |chunk: &str| {
            if is_error {
                output.push_str(&format!("{}{}\n", indent, chunk.dimmed()));
            } else {
                output.push_str(&format!("{indent}{chunk}\n"));
            }
        };

        for line in content.lines() {
            let mut remaining = line;
            while remaining.width() > max_width {
                let (chunk, rest) = split_at_width(remaining, max_width);
                if chunk.is_empty() {
                    break;
                }
                push(chunk);
                remaining = rest;
            }
            push(remaining);
        }

        output
    }
}

fn split_at_width(s: &str, max_width: usize) -> (&str, &str) {
    let mut width = 0;
    let mut split_pos = 0;

    for (i, ch) in s.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        split_pos = i + ch.len_utf8();
    }

    s.split_at(split_pos)
}

/// Format a Duration into a human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs_f64();

    if total_seconds < 1.0 {
        format!("{:.1} ms", total_seconds * 1000.0)
    } else if total_seconds < 60.0 {
        format!("{total_seconds:.2} s")
    } else {
        let minutes = duration.as_secs() / 60;
        let seconds = duration.as_secs() % 60;
        if seconds == 0 {
            format!("{minutes}m")
        } else {
            format!("{minutes}m {seconds}s")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ServiceType;
    use crate::automation::Credential;
    use serde_json::json;

    #[test]
    fn test_format_value_nested() {
        let out = OutputFormatter::format_value(&json!({
            "status": "running",
            "cpu": {"cores": 4},
            "ips": [{"ip": "10.0.0.1"}, {"ip": "10.0.0.2"}],
            "note": null
        }));
        assert!(out.contains("status:"));
        assert!(out.contains("running"));
        assert!(out.contains("cpu:"));
        assert!(out.contains("cores:"));
        assert!(out.contains("10.0.0.2"));
        assert!(out.contains(NOT_AVAILABLE));
    }

    #[test]
    fn test_format_services_numbering() {
        let services = vec![
            Service {
                name: "vps".to_string(),
                internal_id: "K1".to_string(),
                service_type: ServiceType::Kvm,
            },
            Service {
                name: "example.de".to_string(),
                internal_id: "D1".to_string(),
                service_type: ServiceType::Domain,
            },
        ];
        let out = OutputFormatter::format_services(&services);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1") && lines[0].contains("vps"));
        assert!(lines[1].contains("DOMAIN") && lines[1].contains("example.de"));
        assert!(OutputFormatter::format_services(&[]).contains("No services found"));
    }

    #[test]
    fn test_format_account_fallbacks() {
        let out = OutputFormatter::format_account(&json!({
            "firstname": "Ada",
            "balance": -3.5,
            "is_plus_user": true,
            "discord_id": null,
            "invoice_address": {"street": "Main", "number": "1", "city": "Berlin"}
        }));
        assert!(out.contains("=== ACCOUNT INFORMATION ==="));
        assert!(out.contains("Ada N/A"));
        assert!(out.contains("€-3.5"));
        assert!(out.contains("Yes"));
        assert!(out.contains("Not linked"));
        assert!(out.contains("=== INVOICE ADDRESS ==="));
        assert!(out.contains("Main 1"));
        assert!(OutputFormatter::format_account(&Value::Null).contains("No account data"));
    }

    #[test]
    fn test_format_donations_empty() {
        let out = OutputFormatter::format_donations(&json!({
            "information": {"enabled": true},
            "donations": []
        }));
        assert!(out.contains("=== DONATIONS ==="));
        assert!(out.contains("No donations found"));
        assert!(out.contains("true"));
    }

    #[test]
    fn test_format_affiliate_leads() {
        let out = OutputFormatter::format_affiliate(&json!({
            "information": {"link": "https://24fire.de/r/x"},
            "summary": {"confirmed_leads": 2},
            "leads": [{"customer": "c1", "status": "canceled", "buy_price": 9.99}]
        }));
        assert!(out.contains("https://24fire.de/r/x"));
        assert!(out.contains("c1"));
        assert!(out.contains("€9.99"));
        assert!(out.contains("canceled"));
        assert!(out.contains("€N/A"));
    }

    #[test]
    fn test_format_execution_result_shows_streams() {
        let target = ConnectionTarget::new("h", "u", Credential::password("p"));
        let mut result = ExecutionResult::completed(7, b"out\n".to_vec(), b"bad\n".to_vec());
        result.cleanup_error = Some("cleanup of /tmp/s.sh failed".to_string());

        let out = OutputFormatter::format_execution_result(&target, &result);
        assert!(out.contains("u@h"));
        assert!(out.contains("exit code 7"));
        assert!(out.contains("out"));
        assert!(out.contains("stderr:"));
        assert!(out.contains("bad"));
        assert!(out.contains("cleanup of /tmp/s.sh failed"));
    }

    #[test]
    fn test_split_at_width() {
        assert_eq!(split_at_width("abcdef", 4), ("abcd", "ef"));
        assert_eq!(split_at_width("한글", 2), ("한", "글"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250.0 ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00 s");
        assert_eq!(format_duration(Duration::from_secs(120)), "2m");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
