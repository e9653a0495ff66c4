use crate::profile::AbstractProfile;
use crate::status::{Reading, StatusReport};
use colored::Colorize;
use std::collections::BTreeSet;

const LABEL_W: usize = 18;

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or("Unknown").to_string()
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

fn reading<T: std::fmt::Display>(r: &Reading<T>) -> String {
    match r {
        Reading::Value(v) => v.to_string(),
        Reading::Error(e) => format!("error: {}", e),
    }
}

fn print_box(title: &str, rows: &[(&str, String)]) {
    let inner_w = rows
        .iter()
        .map(|(l, v)| l.len().max(LABEL_W) + 2 + v.chars().count())
        .max()
        .unwrap_or(40);

    let fill = inner_w.saturating_sub(1 + title.len());
    println!("╭─ {} {}╮", title.bold(), "─".repeat(fill));

    for (label, value) in rows {
        let padded = format!("{:<w$}", label, w = LABEL_W);
        let pad = inner_w.saturating_sub(LABEL_W + 2 + value.chars().count());
        println!("│ {}  {}{} │", padded.dimmed(), value, " ".repeat(pad));
    }

    println!("╰{}╯", "─".repeat(inner_w + 2));
}

pub fn print_status(report: &StatusReport) {
    let hw = &report.hardware;
    let rows = vec![
        ("Vendor", or_unknown(hw.dmi.sys_vendor.as_deref())),
        ("Product", or_unknown(hw.dmi.product_name.as_deref())),
        ("BIOS", or_unknown(hw.dmi.bios_version.as_deref())),
        ("Gaming WMI", yes_no(hw.wmi_present)),
        ("acpi_call", yes_no(hw.acpi_call_available)),
        (
            "Kernel profile",
            hw.platform
                .platform_profile
                .as_deref()
                .unwrap_or("N/A")
                .to_string(),
        ),
    ];
    print_box("Hardware", &rows);

    if let Some(fw) = &report.firmware {
        let rows = vec![
            ("Profile", reading(&fw.profile)),
            ("Fan boost", reading(&fw.fan_boost)),
            ("Choices", fw.choices.clone()),
        ];
        print_box("Firmware", &rows);
    }
    if let Some(note) = report.firmware_note() {
        println!("  {} {}", "Note:".yellow(), note);
    }

    if hw.platform.kernel_driver_active() {
        println!(
            "  {} A kernel platform_profile driver is registered and may override changes.",
            "Note:".yellow()
        );
    }
}

pub fn print_status_json(report: &StatusReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} failed to serialize status: {}", "!".red(), e),
    }
}

pub fn print_profile(profile: AbstractProfile, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "profile": profile }));
    } else {
        println!("{}", profile);
    }
}

pub fn print_choices(
    choices: &BTreeSet<AbstractProfile>,
    current: Option<AbstractProfile>,
    json: bool,
) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "choices": choices, "current": current })
        );
        return;
    }
    for profile in choices {
        if Some(*profile) == current {
            println!("{} {}", "*".green(), profile.to_string().green().bold());
        } else {
            println!("  {}", profile);
        }
    }
}

pub fn print_fan_boost(value: u8, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "fan_boost": value }));
    } else {
        print!("{}", crate::fan_boost::format_attribute(value));
    }
}
