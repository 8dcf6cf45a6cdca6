use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r##"[checklist]
title = {title}

# --- Items ---
# Seed items loaded at startup. priority is low, medium or high (default
# medium). assignee must match a [[users]] id. due is "YYYY-MM-DD".

[[items]]
text = "Verify staging environment"
checked = true
priority = "medium"

[[items]]
text = "Run integration tests"
priority = "high"

[[items]]
text = "Update release notes"
priority = "low"

# --- Users ---
# People items can be assigned to.
#
# [[users]]
# id = "ana"
# name = "Ana Lima"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
#
# [ui.priority_colors]
# low = "#44FF88"
# medium = "#FFD700"
# high = "#FF4444"

# --- Logging ---
# Nothing is logged unless a file is set here or in CK_LOG_FILE.
#
# [log]
# level = "info"
# file = "checklist.log"
"##;

/// Infer a title from a directory name: replace hyphens with spaces, title-case.
fn infer_title(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render checklist.toml with `title` quoted as a TOML string
fn render_config_toml(title: &str) -> String {
    let quoted = toml::Value::String(title.to_string()).to_string();
    CONFIG_TEMPLATE.replace("{title}", &quoted)
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let path = cwd.join(CONFIG_FILE);

    if path.exists() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", CONFIG_FILE).into());
    }

    let title = args.title.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Checklist".to_string())
    });

    fs::write(&path, render_config_toml(&title))?;
    println!("Initialized checklist: {}", title);
    println!("  config: {}", path.display());
    Ok(())
}
