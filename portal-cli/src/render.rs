//! Terminal rendering of pipelines and category summaries

use colored::*;
use portal_core::aggregation::{CategorySummary, StatusIconType};
use portal_core::domain::pipeline::Pipeline;

pub fn icon_symbol(icon: StatusIconType) -> &'static str {
    match icon {
        StatusIconType::Error => "✗",
        StatusIconType::Unknown => "?",
        StatusIconType::NotFound => "∅",
        StatusIconType::Pending => "…",
        StatusIconType::Success => "✓",
        StatusIconType::Alert => "!",
        StatusIconType::NotManaged => "○",
    }
}

pub fn icon_label(icon: StatusIconType) -> &'static str {
    match icon {
        StatusIconType::Error => "failing",
        StatusIconType::Unknown => "unknown",
        StatusIconType::NotFound => "not found",
        StatusIconType::Pending => "pending",
        StatusIconType::Success => "created",
        StatusIconType::Alert => "not compliant",
        StatusIconType::NotManaged => "not managed",
    }
}

fn colored_icon(icon: StatusIconType) -> ColoredString {
    let symbol = icon_symbol(icon);
    match icon {
        StatusIconType::Error => symbol.red().bold(),
        StatusIconType::Unknown | StatusIconType::NotFound => symbol.magenta(),
        StatusIconType::Pending => symbol.yellow(),
        StatusIconType::Success => symbol.green(),
        StatusIconType::Alert => symbol.red(),
        StatusIconType::NotManaged => symbol.dimmed(),
    }
}

/// One-line plain-text state of a category, used to detect changes
pub fn summary_line(summary: &CategorySummary) -> String {
    let mut line = format!("{}: ", summary.title);
    match summary.status_icon {
        Some(icon) => line.push_str(icon_label(icon.status_icon_type)),
        None => line.push_str("empty"),
    }
    if !summary.configured_services_text.is_empty() {
        line.push_str(&format!(" ({})", summary.configured_services_text));
    }
    if summary.status_tag.is_status_tag_shown {
        line.push_str(&format!(" [{}]", summary.status_tag.status_tag_text));
    }
    if let Some(right_side) = &summary.right_side {
        line.push_str(&format!(" {}", right_side.right_side_text));
    }
    line
}

/// Print a pipeline summary
pub fn print_pipeline_summary(pipeline: &Pipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.name.bold());
    println!("    ID:      {}", pipeline.id.to_string().dimmed());
    println!("    Type:    {}", pipeline.pipeline_type.to_string().dimmed());
    println!(
        "    Created: {}",
        pipeline
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed pipeline information with one row per category
pub fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.to_string().cyan());
    println!("  Name:        {}", pipeline.name.bold());
    println!("  Type:        {}", pipeline.pipeline_type);
    println!(
        "  Created:     {}",
        pipeline.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if pipeline.is_debug_enabled() {
        println!("  Debug:       {}", "enabled".yellow());
    }
    if let Some(scv) = pipeline.ppms_scv() {
        println!("  PPMS SCV:    {scv}");
    }

    let summaries = pipeline.aggregator().summaries();
    println!("\n{}", "Services:".bold());
    println!("{}", "─".repeat(80).dimmed());
    if summaries.is_empty() {
        println!("  {}", "No services configured.".yellow());
    }
    for summary in &summaries {
        print_category_summary(summary);
    }
    println!("{}", "─".repeat(80).dimmed());

    let failing: Vec<_> = pipeline
        .resource_refs
        .iter()
        .filter(|r| r.has_error())
        .collect();
    if !failing.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for resource in failing {
            println!("  {} {}: {}", "✗".red(), resource.kind, resource.error);
        }
    }
}

pub fn print_category_summary(summary: &CategorySummary) {
    let icon = summary
        .status_icon
        .map(|icon| colored_icon(icon.status_icon_type))
        .unwrap_or_else(|| " ".normal());

    let mut line = format!("  {} {:<26}", icon, summary.title.bold());
    line.push_str(&summary.configured_services_text);

    let tag = &summary.status_tag;
    if tag.is_status_tag_shown {
        let text = format!("[{}]", tag.status_tag_text);
        let text = if tag.status_tag_background_color.is_some() {
            text.red().bold()
        } else {
            text.dimmed()
        };
        line.push_str(&format!(" {text}"));
    }
    if let Some(right_side) = &summary.right_side {
        line.push_str(&format!("  {}", right_side.right_side_text.yellow()));
    }
    println!("{line}");

    if let Some(help) = &tag.status_tag_inline_help_text {
        println!("      {}", help.dimmed());
    }
    if let Some(right_side) = &summary.right_side {
        println!("      {}", right_side.right_side_text_inline_help_text.dimmed());
    }
}
