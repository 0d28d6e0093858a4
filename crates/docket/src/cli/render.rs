//! Output formatting for the docket CLI.
//!
//! Each `render_*` function turns API data into a string; the `print_*`
//! wrappers write it to stdout. Keeping the two apart lets tests check the
//! text without capturing stdout.
//!
//! Columns are padded by display width (`unicode-width`), so template names
//! with wide characters still line up.

use super::styles;
use chrono::{DateTime, Utc};
use docketapp::api::{CmdMessage, MessageLevel};
use docketapp::field_options::IdentifierOption;
use docketapp::model::{OrderRecord, TemplateDefinition};
use docketapp::store::template_store::TemplateSummary;
use unicode_width::UnicodeWidthStr;

const KEY_WIDTH: usize = 22;
const NAME_WIDTH: usize = 30;
const NUMBER_WIDTH: usize = 16;
const SAMPLE_MARKER: &str = "sample";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", render_message(message));
    }
}

pub fn render_message(message: &CmdMessage) -> String {
    let style = match message.level {
        MessageLevel::Info => styles::muted(),
        MessageLevel::Success => styles::success(),
        MessageLevel::Warning => styles::warning(),
    };
    style.apply_to(&message.content).to_string()
}

pub fn print_templates(templates: &[TemplateSummary]) {
    print!("{}", render_templates(templates));
}

pub fn render_templates(templates: &[TemplateSummary]) -> String {
    let mut output = String::new();
    for summary in templates {
        let source = summary.source.to_string();
        output.push_str(&format!(
            "{} {} {:>3} fields  {}\n",
            styles::key().apply_to(pad(&summary.key, KEY_WIDTH)),
            styles::title().apply_to(pad(&summary.name, NAME_WIDTH)),
            summary.field_count,
            styles::source(&source).apply_to(&source),
        ));
    }
    output
}

pub fn print_orders(orders: &[OrderRecord]) {
    print!("{}", render_orders(orders, Utc::now()));
}

pub fn render_orders(orders: &[OrderRecord], now: DateTime<Utc>) -> String {
    if orders.is_empty() {
        return "No orders found.\n".to_string();
    }

    let mut output = String::new();
    for order in orders {
        let marker = if order.is_static { SAMPLE_MARKER } else { "" };
        output.push_str(&format!(
            "{} {} {}  {}\n",
            styles::key().apply_to(pad(&order.order_number, NUMBER_WIDTH)),
            styles::title().apply_to(pad(&order.template_name, NAME_WIDTH)),
            styles::time().apply_to(format_time_ago(order.date, now)),
            styles::muted().apply_to(marker),
        ));
    }
    output
}

pub fn print_identifier_options(options: &[IdentifierOption]) {
    print!("{}", render_identifier_options(options));
}

pub fn render_identifier_options(options: &[IdentifierOption]) -> String {
    let mut output = String::new();
    let mut current_group: Option<&str> = None;
    for option in options {
        if current_group != Some(option.group.as_str()) {
            if current_group.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", styles::title().apply_to(&option.group)));
            current_group = Some(option.group.as_str());
        }
        output.push_str(&format!(
            "  {} {}\n",
            styles::key().apply_to(pad(&option.value, KEY_WIDTH)),
            option.title
        ));
    }
    output
}

pub fn print_document(document: &TemplateDefinition) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

/// Right-pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - used))
}
