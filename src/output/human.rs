//! Human-readable output formatting

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::config::TemplateRegistry;
use crate::container::SandboxInfo;
use crate::output::console::Theme;

pub fn format_sandboxes(sandboxes: &[SandboxInfo], theme: &Theme) -> String {
    if sandboxes.is_empty() {
        return theme.paint("No sandboxes found", theme.muted);
    }

    let mut table = new_table();
    table.set_header(vec!["NAME", "TEMPLATE", "STATE", "STATUS", "CREATED"]);

    for sandbox in sandboxes {
        let created = sandbox
            .created
            .map(|c| c.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            cell(&sandbox.name, theme.info, theme),
            cell(&format!("[template:{}]", sandbox.template), theme.success, theme),
            Cell::new(&sandbox.state),
            Cell::new(&sandbox.status),
            Cell::new(created),
        ]);
    }

    table.to_string()
}

pub fn format_templates(registry: &TemplateRegistry, theme: &Theme) -> String {
    if registry.is_empty() {
        return theme.paint("No templates configured", theme.muted);
    }

    let mut table = new_table();
    table.set_header(vec!["TEMPLATE", "NAME", "IMAGE", "PORTS", "DESCRIPTION"]);

    for (key, template) in registry.iter() {
        let ports = if template.ports.is_empty() {
            "-".to_string()
        } else {
            template
                .ports
                .iter()
                .map(|p| format!("{}->{}", p.host_port, p.container_port))
                .collect::<Vec<_>>()
                .join(", ")
        };

        table.add_row(vec![
            cell(key, theme.info, theme),
            Cell::new(&template.name),
            Cell::new(&template.image),
            Cell::new(ports),
            Cell::new(truncate(&template.description, 60)),
        ]);
    }

    table.to_string()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cell(text: &str, color: colored::Color, theme: &Theme) -> Cell {
    let cell = Cell::new(text);
    if theme.enabled {
        cell.fg(table_color(color))
    } else {
        cell
    }
}

fn table_color(color: colored::Color) -> comfy_table::Color {
    use colored::Color as C;
    use comfy_table::Color as T;

    match color {
        C::Black => T::Black,
        C::Red => T::DarkRed,
        C::Green => T::DarkGreen,
        C::Yellow => T::DarkYellow,
        C::Blue => T::DarkBlue,
        C::Magenta => T::DarkMagenta,
        C::Cyan => T::DarkCyan,
        C::White => T::Grey,
        C::BrightBlack => T::DarkGrey,
        C::BrightRed => T::Red,
        C::BrightGreen => T::Green,
        C::BrightYellow => T::Yellow,
        C::BrightBlue => T::Blue,
        C::BrightMagenta => T::Magenta,
        C::BrightCyan => T::Cyan,
        C::BrightWhite => T::White,
        C::TrueColor { r, g, b } => T::Rgb { r, g, b },
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
