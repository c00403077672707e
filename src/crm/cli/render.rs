//! # Rendering Module
//!
//! Turns customers and command messages into terminal text. Every function
//! here returns a `String`; [`TerminalView`] decides when to print.
//!
//! Layout math (column widths, truncation) is Unicode-aware so names in any
//! script line up.

use super::styles::{palette, Palette};
use chrono::NaiveDate;
use colored::{Color, Colorize};
use crm::commands::{CmdMessage, MessageLevel};
use crm::config::CrmConfig;
use crm::controller::View;
use crm::model::{Customer, CustomerId, Theme, DATE_FORMAT};
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 80;
pub const ID_WIDTH: usize = 7;
pub const EDIT_MARKER: &str = "✎";

const EMPTY_TITLE: &str = "No customer information";
const EMPTY_HINT: &str = "Please add new customer information";

/// Applies colours only when the output supports them.
#[derive(Clone, Copy)]
struct Painter {
    palette: &'static Palette,
    use_color: bool,
}

impl Painter {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Renders the customer list as cards, one block per customer.
pub fn render_customer_list(
    customers: &[Customer],
    editing: Option<CustomerId>,
    config: &CrmConfig,
    theme: Theme,
    use_color: bool,
) -> String {
    let painter = Painter {
        palette: palette(theme),
        use_color,
    };

    if customers.is_empty() {
        return format!(
            "{}\n{}\n",
            painter.bold(EMPTY_TITLE, painter.palette.title),
            painter.paint(EMPTY_HINT, painter.palette.muted)
        );
    }

    let today = chrono::Utc::now().date_naive();
    customers
        .iter()
        .map(|c| render_card(c, editing == Some(c.id), config, painter, today))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_card(
    customer: &Customer,
    is_editing: bool,
    config: &CrmConfig,
    painter: Painter,
    today: NaiveDate,
) -> String {
    let p = painter.palette;
    let indent = " ".repeat(ID_WIDTH);

    let id_str = format!("#{}", customer.id);
    let id_cell = format!("{:<width$}", id_str, width = ID_WIDTH - 3);
    let marker = if is_editing { EDIT_MARKER } else { " " };

    let badge = format!("[{}]", customer.status);
    let available = LINE_WIDTH
        .saturating_sub(ID_WIDTH)
        .saturating_sub(badge.width() + 1);
    let name = truncate_to_width(&customer.customer_name, available);
    let padding = " ".repeat(available.saturating_sub(name.width()));

    let mut out = format!(
        "{} {} {}{} {}\n",
        painter.paint(marker, p.editing),
        painter.paint(&id_cell, p.accent),
        painter.bold(&name, p.title),
        padding,
        painter.paint(&badge, status_color(p, config, &customer.status)),
    );

    if !customer.company_name.is_empty() {
        out.push_str(&format!(
            "{}{}\n",
            indent,
            painter.paint(&customer.company_name, p.muted)
        ));
    }

    let mut details = Vec::new();
    if !customer.email.is_empty() {
        details.push(format!("email: {}", customer.email));
    }
    if !customer.phone.is_empty() {
        details.push(format!("phone: {}", customer.phone));
    }
    if !customer.assignee.is_empty() {
        details.push(format!("assignee: {}", customer.assignee));
    }
    for detail in details {
        out.push_str(&format!("{}{}\n", indent, detail));
    }

    let added = match format_age(&customer.created_at, today) {
        Some(age) => format!("added {} ({})", customer.created_at, age),
        None => format!("added {}", customer.created_at),
    };
    out.push_str(&format!("{}{}\n", indent, painter.paint(&added, p.muted)));

    if !customer.notes.is_empty() {
        out.push_str(&format!("{}Notes: {}\n", indent, customer.notes));
    }

    out
}

/// Badge colour for `status`: well-known statuses by position, anything else muted.
fn status_color(palette: &Palette, config: &CrmConfig, status: &str) -> Color {
    palette.status(config.status_rank(status))
}

/// Renders command messages, one per line, coloured by level.
pub fn render_messages(messages: &[CmdMessage], theme: Theme, use_color: bool) -> String {
    let painter = Painter {
        palette: palette(theme),
        use_color,
    };
    let p = painter.palette;

    messages
        .iter()
        .map(|msg| {
            let color = match msg.level {
                MessageLevel::Info => p.muted,
                MessageLevel::Success => p.success,
                MessageLevel::Warning => p.warning,
                MessageLevel::Error => p.error,
            };
            format!("{}\n", painter.paint(&msg.content, color))
        })
        .collect()
}

pub fn render_config(config: &CrmConfig) -> String {
    CrmConfig::KEYS
        .iter()
        .map(|key| format!("{} = {}\n", key, config.get(key).unwrap_or_default()))
        .collect()
}

/// Relative age of a `YYYY-MM-DD` date, `None` when the date does not parse.
pub fn format_age(created_at: &str, today: NaiveDate) -> Option<String> {
    let date = NaiveDate::parse_from_str(created_at, DATE_FORMAT).ok()?;
    let days = today.signed_duration_since(date).num_days();
    if days < 0 {
        return None;
    }
    if days == 0 {
        return Some("today".to_string());
    }

    let formatter = timeago::Formatter::new();
    let age = chrono::Duration::days(days).to_std().ok()?;
    Some(formatter.convert(age))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// [`View`] for the terminal.
///
/// Renders are buffered: only the last list and every notification are
/// printed, once, by [`TerminalView::print`].
pub struct TerminalView {
    theme: Theme,
    use_color: bool,
    config: CrmConfig,
    last_list: Option<String>,
    messages: Vec<CmdMessage>,
}

impl TerminalView {
    pub fn new(config: CrmConfig, use_color: bool) -> Self {
        Self {
            theme: Theme::default(),
            use_color,
            config,
            last_list: None,
            messages: Vec::new(),
        }
    }

    /// Queues a message that did not come from the controller.
    pub fn push_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Everything buffered so far: messages first, then (optionally) the list.
    pub fn output(&self, include_list: bool) -> String {
        let mut out = render_messages(&self.messages, self.theme, self.use_color);
        if include_list {
            if let Some(list) = &self.last_list {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(list);
            }
        }
        out
    }

    pub fn print(&mut self, include_list: bool) {
        let out = self.output(include_list);
        if !out.is_empty() {
            print!("{}", out);
        }
        self.messages.clear();
        self.last_list = None;
    }
}

impl View for TerminalView {
    fn render(&mut self, customers: &[Customer], editing: Option<CustomerId>) {
        self.last_list = Some(render_customer_list(
            customers,
            editing,
            &self.config,
            self.theme,
            self.use_color,
        ));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn notify(&mut self, message: &CmdMessage) {
        self.messages.push(message.clone());
    }
}
