//! Lead list screen — stats strip, table, pagination footer.

use lede_core::lead::{Lead, LeadStatus};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the lead list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // stats strip
      Constraint::Min(0),    // table
      Constraint::Length(1), // pagination footer
    ])
    .split(area);

  draw_stats(f, rows[0], app);
  draw_table(f, rows[1], app);
  draw_footer(f, rows[2], app);
}

// ─── Stats strip ──────────────────────────────────────────────────────────────

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let Some(stats) = app.stats else {
    return;
  };

  let line = Line::from(vec![
    Span::styled(" Total ", Style::default().fg(Color::Gray)),
    Span::styled(
      stats.total.to_string(),
      Style::default().add_modifier(Modifier::BOLD),
    ),
    Span::styled("   New ", Style::default().fg(Color::Blue)),
    Span::raw(stats.new.to_string()),
    Span::styled("   Qualified ", Style::default().fg(Color::Green)),
    Span::raw(stats.qualified.to_string()),
    Span::styled("   Converted ", Style::default().fg(Color::Magenta)),
    Span::raw(stats.converted.to_string()),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Table ────────────────────────────────────────────────────────────────────

fn status_color(status: LeadStatus) -> Color {
  match status {
    LeadStatus::New => Color::Blue,
    LeadStatus::Contacted => Color::Yellow,
    LeadStatus::Qualified => Color::Green,
    LeadStatus::Lost => Color::Red,
    LeadStatus::Converted => Color::Magenta,
  }
}

fn row_line(lead: &Lead, style: Style) -> Line<'_> {
  let company = lead.company.as_deref().unwrap_or("-");
  Line::from(vec![
    Span::styled(format!(" {:<20.20}", lead.name), style),
    Span::styled(format!(" {:<26.26}", lead.email), style),
    Span::styled(format!(" {:<12.12}", lead.phone), style),
    Span::styled(format!(" {:<18.18}", company), style),
    Span::styled(
      format!(" {:<10}", lead.status.as_str()),
      style.fg(status_color(lead.status)),
    ),
    Span::styled(
      format!(" {}", lead.created_at.format("%Y-%m-%d %H:%M")),
      style.fg(Color::DarkGray),
    ),
  ])
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
  let title = match app.status_filter {
    Some(status) => format!(
      " Leads ({}) — filter: {} ",
      app.pagination.total,
      status.as_str()
    ),
    None => format!(" Leads ({}) ", app.pagination.total),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.leads.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No leads found",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .leads
    .iter()
    .enumerate()
    .map(|(i, lead)| {
      let style = if i == app.cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(row_line(lead, style))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(List::new(items), inner, &mut state);
}

// ─── Footer ───────────────────────────────────────────────────────────────────

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
  let pages = app.pagination.pages.max(1);
  let at_first = app.page <= 1;
  let at_last = u64::from(app.page) >= app.pagination.pages;

  let arrow = |label: &str, inert: bool| {
    Span::styled(
      format!(" {label} "),
      if inert {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default().fg(Color::White)
      },
    )
  };

  let line = Line::from(vec![
    arrow("◂ prev", at_first),
    Span::styled(
      format!(" Page {} of {pages} ", app.page),
      Style::default().fg(Color::Gray),
    ),
    arrow("next ▸", at_last),
    Span::styled(
      format!("   showing {} of {} leads", app.leads.len(), app.pagination.total),
      Style::default().fg(Color::DarkGray),
    ),
  ]);
  f.render_widget(Paragraph::new(line), area);
}
