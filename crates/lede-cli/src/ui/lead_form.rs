//! Submission form screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, FormField};

/// Render the lead submission form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Submit Lead Information ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  for field in FormField::ALL {
    let focused = app.form.focus == field;

    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };

    let value = field_value(app, field, focused);
    let value_style = if focused {
      Style::default().fg(Color::White)
    } else {
      Style::default()
    };

    lines.push(Line::from(vec![
      Span::styled(format!(" {:<9} ", field.label()), label_style),
      Span::styled(value, value_style),
    ]));

    // Error line, when the field's last check failed.
    if let Some(message) = app.form.error_for(field) {
      lines.push(Line::from(Span::styled(
        format!("           {message}"),
        Style::default().fg(Color::Red),
      )));
    }

    // Character budget under the message field, like the web form.
    if field == FormField::Message {
      lines.push(Line::from(Span::styled(
        format!("           {}/500 characters", app.form.message.chars().count()),
        Style::default().fg(Color::DarkGray),
      )));
    }

    lines.push(Line::default());
  }

  lines.push(Line::from(Span::styled(
    " Press Enter to submit",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}

fn field_value(app: &App, field: FormField, focused: bool) -> String {
  let cursor = if focused { "_" } else { "" };
  match field {
    FormField::Name => format!("{}{cursor}", app.form.name),
    FormField::Email => format!("{}{cursor}", app.form.email),
    FormField::Phone => format!("{}{cursor}", app.form.phone),
    FormField::Company => format!("{}{cursor}", app.form.company),
    FormField::Message => format!("{}{cursor}", app.form.message),
    FormField::Source => {
      if focused {
        format!("◂ {} ▸", app.form.source().as_str())
      } else {
        app.form.source().as_str().to_owned()
      }
    }
  }
}
