use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

const LOGO: &str = r#"
 _           _     _
| |__   ___ | | __| | ___ _ __ ___
| '_ \ / _ \| |/ _` |/ _ \ '_ ` _ \
| | | | (_) | | (_| |  __/ | | | | |
|_| |_|\___/|_|\__,_|\___|_| |_| |_|
"#;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default().title("holdem").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let logo_lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
        .collect();
    let [logo_area, cfg_area] =
        Layout::vertical([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
            .areas(inner(area));
    f.render_widget(Paragraph::new(logo_lines).alignment(Alignment::Center), logo_area);

    let mut cfg_lines: Vec<Line> = vec![Line::from(Span::styled(
        "Table setup:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, item) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(item, style)));
    }
    cfg_lines.push(Line::from(""));
    cfg_lines.push(Line::from(Span::styled(
        "[Enter] Apply  [Q] Quit  [Esc] Cancel  [↑/↓] Move  [+/-] Adjust",
        Style::default().add_modifier(Modifier::DIM),
    )));
    if let Some(err) = app.action_error() {
        cfg_lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    }
    let cfg_para = Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(cfg_para, cfg_area);
}
