use crate::betting::Player;
use crate::cards::{Card, Suit};
use crate::game::{Game, Showdown};
use crate::tui::app::{AppState, HUMAN_SEAT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let [header_area, board_area, seats_area, status_area] = Layout::vertical([
        Constraint::Length(4), // header
        Constraint::Length(5), // board
        Constraint::Min(3),    // seats
        Constraint::Length(5), // status bar
    ])
    .areas(f.area());

    let game = &app.game;
    let header_lines = vec![
        Line::from(format!(
            "Hand #{}   Dealer {}   Pot: ${}",
            game.hands_played(),
            seat_name(game, game.dealer()),
            game.pot()
        )),
        Line::from(format!(
            "Round bet: {}   To call: {}   Deck: {} left",
            game.round_bet(),
            game.round_bet().saturating_sub(game.player(app.focus).map(|p| p.bet()).unwrap_or(0)),
            game.deck_remaining()
        )),
    ];
    let header =
        Paragraph::new(header_lines).block(Block::default().title("holdem").borders(Borders::ALL));
    f.render_widget(header, header_area);

    draw_board(f, board_area, app);
    draw_seats(f, seats_area, app);
    draw_status(f, status_area, app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn seat_name(game: &Game, seat: usize) -> &str {
    game.player(seat).map(|p| p.name()).unwrap_or("-")
}

fn draw_board(f: &mut Frame, area: Rect, app: &AppState) {
    let game = &app.game;
    let title = if app.hand_started && game.is_hand_over() {
        "Board - Showdown".to_string()
    } else {
        format!("Board - {}", game.street().label())
    };
    f.render_widget(Block::default().title(title).borders(Borders::ALL), area);
    let board = game.board().as_slice();
    let slots = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(inner(area));
    // the newest street gets a highlight
    let fresh = match board.len() {
        3 => 0..3,
        4 => 3..4,
        5 => 4..5,
        _ => 0..0,
    };
    for (i, slot) in slots.iter().enumerate() {
        let border = fresh.contains(&i).then_some(Color::Yellow);
        render_card_widget(f, *slot, board.get(i).copied(), border);
    }
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    // two rows approximating a ring: top row left to right, bottom row right to left
    let total = app.game.players().len();
    let top = (total + 1) / 2;
    let bottom = total - top;
    let rows = Layout::vertical([Constraint::Ratio(1, 2); 2]).split(area);
    for (r, cols) in [top, bottom].into_iter().enumerate() {
        if cols == 0 {
            continue;
        }
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, cols as u32); cols]).split(rows[r]);
        for (c, cell) in cells.iter().enumerate() {
            let idx = if r == 0 { c } else { total - 1 - c };
            if let Some(p) = app.game.player(idx) {
                render_player_card(f, *cell, app, idx, p);
            }
        }
    }
}

/// Short per-round status for a seat card.
fn seat_status(p: &Player) -> &'static str {
    if p.is_folded() {
        "Folded"
    } else if p.is_all_in() {
        "All in"
    } else if p.has_checked() {
        "Checked"
    } else if p.has_acted() {
        "In"
    } else {
        "To act"
    }
}

fn render_player_card(f: &mut Frame, area: Rect, app: &AppState, idx: usize, p: &Player) {
    let game = &app.game;
    let showdown = finished(app);
    let mut title = p.name().to_string();
    if idx == HUMAN_SEAT {
        title.push_str(" [You]");
    }
    if idx == app.focus {
        title.push_str(" [Focus]");
    }
    if idx == game.dealer() {
        title.push_str(" [D]");
    }
    if let Some(label) = app.bot_label(idx) {
        title.push_str(&format!(" [BOT:{label}]"));
    }
    if p.is_all_in() {
        title.push_str(" [ALL-IN]");
    }
    if game.awaiting() == Some(idx) {
        title.push_str(" [Act]");
    }

    let status = seat_status(p);
    let dim = Style::default().add_modifier(Modifier::DIM);
    let field = |label: &str, value: Option<String>| -> Line {
        match value {
            Some(v) => Line::from(format!("{label}{v}")),
            None => Line::from(vec![Span::raw(label.to_string()), Span::styled("--", dim)]),
        }
    };
    let result = showdown.and_then(|s| s.results.iter().find(|r| r.seat == idx));
    let lines = vec![
        Line::from(format!("Stack: ${}", p.stack())),
        Line::from(format!("Bet: {}   In pot: {}", p.bet(), p.committed())),
        Line::from(format!("Status: {status}")),
        field("Last: ", p.last_action().map(str::to_string)),
        field("Hand: ", result.map(|r| r.label().to_string())),
    ];

    let won = showdown.is_some_and(|s| s.winners.contains(&idx));
    let awaiting = game.awaiting() == Some(idx);
    let border = if p.is_folded() {
        Some(Color::DarkGray)
    } else if won {
        Some(Color::Green)
    } else if p.is_all_in() {
        Some(Color::LightRed)
    } else if awaiting {
        Some(Color::Yellow)
    } else if idx == app.focus {
        Some(Color::Cyan)
    } else {
        None
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);

    let seat_inner = inner(area);
    let reveal = idx == HUMAN_SEAT || (result.is_some() && !showdown.is_some_and(|s| s.uncontested));
    let hole = p.hole().filter(|_| reveal);
    let (text_area, cards_area) = match hole {
        Some(_) if seat_inner.height > 3 => {
            let [text, cards] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(seat_inner);
            (text, Some(cards))
        }
        _ => (seat_inner, None),
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    if let (Some(h), Some(cards)) = (hole, cards_area) {
        let [a, b] = Layout::horizontal([Constraint::Ratio(1, 2); 2]).areas(cards);
        render_card_widget(f, a, Some(h.first()), Some(Color::Cyan));
        render_card_widget(f, b, Some(h.second()), Some(Color::Cyan));
    }
}

/// The showdown of the hand on screen, once it is over.
fn finished(app: &AppState) -> Option<&Showdown> {
    if !app.hand_started || !app.game.is_hand_over() {
        return None;
    }
    app.game.showdown().ok()
}

fn showdown_line(game: &Game, s: &Showdown) -> String {
    let names: Vec<&str> = s.winners.iter().map(|&w| seat_name(game, w)).collect();
    if s.uncontested {
        return format!("{} wins ${} uncontested.", names.join(", "), s.pot);
    }
    let label = s
        .results
        .iter()
        .find(|r| s.winners.first() == Some(&r.seat))
        .map(|r| r.label())
        .unwrap_or("");
    if names.len() == 1 {
        format!("{} wins ${} with {label}.", names[0], s.pot)
    } else {
        format!("Split pot ${} ({label}): {}.", s.pot, names.join(", "))
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(inner(area));
    let game = &app.game;

    let mut info = if !app.hand_started {
        vec![Line::from("No hand yet - press Space to deal.")]
    } else if let Some(s) = finished(app) {
        vec![Line::from(showdown_line(game, s)), Line::from("Press Space for the next hand.")]
    } else {
        let acting = game.awaiting().map(|s| seat_name(game, s)).unwrap_or("-");
        vec![Line::from(format!("Acting: {acting}   Focus: {}", seat_name(game, app.focus)))]
    };

    if app.hand_started && !game.is_hand_over() {
        let can_act = game.awaiting() == Some(app.focus) && app.focus == HUMAN_SEAT;
        let (stack, to_call) = game
            .player(app.focus)
            .map(|p| (p.stack(), game.round_bet().saturating_sub(p.bet())))
            .unwrap_or((0, 0));
        let style = |enabled: bool| {
            if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        info.push(Line::from(vec![
            Span::raw("Actions: "),
            Span::styled("K check", style(can_act)),
            Span::raw(" • "),
            Span::styled("C call", style(can_act && to_call > 0 && stack >= game.round_bet())),
            Span::raw(" • "),
            Span::styled("R raise", style(can_act && stack > game.round_bet())),
            Span::raw(" • "),
            Span::styled("F fold", style(can_act)),
            Span::raw(" • "),
            Span::styled("A all in", style(can_act && stack > 0)),
        ]));
    }
    if let Some(err) = app.action_error() {
        info.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    }

    let keys = vec![Line::from(""), Line::from("? help • H history • M menu")];
    f.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), left);
    f.render_widget(
        Paragraph::new(keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        right,
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let entries = app.history_page();
    let mut lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from("No actions this hand.")]
    } else {
        entries
            .iter()
            .map(|e| {
                Line::from(format!(
                    "{} {} (bet {}) [{}]",
                    seat_name(&app.game, e.seat),
                    e.action,
                    e.bet,
                    e.street.label()
                ))
            })
            .collect()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / next hand"),
        Line::from("- K: check"),
        Line::from("- C: call"),
        Line::from("- R: raise (opens amount entry)"),
        Line::from("- F: fold"),
        Line::from("- A: all in"),
        Line::from("- D: cycle bot difficulty (focus)"),
        Line::from("- ] / [: focus next / prev"),
        Line::from("- 1-9: focus seat"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Raise amount:", bold)),
        Line::from("- 0-9: edit amount (your total bet this round)"),
        Line::from("- Backspace: delete digit"),
        Line::from(format!("- + / -: adjust by {}", AppState::RAISE_STEP)),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply (starts a new table)"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let lines = vec![
        Line::from(format!("Raise to: {}", app.amount_entry_text().unwrap_or(""))),
        Line::from(format!("Min: {}   Max: {}", app.min_raise(), app.max_raise())),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from(format!("+/- by {}, Enter submit, Esc cancel", AppState::RAISE_STEP)),
    ];
    let block = Block::default().title("Raise").borders(Borders::ALL);
    let [body, error_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), error_area);
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Clubs | Suit::Spades => Style::default().fg(Color::White),
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(c.pretty(), suit_style(c.suit()))),
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
