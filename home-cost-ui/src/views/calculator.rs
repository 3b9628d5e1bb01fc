use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use home_cost_core::{EditableText, MAX_CASH_PERCENT};

use crate::state::{CalculatorScreen, Focus, TextField};

use super::{hints, status_line};

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    field: &TextField,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(title.to_string());
    let input = Paragraph::new(field.text().to_string())
        .style(field_style(focused))
        .block(block);
    f.render_widget(input, area);

    if focused {
        let column = u16::try_from(field.cursor()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(column);
        f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

/// Draws the calculator screen: title, the two amount fields, the cash
/// slider, the result and the notice line.
pub fn render(
    f: &mut Frame,
    screen: &CalculatorScreen,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Home Purchase Cost")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let focus = screen.focus();
    render_field(f, chunks[1], "Price", screen.price(), focus == Focus::Price);
    render_field(
        f,
        chunks[2],
        "Existing mortgage",
        screen.mortgage(),
        focus == Focus::Mortgage,
    );

    let slider_focused = focus == Focus::CashPercent;
    let percent = screen.cash_percent().value();
    let slider = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(slider_focused))
                .title(screen.cash_label()),
        )
        .gauge_style(field_style(slider_focused).fg(Color::Green))
        .percent(u16::from(percent.min(MAX_CASH_PERCENT)));
    f.render_widget(slider, chunks[3]);

    let result = Paragraph::new(screen.result().to_string())
        .block(Block::default().borders(Borders::ALL).title("Result"))
        .wrap(Wrap { trim: false });
    f.render_widget(result, chunks[4]);

    if let Some(notice) = screen.notice() {
        let notice = Paragraph::new(notice.message.clone())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(notice, chunks[5]);
    }

    let help = Paragraph::new(status_line(hints::CALCULATOR)).alignment(Alignment::Center);
    f.render_widget(help, chunks[7]);
}
