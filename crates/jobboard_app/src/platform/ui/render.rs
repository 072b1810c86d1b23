use jobboard_core::{AppViewModel, PostingRowView};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let screen = layout::screen(frame.area());

    frame.render_widget(header(view), screen.header);
    render_table(frame, view, screen.table);
    frame.render_widget(status_line(view), screen.status);

    if let Some(alert) = &view.alert {
        render_alert(frame, alert, view.queued_alerts);
    }
}

fn header(view: &AppViewModel) -> Paragraph<'static> {
    let button_style = if view.loading {
        Style::new().fg(BUSY_FG)
    } else {
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    let label = if view.loading {
        FETCH_LABEL_BUSY
    } else {
        FETCH_LABEL_IDLE
    };

    Paragraph::new(vec![
        Line::from(TITLE.bold()).centered(),
        Line::from(Span::styled(format!("[ {label} ]"), button_style)).centered(),
    ])
}

fn render_table(frame: &mut Frame, view: &AppViewModel, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(ACCENT));

    if view.rows.is_empty() {
        let hint = if view.loading {
            FETCH_LABEL_BUSY
        } else {
            EMPTY_TABLE_HINT
        };
        frame.render_widget(Paragraph::new(hint).centered().block(block), area);
        return;
    }

    let header = Row::new(COLUMN_HEADERS.iter().map(|title| Cell::from(*title)))
        .style(Style::new().fg(ratatui::style::Color::White).bg(ACCENT).bold());
    let rows = view.rows.iter().map(posting_row);
    let table = Table::new(rows, layout::column_constraints())
        .header(header)
        .block(block)
        .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(view.selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn posting_row(row: &PostingRowView) -> Row<'static> {
    let background = if row.index % 2 == 0 {
        ROW_EVEN_BG
    } else {
        ROW_ODD_BG
    };
    let share = if row.copied {
        Cell::from(COPIED_LABEL).style(Style::new().fg(COPIED_FG))
    } else {
        Cell::from(SHARE_LABEL).style(Style::new().fg(ACCENT))
    };

    Row::new(vec![
        Cell::from(row.company_name.clone()).style(Style::new().bold()),
        Cell::from(row.role.clone()),
        Cell::from(row.years_of_experience.clone()),
        Cell::from(row.batch_eligible.clone()),
        Cell::from(row.salary.clone()),
        Cell::from(APPLY_LABEL).style(Style::new().fg(ACCENT).underlined()),
        share,
    ])
    .style(Style::new().bg(background))
}

fn status_line(view: &AppViewModel) -> Paragraph<'static> {
    let updated = view.last_updated.as_deref().unwrap_or("never");
    Paragraph::new(format!(
        "{} postings | Last updated: {} | {}",
        view.rows.len(),
        updated,
        KEY_HELP
    ))
    .style(Style::new().fg(BUSY_FG))
}

fn render_alert(frame: &mut Frame, alert: &str, queued: usize) {
    let area = layout::centered(frame.area(), 60, 7);
    let footer = if queued > 0 {
        format!("{ALERT_FOOTER} ({queued} more)")
    } else {
        ALERT_FOOTER.to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(ALERT_TITLE)
        .title_bottom(Line::from(footer).centered())
        .border_style(Style::new().fg(ALERT_FG));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(alert.to_string())
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
