use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rows needed for the question (wrapped once), the answer hint and borders.
const CONFIRMATION_HEIGHT: u16 = 7;

/// Confirmation dialog answered with `<Y>` / `<N>`.
pub fn render_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, question: &str) {
    let popup_area = centered_fixed_rect(60, CONFIRMATION_HEIGHT, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(question),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black))
    .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// One line error banner spanning `area`.
pub fn render_error_banner<B: Backend>(frame: &mut Frame<B>, area: Rect, error: &str) {
    let banner = Paragraph::new(error)
        .block(Block::default().title("Error").borders(Borders::ALL))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    frame.render_widget(banner, area);
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Horizontally a percentage of `r`, vertically a fixed number of rows.
pub fn centered_fixed_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let columns = centered_rect(percent_x, 100, r);

    Rect {
        x: columns.x,
        y: r.y + (r.height - height) / 2,
        width: columns.width,
        height,
    }
}
