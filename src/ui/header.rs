use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn header_title(total_contacts: u64) -> String {
    format!("Contact List ({total_contacts})")
}

/// Title bar with the number of contacts known to the backend.
pub fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect, total_contacts: u64) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(26)].as_ref())
        .split(area);

    let title = Paragraph::new(header_title(total_contacts))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let new_contact = Paragraph::new("<N> Add new Contact")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(new_contact, chunks[1]);
}
