use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::{self, ContactsApi};
use crate::models::{Contact, ContactStatus, PaginatedResponse};
use crate::ui::components::pagination::Pagination;
use crate::ui::components::popup::render_error_banner;
use crate::ui::header::render_header;

pub const EMPTY_MESSAGE: &str = "No contacts. Please add a new contact";
pub const RETRY_MESSAGE: &str = "Contacts could not be loaded. Press <R> to retry";

// Represents the state of the contact list screen
pub struct ContactsState {
    page: Option<PaginatedResponse>,
    current_page: u32,
    table_state: TableState,
}

impl ContactsState {
    /// State before the first page has arrived.
    pub fn loading() -> Self {
        Self {
            page: None,
            current_page: 0,
            table_state: TableState::default(),
        }
    }

    pub fn new(page: PaginatedResponse, current_page: u32) -> Self {
        let mut table_state = TableState::default();
        if !page.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            current_page: page.clamp_page(current_page),
            page: Some(page),
            table_state,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        self.page.as_ref().map(|p| p.content.as_slice()).unwrap_or(&[])
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_contacts(&self) -> u64 {
        self.page.as_ref().map(|p| p.total_elements).unwrap_or(0)
    }

    /// Controls are only shown for a non-empty list spanning several pages.
    pub fn pagination(&self) -> Option<Pagination> {
        let page = self.page.as_ref()?;
        if page.is_empty() {
            return None;
        }
        Pagination::new(self.current_page, page.total_pages)
    }

    pub fn next(&mut self) {
        let len = self.contacts().len();
        if len == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.contacts().len();
        if len == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.table_state.selected().and_then(|i| self.contacts().get(i))
    }
}

pub enum ContactAction {
    Quit,
    NewContact,
    ViewContact(String),
    ChangePage(u32),
    Refresh,
}

pub async fn load_contacts(
    api: &dyn ContactsApi,
    page: u32,
    size: u32,
) -> api::Result<PaginatedResponse> {
    api.list(page, size).await
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn contact_row(contact: &Contact) -> Row<'_> {
    let status = match contact.status {
        ContactStatus::Active => Cell::from("✔ active").style(Style::default().fg(Color::Green)),
        ContactStatus::Inactive => Cell::from("✘ inactive").style(Style::default().fg(Color::Red)),
    };
    let photo = if contact.image_url.is_some() { "Photo" } else { "No Photo" };

    Row::new(vec![
        Cell::from(truncate(&contact.name, 15)),
        Cell::from(contact.title.as_str()),
        Cell::from(truncate(&contact.email, 20)),
        Cell::from(contact.phone.as_str()),
        Cell::from(contact.address.as_str()),
        status,
        Cell::from(photo),
    ])
}

pub fn render_contacts<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut ContactsState,
    area: Rect,
    error: Option<&str>,
) {
    let mut constraints = vec![Constraint::Length(3)];
    if error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut chunk = chunks.iter().copied();
    let mut next_chunk = || chunk.next().unwrap_or_default();

    render_header(frame, next_chunk(), state.total_contacts());
    if let Some(error) = error {
        render_error_banner(frame, next_chunk(), error);
    }

    let list_area = next_chunk();
    let pagination_area = next_chunk();
    let help_area = next_chunk();

    match &state.page {
        None => {
            // the banner is only passed in once a fetch has failed
            let text = if error.is_some() { RETRY_MESSAGE } else { "Loading..." };
            let placeholder = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().title("Contacts").borders(Borders::ALL));
            frame.render_widget(placeholder, list_area);
        }
        Some(page) if page.is_empty() => {
            let empty = Paragraph::new(EMPTY_MESSAGE)
                .alignment(Alignment::Center)
                .block(Block::default().title("Contacts").borders(Borders::ALL));
            frame.render_widget(empty, list_area);
        }
        Some(page) => {
            let header = Row::new(["Name", "Title", "Email", "Phone", "Address", "Status", "Photo"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rows: Vec<Row> = page.content.iter().map(contact_row).collect();

            let table = Table::new(rows)
                .header(header)
                .block(Block::default().title("Contacts").borders(Borders::ALL))
                .widths(&[
                    Constraint::Length(16),
                    Constraint::Length(14),
                    Constraint::Length(21),
                    Constraint::Length(14),
                    Constraint::Min(10),
                    Constraint::Length(11),
                    Constraint::Length(9),
                ])
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                );

            frame.render_stateful_widget(table, list_area, &mut state.table_state);
        }
    }

    if let Some(pagination) = state.pagination() {
        let controls = Paragraph::new(pagination.spans()).alignment(Alignment::Center);
        frame.render_widget(controls, pagination_area);
    }

    let buttons_text = match (state.selected_contact(), state.pagination()) {
        (Some(_), Some(_)) => "<N> New | <Enter> View | <←/→> Page | <1-9> Go to page | <R> Refresh | <Q> Quit",
        (Some(_), None) => "<N> New | <Enter> View | <R> Refresh | <Q> Quit",
        (None, _) => "<N> New | <R> Refresh | <Q> Quit",
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, help_area);
}

pub fn handle_input(state: &mut ContactsState, key: KeyCode) -> Option<ContactAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(ContactAction::Quit),
        KeyCode::Char('n') => Some(ContactAction::NewContact),
        KeyCode::Char('r') => Some(ContactAction::Refresh),
        KeyCode::Down => {
            state.next();
            None
        }
        KeyCode::Up => {
            state.previous();
            None
        }
        KeyCode::Enter => state
            .selected_contact()
            .map(|c| ContactAction::ViewContact(c.id.clone())),
        KeyCode::Left => state
            .pagination()
            .and_then(|p| p.previous())
            .map(ContactAction::ChangePage),
        KeyCode::Right => state
            .pagination()
            .and_then(|p| p.next())
            .map(ContactAction::ChangePage),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let label = c.to_digit(10)?;
            state
                .pagination()
                .and_then(|p| p.page_labelled(label))
                .filter(|page| *page != state.current_page())
                .map(ContactAction::ChangePage)
        }
        _ => None,
    }
}
