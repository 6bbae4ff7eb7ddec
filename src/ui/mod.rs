pub mod components;
pub mod contact_detail;
pub mod contact_form;
pub mod contacts;
pub mod header;

#[cfg(test)]
pub mod test_utils {
    use tui::{backend::TestBackend, Frame, Terminal};

    /// Draws once on an in-memory terminal and returns the screen, one line per row.
    pub fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut Frame<TestBackend>),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
