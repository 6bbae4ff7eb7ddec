use tui::{
    style::{Color, Modifier, Style},
    text::{Span, Spans},
};

/// Pagination controls for a result set with more than one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub label: String,
    pub active: bool,
}

impl Pagination {
    /// `None` when there is nothing to page through.
    pub fn new(current: u32, total_pages: u32) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        Some(Self {
            current: current.min(total_pages - 1),
            total_pages,
        })
    }

    pub fn controls(&self) -> Vec<PageControl> {
        (0..self.total_pages)
            .map(|index| PageControl {
                label: (index + 1).to_string(),
                active: index == self.current,
            })
            .collect()
    }

    pub fn previous_enabled(&self) -> bool {
        self.current > 0
    }

    pub fn next_enabled(&self) -> bool {
        self.current + 1 < self.total_pages
    }

    pub fn previous(&self) -> Option<u32> {
        self.previous_enabled().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.next_enabled().then(|| self.current + 1)
    }

    /// Zero based index of the page labelled `label`, if it exists.
    pub fn page_labelled(&self, label: u32) -> Option<u32> {
        (1..=self.total_pages).contains(&label).then(|| label - 1)
    }

    pub fn spans(&self) -> Spans<'static> {
        let disabled = Style::default().fg(Color::DarkGray);
        let enabled = Style::default().fg(Color::White);
        let active = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::styled(
            "«",
            if self.previous_enabled() { enabled } else { disabled },
        )];
        for control in self.controls() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", control.label),
                if control.active { active } else { enabled },
            ));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "»",
            if self.next_enabled() { enabled } else { disabled },
        ));
        Spans::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_controls() {
        assert_eq!(Pagination::new(0, 0), None);
        assert_eq!(Pagination::new(0, 1), None);
    }

    #[test]
    fn three_pages_render_three_controls() {
        let pagination = Pagination::new(0, 3).unwrap();
        let controls = pagination.controls();

        assert_eq!(controls.len(), 3);
        assert_eq!(
            controls.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
            ["1", "2", "3"]
        );
        assert!(controls[0].active);
        assert!(!pagination.previous_enabled());
        assert!(pagination.next_enabled());
    }

    #[test]
    fn next_disabled_on_last_page() {
        let pagination = Pagination::new(2, 3).unwrap();
        assert!(pagination.previous_enabled());
        assert!(!pagination.next_enabled());
        assert_eq!(pagination.next(), None);
        assert_eq!(pagination.previous(), Some(1));
    }

    #[test]
    fn page_labels_are_one_based() {
        let pagination = Pagination::new(1, 3).unwrap();
        assert_eq!(pagination.page_labelled(1), Some(0));
        assert_eq!(pagination.page_labelled(3), Some(2));
        assert_eq!(pagination.page_labelled(0), None);
        assert_eq!(pagination.page_labelled(4), None);
    }

    #[test]
    fn current_is_clamped() {
        let controls = Pagination::new(9, 3).unwrap().controls();
        assert!(controls[2].active);
    }
}
