use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::{DeckSession, DeckStatus};
use crate::ui::theme::Theme;

/// Header strip for the study screen: position within the view, review
/// badge, active filter indicators and the progress bar underneath.
pub struct DeckBar<'a> {
    session: &'a DeckSession,
    category_name: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> DeckBar<'a> {
    pub fn new(
        session: &'a DeckSession,
        category_name: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            category_name,
            theme,
        }
    }

    fn position_text(&self) -> String {
        match self.session.status() {
            DeckStatus::Complete => "Complete!".to_string(),
            DeckStatus::NoMatches => "No matching cards".to_string(),
            DeckStatus::Showing(_) => {
                format!("{} / {}", self.session.cursor() + 1, self.session.visible_len())
            }
        }
    }
}

impl Widget for DeckBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let mut spans = vec![Span::styled(
            format!(" {} ", self.position_text()),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(name) = self.category_name {
            spans.push(Span::styled(
                format!(" [{name}]"),
                Style::default().fg(colors.accent()).bg(colors.header_bg()),
            ));
        }

        if self.session.filter().review_only {
            spans.push(Span::styled(
                " Reviewing",
                Style::default().fg(colors.review()).bg(colors.header_bg()),
            ));
        } else if self.session.review_count() > 0 {
            spans.push(Span::styled(
                format!(" \u{2691} {}", self.session.review_count()),
                Style::default().fg(colors.review()).bg(colors.header_bg()),
            ));
        }

        let header = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(colors.header_bg()));
        header.render(layout[0], buf);

        // Progress strip, one cell high
        let bar = layout[1];
        if bar.width == 0 {
            return;
        }
        let ratio = (self.session.progress_percent() / 100.0).clamp(0.0, 1.0);
        let filled_width = (ratio * bar.width as f64) as u16;
        let block = Block::default().style(Style::default().bg(colors.bar_empty()));
        block.render(bar, buf);
        for x in bar.x..bar.x + filled_width {
            buf[(x, bar.y)].set_style(Style::default().bg(colors.bar_filled()));
        }
    }
}
