use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::DeckSession;
use crate::ui::theme::Theme;

/// Wide-layout sidebar with live counts for the running session.
pub struct StudySidebar<'a> {
    session: &'a DeckSession,
    theme: &'a Theme,
}

impl<'a> StudySidebar<'a> {
    pub fn new(session: &'a DeckSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for StudySidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let deck = self.session.cards().len();
        let visible = self.session.visible_len();
        let known = self.session.known_count();
        let review = self.session.review_count();
        let remaining = deck.saturating_sub(known + review);
        let progress = self.session.progress_percent();

        let deck_str = format!("{deck}");
        let visible_str = format!("{visible}");
        let known_str = format!("{known}");
        let review_str = format!("{review}");
        let remaining_str = format!("{remaining}");
        let prog_str = format!("{progress:.0}%");

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Deck:      ", Style::default().fg(colors.fg())),
                Span::styled(deck_str, Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                Span::styled("In view:   ", Style::default().fg(colors.fg())),
                Span::styled(visible_str, Style::default().fg(colors.accent())),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Known:     ", Style::default().fg(colors.fg())),
                Span::styled(known_str, Style::default().fg(colors.known())),
            ]),
            Line::from(vec![
                Span::styled("Review:    ", Style::default().fg(colors.fg())),
                Span::styled(review_str, Style::default().fg(colors.review())),
            ]),
            Line::from(vec![
                Span::styled("Unmarked:  ", Style::default().fg(colors.fg())),
                Span::styled(remaining_str, Style::default().fg(colors.muted())),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Position:  ", Style::default().fg(colors.fg())),
                Span::styled(prog_str, Style::default().fg(colors.accent())),
            ]),
        ];

        if self.session.filter().review_only {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "review mode",
                Style::default().fg(colors.review()),
            )));
        }

        let block = Block::bordered()
            .title(" Session ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
