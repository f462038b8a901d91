use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::StudySummary;
use crate::ui::theme::Theme;

/// Completion screen shown when the cursor runs past the end of the deck.
pub struct SummaryView<'a> {
    summary: &'a StudySummary,
    theme: &'a Theme,
}

impl<'a> SummaryView<'a> {
    pub fn new(summary: &'a StudySummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for SummaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.summary.review_mode {
            " Review Complete! "
        } else {
            " Deck Complete! "
        };

        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let headline = if self.summary.review_mode {
            // Marking cards known during a review pass shrinks the view,
            // so an emptied view is the usual way a review pass ends.
            if self.summary.deck_size == 0 {
                "Nothing left to review!".to_string()
            } else {
                format!("You've reviewed all {} cards.", self.summary.deck_size)
            }
        } else {
            format!("You've completed all {} cards!", self.summary.deck_size)
        };
        let mut headline_lines = vec![Line::from(""), Line::from(Span::styled(
            headline,
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        ))];
        if let Some(ref topic) = self.summary.topic {
            headline_lines.push(Line::from(Span::styled(
                format!("Topic: {topic}"),
                Style::default().fg(colors.muted()),
            )));
        }
        Paragraph::new(headline_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let known_text = format!("{}", self.summary.known);
        let known_line = Line::from(vec![
            Span::styled("  Known:      ", Style::default().fg(colors.fg())),
            Span::styled(
                &*known_text,
                Style::default()
                    .fg(colors.known())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(known_line).render(layout[1], buf);

        let review_text = format!("{}", self.summary.review);
        let review_line = Line::from(vec![
            Span::styled("  For review: ", Style::default().fg(colors.fg())),
            Span::styled(
                &*review_text,
                Style::default().fg(if self.summary.review == 0 {
                    colors.success()
                } else {
                    colors.review()
                }),
            ),
        ]);
        Paragraph::new(review_line).render(layout[2], buf);

        let pct = format!("{:.0}% marked known", self.summary.known_ratio() * 100.0);
        let pct_line = Line::from(vec![
            Span::styled("  Progress:   ", Style::default().fg(colors.fg())),
            Span::styled(&*pct, Style::default().fg(colors.accent())),
        ]);
        Paragraph::new(pct_line).render(layout[3], buf);

        let mut hints = vec![
            Span::styled("  [r] Start again  ", Style::default().fg(colors.accent())),
        ];
        if !self.summary.review_mode && self.summary.review > 0 {
            hints.push(Span::styled(
                "[v] Review flagged  ",
                Style::default().fg(colors.accent()),
            ));
        }
        hints.push(Span::styled("[Esc] Menu", Style::default().fg(colors.accent())));
        Paragraph::new(Line::from(hints)).render(layout[5], buf);
    }
}
