use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::{Card, Category};
use crate::ui::theme::{Theme, ThemeColors};

/// Renders the front (word) or back (definition + example) of the active
/// flashcard. The caller tracks which side is up; flipping is an app-level
/// concern, this widget just draws the requested face.
pub struct CardFace<'a> {
    card: &'a Card,
    category: Option<&'a Category>,
    flipped: bool,
    show_pronunciation: bool,
    theme: &'a Theme,
}

impl<'a> CardFace<'a> {
    pub fn new(card: &'a Card, theme: &'a Theme) -> Self {
        Self {
            card,
            category: None,
            flipped: false,
            show_pronunciation: true,
            theme,
        }
    }

    pub fn category(mut self, category: Option<&'a Category>) -> Self {
        self.category = category;
        self
    }

    pub fn flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    pub fn show_pronunciation(mut self, show: bool) -> Self {
        self.show_pronunciation = show;
        self
    }

    fn render_front(&self, inner: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let hint = Paragraph::new(Line::from(Span::styled(
            " tap [Space] to flip ",
            Style::default().fg(colors.muted()),
        )));
        hint.render(layout[0], buf);

        let mut word_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.card.word.clone(),
                Style::default()
                    .fg(colors.word())
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if self.show_pronunciation {
            if let Some(ref pron) = self.card.pronunciation {
                word_lines.push(Line::from(""));
                word_lines.push(Line::from(Span::styled(
                    pron.clone(),
                    Style::default().fg(colors.muted()),
                )));
            }
        }
        let word = Paragraph::new(word_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        word.render(layout[1], buf);
    }

    fn render_back(&self, inner: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut lines = vec![
            Line::from(Span::styled(
                self.card.word.clone(),
                Style::default()
                    .fg(colors.word())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.card.definition.clone(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Example:",
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                format!("  {}", self.card.example),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )),
        ];

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[x] Need to review   ", Style::default().fg(colors.review())),
            Span::styled("[k] Know it", Style::default().fg(colors.known())),
        ]));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        paragraph.render(inner, buf);
    }
}

impl Widget for CardFace<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = match self.category {
            // Unknown category ids arrive here as None: no decoration.
            Some(cat) => Line::from(Span::styled(
                format!(" {} ", cat.name),
                Style::default().fg(ThemeColors::parse_color(&cat.color)),
            )),
            None => Line::from(""),
        };

        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.card_border()))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.flipped {
            self.render_back(inner, buf);
        } else {
            self.render_front(inner, buf);
        }
    }
}
