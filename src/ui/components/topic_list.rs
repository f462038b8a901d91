use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{Catalog, Topic};
use crate::ui::line_input::LineInput;
use crate::ui::theme::{Theme, ThemeColors};

/// Searchable topic browser. The search query and selection live in the
/// app; the widget draws the already-filtered list.
pub struct TopicList<'a> {
    topics: &'a [&'a Topic],
    catalog: &'a Catalog,
    selected: usize,
    search: &'a LineInput,
    searching: bool,
    theme: &'a Theme,
}

impl<'a> TopicList<'a> {
    pub fn new(
        topics: &'a [&'a Topic],
        catalog: &'a Catalog,
        selected: usize,
        search: &'a LineInput,
        searching: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            topics,
            catalog,
            selected,
            search,
            searching,
            theme,
        }
    }

    fn search_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let (before, at, after) = self.search.render_parts();
        let mut spans = vec![Span::styled(
            " Search: ",
            Style::default().fg(colors.fg()),
        )];
        spans.push(Span::styled(before, Style::default().fg(colors.fg())));
        if self.searching {
            match at {
                Some(ch) => {
                    spans.push(Span::styled(
                        ch.to_string(),
                        Style::default().fg(colors.bg()).bg(colors.accent()),
                    ));
                    spans.push(Span::styled(after, Style::default().fg(colors.fg())));
                }
                None => spans.push(Span::styled(
                    " ",
                    Style::default().bg(colors.accent()),
                )),
            }
        } else if self.search.is_empty() {
            spans.push(Span::styled(
                "press / to search",
                Style::default().fg(colors.muted()),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for TopicList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Learning Topics ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        Paragraph::new(self.search_line()).render(layout[0], buf);

        if self.topics.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                " No topics found matching your search.",
                Style::default().fg(colors.muted()),
            )));
            empty.render(layout[1], buf);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.topics
                    .iter()
                    .map(|_| Constraint::Length(4))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, topic) in self.topics.iter().enumerate() {
            if i >= rows.len() {
                break;
            }
            let is_selected = i == self.selected && !self.searching;
            let indicator = if is_selected { ">" } else { " " };

            let card_count = self.catalog.cards_for_topic(topic).len();
            let name_text = format!(" {indicator} {} ({card_count} cards)", topic.name);

            let mut tag_spans: Vec<Span> = vec![Span::raw("     ")];
            for cid in &topic.category_ids {
                if let Some(cat) = self.catalog.category(cid) {
                    tag_spans.push(Span::styled(
                        format!("[{}] ", cat.name),
                        Style::default().fg(ThemeColors::parse_color(&cat.color)),
                    ));
                }
            }

            let lines = vec![
                Line::from(Span::styled(
                    name_text,
                    Style::default()
                        .fg(if is_selected { colors.accent() } else { colors.fg() })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    format!("     {}", topic.description),
                    Style::default().fg(colors.muted()),
                )),
                Line::from(tag_spans),
            ];

            Paragraph::new(lines).render(rows[i], buf);
        }
    }
}
