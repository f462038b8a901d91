use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{Card, CardDraft, CardId, Catalog, Category};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::{Theme, ThemeColors};

const FIELD_LABELS: [&str; 4] = ["Word *", "Pronunciation", "Definition *", "Example *"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormResult {
    Continue,
    Submit,
    Cancel,
}

/// Editable draft of one card: four text fields plus a category picker.
/// Used both for "add new" (editing = None) and "edit existing".
#[derive(Clone, Debug)]
pub struct CardForm {
    pub editing: Option<CardId>,
    fields: [LineInput; 4],
    /// 0..=3 are text fields, 4 is the category picker.
    focus: usize,
    /// Index into the catalog's category list; None = uncategorized.
    category: Option<usize>,
}

impl CardForm {
    pub fn blank() -> Self {
        Self {
            editing: None,
            fields: [
                LineInput::default(),
                LineInput::default(),
                LineInput::default(),
                LineInput::default(),
            ],
            focus: 0,
            category: None,
        }
    }

    pub fn for_card(card: &Card, categories: &[Category]) -> Self {
        Self {
            editing: Some(card.id),
            fields: [
                LineInput::new(&card.word),
                LineInput::new(card.pronunciation.as_deref().unwrap_or("")),
                LineInput::new(&card.definition),
                LineInput::new(&card.example),
            ],
            focus: 0,
            category: card
                .category_id
                .as_deref()
                .and_then(|cid| categories.iter().position(|c| c.id == cid)),
        }
    }

    /// Route a key to the focused field. Enter submits from any field;
    /// Tab/BackTab (and Up/Down on the picker row) move focus.
    pub fn handle_key(&mut self, key: KeyEvent, category_count: usize) -> FormResult {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % 5;
                return FormResult::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = if self.focus == 0 { 4 } else { self.focus - 1 };
                return FormResult::Continue;
            }
            _ => {}
        }

        if self.focus == 4 {
            match key.code {
                KeyCode::Left => self.cycle_category(category_count, false),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_category(category_count, true),
                KeyCode::Enter => return FormResult::Submit,
                KeyCode::Esc => return FormResult::Cancel,
                _ => {}
            }
            return FormResult::Continue;
        }

        match self.fields[self.focus].handle(key) {
            InputResult::Submit => FormResult::Submit,
            InputResult::Cancel => FormResult::Cancel,
            InputResult::Continue => FormResult::Continue,
        }
    }

    fn cycle_category(&mut self, count: usize, forward: bool) {
        if count == 0 {
            return;
        }
        self.category = if forward {
            match self.category {
                None => Some(0),
                Some(i) if i + 1 < count => Some(i + 1),
                Some(_) => None,
            }
        } else {
            match self.category {
                None => Some(count - 1),
                Some(0) => None,
                Some(i) => Some(i - 1),
            }
        };
    }

    pub fn draft(&self, categories: &[Category]) -> CardDraft {
        CardDraft {
            word: self.fields[0].value().to_string(),
            pronunciation: self.fields[1].value().to_string(),
            definition: self.fields[2].value().to_string(),
            example: self.fields[3].value().to_string(),
            category_id: self
                .category
                .and_then(|i| categories.get(i))
                .map(|c| c.id.clone()),
        }
    }

    fn category_label<'a>(&self, categories: &'a [Category]) -> &'a str {
        self.category
            .and_then(|i| categories.get(i))
            .map(|c| c.name.as_str())
            .unwrap_or("(none)")
    }
}

/// Manage screen: card list on the left of the mental model, with the
/// add/edit form rendered as a popup by the caller when open.
pub struct CardList<'a> {
    catalog: &'a Catalog,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> CardList<'a> {
    pub fn new(catalog: &'a Catalog, selected: usize, theme: &'a Theme) -> Self {
        Self {
            catalog,
            selected,
            theme,
        }
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let cards = self.catalog.cards();
        let title = format!(" Your Flashcards ({}) ", cards.len());
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if cards.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No cards yet. Press [a] to add one.",
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        let visible_rows = (inner.height as usize) / 2;
        if visible_rows == 0 {
            return;
        }
        // Keep the selection on screen
        let first = self.selected.saturating_sub(visible_rows.saturating_sub(1));

        let mut lines: Vec<Line> = Vec::new();
        for (i, card) in cards.iter().enumerate().skip(first).take(visible_rows) {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let mut spans = vec![Span::styled(
                format!(" {indicator} {}", card.word),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.word() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )];
            if let Some(cat) = card.category_id.as_deref().and_then(|c| self.catalog.category(c)) {
                spans.push(Span::styled(
                    format!("  [{}]", cat.name),
                    Style::default().fg(ThemeColors::parse_color(&cat.color)),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(Span::styled(
                format!("     {}", card.definition),
                Style::default().fg(colors.muted()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// The add/edit form popup.
pub struct CardFormView<'a> {
    form: &'a CardForm,
    categories: &'a [Category],
    theme: &'a Theme,
}

impl<'a> CardFormView<'a> {
    pub fn new(form: &'a CardForm, categories: &'a [Category], theme: &'a Theme) -> Self {
        Self {
            form,
            categories,
            theme,
        }
    }
}

impl Widget for CardFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.form.editing.is_some() {
            " Edit Flashcard "
        } else {
            " Add New Flashcard "
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
                Constraint::Length(2), // word
                Constraint::Length(2), // pronunciation
                Constraint::Length(2), // definition
                Constraint::Length(2), // example
                Constraint::Length(2), // category
                Constraint::Min(0),
                Constraint::Length(1), // hints
            ])
            .split(inner);

        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let focused = self.form.focus == i;
            let marker = if focused { ">" } else { " " };
            let (before, at, after) = self.form.fields[i].render_parts();

            let mut spans = vec![
                Span::styled(
                    format!(" {marker} {label:<14}"),
                    Style::default()
                        .fg(if focused { colors.accent() } else { colors.fg() })
                        .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }),
                ),
                Span::styled(before, Style::default().fg(colors.fg())),
            ];
            if focused {
                match at {
                    Some(ch) => {
                        spans.push(Span::styled(
                            ch.to_string(),
                            Style::default().fg(colors.bg()).bg(colors.accent()),
                        ));
                        spans.push(Span::styled(after, Style::default().fg(colors.fg())));
                    }
                    None => spans.push(Span::styled(" ", Style::default().bg(colors.accent()))),
                }
            } else {
                if let Some(ch) = at {
                    spans.push(Span::styled(ch.to_string(), Style::default().fg(colors.fg())));
                }
                spans.push(Span::styled(after, Style::default().fg(colors.fg())));
            }
            Paragraph::new(Line::from(spans)).render(layout[i], buf);
        }

        let picker_focused = self.form.focus == 4;
        let marker = if picker_focused { ">" } else { " " };
        let picker = Line::from(vec![
            Span::styled(
                format!(" {marker} {:<14}", "Category"),
                Style::default()
                    .fg(if picker_focused { colors.accent() } else { colors.fg() })
                    .add_modifier(if picker_focused {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ),
            Span::styled(
                format!("< {} >", self.form.category_label(self.categories)),
                Style::default().fg(if picker_focused {
                    colors.accent()
                } else {
                    colors.muted()
                }),
            ),
        ]);
        Paragraph::new(picker).render(layout[4], buf);

        let hints = Paragraph::new(Line::from(Span::styled(
            "  [Tab] Next field  [Enter] Save  [Esc] Cancel",
            Style::default().fg(colors.muted()),
        )));
        hints.render(layout[6], buf);
    }
}
