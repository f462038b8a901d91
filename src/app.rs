use std::path::Path;
use std::time::Instant;

use crate::catalog::{Card, CardId, Catalog, Topic};
use crate::config::Config;
use crate::session::{DeckSession, DeckStatus, StudySummary};
use crate::ui::components::card_editor::CardForm;
use crate::ui::components::menu::Menu;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Study,
    Topics,
    Manage,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
    shown_at: Instant,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub should_quit: bool,

    // Study screen. The session exists only while the screen is open.
    pub session: Option<DeckSession>,
    pub flipped: bool,
    pub active_topic: Option<String>,
    pub summary: Option<StudySummary>,

    // Topics screen
    pub topic_selected: usize,
    pub topic_search: LineInput,
    pub topic_searching: bool,

    // Manage screen
    pub manage_selected: usize,
    pub card_form: Option<CardForm>,
    pub confirm_delete: Option<CardId>,

    pub settings_selected: usize,

    status: Option<StatusMessage>,
}

impl App {
    pub fn new() -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.validate(&Theme::available_themes());

        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let mut status = None;
        let catalog = if config.cards_file.is_empty() {
            Catalog::bundled()
        } else {
            match Catalog::from_file(Path::new(&config.cards_file)) {
                Ok(catalog) => catalog,
                Err(err) => {
                    status = Some(StatusMessage {
                        text: format!("couldn't load {}: {err}", config.cards_file),
                        kind: StatusKind::Error,
                        shown_at: Instant::now(),
                    });
                    Catalog::bundled()
                }
            }
        };

        Self {
            screen: AppScreen::Home,
            catalog,
            config,
            theme,
            menu,
            should_quit: false,
            session: None,
            flipped: false,
            active_topic: None,
            summary: None,
            topic_selected: 0,
            topic_search: LineInput::default(),
            topic_searching: false,
            manage_selected: 0,
            card_form: None,
            confirm_delete: None,
            settings_selected: 0,
            status: None,
        }
        .with_status(status)
    }

    fn with_status(mut self, status: Option<StatusMessage>) -> Self {
        self.status = status;
        self
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn status(&self) -> Option<(&str, StatusKind)> {
        self.status.as_ref().map(|s| (s.text.as_str(), s.kind))
    }

    /// Called on every tick event; expires the footer status message.
    pub fn tick(&mut self) {
        if let Some(ref status) = self.status {
            if status.shown_at.elapsed().as_millis() as u64 >= self.config.status_ttl_ms {
                self.status = None;
            }
        }
    }

    // --- study ---

    pub fn start_study(&mut self) {
        if self.catalog.is_empty() {
            self.set_status(StatusKind::Warning, "No cards to study. Add some first.");
            return;
        }
        self.session = Some(DeckSession::new(self.catalog.cards().to_vec()));
        self.active_topic = None;
        self.flipped = false;
        self.summary = None;
        self.screen = AppScreen::Study;
    }

    pub fn start_topic_study(&mut self, topic: &Topic) {
        let cards = self.catalog.cards_for_topic(topic);
        if cards.is_empty() {
            self.set_status(StatusKind::Warning, "No cards in this topic yet.");
            return;
        }
        self.session = Some(DeckSession::new(cards));
        self.active_topic = Some(topic.name.clone());
        self.flipped = false;
        self.summary = None;
        self.screen = AppScreen::Study;
    }

    pub fn current_card_id(&self) -> Option<CardId> {
        match self.session.as_ref()?.status() {
            DeckStatus::Showing(card) => Some(card.id),
            _ => None,
        }
    }

    pub fn flip(&mut self) {
        if self.current_card_id().is_some() {
            self.flipped = !self.flipped;
        }
    }

    pub fn next_card(&mut self) {
        if let Some(ref mut session) = self.session {
            session.advance();
            self.flipped = false;
            self.refresh_summary();
        }
    }

    pub fn prev_card(&mut self) {
        if let Some(ref mut session) = self.session {
            session.retreat();
            self.flipped = false;
        }
    }

    /// Mark the showing card known and move on. Marking always advances,
    /// so a run through the deck is one keypress per card.
    pub fn mark_known(&mut self) {
        if let Some(id) = self.current_card_id() {
            if let Some(ref mut session) = self.session {
                session.mark_known(id);
                session.advance();
                self.flipped = false;
                self.refresh_summary();
            }
        }
    }

    pub fn mark_for_review(&mut self) {
        if let Some(id) = self.current_card_id() {
            if let Some(ref mut session) = self.session {
                session.mark_unknown(id);
                session.advance();
                self.flipped = false;
                self.refresh_summary();
            }
        }
    }

    /// Switch between the full view and the flagged-only view. Entering
    /// review mode with nothing flagged is refused with a warning rather
    /// than dropping the user into an empty deck.
    pub fn toggle_review_mode(&mut self) {
        let Some(ref session) = self.session else {
            return;
        };
        if !session.filter().review_only && session.review_count() == 0 {
            self.set_status(StatusKind::Warning, "No cards to review yet.");
            return;
        }
        if let Some(ref mut session) = self.session {
            session.toggle_review_only();
        }
        self.flipped = false;
        self.summary = None;
    }

    /// Cycle the category filter: all cards, then each category in order.
    pub fn cycle_category(&mut self, forward: bool) {
        let Some(ref mut session) = self.session else {
            return;
        };
        let ids: Vec<&str> = self.catalog.categories().iter().map(|c| c.id.as_str()).collect();
        if ids.is_empty() {
            return;
        }
        let current = session.filter().category.as_deref();
        let pos = current.and_then(|c| ids.iter().position(|id| *id == c));
        let next = if forward {
            match pos {
                None => Some(0),
                Some(i) if i + 1 < ids.len() => Some(i + 1),
                Some(_) => None,
            }
        } else {
            match pos {
                None => Some(ids.len() - 1),
                Some(0) => None,
                Some(i) => Some(i - 1),
            }
        };
        session.set_category(next.map(|i| ids[i].to_string()));
        self.flipped = false;
        self.summary = None;
    }

    pub fn restart_deck(&mut self) {
        if let Some(ref mut session) = self.session {
            session.reset();
            self.flipped = false;
            self.summary = None;
        }
    }

    /// From the summary screen: keep the session, switch to the flagged
    /// cards. Goes through the same guard as the study-screen toggle.
    pub fn review_flagged(&mut self) {
        self.toggle_review_mode();
    }

    fn refresh_summary(&mut self) {
        if let Some(ref session) = self.session {
            if session.is_complete() && self.summary.is_none() {
                self.summary = Some(StudySummary::from_session(
                    session,
                    self.active_topic.as_deref(),
                ));
            }
        }
    }

    /// Name of the active category filter, for the study header.
    pub fn active_category_name(&self) -> Option<&str> {
        let filter_category = self.session.as_ref()?.filter().category.as_deref()?;
        self.catalog.category_name(filter_category)
    }

    // --- navigation ---

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Home;
        self.session = None;
        self.summary = None;
        self.active_topic = None;
        self.flipped = false;
    }

    pub fn go_to_topics(&mut self) {
        self.screen = AppScreen::Topics;
        self.topic_selected = 0;
        self.topic_search.clear();
        self.topic_searching = false;
    }

    pub fn go_to_manage(&mut self) {
        self.screen = AppScreen::Manage;
        self.manage_selected = 0;
        self.card_form = None;
        self.confirm_delete = None;
    }

    pub fn go_to_settings(&mut self) {
        self.screen = AppScreen::Settings;
        self.settings_selected = 0;
    }

    // --- topics ---

    pub fn filtered_topics(&self) -> Vec<&Topic> {
        let query = self.topic_search.value();
        self.catalog
            .topics()
            .iter()
            .filter(|t| t.matches(query))
            .collect()
    }

    pub fn topic_select_next(&mut self) {
        let count = self.filtered_topics().len();
        if count > 0 {
            self.topic_selected = (self.topic_selected + 1) % count;
        }
    }

    pub fn topic_select_prev(&mut self) {
        let count = self.filtered_topics().len();
        if count > 0 {
            self.topic_selected = if self.topic_selected == 0 {
                count - 1
            } else {
                self.topic_selected - 1
            };
        }
    }

    pub fn open_selected_topic(&mut self) {
        let topic = self
            .filtered_topics()
            .get(self.topic_selected)
            .map(|t| (*t).clone());
        if let Some(topic) = topic {
            self.start_topic_study(&topic);
        }
    }

    // --- manage ---

    pub fn selected_card(&self) -> Option<&Card> {
        self.catalog.cards().get(self.manage_selected)
    }

    pub fn manage_select_next(&mut self) {
        let count = self.catalog.cards().len();
        if count > 0 {
            self.manage_selected = (self.manage_selected + 1) % count;
        }
        self.confirm_delete = None;
    }

    pub fn manage_select_prev(&mut self) {
        let count = self.catalog.cards().len();
        if count > 0 {
            self.manage_selected = if self.manage_selected == 0 {
                count - 1
            } else {
                self.manage_selected - 1
            };
        }
        self.confirm_delete = None;
    }

    pub fn open_add_form(&mut self) {
        self.card_form = Some(CardForm::blank());
        self.confirm_delete = None;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(card) = self.selected_card().cloned() {
            self.card_form = Some(CardForm::for_card(&card, self.catalog.categories()));
        }
        self.confirm_delete = None;
    }

    pub fn close_form(&mut self) {
        self.card_form = None;
    }

    /// Save the open form. Validation failures keep the form open so the
    /// user can fix the input; edits are in-memory only.
    pub fn submit_form(&mut self) {
        let Some(ref form) = self.card_form else {
            return;
        };
        let draft = form.draft(self.catalog.categories());
        let editing = form.editing;
        let result = match editing {
            Some(id) => self.catalog.update_card(id, draft).map(|()| id),
            None => self.catalog.add_card(draft),
        };
        match result {
            Ok(id) => {
                let word = self
                    .catalog
                    .card(id)
                    .map(|c| c.word.clone())
                    .unwrap_or_default();
                let verb = if editing.is_some() { "Updated" } else { "Added" };
                self.set_status(StatusKind::Info, format!("{verb} \"{word}\""));
                self.card_form = None;
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    /// Two-step delete: the first press arms, the second removes.
    pub fn delete_selected_card(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let id = card.id;
        let word = card.word.clone();
        if self.confirm_delete != Some(id) {
            self.confirm_delete = Some(id);
            self.set_status(
                StatusKind::Warning,
                format!("Delete \"{word}\"? Press [d] again to confirm."),
            );
            return;
        }
        self.catalog.delete_card(id);
        self.confirm_delete = None;
        let count = self.catalog.cards().len();
        if self.manage_selected >= count && count > 0 {
            self.manage_selected = count - 1;
        }
        self.set_status(StatusKind::Info, format!("Deleted \"{word}\""));
    }

    // --- settings ---

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = (idx + 1) % themes.len();
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
                self.save_config();
            }
            1 => {
                self.config.show_pronunciation = !self.config.show_pronunciation;
                self.save_config();
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = if idx == 0 { themes.len() - 1 } else { idx - 1 };
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
                self.save_config();
            }
            1 => {
                self.config.show_pronunciation = !self.config.show_pronunciation;
                self.save_config();
            }
            _ => {}
        }
    }

    pub fn reload_theme(&mut self) {
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }

    fn save_config(&mut self) {
        if let Err(err) = self.config.save() {
            self.set_status(StatusKind::Error, format!("couldn't save config: {err}"));
        }
    }
}
