mod app;
mod catalog;
mod config;
mod event;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use app::{App, AppScreen, StatusKind};
use catalog::Catalog;
use event::{AppEvent, EventHandler};
use session::DeckStatus;
use ui::components::card_editor::{CardFormView, CardList, FormResult};
use ui::components::card_face::CardFace;
use ui::components::deck_bar::DeckBar;
use ui::components::study_sidebar::StudySidebar;
use ui::components::summary::SummaryView;
use ui::components::topic_list::TopicList;
use ui::layout::{AppLayout, centered_rect};
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(name = "wordflow", version, about = "Terminal vocabulary flashcards")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Path to a deck JSON file")]
    cards: Option<PathBuf>,

    #[arg(long, help = "Start studying a topic by id")]
    topic: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(ref path) = cli.cards {
        app.catalog = Catalog::from_file(path)?;
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        } else {
            bail!(
                "unknown theme '{theme_name}' (available: {})",
                ui::theme::Theme::available_themes().join(", ")
            );
        }
    }
    if let Some(ref topic_id) = cli.topic {
        let Some(topic) = app.catalog.topic(topic_id).cloned() else {
            let known: Vec<&str> = app.catalog.topics().iter().map(|t| t.id.as_str()).collect();
            bail!("unknown topic '{topic_id}' (available: {})", known.join(", "));
        };
        app.start_topic_study(&topic);
        if app.session.is_none() {
            bail!("topic '{topic_id}' has no cards");
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Home => handle_home_key(app, key),
        AppScreen::Study => handle_study_key(app, key),
        AppScreen::Topics => handle_topics_key(app, key),
        AppScreen::Manage => handle_manage_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_study(),
        KeyCode::Char('2') => app.go_to_topics(),
        KeyCode::Char('3') => app.go_to_manage(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.start_study(),
            1 => app.go_to_topics(),
            2 => app.go_to_manage(),
            3 => app.go_to_settings(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    if app.summary.is_some() {
        match key.code {
            KeyCode::Char('r') => app.restart_deck(),
            KeyCode::Char('v') => app.review_flagged(),
            KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char(' ') | KeyCode::Enter => app.flip(),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next_card(),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.prev_card(),
        KeyCode::Char('k') => app.mark_known(),
        KeyCode::Char('x') => app.mark_for_review(),
        KeyCode::Char('v') => app.toggle_review_mode(),
        KeyCode::Char('f') => app.cycle_category(true),
        KeyCode::Char('F') => app.cycle_category(false),
        KeyCode::Char('r') => app.restart_deck(),
        _ => {}
    }
}

fn handle_topics_key(app: &mut App, key: KeyEvent) {
    if app.topic_searching {
        match app.topic_search.handle(key) {
            InputResult::Submit | InputResult::Cancel => app.topic_searching = false,
            InputResult::Continue => app.topic_selected = 0,
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('/') => app.topic_searching = true,
        KeyCode::Down | KeyCode::Char('j') => app.topic_select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.topic_select_prev(),
        KeyCode::Enter => app.open_selected_topic(),
        _ => {}
    }
}

fn handle_manage_key(app: &mut App, key: KeyEvent) {
    if app.card_form.is_some() {
        let category_count = app.catalog.categories().len();
        let result = match app.card_form.as_mut() {
            Some(form) => form.handle_key(key, category_count),
            None => return,
        };
        match result {
            FormResult::Submit => app.submit_form(),
            FormResult::Cancel => app.close_form(),
            FormResult::Continue => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_card(),
        KeyCode::Down | KeyCode::Char('j') => app.manage_select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.manage_select_prev(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 1 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(app.theme.colors.bg()));

    match app.screen {
        AppScreen::Home => render_home(frame, app),
        AppScreen::Study => render_study(frame, app),
        AppScreen::Topics => render_topics(frame, app),
        AppScreen::Manage => render_manage(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, screen_name: &str) {
    let colors = &app.theme.colors;
    let line = Line::from(vec![
        Span::styled(
            " WordFlow ",
            Style::default()
                .fg(colors.accent())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {screen_name}"),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]);
    let header = Paragraph::new(line)
        .block(Block::default().style(Style::default().bg(colors.header_bg())));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &str) {
    let colors = &app.theme.colors;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let hint_line = Paragraph::new(Line::from(Span::styled(
        format!(" {hints}"),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(hint_line, rows[0]);

    if let Some((text, kind)) = app.status() {
        let color = match kind {
            StatusKind::Info => colors.success(),
            StatusKind::Warning => colors.warning(),
            StatusKind::Error => colors.error(),
        };
        let status = Paragraph::new(Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(color),
        )));
        frame.render_widget(status, rows[1]);
    }
}

fn render_home(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "Home");
    frame.render_widget(&app.menu, layout.main);
    render_footer(
        frame,
        app,
        layout.footer,
        "[1-3] Open  [j/k] Move  [Enter] Select  [c] Settings  [q] Quit",
    );
}

fn render_study(frame: &mut ratatui::Frame, app: &App) {
    let Some(ref session) = app.session else {
        return;
    };
    let layout = AppLayout::new(frame.area());

    let deck_bar = DeckBar::new(session, app.active_category_name(), app.theme);
    frame.render_widget(deck_bar, layout.header);

    if let Some(ref summary) = app.summary {
        let popup = centered_rect(60, 60, layout.main);
        frame.render_widget(Clear, popup);
        frame.render_widget(SummaryView::new(summary, app.theme), popup);
    } else {
        match session.status() {
            DeckStatus::Showing(card) => {
                let category = card.category_id.as_deref().and_then(|c| app.catalog.category(c));
                let face = CardFace::new(card, app.theme)
                    .category(category)
                    .flipped(app.flipped)
                    .show_pronunciation(app.config.show_pronunciation);
                frame.render_widget(face, layout.main);
            }
            DeckStatus::NoMatches => {
                let colors = &app.theme.colors;
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No cards match the current filter.",
                        Style::default().fg(colors.fg()),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "[v] toggle review mode   [f] change category   [Esc] menu",
                        Style::default().fg(colors.muted()),
                    )),
                ];
                let block = Block::bordered()
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg()));
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(ratatui::layout::Alignment::Center)
                        .block(block),
                    layout.main,
                );
            }
            // Completion flips app.summary before the next draw; nothing
            // sensible to show for one frame.
            DeckStatus::Complete => {}
        }
    }

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(StudySidebar::new(session, app.theme), sidebar);
    }

    render_footer(
        frame,
        app,
        layout.footer,
        "[Space] Flip  [k] Known  [x] Review  [\u{2190}/\u{2192}] Move  [v] Review mode  [f] Category  [Esc] Menu",
    );
}

fn render_topics(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "Topics");

    let topics = app.filtered_topics();
    let list = TopicList::new(
        &topics,
        &app.catalog,
        app.topic_selected,
        &app.topic_search,
        app.topic_searching,
        app.theme,
    );
    frame.render_widget(list, layout.main);

    let hints = if app.topic_searching {
        "[Enter] Done  [Esc] Close search"
    } else {
        "[j/k] Move  [Enter] Study topic  [/] Search  [Esc] Menu"
    };
    render_footer(frame, app, layout.footer, hints);
}

fn render_manage(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "Manage Cards");

    let list = CardList::new(&app.catalog, app.manage_selected, app.theme);
    frame.render_widget(list, layout.main);

    if let Some(ref form) = app.card_form {
        let popup = centered_rect(60, 70, layout.main);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            CardFormView::new(form, app.catalog.categories(), app.theme),
            popup,
        );
    }

    let hints = if app.card_form.is_some() {
        "[Tab] Next field  [Enter] Save  [Esc] Cancel"
    } else {
        "[a] Add  [e] Edit  [d] Delete  [j/k] Move  [Esc] Menu"
    };
    render_footer(frame, app, layout.footer, hints);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, "Settings");

    let rows = [
        ("Theme", app.config.theme.clone()),
        (
            "Pronunciation",
            if app.config.show_pronunciation {
                "shown".to_string()
            } else {
                "hidden".to_string()
            },
        ),
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in rows.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {indicator} {label:<16}"),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ),
            Span::styled(
                format!("< {value} >"),
                Style::default().fg(if is_selected {
                    colors.accent()
                } else {
                    colors.muted()
                }),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if !app.config.cards_file.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("   Deck file: {}", app.config.cards_file),
            Style::default().fg(colors.muted()),
        )));
    }

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    frame.render_widget(Paragraph::new(lines).block(block), layout.main);

    render_footer(
        frame,
        app,
        layout.footer,
        "[j/k] Move  [\u{2190}/\u{2192}] Change  [Esc] Menu",
    );
}
