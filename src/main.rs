mod app;
mod catalog;
mod config;
mod event;
mod keyboard;
mod logging;
mod profile;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, PracticeFocus, Tab};
use catalog::Catalog;
use catalog::volume::VolumeFilter;
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::achievements::AchievementList;
use ui::components::dashboard::ProgressDashboard;
use ui::components::lesson_card::{self, LessonCard};
use ui::components::nav_header::{self, NavHeader};
use ui::components::practice_area::{PracticeArea, PracticeStatsBar};
use ui::components::steno_keyboard::StenoKeyboard;
use ui::components::toast::ToastStack;
use ui::components::volume_card::{self, VolumeCard, VolumeDetail, VolumeSummary};
use ui::layout::{AppLayout, PracticeLayout, centered_rect, grid, pack_hint_lines};
use ui::theme::Theme;

const DEFAULT_TICK_MS: u64 = 50;

#[derive(Parser)]
#[command(name = "stenomaster", version, about = "Terminal stenography practice tutor")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Practice this text instead of the catalog's")]
    text: Option<String>,

    #[arg(long, help = "Input poll interval in milliseconds")]
    tick_ms: Option<u64>,

    #[arg(long, help = "Print completed runs as JSON on exit")]
    summary_json: bool,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    let _log_guard = match logging::init(&log_path) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };
    logging::install_panic_hook();
    install_terminal_restore_hook();

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "invalid config, using defaults");
        Config::default()
    });
    if let Some(name) = cli.theme {
        config.theme = name;
    }
    let theme = Theme::load(&config.theme)
        .unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        })
        .leak();
    let catalog = Catalog::load().context("loading lesson catalog")?;

    let mut app = App::new(config, catalog, theme);
    if let Some(text) = cli.text.as_deref().filter(|t| !t.is_empty()) {
        app.set_practice_text(text);
    }
    tracing::info!(
        lessons = app.catalog.lessons.len(),
        volumes = app.catalog.volumes.len(),
        "starting"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(cli.tick_ms.unwrap_or(DEFAULT_TICK_MS).clamp(10, 1000));
    let events = EventHandler::new(tick);

    let result = run_app(&mut terminal, &mut app, &events);

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(err = %format!("{err:#}"), "app exited with error");
        eprintln!("Error: {err:?}");
    }

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&app.completed_runs)?);
    }
    tracing::info!(runs = app.completed_runs.len(), "exiting");

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

fn install_terminal_restore_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let completed = terminal.draw(|frame| render(frame, app))?;
        app.viewport = completed.area;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            app.persist_settings();
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if let KeyCode::F(n @ 1..=6) = key.code {
        if let Some(tab) = Tab::from_index(n as usize - 1) {
            app.select_tab(tab);
        }
        return;
    }

    if app.tab == Tab::Practice {
        handle_practice_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char(ch @ '1'..='6') => {
            if let Some(tab) = ch.to_digit(10).and_then(|d| Tab::from_index(d as usize - 1)) {
                app.select_tab(tab);
            }
            return;
        }
        KeyCode::Tab => {
            app.next_tab();
            return;
        }
        KeyCode::BackTab => {
            app.prev_tab();
            return;
        }
        _ => {}
    }

    match app.tab {
        Tab::Dashboard => handle_dashboard_key(app, key),
        Tab::Lessons => handle_lessons_key(app, key),
        Tab::Volumes => handle_volumes_key(app, key),
        Tab::Settings => handle_settings_key(app, key),
        Tab::Achievements | Tab::Practice => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.select_tab(Tab::Practice),
        KeyCode::Char('b') => app.select_tab(Tab::Lessons),
        _ => {}
    }
}

fn handle_lessons_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
            app.lesson_next()
        }
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => app.lesson_prev(),
        KeyCode::Enter => {
            app.start_selected_lesson();
        }
        _ => {}
    }
}

fn handle_volumes_key(app: &mut App, key: KeyEvent) {
    if app.open_volume.is_some() {
        match key.code {
            KeyCode::Esc => app.close_volume(),
            KeyCode::Char('o') => app.launch_volume(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => app.volume_next(),
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => app.volume_prev(),
        KeyCode::Char('a') => app.set_volume_filter(VolumeFilter::All),
        KeyCode::Char('v') => app.set_volume_filter(VolumeFilter::Available),
        KeyCode::Char('l') => app.set_volume_filter(VolumeFilter::Locked),
        KeyCode::Enter => {
            app.open_selected_volume();
        }
        KeyCode::Char('o') => app.launch_volume(),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('r') => app.restart_practice(),
            KeyCode::Char('n') => app.new_practice_text(),
            KeyCode::Char('k') => app.toggle_practice_focus(),
            _ => {}
        }
        return;
    }

    if app.practice_focus == PracticeFocus::Keyboard {
        match key.code {
            KeyCode::Esc => app.toggle_practice_focus(),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                app.key_cursor_next()
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                app.key_cursor_prev()
            }
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor_key(),
            KeyCode::Char('x') | KeyCode::Delete => app.chord.clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.select_tab(Tab::Dashboard),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.type_char('\n'),
        KeyCode::Tab => app.type_char('\t'),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.select_tab(Tab::Dashboard),
        KeyCode::Up | KeyCode::Char('k') => app.settings_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_next(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let layout = AppLayout::new(app.viewport);
    if let Some(tab) = nav_header::tab_at(layout.header, layout.tier, mouse.column, mouse.row) {
        app.select_tab(tab);
        return;
    }
    app.click_keyboard(mouse.column, mouse.row);
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    match app.tab {
        Tab::Practice if app.practice_focus == PracticeFocus::Keyboard => vec![
            "[←→] Move",
            "[Space] Toggle key",
            "[x] Clear chord",
            "[Esc] Back to text",
        ],
        Tab::Practice => vec![
            "[Ctrl-R] Restart",
            "[Ctrl-N] New text",
            "[Ctrl-K] Keyboard",
            "[Esc] Dashboard",
            "[F1-F6] Tabs",
        ],
        Tab::Lessons => vec!["[↑↓] Select", "[Enter] Start", "[1-6] Tabs", "[q] Quit"],
        Tab::Volumes if app.open_volume.is_some() => vec!["[o] Open in browser", "[Esc] Close"],
        Tab::Volumes => vec![
            "[↑↓] Select",
            "[a/v/l] Filter",
            "[Enter] Details",
            "[o] Open",
            "[q] Quit",
        ],
        Tab::Settings => vec!["[↑↓] Select", "[←→/Enter] Change", "[Esc] Save & back"],
        Tab::Dashboard => vec![
            "[Enter] Start Practice",
            "[b] Browse Lessons",
            "[1-6] Tabs",
            "[q] Quit",
        ],
        Tab::Achievements => vec!["[1-6] Tabs", "[Tab] Next tab", "[q] Quit"],
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    frame.render_widget(
        NavHeader::new(app.tab, app.profile.header_stats(), layout.tier, app.theme),
        layout.header,
    );

    match app.tab {
        Tab::Dashboard => frame.render_widget(
            ProgressDashboard::new(&app.profile, app.theme),
            layout.body,
        ),
        Tab::Lessons => render_lessons(frame, app, &layout),
        Tab::Volumes => render_volumes(frame, app, &layout),
        Tab::Practice => render_practice(frame, app, layout.body),
        Tab::Achievements => frame.render_widget(
            AchievementList::new(&app.profile.achievements, app.theme),
            centered_rect(70, 90, layout.body),
        ),
        Tab::Settings => render_settings(frame, app, layout.body),
    }

    let hints = footer_hints(app);
    let footer_text = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout.footer);

    frame.render_widget(ToastStack::new(&app.toasts, app.theme), layout.body);
}

/// First item index to draw so the selected card stays on screen.
fn grid_window_start(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let columns = columns.max(1);
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows.max(1) - 1);
    first_row * columns
}

fn render_lessons(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(layout.body);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled(
            " Lessons",
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Structured stenography training",
            Style::default().fg(colors.text_pending()),
        ),
    ]));
    frame.render_widget(heading, rows[0]);

    let lessons = &app.catalog.lessons;
    let columns = layout.tier.grid_columns();
    let visible_rows = (rows[1].height / lesson_card::CARD_HEIGHT) as usize;
    let start = grid_window_start(app.lesson_selected, columns, visible_rows);
    let shown = &lessons[start.min(lessons.len())..];
    let cells = grid(rows[1], columns, lesson_card::CARD_HEIGHT, shown.len());
    for (offset, (lesson, cell)) in shown.iter().zip(cells).enumerate() {
        let selected = start + offset == app.lesson_selected;
        frame.render_widget(LessonCard::new(lesson, selected, app.theme), cell);
    }
}

fn render_volumes(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(layout.body);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled(
            " KC Training Volumes",
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Structured, progressive stenographic training materials",
            Style::default().fg(colors.text_pending()),
        ),
    ]));
    frame.render_widget(heading, rows[0]);
    frame.render_widget(
        VolumeSummary::new(&app.catalog.volumes, app.volume_filter, app.theme),
        rows[1],
    );

    let volumes = app.visible_volumes();
    if volumes.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No volumes match this filter",
                Style::default().fg(colors.text_pending()),
            )),
            rows[2],
        );
    } else {
        let columns = layout.tier.grid_columns();
        let visible_rows = (rows[2].height / volume_card::CARD_HEIGHT) as usize;
        let start = grid_window_start(app.volume_selected, columns, visible_rows);
        let shown = &volumes[start.min(volumes.len())..];
        let cells = grid(rows[2], columns, volume_card::CARD_HEIGHT, shown.len());
        for (offset, (volume, cell)) in shown.iter().zip(cells).enumerate() {
            let selected = start + offset == app.volume_selected;
            frame.render_widget(VolumeCard::new(volume, selected, app.theme), cell);
        }
    }

    if let Some(volume) = app.opened_volume() {
        let popup = centered_rect(70, 80, layout.body);
        frame.render_widget(VolumeDetail::new(volume, app.theme), popup);
    }
}

fn render_practice(frame: &mut ratatui::Frame, app: &App, body: Rect) {
    let layout = PracticeLayout::new(body, app.config.show_keyboard);
    let keyboard_focused = app.practice_focus == PracticeFocus::Keyboard;

    frame.render_widget(
        PracticeStatsBar::new(app.live, app.practice_title(), app.theme),
        layout.stats,
    );
    frame.render_widget(
        PracticeArea::new(&app.scorer, app.theme).focused(!keyboard_focused),
        layout.text,
    );

    if let Some(keyboard_area) = layout.keyboard {
        let highlight = app.highlighted_keys();
        frame.render_widget(
            StenoKeyboard::new(&app.chord, &highlight, app.theme).focused(keyboard_focused),
            keyboard_area,
        );
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App, body: Rect) {
    let colors = &app.theme.colors;
    let centered = centered_rect(60, 80, body);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields = app.settings_fields();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change",
        Style::default().fg(colors.text_pending()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.key_pressed()
        } else {
            colors.text_pending()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("  Saved to {}", app.config_path.display()),
        Style::default().fg(colors.accent_dim()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
