use anyhow::Result;
use kumite_desk::bracket::Bracket;
use kumite_desk::entities::{Athlete, AthleteRegistry, Belt, CategoryRegistry};
use kumite_desk::scoring::{CompetitorSlot, ScorePanel};
use kumite_desk::session::SessionUser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Athletes,
    Categories,
    Tournament,
    Scoring,
    Results,
    Settings,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Athletes,
            Page::Athletes => Page::Categories,
            Page::Categories => Page::Tournament,
            Page::Tournament => Page::Scoring,
            Page::Scoring => Page::Results,
            Page::Results => Page::Settings,
            Page::Settings => Page::Dashboard,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Dashboard => Page::Settings,
            Page::Athletes => Page::Dashboard,
            Page::Categories => Page::Athletes,
            Page::Tournament => Page::Categories,
            Page::Scoring => Page::Tournament,
            Page::Results => Page::Scoring,
            Page::Settings => Page::Results,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Athletes => "Athletes",
            Page::Categories => "Categories",
            Page::Tournament => "Tournament",
            Page::Scoring => "Scoring",
            Page::Results => "Results",
            Page::Settings => "Settings",
        }
    }
}

pub struct App {
    pub athletes: AthleteRegistry,
    pub categories: CategoryRegistry,
    pub bracket: Bracket,
    pub panel: ScorePanel,
    pub user: SessionUser,

    pub current_page: Page,
    pub filtered_athletes: Vec<Athlete>,
    pub athlete_state: TableState,
    pub search_query: String,
    pub search_mode: bool,
    pub belt_filter: Option<Belt>,
    pub logout_requested: bool,
}

impl App {
    pub fn new(
        athletes: AthleteRegistry,
        categories: CategoryRegistry,
        user: SessionUser,
    ) -> Self {
        let filtered_athletes = athletes.all();

        let mut athlete_state = TableState::default();
        if !filtered_athletes.is_empty() {
            athlete_state.select(Some(0));
        }

        Self {
            athletes,
            categories,
            bracket: Bracket::default_layout(),
            panel: ScorePanel::new("mat-1"),
            user,
            current_page: Page::Dashboard,
            filtered_athletes,
            athlete_state,
            search_query: String::new(),
            search_mode: false,
            belt_filter: None,
            logout_requested: false,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Re-run the search with the current query and belt filter
    pub fn apply_filter(&mut self) {
        self.filtered_athletes = self.athletes.search(&self.search_query, self.belt_filter);

        // Reset selection to first item
        if !self.filtered_athletes.is_empty() {
            self.athlete_state.select(Some(0));
        } else {
            self.athlete_state.select(None);
        }
    }

    pub fn clear_filter(&mut self) {
        self.search_query.clear();
        self.belt_filter = None;
        self.apply_filter();
    }

    /// Cycle the belt filter: none -> White -> ... -> Black -> none
    pub fn cycle_belt_filter(&mut self) {
        let ranks = Belt::all();
        self.belt_filter = match self.belt_filter {
            None => Some(ranks[0]),
            Some(current) => {
                let i = ranks.iter().position(|b| *b == current).unwrap_or(0);
                if i + 1 < ranks.len() {
                    Some(ranks[i + 1])
                } else {
                    None
                }
            }
        };
        self.apply_filter();
    }

    pub fn selected_athlete(&self) -> Option<&Athlete> {
        self.athlete_state
            .selected()
            .and_then(|i| self.filtered_athletes.get(i))
    }

    /// Delete the selected athlete from the registry
    pub fn delete_selected(&mut self) {
        if let Some(athlete) = self.selected_athlete() {
            let id = athlete.id.clone();
            self.athletes.remove(&id);
            self.apply_filter();
        }
    }

    pub fn next_row(&mut self) {
        let len = self.filtered_athletes.len();
        if len == 0 {
            return;
        }
        let i = match self.athlete_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.athlete_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.filtered_athletes.len();
        if len == 0 {
            return;
        }
        let i = match self.athlete_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.athlete_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Search mode captures raw typing on the Athletes page
            if app.search_mode {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => app.search_mode = false,
                    KeyCode::Backspace => {
                        app.search_query.pop();
                        app.apply_filter();
                    }
                    KeyCode::Char(c) => {
                        app.search_query.push(c);
                        app.apply_filter();
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('/') if app.current_page == Page::Athletes => {
                    app.search_mode = true;
                }
                KeyCode::Char('b') if app.current_page == Page::Athletes => {
                    app.cycle_belt_filter();
                }
                KeyCode::Char('c') if app.current_page == Page::Athletes => {
                    app.clear_filter();
                }
                KeyCode::Char('d') if app.current_page == Page::Athletes => {
                    app.delete_selected();
                }
                KeyCode::Down | KeyCode::Char('j') if app.current_page == Page::Athletes => {
                    app.next_row();
                }
                KeyCode::Up | KeyCode::Char('k') if app.current_page == Page::Athletes => {
                    app.previous_row();
                }
                // Scoring keys: left column drives aka, right column shiro
                KeyCode::Char('a') if app.current_page == Page::Scoring => {
                    app.panel.adjust_score(CompetitorSlot::Aka, 1);
                }
                KeyCode::Char('z') if app.current_page == Page::Scoring => {
                    app.panel.adjust_score(CompetitorSlot::Aka, -1);
                }
                KeyCode::Char('s') if app.current_page == Page::Scoring => {
                    app.panel.adjust_penalties(CompetitorSlot::Aka, 1);
                }
                KeyCode::Char('x') if app.current_page == Page::Scoring => {
                    app.panel.adjust_penalties(CompetitorSlot::Aka, -1);
                }
                KeyCode::Char('k') if app.current_page == Page::Scoring => {
                    app.panel.adjust_score(CompetitorSlot::Shiro, 1);
                }
                KeyCode::Char('m') if app.current_page == Page::Scoring => {
                    app.panel.adjust_score(CompetitorSlot::Shiro, -1);
                }
                KeyCode::Char('l') if app.current_page == Page::Scoring => {
                    app.panel.adjust_penalties(CompetitorSlot::Shiro, 1);
                }
                KeyCode::Char(',') if app.current_page == Page::Scoring => {
                    app.panel.adjust_penalties(CompetitorSlot::Shiro, -1);
                }
                KeyCode::Char('r') if app.current_page == Page::Scoring => {
                    app.panel.reset();
                }
                KeyCode::Char('o') if app.current_page == Page::Settings => {
                    app.logout_requested = true;
                    return Ok(());
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Dashboard => render_dashboard(f, chunks[1], app),
        Page::Athletes => render_athletes(f, chunks[1], app),
        Page::Tournament => render_bracket(f, chunks[1], app),
        Page::Scoring => render_scoring(f, chunks[1], app),
        Page::Categories => render_placeholder(f, chunks[1], "Categories"),
        Page::Results => render_placeholder(f, chunks[1], "Results"),
        Page::Settings => render_settings(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [
        Page::Dashboard,
        Page::Athletes,
        Page::Categories,
        Page::Tournament,
        Page::Scoring,
        Page::Results,
        Page::Settings,
    ];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} athletes", app.athletes.count()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("🥋 {}", app.user.username),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.athletes.summary();

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Tournament Overview",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Registered athletes: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{}", summary.total),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("{} Male", summary.male),
                Style::default().fg(Color::Blue),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} Female", summary.female),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Categories: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{}", app.categories.count()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Weight classes in registration:",
            Style::default().fg(Color::Cyan),
        )]),
        Line::from(format!("    {}", summary.kumite_classes.join("  "))),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Dashboard "),
    );

    f.render_widget(paragraph, area);
}

fn render_athletes(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Name", "Age", "Belt", "Weight", "Dojo", "Country", "Categories"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_athletes.iter().map(|athlete| {
        let belt_color = match athlete.belt {
            Belt::Black => Color::White,
            Belt::Brown => Color::Yellow,
            _ => Color::Cyan,
        };

        let cells = vec![
            Cell::from(athlete.name.clone()),
            Cell::from(format!("{}", athlete.age)),
            Cell::from(athlete.belt.as_str()).style(Style::default().fg(belt_color)),
            Cell::from(format!("{:.0} kg", athlete.weight_kg)),
            Cell::from(truncate(&athlete.dojo, 20)),
            Cell::from(athlete.country.clone()),
            Cell::from(truncate(&athlete.categories.join(", "), 30)),
        ];

        Row::new(cells).height(1)
    });

    let mut title = String::from(" Athletes Registry ");
    if !app.search_query.is_empty() || app.belt_filter.is_some() {
        let belt = app
            .belt_filter
            .map(|b| b.as_str().to_string())
            .unwrap_or_else(|| "any".to_string());
        title = format!(
            " Athletes Registry - search: \"{}\" belt: {} ",
            app.search_query, belt
        );
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(32),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.athlete_state);
}

fn render_bracket(f: &mut Frame, area: Rect, app: &App) {
    let bracket = &app.bracket;
    let final_label = bracket
        .node("final")
        .map(|n| n.label.as_str())
        .unwrap_or("Final");
    let semi1_label = bracket
        .node("semi1")
        .map(|n| n.label.as_str())
        .unwrap_or("Semi 1");
    let semi2_label = bracket
        .node("semi2")
        .map(|n| n.label.as_str())
        .unwrap_or("Semi 2");

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("                    ┌─ {} ─┐", final_label),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from("                    │               │"),
        Line::from(vec![
            Span::raw("          ┌─ "),
            Span::styled(semi1_label, Style::default().fg(Color::White)),
            Span::raw(" ─┘               └─ "),
            Span::styled(semi2_label, Style::default().fg(Color::White)),
            Span::raw(" ─┐"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Bracket pairings are not yet wired to registration data.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Tournament Bracket "),
    );

    f.render_widget(paragraph, area);
}

fn render_scoring(f: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_competitor(
        f,
        halves[0],
        &app.panel.aka.name,
        app.panel.aka.score,
        app.panel.aka.penalties,
        Color::Red,
        "a/z score  s/x penalty",
    );
    render_competitor(
        f,
        halves[1],
        &app.panel.shiro.name,
        app.panel.shiro.score,
        app.panel.shiro.penalties,
        Color::White,
        "k/m score  l/, penalty",
    );
}

fn render_competitor(
    f: &mut Frame,
    area: Rect,
    name: &str,
    score: u32,
    penalties: u32,
    color: Color,
    hint: &str,
) {
    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  Score: {}", score),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  Penalties: {}", penalties),
            Style::default().fg(Color::Yellow),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {}", hint),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let card = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", name)),
    );

    f.render_widget(card, area);
}

fn render_placeholder(f: &mut Frame, area: Rect, name: &str) {
    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {} - Coming Soon", name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  This view is not built yet.",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", name)),
    );

    f.render_widget(paragraph, area);
}

fn render_settings(f: &mut Frame, area: Rect, app: &App) {
    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Settings - Coming Soon",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Signed in as: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                app.user.username.clone(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(" to log out"),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Settings "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.current_page.title()),
        Style::default().fg(Color::Cyan),
    )];

    if app.search_mode {
        status_spans.push(Span::raw("| "));
        status_spans.push(Span::styled(
            format!("Search: {}_", app.search_query),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" done)"));
    } else {
        status_spans.push(Span::raw("| "));
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        if app.current_page == Page::Athletes {
            status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Search | "));
            status_spans.push(Span::styled("b", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Belt | "));
            status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Delete | "));
            status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Clear | "));
        }
        if app.current_page == Page::Scoring {
            status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Reset | "));
        }
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// Cut on a char boundary: dojo and category strings come straight from the
// registration form and may be multi-byte.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let cut = s
            .char_indices()
            .take_while(|(i, _)| *i <= target)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}...", &s[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            AthleteRegistry::with_defaults(),
            CategoryRegistry::with_defaults(),
            SessionUser {
                username: "admin".to_string(),
            },
        )
    }

    #[test]
    fn test_page_cycle_covers_all_views() {
        let mut page = Page::Dashboard;
        let mut seen = vec![page.title().to_string()];

        for _ in 0..6 {
            page = page.next();
            seen.push(page.title().to_string());
        }

        assert_eq!(
            seen,
            vec![
                "Dashboard",
                "Athletes",
                "Categories",
                "Tournament",
                "Scoring",
                "Results",
                "Settings"
            ]
        );
        // Full cycle returns to the start
        assert_eq!(page.next(), Page::Dashboard);
        assert_eq!(Page::Dashboard.previous(), Page::Settings);
    }

    #[test]
    fn test_apply_filter_resets_selection() {
        let mut app = app();

        app.search_query = "tiger".to_string();
        app.apply_filter();
        assert_eq!(app.filtered_athletes.len(), 1);
        assert_eq!(app.athlete_state.selected(), Some(0));

        app.search_query = "no such athlete".to_string();
        app.apply_filter();
        assert!(app.filtered_athletes.is_empty());
        assert_eq!(app.athlete_state.selected(), None);
    }

    #[test]
    fn test_cycle_belt_filter_wraps() {
        let mut app = app();

        assert_eq!(app.belt_filter, None);
        app.cycle_belt_filter();
        assert_eq!(app.belt_filter, Some(Belt::White));

        // Cycle through the remaining ranks and back to none
        for _ in 0..7 {
            app.cycle_belt_filter();
        }
        assert_eq!(app.belt_filter, Some(Belt::Black));
        app.cycle_belt_filter();
        assert_eq!(app.belt_filter, None);
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("Dragon Dojo", 20), "Dragon Dojo");
        assert_eq!(
            truncate(&"a".repeat(25), 20),
            format!("{}...", "a".repeat(17))
        );
    }

    #[test]
    fn test_truncate_lands_on_char_boundary() {
        // Three bytes per character; a byte-indexed cut would land mid-char
        let dojo = "日本武道館空手道場本部";
        let cut = truncate(dojo, 20);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 20);
        assert!(dojo.starts_with(cut.trim_end_matches("...")));

        // Short multi-byte strings pass through untouched
        assert_eq!(truncate("道場", 20), "道場");
    }

    #[test]
    fn test_delete_selected_removes_from_registry() {
        let mut app = app();

        app.search_query = "alex".to_string();
        app.apply_filter();
        assert_eq!(app.filtered_athletes.len(), 1);

        app.delete_selected();
        assert_eq!(app.athletes.count(), 4);
        assert!(app.filtered_athletes.is_empty());
    }
}
