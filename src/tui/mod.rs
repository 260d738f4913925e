//! Ratatui-based terminal UI.
//!
//! Two pages share one state: a KPI page with the three ranked boards, and a
//! Predict page with stat cards, a title list and the salary trend chart.
//! Fetches run on the rayon pool and report back over a channel; the request
//! fence drops replies that a newer request has superseded.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
};

use crate::app::fence::{Channel, RequestFence, RequestToken};
use crate::app::pipeline::PredictView;
use crate::data::DashboardSource;
use crate::domain::{
    DashboardConfig, Forecast, HistoryPoint, Horizon, KpiSnapshot, Metric, Page, TitleList,
};
use crate::error::{AppError, FetchError, Resource};
use crate::report::{
    BOARD_LABEL_MAX, CARD_TITLE_MAX, KpiBoards, KpiKind, PLACEHOLDER, extract_kpis, fmt_stat_headline,
    fmt_stat_range, truncate_label,
};

mod plotters_chart;

use plotters_chart::{TrendChart, TrendSeries};

/// Directory the `e` key writes CSV exports to.
const EXPORT_DIR: &str = "exports";

/// Start the TUI.
pub fn run(source: Arc<dyn DashboardSource>, config: &DashboardConfig, title: Option<&str>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source, config, title);
    app.start();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// A finished background fetch.
enum Reply {
    Bootstrap {
        token: RequestToken,
        /// The KPI half is fenced with the `r` reloads.
        kpi_token: RequestToken,
        titles: Result<TitleList, FetchError>,
        kpis: Result<KpiSnapshot, FetchError>,
    },
    Kpis {
        token: RequestToken,
        result: Result<KpiSnapshot, FetchError>,
    },
    History {
        token: RequestToken,
        result: Result<Vec<HistoryPoint>, FetchError>,
    },
    Forecast {
        token: RequestToken,
        result: Result<Forecast, FetchError>,
    },
}

struct App {
    source: Arc<dyn DashboardSource>,
    top_n: usize,
    page: Page,
    titles: TitleList,
    selected: usize,
    /// Title requested on the command line, resolved once titles arrive.
    preferred: Option<String>,
    horizon: Horizon,
    kpis: KpiBoards,
    history: Vec<HistoryPoint>,
    forecast: Forecast,
    view: PredictView,
    trend: Option<TrendSeries>,
    advisory: Option<String>,
    status: String,
    fence: RequestFence,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl App {
    fn new(source: Arc<dyn DashboardSource>, config: &DashboardConfig, title: Option<&str>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            source,
            top_n: config.top_n,
            page: Page::default(),
            titles: Vec::new(),
            selected: 0,
            preferred: title.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string),
            horizon: config.horizon,
            kpis: KpiBoards::default(),
            history: Vec::new(),
            forecast: Forecast::default(),
            view: PredictView::default(),
            trend: None,
            advisory: None,
            status: String::new(),
            fence: RequestFence::new(),
            tx,
            rx,
        };
        app.rederive();
        app
    }

    /// Kick off the initial titles + KPIs load.
    fn start(&mut self) {
        let token = self.fence.issue(Channel::Bootstrap);
        let kpi_token = self.fence.issue(Channel::Kpis);
        self.status = format!("Loading titles and KPIs from {}...", self.source.describe());
        self.spawn(move |source| Reply::Bootstrap {
            token,
            kpi_token,
            titles: source.fetch_titles(),
            kpis: source.fetch_kpis(),
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn DashboardSource) -> Reply + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        rayon::spawn(move || {
            // The receiver only goes away when the UI has exited.
            let _ = tx.send(job(source.as_ref()));
        });
    }

    fn selected_title(&self) -> Option<&str> {
        self.titles.get(self.selected).map(String::as_str)
    }

    fn is_loading(&self) -> bool {
        [Channel::Bootstrap, Channel::Kpis, Channel::History, Channel::Forecast]
            .into_iter()
            .any(|c| self.fence.is_pending(c))
    }

    fn reload_kpis(&mut self) {
        self.advisory = None;
        let token = self.fence.issue(Channel::Kpis);
        self.status = "Reloading KPIs...".to_string();
        self.spawn(move |source| Reply::Kpis {
            token,
            result: source.fetch_kpis(),
        });
    }

    fn load_history(&mut self) {
        let Some(title) = self.selected_title().map(str::to_string) else {
            return;
        };
        self.advisory = None;
        let token = self.fence.issue(Channel::History);
        self.status = format!("Loading history for {title}...");
        self.spawn(move |source| Reply::History {
            token,
            result: source.fetch_history(&title),
        });
    }

    fn load_forecast(&mut self) {
        let Some(title) = self.selected_title().map(str::to_string) else {
            return;
        };
        self.advisory = None;
        let horizon = self.horizon;
        let token = self.fence.issue(Channel::Forecast);
        self.status = format!("Forecasting {title} ({horizon})...");
        self.spawn(move |source| Reply::Forecast {
            token,
            result: source.fetch_forecast(&title, horizon),
        });
    }

    /// Apply every reply that has arrived. Returns whether anything changed.
    fn drain_replies(&mut self) -> bool {
        let mut applied = false;
        while let Ok(reply) = self.rx.try_recv() {
            self.apply(reply);
            applied = true;
        }
        applied
    }

    fn apply(&mut self, reply: Reply) {
        match reply {
            Reply::Bootstrap {
                token,
                kpi_token,
                titles,
                kpis,
            } => {
                let titles_fresh = self.accept(Channel::Bootstrap, token);
                let kpis_fresh = self.accept(Channel::Kpis, kpi_token);
                let mut failed = false;
                if titles_fresh {
                    match titles {
                        Ok(list) => {
                            self.selected = self
                                .preferred
                                .as_deref()
                                .and_then(|p| list.iter().position(|t| t.eq_ignore_ascii_case(p)))
                                .unwrap_or(0);
                            self.titles = list;
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to load titles");
                            failed = true;
                        }
                    }
                }
                if kpis_fresh {
                    match kpis {
                        Ok(snapshot) => self.kpis = extract_kpis(Some(&snapshot), self.top_n),
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to load KPIs");
                            failed = true;
                        }
                    }
                }
                if failed {
                    self.advisory = Some(format!(
                        "Failed to load titles/KPIs. Check the API is running at {}",
                        self.source.describe()
                    ));
                }
                if titles_fresh {
                    self.status = format!("{} titles loaded.", self.titles.len());
                    self.rederive();
                }
            }
            Reply::Kpis { token, result } => {
                if !self.accept(Channel::Kpis, token) {
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        self.kpis = extract_kpis(Some(&snapshot), self.top_n);
                        self.status = "KPIs reloaded.".to_string();
                    }
                    Err(err) => self.fail(Resource::Kpis, &err),
                }
            }
            Reply::History { token, result } => {
                if !self.accept(Channel::History, token) {
                    return;
                }
                match result {
                    Ok(points) => {
                        self.status = format!("Loaded {} history points.", points.len());
                        self.history = points;
                        self.rederive();
                    }
                    Err(err) => self.fail(Resource::History, &err),
                }
            }
            Reply::Forecast { token, result } => {
                if !self.accept(Channel::Forecast, token) {
                    return;
                }
                match result {
                    Ok(forecast) => {
                        self.status = format!("Forecast ready ({} periods).", forecast.points.len());
                        self.forecast = forecast;
                        self.rederive();
                    }
                    Err(err) => self.fail(Resource::Forecast, &err),
                }
            }
        }
    }

    fn accept(&mut self, channel: Channel, token: RequestToken) -> bool {
        let accepted = self.fence.settle(channel, token);
        if !accepted {
            tracing::debug!(?channel, ?token, "dropping stale reply");
        }
        accepted
    }

    /// Surface a failed load; the previous data stays on screen.
    fn fail(&mut self, resource: Resource, err: &FetchError) {
        tracing::warn!(?resource, error = %err, "load failed");
        self.advisory = Some(err.advisory(resource));
        self.status.clear();
    }

    fn rederive(&mut self) {
        let title = self.selected_title().unwrap_or_default().to_string();
        self.view = PredictView::derive(title, self.horizon, self.history.clone(), self.forecast.clone());
        self.trend = TrendSeries::from_merged(&self.view.merged);
    }

    fn export(&mut self) {
        if self.view.merged.is_empty() {
            self.status = "Nothing to export yet. Load history or a forecast first.".to_string();
            return;
        }
        let result = crate::io::export::timestamped_export_path(
            Path::new(EXPORT_DIR),
            &self.view.title,
            chrono::Local::now(),
        )
        .and_then(|path| crate::io::export::write_merged_csv(&path, &self.view.merged).map(|()| path));
        match result {
            Ok(path) => self.status = format!("Exported {}", path.display()),
            Err(err) => self.advisory = Some(err.to_string()),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_replies() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.page = self.page.toggle(),
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.rederive();
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.titles.len() {
                    self.selected += 1;
                    self.rederive();
                }
            }
            KeyCode::Left => {
                self.horizon = self.horizon.prev();
                self.rederive();
            }
            KeyCode::Right => {
                self.horizon = self.horizon.next();
                self.rederive();
            }
            KeyCode::Char('h') => self.load_history(),
            KeyCode::Char('p') | KeyCode::Enter => self.load_forecast(),
            KeyCode::Char('r') => self.reload_kpis(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        match self.page {
            Page::Kpis => self.draw_kpis(frame, chunks[1]),
            Page::Predict => self.draw_predict(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = match self.page {
            Page::Kpis => 0,
            Page::Predict => 1,
        };
        let mut title = format!("jm | {}", self.page.subtitle());
        if self.is_loading() {
            title.push_str(" | loading...");
        }
        let tabs = Tabs::new(vec![Page::Kpis.display_name(), Page::Predict.display_name()])
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
            .split(area);

        for (kind, rect) in KpiKind::ALL.into_iter().zip(columns.iter().copied()) {
            self.draw_board(frame, rect, kind);
        }
    }

    fn draw_board(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: KpiKind) {
        let block = Block::default()
            .title(kind.title())
            .title_bottom(Line::from(Span::styled(kind.subtitle(), Style::default().fg(Color::DarkGray))))
            .borders(Borders::ALL);

        let board = self.kpis.board(kind);
        if board.is_empty() {
            let msg = Paragraph::new("No data yet.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        let bars: Vec<Bar> = board
            .iter()
            .map(|entry| {
                Bar::default()
                    .label(Line::from(truncate_label(&entry.title, BOARD_LABEL_MAX)))
                    .value(bar_length(&entry.value))
                    .text_value(kind.fmt_value(&entry.value))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn draw_predict(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        self.draw_stat_cards(frame, rows[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(rows[1]);
        self.draw_title_list(frame, body[0]);
        self.draw_chart(frame, body[1]);
    }

    fn draw_stat_cards(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        let view = &self.view;
        let title = if view.title.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            truncate_label(&view.title, CARD_TITLE_MAX)
        };
        let model = if view.forecast.model.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            view.forecast.model.clone()
        };

        let contents = [
            ("Selected title", title, format!("horizon {}", view.horizon)),
            (
                "History (last avg)",
                fmt_stat_headline(view.history_stats.as_ref()),
                fmt_stat_range(view.history_stats.as_ref()),
            ),
            (
                "Forecast (last predicted)",
                fmt_stat_headline(view.forecast_stats.as_ref()),
                fmt_stat_range(view.forecast_stats.as_ref()),
            ),
            ("Forecast model", model, String::new()),
        ];

        for ((label, headline, detail), rect) in contents.into_iter().zip(cards.iter().copied()) {
            let text = Text::from(vec![
                Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            ]);
            let card = Paragraph::new(text).block(Block::default().title(label).borders(Borders::ALL));
            frame.render_widget(card, rect);
        }
    }

    fn draw_title_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self.titles.iter().map(|t| ListItem::new(t.as_str())).collect();
        let list = List::new(items)
            .block(Block::default().title("Job titles").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !self.titles.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw("Salary trend "),
                Span::styled("history", Style::default().fg(Color::Cyan)),
                Span::raw(" / "),
                Span::styled("forecast", Style::default().fg(Color::Yellow)),
            ]))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match &self.trend {
            Some(series) => frame.render_widget(TrendChart { series }, inner),
            None => {
                let msg = Paragraph::new("No numeric data yet. Press h for history, p for a forecast.")
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab page  ↑/↓ title  ←/→ horizon  h history  p predict  r reload  e export  q quit";
        let (message, color) = match &self.advisory {
            Some(advisory) => (advisory.as_str(), Color::Red),
            None => (self.status.as_str(), Color::Yellow),
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(message, Style::default().fg(color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Bar length for a board value. Only relative lengths matter; labels carry
/// the formatted value.
fn bar_length(value: &Metric) -> u64 {
    value
        .as_f64()
        .filter(|v| *v > 0.0)
        .map(|v| (v * 100.0).round() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleSource;
    use crate::domain::KpiRow;

    /// A source whose every request fails like an unreachable API.
    struct DownSource;

    impl DashboardSource for DownSource {
        fn describe(&self) -> String {
            "http://127.0.0.1:9".to_string()
        }

        fn fetch_titles(&self) -> Result<TitleList, FetchError> {
            Err(FetchError::Transport("connection refused".to_string()))
        }

        fn fetch_kpis(&self) -> Result<KpiSnapshot, FetchError> {
            Err(FetchError::Transport("connection refused".to_string()))
        }

        fn fetch_history(&self, _title: &str) -> Result<Vec<HistoryPoint>, FetchError> {
            Err(FetchError::Transport("connection refused".to_string()))
        }

        fn fetch_forecast(&self, _title: &str, _horizon: Horizon) -> Result<Forecast, FetchError> {
            Err(FetchError::Transport("connection refused".to_string()))
        }
    }

    fn demo_app(title: Option<&str>) -> App {
        let config = DashboardConfig {
            demo: true,
            top_n: 5,
            ..DashboardConfig::default()
        };
        App::new(Arc::new(SampleSource::new(7)), &config, title)
    }

    fn wait(app: &mut App) {
        let reply = app.rx.recv_timeout(Duration::from_secs(10)).unwrap();
        app.apply(reply);
    }

    #[test]
    fn bootstrap_fills_titles_and_boards() {
        let mut app = demo_app(Some("nurse"));
        app.start();
        assert!(app.is_loading());
        wait(&mut app);

        assert!(!app.is_loading());
        assert_eq!(app.selected_title(), Some("Nurse"));
        assert_eq!(app.kpis.openings.len(), 5);
        assert_eq!(app.view.title, "Nurse");
        assert!(app.advisory.is_none());
    }

    #[test]
    fn history_then_forecast_builds_the_view() {
        let mut app = demo_app(None);
        app.start();
        wait(&mut app);

        app.handle_key(KeyCode::Char('h'));
        wait(&mut app);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('p'));
        wait(&mut app);

        assert_eq!(app.horizon, Horizon::Twelve);
        assert_eq!(app.view.forecast.points.len(), 12);
        assert_eq!(app.view.merged.len(), app.view.history.len() + 12);
        assert!(app.view.history_stats.is_some());
        assert!(app.trend.is_some());
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut app = demo_app(None);
        let old = app.fence.issue(Channel::History);
        let new = app.fence.issue(Channel::History);

        app.apply(Reply::History {
            token: new,
            result: Ok(vec![HistoryPoint::new("2024-01-01", 1.0)]),
        });
        app.apply(Reply::History {
            token: old,
            result: Ok(vec![HistoryPoint::new("2023-01-01", 2.0), HistoryPoint::new("2023-02-01", 3.0)]),
        });

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].month, "2024-01-01");
    }

    fn openings_led_by(title: &str) -> KpiSnapshot {
        KpiSnapshot {
            openings_by_title: Some(vec![KpiRow::new(title, 10.0)]),
            salary_by_title: None,
            growth_by_title: None,
        }
    }

    #[test]
    fn reload_during_startup_keeps_the_newer_boards() {
        let mut app = demo_app(None);
        let boot = app.fence.issue(Channel::Bootstrap);
        let boot_kpis = app.fence.issue(Channel::Kpis);
        let reload = app.fence.issue(Channel::Kpis);

        // The reload answers first; the slower startup reply lands afterwards.
        app.apply(Reply::Kpis {
            token: reload,
            result: Ok(openings_led_by("Reloaded")),
        });
        app.apply(Reply::Bootstrap {
            token: boot,
            kpi_token: boot_kpis,
            titles: Ok(vec!["Nurse".to_string()]),
            kpis: Ok(openings_led_by("Startup")),
        });

        assert_eq!(app.kpis.openings[0].title, "Reloaded");
        assert_eq!(app.titles, vec!["Nurse".to_string()]);
        assert!(!app.is_loading());
    }

    #[test]
    fn unreachable_api_sets_advisory_and_keeps_state() {
        let mut app = App::new(Arc::new(DownSource), &DashboardConfig::default(), None);
        app.start();
        wait(&mut app);
        assert_eq!(
            app.advisory.as_deref(),
            Some("Failed to load titles/KPIs. Check the API is running at http://127.0.0.1:9")
        );

        // No title selected: loads are no-ops.
        app.handle_key(KeyCode::Char('h'));
        assert!(!app.fence.is_pending(Channel::History));

        app.titles = vec!["Nurse".to_string()];
        app.history = vec![HistoryPoint::new("2024-01-01", 3000.0)];
        app.handle_key(KeyCode::Char('h'));
        assert!(app.advisory.is_none());
        wait(&mut app);
        assert_eq!(app.advisory.as_deref(), Some("Network error while loading history"));
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn keys_switch_page_and_quit() {
        let mut app = demo_app(None);
        assert_eq!(app.page, Page::Kpis);
        assert!(!app.handle_key(KeyCode::Tab));
        assert_eq!(app.page, Page::Predict);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.view.horizon, Horizon::Three);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn bar_length_ignores_non_numeric() {
        assert_eq!(bar_length(&Metric::Number(12.345)), 1235);
        assert_eq!(bar_length(&Metric::Number(-3.0)), 0);
        assert_eq!(bar_length(&Metric::NotANumber("n/a".to_string())), 0);
    }
}
