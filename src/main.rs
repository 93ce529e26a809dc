use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use janlog_terminal::config::AppConfig;
use janlog_terminal::fake_feed;
use janlog_terminal::format::{format_game_rank, format_game_score, format_time_hhmm};
use janlog_terminal::score_feed;
use janlog_terminal::state::{AppState, DayReport, Delta, ProviderCommand, apply_delta};
use janlog_terminal::timeline::RANK_LABELS;

const METRIC_HEADERS: [&str; 5] = ["累計半荘数", "総スコア", "最高スコア", "平均スコア", "平均着順"];

struct App {
    config: AppConfig,
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    loading_since: Option<Instant>,
}

impl App {
    fn new(config: AppConfig, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            should_quit: false,
            cmd_tx,
            loading_since: None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.search(),
            KeyCode::Left => self.step_day(-1),
            KeyCode::Right => self.step_day(1),
            KeyCode::Up => self.state.games_scroll = self.state.games_scroll.saturating_sub(1),
            KeyCode::Down => self.state.games_scroll = self.state.games_scroll.saturating_add(1),
            KeyCode::Backspace => {
                self.state.name_input.pop();
            }
            KeyCode::Char(c) => self.state.name_input.push(c),
            _ => {}
        }
    }

    fn search(&mut self) {
        let name = self.state.name_input.trim().to_string();
        if name.is_empty() {
            self.state.status = "名前を入力してねっ".to_string();
            return;
        }
        let date = self.config.date_param(self.state.day);
        if self
            .cmd_tx
            .send(ProviderCommand::FetchDay { name, date })
            .is_err()
        {
            self.state.push_log("[WARN] Fetch request failed");
            return;
        }
        self.state.loading = true;
        self.loading_since = Some(Instant::now());
        self.state.status = "────────".to_string();
    }

    fn step_day(&mut self, delta: i64) {
        let day = (self.state.day as i64 + delta)
            .clamp(self.config.day_min as i64, self.config.last_day() as i64)
            as u32;
        if day != self.state.day {
            self.state.day = day;
            if !self.state.name_input.trim().is_empty() {
                self.search();
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if config.fake_feed {
        fake_feed::spawn_fake_provider(tx, cmd_rx, config.clone());
    } else {
        score_feed::spawn_provider(tx, cmd_rx, config.clone());
    }

    let mut app = App::new(config, cmd_tx);
    if app.config.fake_feed {
        app.state.push_log("[INFO] Fake feed active (set JANLOG_API_URL for live data)");
    }
    if !app.state.name_input.trim().is_empty() {
        app.search();
    }
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_ranking(frame, chunks[1], app);
    render_summary(frame, chunks[2], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[3]);
    render_games(frame, body[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(body[1]);
    render_rank_counts(frame, right[0], app);
    render_rank_chart(frame, right[1], app);

    let footer = Paragraph::new(footer_text(app)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);
}

fn header_text(app: &App) -> String {
    let line1 = format!(
        "雀ログ TERMINAL | {}年 {}",
        app.config.year,
        app.config.day_label(app.state.day)
    );
    let line2 = if app.state.loading {
        let elapsed = app
            .loading_since
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);
        format!("────────  取得中 {elapsed}s")
    } else {
        app.state.status.clone()
    };
    let line3 = match &app.state.report {
        Some(report) => format!(
            "名前: {}_   No. {}   {}   集計人数: {} 人",
            app.state.name_input, report.member_no, report.member_name, report.visitor_count
        ),
        None => format!("名前: {}_", app.state.name_input),
    };
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(app: &App) -> String {
    let keys = "Enter 検索 | ←/→ 前日/翌日 | ↑/↓ スクロール | Esc 終了";
    match app.state.logs.back() {
        Some(log) => format!("{keys} | {log}"),
        None => keys.to_string(),
    }
}

fn render_row(frame: &mut Frame, area: Rect, cells: &[String], style: Style) {
    let constraints: Vec<Constraint> = cells
        .iter()
        .map(|_| Constraint::Ratio(1, cells.len().max(1) as u32))
        .collect();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (i, cell) in cells.iter().enumerate() {
        frame.render_widget(Paragraph::new(cell.as_str()).style(style), cols[i]);
    }
}

fn header_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn placeholder_row() -> [String; 5] {
    ["-", "-", "-", "-", "-"].map(str::to_string)
}

fn render_ranking(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("ランキング（全体）");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    render_row(frame, rows[0], &METRIC_HEADERS.map(str::to_string), header_style());
    match &app.state.report {
        Some(report) => render_row(frame, rows[1], &report.ranks_row, Style::default()),
        None => render_row(frame, rows[1], &placeholder_row(), Style::default().fg(Color::DarkGray)),
    }
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("本日の成績");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    render_row(frame, rows[0], &METRIC_HEADERS.map(str::to_string), header_style());
    match &app.state.report {
        Some(report) => render_row(frame, rows[1], &report.summary_row, Style::default()),
        None => render_row(frame, rows[1], &placeholder_row(), Style::default().fg(Color::DarkGray)),
    }
}

fn render_games(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("対局リスト（時刻順）");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(report) = &app.state.report else {
        let empty = Paragraph::new("未取得").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };
    if report.games.is_empty() {
        let empty = Paragraph::new("スコアなし").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let total = report.games.len();
    let max_start = total.saturating_sub(visible);
    let start = (app.state.games_scroll as usize).min(max_start);
    let end = (start + visible).min(total);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let game = &report.games[idx];
        let line = format!(
            "{}  {}　{}",
            format_time_hhmm(&game.time),
            format_game_rank(game.rank),
            format_game_score(game.score)
        );
        // The most recent game gets the highlight, matching the chart.
        let style = if idx + 1 == total {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(line).style(style), row_area);
    }
}

fn render_rank_counts(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("着順の回数");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = |label: &str| -> u32 {
        app.state
            .report
            .as_ref()
            .and_then(|r| r.rank_counts.get(label).copied())
            .unwrap_or(0)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let row1 = ["1着の回数", "2着の回数", "3着の回数", "4着の回数"].map(str::to_string);
    let row2 = [
        format!("{}回", count("1")),
        format!("{}回", count("2")),
        format!("{}回", count("3")),
        format!("{}回", count("4")),
    ];
    let row3 = ["1.5着の回数", "2.5着の回数", "3.5着の回数", ""].map(str::to_string);
    let row4 = [
        format!("{}回", count("1.5")),
        format!("{}回", count("2.5")),
        format!("{}回", count("3.5")),
        String::new(),
    ];

    render_row(frame, rows[0], &row1, header_style());
    render_row(frame, rows[1], &row2, Style::default());
    render_row(frame, rows[2], &row3, header_style());
    render_row(frame, rows[3], &row4, Style::default());
}

fn render_rank_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("着順分布");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(report) = &app.state.report else {
        return;
    };
    frame.render_widget(rank_bar_chart(report), inner);
}

fn rank_bar_chart(report: &DayReport) -> BarChart<'static> {
    let mut max = 1u64;
    let bars: Vec<Bar> = RANK_LABELS
        .iter()
        .map(|label| {
            let value = report.rank_counts.get(label).copied().unwrap_or(0) as u64;
            max = max.max(value);
            Bar::default()
                .value(value)
                .label(Line::from(format!("{label}着")))
        })
        .collect();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(6)
        .bar_gap(1)
        .max(max)
}
