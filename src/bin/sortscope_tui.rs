//! sortscope - Terminal User Interface
//!
//! Animated bar chart of a sorting trace using ratatui.
//! App logic lives in `sortscope::tui::app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use sortscope::config::VizConfig;
    use sortscope::tui::app::SortApp;

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match VizConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: sortscope-tui [path/to/config.yaml]");
                std::process::exit(1);
            }
        },
        None => VizConfig::default(),
    };

    init_logging()?;
    tui::run(SortApp::new(config))
}

/// Log to the file named by `SORTSCOPE_LOG`; the terminal itself is taken.
#[cfg(feature = "tui")]
fn init_logging() -> std::io::Result<()> {
    use std::sync::Mutex;
    use tracing_subscriber::EnvFilter;

    if let Ok(path) = std::env::var("SORTSCOPE_LOG") {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sortscope-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use sortscope::engine::PlayTime;
    use sortscope::playback::ColorTag;
    use sortscope::tui::app::SortApp;
    use std::io;
    use std::time::{Duration, Instant};

    pub fn run(mut app: SortApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut SortApp,
    ) -> io::Result<()> {
        // One frame at ~60 Hz; playback timing comes from the epoch, not frames
        let frame = Duration::from_millis(16);
        let epoch = Instant::now();

        loop {
            app.tick(PlayTime::from(epoch.elapsed()));
            terminal.draw(|f| ui(f, app))?;

            if event::poll(frame)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        // Bring the player up to date so a new session starts now
                        app.tick(PlayTime::from(epoch.elapsed()));
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &SortApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_bars(f, chunks[1], app);
        render_controls(f, chunks[2], app);
        render_status_bar(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &SortApp) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Sorting Visualizer ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("- "),
            Span::styled(
                app.config.algorithm.display_name(),
                Style::default().fg(Color::Yellow),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("sortscope"));
        f.render_widget(title, area);
    }

    const fn bar_color(tag: ColorTag) -> Color {
        match tag {
            ColorTag::Idle => Color::Cyan,
            ColorTag::Compare | ColorTag::Shift => Color::Red,
            ColorTag::Swapped => Color::Green,
            ColorTag::Key => Color::Blue,
        }
    }

    fn render_bars(f: &mut Frame, area: Rect, app: &SortApp) {
        let block = Block::default().borders(Borders::ALL).title("Bars");
        let inner_width = block.inner(area).width as usize;
        let n = app.chart.len().max(1);

        // Widest bars that fit, with a one-column gap while there is room
        let (bar_width, bar_gap) = if inner_width >= n * 2 {
            ((inner_width - n) / n, 1)
        } else {
            (1, 0)
        };

        let bars: Vec<Bar> = app
            .chart
            .bars()
            .iter()
            .map(|bar| {
                Bar::default()
                    .value(u64::from(bar.height))
                    .text_value(String::new())
                    .style(Style::default().fg(bar_color(bar.color)))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(u16::try_from(bar_width.max(1)).unwrap_or(u16::MAX))
            .bar_gap(bar_gap)
            .max(u64::from(app.chart.max_height().max(1)));
        f.render_widget(chart, area);
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &SortApp) {
        let dim = |locked: bool| {
            if locked {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            }
        };
        let running = app.is_running();

        let controls = Paragraph::new(Line::from(vec![
            Span::styled("[Space] Sort  ", dim(running)),
            Span::styled("[r] Randomize  ", dim(running)),
            Span::styled("[a/1-3] Algorithm  ", dim(running)),
            Span::styled("[[ ]] Size  ", dim(running)),
            Span::styled("[+/-] Speed  ", dim(false)),
            Span::styled("[s] Stop  ", dim(!running)),
            Span::styled("[q] Quit", dim(false)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &SortApp) {
        let color = if app.is_running() {
            Color::Yellow
        } else {
            Color::Green
        };
        let status = Paragraph::new(Span::styled(app.status_line(), Style::default().fg(color)))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }
}
