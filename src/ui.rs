use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
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
use shop_schedule::{DayColumn, MatrixCell, ScheduleMatrix};
use std::io;

/// Days shown at once; left/right scrolls through the month
const VISIBLE_DAYS: usize = 10;

pub struct App {
    pub matrix: ScheduleMatrix,
    pub state: TableState,
    pub first_day: usize,
}

impl App {
    pub fn new(matrix: ScheduleMatrix) -> Self {
        let mut state = TableState::default();
        if !matrix.rows.is_empty() {
            state.select(Some(0));
        }

        Self {
            matrix,
            state,
            first_day: 0,
        }
    }

    pub fn next(&mut self) {
        let len = self.matrix.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.matrix.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn scroll_right(&mut self) {
        let max_first = self.matrix.day_count().saturating_sub(VISIBLE_DAYS);
        self.first_day = (self.first_day + VISIBLE_DAYS).min(max_first);
    }

    pub fn scroll_left(&mut self) {
        self.first_day = self.first_day.saturating_sub(VISIBLE_DAYS);
    }

    /// Day columns currently on screen
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.first_day + VISIBLE_DAYS).min(self.matrix.day_count());
        self.first_day..end
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

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
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Right | KeyCode::Char('l') => app.scroll_right(),
                KeyCode::Left | KeyCode::Char('h') => app.scroll_left(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.matrix.rows.is_empty() {
                        app.state.select(Some(app.matrix.rows.len() - 1));
                    }
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
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Matrix
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_matrix(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            app.matrix.title.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{} shops", app.matrix.rows.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{}/{}", app.matrix.year, app.matrix.month),
            Style::default().fg(Color::Cyan),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn day_header_style(column: &DayColumn) -> Style {
    if column.is_highlighted {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else if column.is_weekend {
        Style::default().fg(Color::Black).bg(Color::Gray)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

fn day_cell_style(cell: &MatrixCell) -> Style {
    if cell.filled {
        Style::default().fg(Color::Black).bg(Color::LightYellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_matrix(f: &mut Frame, area: Rect, app: &mut App) {
    let range = app.visible_range();
    let days = &app.matrix.columns[range.clone()];

    let mut header_cells: Vec<Cell> = ["No.", "場所", "名称", "営業時間"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
        .collect();
    header_cells.extend(
        days.iter()
            .map(|c| Cell::from(format!("{}{}", c.day, c.weekday_label)).style(day_header_style(c))),
    );
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.matrix.rows.iter().map(|row| {
        let mut cells = vec![
            Cell::from(row.no.to_string()),
            Cell::from(truncate(&row.place, 10)),
            Cell::from(truncate(&row.name, 18)),
            Cell::from(truncate(&row.base_hours_summary, 14)),
        ];
        cells.extend(
            row.cells[range.clone()]
                .iter()
                .map(|c| Cell::from(c.text.clone()).style(day_cell_style(c))),
        );
        Row::new(cells).height(1)
    });

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Length(14),
    ];
    widths.extend(days.iter().map(|_| Constraint::Length(11)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Schedule "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let range = app.visible_range();

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.matrix.rows.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Days {}-{}", range.start + 1, range.end),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Days | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

/// Truncate by characters so Japanese names never split a code point
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_schedule::{project, DailyEntry, MatrixConfig};
    use std::collections::BTreeSet;

    fn app_with_shops(count: usize) -> App {
        let entries: Vec<DailyEntry> = (0..count)
            .map(|i| DailyEntry {
                day: 1,
                shop_name: format!("Shop{}", i),
                place: "1F".to_string(),
                open: true,
                start_time: None,
                end_time: None,
                base_hours: None,
            })
            .collect();
        let config = MatrixConfig {
            target_year: 2025,
            target_month: 10,
            highlighted_days: BTreeSet::new(),
        };
        App::new(project(&entries, &config).unwrap())
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = app_with_shops(3);
        assert_eq!(app.state.selected(), Some(0));
        app.previous();
        assert_eq!(app.state.selected(), Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_day_scrolling_clamps() {
        let mut app = app_with_shops(1);
        assert_eq!(app.visible_range(), 0..10);
        app.scroll_right();
        app.scroll_right();
        app.scroll_right();
        assert_eq!(app.visible_range(), 21..31);
        app.scroll_left();
        assert_eq!(app.visible_range(), 11..21);
    }

    #[test]
    fn test_empty_matrix_navigation() {
        let mut app = app_with_shops(0);
        app.next();
        assert_eq!(app.state.selected(), None);
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("カフェドクリエ本山寮店", 6), "カフェ...");
        assert_eq!(truncate("Cafe", 10), "Cafe");
    }
}
