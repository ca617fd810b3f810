use ank_numerology::{
    angel_number, calculate, insert_user, interpretation, phase_analysis,
    validation::describe, Calculation, PhaseAnalysis, SaveUserRequest, UserForm, UserRecord,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use rusqlite::Connection;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    MiddleName,
    LastName,
    Dob,
    Gender,
    Mobile,
}

impl Field {
    const ALL: [Field; 6] = [
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::Dob,
        Field::Gender,
        Field::Mobile,
    ];

    pub fn next(&self) -> Self {
        let i = self.index();
        Field::ALL[(i + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let i = self.index();
        Field::ALL[(i + Field::ALL.len() - 1) % Field::ALL.len()]
    }

    pub fn label(&self) -> &str {
        match self {
            Field::FirstName => "First Name",
            Field::MiddleName => "Middle Name",
            Field::LastName => "Last Name",
            Field::Dob => "Date of Birth (YYYY-MM-DD)",
            Field::Gender => "Gender",
            Field::Mobile => "Mobile Number",
        }
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Info(String),
    Error(String),
}

pub struct App {
    pub values: [String; 6],
    pub focus: Field,
    pub calculation: Option<Calculation>,
    pub angel: Option<u32>,
    pub phases: Option<PhaseAnalysis>,
    /// Form as it was when the shown numbers were computed
    computed_form: Option<UserForm>,
    pub status: Status,
}

impl App {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            focus: Field::FirstName,
            calculation: None,
            angel: None,
            phases: None,
            computed_form: None,
            status: Status::Idle,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn input_char(&mut self, c: char) {
        self.values[self.focus.index()].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus.index()].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn form(&self) -> UserForm {
        UserForm {
            first_name: self.value(Field::FirstName).trim().to_string(),
            middle_name: self.value(Field::MiddleName).trim().to_string(),
            last_name: self.value(Field::LastName).trim().to_string(),
            dob: self.value(Field::Dob).trim().to_string(),
            gender: self.value(Field::Gender).trim().to_string(),
            mob: self.value(Field::Mobile).trim().to_string(),
        }
    }

    /// Validate and calculate. Previous results stay on screen when this fails.
    pub fn compute(&mut self) -> bool {
        let form = self.form();

        if let Err(errors) = form.validate() {
            self.status = Status::Error(describe(&errors));
            return false;
        }

        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.status = Status::Error(e.to_string());
                return false;
            }
        };

        let calc = calculate(&input);
        self.angel = Some(angel_number(input.dob.year, form.gender()));
        self.phases = Some(phase_analysis(calc.result.moolank, calc.result.bhagyank));
        self.calculation = Some(calc);
        self.computed_form = Some(form);
        self.status = Status::Info("Calculated".to_string());
        true
    }

    /// Store the last calculation. Failure only changes the status line.
    pub fn save(&mut self, conn: &Connection) {
        let (form, calc) = match (&self.computed_form, &self.calculation) {
            (Some(form), Some(calc)) => (form, calc),
            _ => {
                self.status = Status::Error("Nothing to save - press Enter to calculate first".to_string());
                return;
            }
        };

        let record = UserRecord::new(SaveUserRequest::from_calculation(form, &calc.result));
        self.status = match insert_user(conn, &record, "tui") {
            Ok(()) => Status::Info(ank_numerology::SAVE_SUCCESS_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!(error = ?e, "tui save failed");
                Status::Error(ank_numerology::SAVE_FAILURE_MESSAGE.to_string())
            }
        };
    }

    pub fn clear(&mut self) {
        *self = App::new();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &mut App, conn: &Connection) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, conn);

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
    conn: &Connection,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if ctrl => return Ok(()),
                KeyCode::Char('s') if ctrl => app.save(conn),
                KeyCode::Char('l') if ctrl => app.clear(),
                KeyCode::Enter => {
                    app.compute();
                }
                KeyCode::Tab | KeyCode::Down => app.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_field(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.input_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + results
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_form(f, content[0], app);
    render_results(f, content[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🔢 Ank Numerology",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Chaldean name number · Moolank · Bhagyank · Lo Shu grid"),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    for field in Field::ALL {
        let focused = field == app.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        lines.push(Line::from(Span::styled(field.label().to_string(), label_style)));

        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(if focused { "→ " } else { "  " }),
            Span::styled(app.value(field).to_string(), Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Details "),
    );

    f.render_widget(form, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(11)])
        .split(area);

    let calc = match &app.calculation {
        Some(calc) => calc,
        None => {
            let empty = Paragraph::new("Fill in the form and press Enter")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Results "));
            f.render_widget(empty, area);
            return;
        }
    };

    let r = &calc.result;
    let label = Style::default().fg(Color::Cyan);
    let number = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name Number:     ", label),
            Span::styled(r.name_number.to_string(), number),
            Span::raw(format!("  (total {})  {}", calc.name_total, interpretation(r.name_number))),
        ]),
        Line::from(vec![
            Span::styled("Luck Number:     ", label),
            Span::styled(r.dob_number.to_string(), number),
        ]),
        Line::from(vec![
            Span::styled("Moolank:         ", label),
            Span::styled(r.moolank.to_string(), number),
            Span::raw(format!("  {}", interpretation(r.moolank))),
        ]),
        Line::from(vec![
            Span::styled("Bhagyank:        ", label),
            Span::styled(r.bhagyank.to_string(), number),
            Span::raw(format!("  {}", interpretation(r.bhagyank))),
        ]),
        Line::from(vec![
            Span::styled("Destiny Number:  ", label),
            Span::styled(r.destiny.to_string(), number),
        ]),
    ];

    if let Some(angel) = app.angel {
        lines.push(Line::from(vec![
            Span::styled("Angel Number:    ", label),
            Span::styled(angel.to_string(), number),
        ]));
    }

    if let Some(phases) = &app.phases {
        lines.push(Line::from(""));
        for (span, dc) in [("Age 0-40:  ", &phases.early), ("Age 40-80: ", &phases.late)] {
            lines.push(Line::from(vec![
                Span::styled(span, label),
                Span::styled(dc.stars.unwrap_or("(?)").to_string(), Style::default().fg(Color::Yellow)),
                Span::raw(format!("  {}", dc.keywords.join(", "))),
            ]));
        }
    }

    let missing: Vec<String> = calc.grid.missing().iter().map(|d| d.to_string()).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Missing:         ", label),
        Span::raw(if missing.is_empty() { "none".to_string() } else { missing.join(", ") }),
    ]));

    let numbers = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Results "),
    );
    f.render_widget(numbers, chunks[0]);

    let rows = calc.grid.rows().map(|row| {
        Row::new(row.map(|c| Cell::from(c.to_string()).style(Style::default().fg(Color::Green))))
            .height(3)
    });

    let grid = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Length(10), Constraint::Length(10)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Lo Shu Grid "),
    );
    f.render_widget(grid, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = match &app.status {
        Status::Idle => vec![],
        Status::Info(msg) => vec![Span::styled(format!(" {} ", msg), Style::default().fg(Color::Green))],
        Status::Error(msg) => vec![Span::styled(format!(" {} ", msg), Style::default().fg(Color::Red))],
    };

    if !status_spans.is_empty() {
        status_spans.push(Span::raw(" | "));
    }
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Calculate | "));
    status_spans.push(Span::styled("Tab/↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Field | "));
    status_spans.push(Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Save | "));
    status_spans.push(Span::styled("Ctrl+L", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear | "));
    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
