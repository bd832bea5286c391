use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use snipdeck_core::{Catalog, CatalogEntry, Result, Snippet, EMPTY_CATALOG_MESSAGE};
use std::io::{self, stdout};

/// How the picker was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(Snippet),
    EditRequested,
    Cancelled,
}

/// Search text and cursor of the picker, independent of the terminal.
#[derive(Debug, Default)]
pub struct PickerState {
    query: String,
    selected: usize,
}

impl PickerState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Apply one key press. Returns an outcome once the picker should close.
    pub fn handle_key(&mut self, key: KeyEvent, catalog: &Catalog) -> Option<PickOutcome> {
        let matches = catalog.filter(&self.query);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Some(PickOutcome::Cancelled),
            KeyCode::Char('c') if ctrl => return Some(PickOutcome::Cancelled),
            KeyCode::Char('e') if ctrl => return Some(PickOutcome::EditRequested),
            KeyCode::Enter => {
                return matches
                    .get(self.selected)
                    .map(|entry| PickOutcome::Selected(entry.snippet.clone()));
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down | KeyCode::Tab => self.move_down(matches.len()),
            KeyCode::Char('n') if ctrl => self.move_down(matches.len()),
            KeyCode::Backspace => {
                self.query.pop();
                self.selected = 0;
            }
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                self.selected = 0;
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.selected = 0;
            }
            _ => {}
        }
        None
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }
}

/// Show the picker over `catalog` until a snippet is chosen or it is closed.
pub fn run_picker(catalog: &Catalog, query: &str) -> Result<PickOutcome> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut state = PickerState::new(query);
    let result = run_ui(&mut terminal, catalog, &mut state);

    // Clean up terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}

fn run_ui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: &Catalog,
    state: &mut PickerState,
) -> Result<PickOutcome> {
    loop {
        let matches = catalog.filter(state.query());
        let (items, highlighted) = list_items(&matches, state.selected());
        let mut list_state = ListState::default();
        list_state.select(highlighted);

        terminal.draw(|f| {
            let size = f.size();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Search box
                    Constraint::Min(5),    // Results and preview
                    Constraint::Length(2), // Footer
                ])
                .split(size);

            let search = Paragraph::new(state.query()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Search snippets "),
            );
            f.render_widget(search, chunks[0]);
            f.set_cursor(
                chunks[0].x + 1 + state.query().chars().count() as u16,
                chunks[0].y + 1,
            );

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1]);

            let list = if items.is_empty() {
                List::new(vec![ListItem::new(Span::styled(
                    "No results found.",
                    Style::default().fg(Color::DarkGray),
                ))])
            } else {
                List::new(items)
            }
            .block(Block::default().borders(Borders::ALL).title(" snipdeck "))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
            f.render_stateful_widget(list, body[0], &mut list_state);

            let preview_text = matches
                .get(state.selected())
                .map(|entry| entry.snippet.body.as_str())
                .unwrap_or_default();
            let preview = Paragraph::new(preview_text)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(" Preview "));
            f.render_widget(preview, body[1]);

            f.render_widget(footer(catalog), chunks[2]);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(outcome) = state.handle_key(key, catalog) {
                return Ok(outcome);
            }
        }
    }
}

/// Build list rows with a header line before each section. Returns the rows
/// and the row index of the `selected`-th match.
fn list_items<'a>(
    matches: &[CatalogEntry<'a>],
    selected: usize,
) -> (Vec<ListItem<'a>>, Option<usize>) {
    let mut items = Vec::new();
    let mut highlighted = None;
    let mut section: Option<(&str, bool)> = None;

    for (i, entry) in matches.iter().enumerate() {
        let snippet: &'a Snippet = entry.snippet;
        if section != Some((entry.section, entry.recent)) {
            section = Some((entry.section, entry.recent));
            items.push(ListItem::new(Line::from(Span::styled(
                entry.section,
                Style::default()
                    .fg(if entry.recent { Color::Magenta } else { Color::Cyan })
                    .add_modifier(Modifier::BOLD),
            ))));
        }

        if i == selected {
            highlighted = Some(items.len());
        }

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(snippet.name.as_str(), Style::default().fg(Color::White)),
        ];
        if !snippet.description.is_empty() {
            spans.push(Span::styled(
                format!("  {}", snippet.description),
                Style::default().fg(Color::DarkGray),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    (items, highlighted)
}

fn footer(catalog: &Catalog) -> Paragraph<'static> {
    let mut spans = Vec::new();
    if catalog.is_empty() {
        spans.push(Span::styled(
            format!("{}  ", EMPTY_CATALOG_MESSAGE),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.extend([
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(": Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Copy  "),
        Span::styled("Ctrl-E", Style::default().fg(Color::Yellow)),
        Span::raw(": Edit  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Exit"),
    ]);

    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP))
}
