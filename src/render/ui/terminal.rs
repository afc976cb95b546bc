//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui
//! for cross-platform terminal interface. It only draws what the view-model holds;
//! all decisions about content are made by the controller.

use crate::error::Result;
use crate::render::ui::state::{Focus, FormField, Modal, ProductListView, ViewModel};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Height of one bordered single-line input.
const INPUT_HEIGHT: u16 = 3;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Draw one full frame.
    pub fn draw_view(frame: &mut Frame, view: &ViewModel, theme: &ColorTheme) {
        let size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(chunks[0]);

        let form_height = INPUT_HEIGHT * FormField::ALL.len() as u16 + 2;
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(form_height),
                    Constraint::Length(INPUT_HEIGHT),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(columns[1]);

        Self::render_list(frame, columns[0], view, theme);
        Self::render_form(frame, right[0], view, theme);
        Self::render_search(frame, right[1], view, theme);
        Self::render_lookup(frame, right[2], view, theme);
        Self::render_status(frame, chunks[1], view, theme);

        if let Some(modal) = &view.modal {
            Self::render_modal(frame, size, modal, theme);
        }
    }

    fn render_list(frame: &mut Frame, area: Rect, view: &ViewModel, theme: &ColorTheme) {
        let block = Block::default()
            .title(" Produtos ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(view.focus == Focus::List));

        if let Some(placeholder) = &view.list.placeholder {
            let paragraph = Paragraph::new(placeholder.as_str())
                .style(Style::default().fg(theme.muted_text))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = view
            .list
            .products
            .iter()
            .map(|product| {
                let (name, description, price) = ProductListView::row_columns(product);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(name, theme.product_name),
                        Span::raw("  "),
                        Span::styled(price, theme.price),
                    ]),
                    Line::from(Span::styled(
                        description,
                        Style::default().fg(theme.muted_text),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selection)
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(view.list.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_form(frame: &mut Frame, area: Rect, view: &ViewModel, theme: &ColorTheme) {
        let focused_field = match view.focus {
            Focus::Form(field) => Some(field),
            _ => None,
        };
        let block = Block::default()
            .title(format!(" {} ", view.mode.title()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused_field.is_some()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(INPUT_HEIGHT); 3].as_ref())
            .split(inner);

        let form = view.active_form();
        for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
            let focused = focused_field == Some(*field);
            Self::render_input(
                frame,
                *row,
                field.label(),
                form.field(*field),
                focused,
                theme,
            );
        }
    }

    fn render_search(frame: &mut Frame, area: Rect, view: &ViewModel, theme: &ColorTheme) {
        Self::render_input(
            frame,
            area,
            "Buscar por ID",
            &view.search_input,
            view.focus == Focus::Search,
            theme,
        );
    }

    fn render_input(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        focused: bool,
        theme: &ColorTheme,
    ) {
        let paragraph = Paragraph::new(value).block(
            Block::default()
                .title(format!(" {label} "))
                .borders(Borders::ALL)
                .border_style(theme.border_style(focused)),
        );
        frame.render_widget(paragraph, area);

        if focused && area.width > 2 && area.height > 2 {
            // +1 for the border; keep the cursor inside the box
            let offset = (value.chars().count() as u16).min(area.width - 3);
            frame.set_cursor(area.x + 1 + offset, area.y + 1);
        }
    }

    fn render_lookup(frame: &mut Frame, area: Rect, view: &ViewModel, theme: &ColorTheme) {
        let lines: Vec<Line> = view
            .lookup
            .lines()
            .into_iter()
            .map(|(tone, text)| Line::from(Span::styled(text, theme.tone_style(tone))))
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", view.lookup.title()))
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(false)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view: &ViewModel, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }

    fn render_modal(frame: &mut Frame, area: Rect, modal: &Modal, theme: &ColorTheme) {
        let popup = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup);

        let title = match modal {
            Modal::Alert(_) => " Aviso ",
            Modal::ConfirmDelete { .. } => " Confirmação ",
        };
        let text = vec![
            Line::from(modal.message()),
            Line::from(""),
            Line::from(Span::styled(
                modal.hint(),
                Style::default().fg(theme.muted_text),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(true)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }
}

/// Rectangle of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view: &ViewModel) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;
            terminal.draw(move |frame| Self::draw_view(frame, view, theme))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                DisableBracketedPaste
            )?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
