use anyhow::Result;
use bank_clients::{format_currency, unavailable_note, DetailState, DetailView, ListView, LoadStatus, SheetSource};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
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
pub enum InputMode {
    Browse,
    Search,
}

pub struct App {
    pub list: ListView,
    /// Row selection inside the visible page
    pub state: TableState,
    pub mode: InputMode,
    pub detail: Option<DetailView>,
    pub show_detail: bool,
}

impl App {
    pub fn new(list: ListView) -> Self {
        let mut app = Self {
            list,
            state: TableState::default(),
            mode: InputMode::Browse,
            detail: None,
            show_detail: false,
        };
        app.reset_selection();
        app
    }

    fn reset_selection(&mut self) {
        if self.list.visible().is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_customer_id(&self) -> Option<String> {
        let visible = self.list.visible();
        self.state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|c| c.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.list.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.list.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn next_page(&mut self) {
        self.list.next_page();
        self.reset_selection();
    }

    pub fn previous_page(&mut self) {
        self.list.previous_page();
        self.reset_selection();
    }

    pub fn first_page(&mut self) {
        self.list.first_page();
        self.reset_selection();
    }

    pub fn last_page(&mut self) {
        self.list.last_page();
        self.reset_selection();
    }

    pub fn start_search(&mut self) {
        self.mode = InputMode::Search;
    }

    pub fn commit_search(&mut self) {
        self.list.commit_search();
        self.mode = InputMode::Browse;
        self.reset_selection();
    }

    /// Leave search mode without changing the active filter
    pub fn cancel_search(&mut self) {
        let term = self.list.search_term().to_string();
        self.list.set_search_input(&term);
        self.mode = InputMode::Browse;
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
        self.detail = None;
    }

    pub async fn open_detail<S: SheetSource + ?Sized>(&mut self, source: &S) {
        let Some(id) = self.selected_customer_id() else {
            return;
        };

        let mut view = DetailView::new(&id);
        view.load(source).await;
        self.detail = Some(view);
        self.show_detail = true;
    }

    pub async fn reload<S: SheetSource + ?Sized>(&mut self, source: &S) {
        self.close_detail();
        self.list.load(source).await;
        self.reset_selection();
    }
}

pub async fn run_ui<S: SheetSource + ?Sized>(app: &mut App, source: &S) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, source).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend, S: SheetSource + ?Sized>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: &S,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.mode {
            InputMode::Search => match key.code {
                KeyCode::Enter => app.commit_search(),
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Backspace => app.list.pop_search_char(),
                KeyCode::Char(c) => app.list.push_search_char(c),
                _ => {}
            },
            InputMode::Browse => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Esc if app.show_detail => app.close_detail(),
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Enter => {
                    if app.show_detail {
                        app.close_detail();
                    } else {
                        app.open_detail(source).await;
                    }
                }
                KeyCode::Char('r') => app.reload(source).await,
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => app.next_page(),
                KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => app.previous_page(),
                KeyCode::Home => app.first_page(),
                KeyCode::End => app.last_page(),
                _ => {}
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_search_box(f, chunks[1], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Customer list
                Constraint::Percentage(45), // Detail panel
            ])
            .split(chunks[2]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[2], app);
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Lista de Clientes",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::raw("  |  "));
    match app.list.status() {
        LoadStatus::Loading => {
            spans.push(Span::styled("Carregando...", Style::default().fg(Color::DarkGray)));
        }
        LoadStatus::Failed(message) => {
            spans.push(Span::styled(
                format!("Erro: {}", message),
                Style::default().fg(Color::Red),
            ));
        }
        LoadStatus::Ready => {
            spans.push(Span::styled(
                format!("Página {} de {}", app.list.page(), app.list.total_pages()),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                format!("{} clientes", app.list.filtered().len()),
                Style::default().fg(Color::Green),
            ));
        }
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_search_box(f: &mut Frame, area: Rect, app: &App) {
    let (border, text) = match app.mode {
        InputMode::Search => (Color::Yellow, format!("{}_", app.list.search_input())),
        InputMode::Browse if app.list.search_input().is_empty() => (
            Color::DarkGray,
            "Buscar por nome ou CPF/CNPJ (/)".to_string(),
        ),
        InputMode::Browse => (Color::White, app.list.search_input().to_string()),
    };

    let search = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Busca "),
    );

    f.render_widget(search, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Nome", "CPF/CNPJ", "Email", "Agência"]
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

    let rows: Vec<Row> = app
        .list
        .visible()
        .into_iter()
        .map(|customer| {
            let branch = customer
                .branch_code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(truncate(&customer.name, 30)),
                Cell::from(customer.tax_id.clone()),
                Cell::from(truncate(&customer.email, 28)),
                Cell::from(branch),
            ])
            .height(1)
        })
        .collect();

    let title = if rows.is_empty() && app.list.status() == &LoadStatus::Ready {
        " Nenhum cliente encontrado "
    } else {
        " Clientes "
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(20),
            Constraint::Length(30),
            Constraint::Length(8),
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

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = match app.mode {
        InputMode::Search => vec![
            key(" Enter"),
            Span::raw(" Buscar | "),
            key("Esc"),
            Span::raw(" Cancelar"),
        ],
        InputMode::Browse => vec![
            key(" Enter"),
            Span::raw(" Detalhes | "),
            key("/"),
            Span::raw(" Buscar | "),
            key("←/→"),
            Span::raw(" Página | "),
            key("Home/End"),
            Span::raw(" Primeira/Última | "),
            key("r"),
            Span::raw(" Recarregar | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Sair"),
        ],
    };

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn section(title: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )])
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Detalhes do Cliente ");

    let state = app.detail.as_ref().map(|view| view.state());

    let detail = match state {
        Some(DetailState::Found(detail)) => detail,
        Some(DetailState::Failed(message)) => {
            let error = Paragraph::new(format!("Erro ao carregar cliente: {}", message))
                .style(Style::default().fg(Color::Red))
                .block(block);
            f.render_widget(error, area);
            return;
        }
        Some(DetailState::NotFound) => {
            f.render_widget(Paragraph::new("Cliente não encontrado.").block(block), area);
            return;
        }
        Some(DetailState::Loading) | None => {
            f.render_widget(Paragraph::new("Carregando cliente...").block(block), area);
            return;
        }
    };

    let c = &detail.customer;
    let mut content = vec![
        Line::from(""),
        section("CLIENTE"),
        field("Nome", c.name.clone()),
        field("Nome Social", c.social_name.clone().unwrap_or_else(|| "-".to_string())),
        field("CPF/CNPJ", c.tax_id.clone()),
        field("RG", c.national_id.clone().unwrap_or_else(|| "-".to_string())),
        field(
            "Nascimento",
            c.birth_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        field("Email", c.email.clone()),
        field("Endereço", c.address.clone()),
        field("Estado Civil", c.marital_status.to_string()),
        field("Renda Anual", format_currency(c.annual_income)),
        field("Patrimônio", format_currency(c.net_worth)),
        field(
            "Código Agência",
            c.branch_code.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()),
        ),
        Line::from(""),
        section("CONTAS"),
    ];

    if detail.accounts.is_empty() {
        let note = unavailable_note("Nenhuma conta encontrada.", detail.accounts_error.as_deref());
        content.push(note_line(note, detail.accounts_error.is_some()));
    }
    for account in &detail.accounts {
        content.push(Line::from(vec![Span::styled(
            format!("  • {} ({})", account.account_type, account.id),
            Style::default().fg(Color::Green),
        )]));
        content.push(field("  Saldo", format_currency(account.balance)));
        content.push(field("  Limite de Crédito", format_currency(account.credit_limit)));
        content.push(field("  Crédito Disponível", format_currency(account.available_credit)));
    }

    content.push(Line::from(""));
    content.push(section("AGÊNCIA"));
    match &detail.branch {
        Some(branch) => {
            content.push(field("Nome", branch.name.clone()));
            content.push(field(
                "Código",
                branch.code.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()),
            ));
            content.push(field("Endereço", branch.address.clone()));
        }
        None => {
            let note = unavailable_note("Agência não encontrada.", detail.branch_error.as_deref());
            content.push(note_line(note, detail.branch_error.is_some()));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )]));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn note_line(note: String, failed: bool) -> Line<'static> {
    let style = if failed {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    Line::from(vec![Span::styled(format!("  {}", note), style)])
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
