//! windvane-docs - terminal viewer for the windvane methodology page.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use windvane_core::assets::AssetDir;
use windvane_core::text::CodeHighlighter;
use windvane_core::theme::Theme;
use windvane_docs::DocumentView;
use windvane_docs::page;
use windvane_syntax::SyntectHighlighter;

#[derive(Parser)]
#[command(name = "windvane-docs")]
#[command(version, about = "Methodology page of the windvane dashboard", long_about = None)]
struct Cli {
    /// Directory holding the page's image assets
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Print the rendered page to stdout instead of opening the viewer
    #[arg(long)]
    plain: bool,

    /// Render width for --plain output
    #[arg(long, default_value_t = 100)]
    width: u16,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let assets = AssetDir::new(&cli.assets);

    let result = if cli.plain {
        dump(&assets, cli.width)
    } else {
        run_viewer(&assets)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dump(assets: &AssetDir, width: u16) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::default();
    let highlighter = SyntectHighlighter::new();
    let rendered = page::methodology().render(width, &theme, Some(&highlighter), assets)?;
    for line in rendered.plain_lines() {
        println!("{line}");
    }
    Ok(())
}

fn run_viewer(assets: &AssetDir) -> Result<(), Box<dyn std::error::Error>> {
    let document = page::methodology();
    // Fail before touching the terminal so the error is readable.
    document.verify_assets(assets)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, DocumentView::new(document), assets);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut view: DocumentView,
    assets: &AssetDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::default();
    let highlighter = SyntectHighlighter::new();

    loop {
        let area = terminal.size()?;
        view.ensure_rendered(
            area.width,
            &theme,
            Some(&highlighter as &dyn CodeHighlighter),
            assets,
        )?;

        terminal.draw(|f| {
            let [page_area, footer_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());
            view.render_ref(page_area, f.buffer_mut(), &theme);

            let mut footer = vec![Span::styled(
                " j/k scroll · PgUp/PgDn page · g/G top/bottom · q quit",
                theme.text_muted,
            )];
            if let Some(pct) = view.state.percent() {
                footer.push(Span::styled(format!("  {pct}%"), theme.text_muted));
            }
            f.render_widget(Paragraph::new(Line::from(footer)), footer_area);
        })?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => view.scroll_by(1),
                KeyCode::Char('k') | KeyCode::Up => view.scroll_by(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => view.page_down(),
                KeyCode::PageUp => view.page_up(),
                KeyCode::Char('g') | KeyCode::Home => view.to_top(),
                KeyCode::Char('G') | KeyCode::End => view.to_bottom(),
                _ => {}
            }
        }
    }
}
