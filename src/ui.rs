//! Terminal UI rendering with ratatui

use crate::settings::Settings;
use glizztris::{Game, GameState, Orientation, Texture, Theme, ThemeSelector, BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + stats(24) = 46
const GAME_WIDTH: u16 = 46;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// What one board cell shows this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellView {
    texture: Texture,
    orientation: Orientation,
    theme: Theme,
    /// Part of a row waiting to be cleared
    flashing: bool,
}

type BoardView = [[Option<CellView>; BOARD_WIDTH]; BOARD_HEIGHT];

/// Settled blocks plus the active piece, with clearing rows drawn as plain buns
fn board_view(game: &Game) -> BoardView {
    let board = game.board();
    let mut view: BoardView = [[None; BOARD_WIDTH]; BOARD_HEIGHT];

    for (y, row) in view.iter_mut().enumerate() {
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = board.get(x as i32, y as i32).map(|cell| CellView {
                texture: cell.texture,
                orientation: cell.orientation,
                theme: cell.theme,
                flashing: false,
            });
        }
    }

    for &y in game.animating_rows() {
        for slot in view[y].iter_mut().flatten() {
            slot.texture = Texture::Block;
            slot.orientation = Orientation::Deg0;
            slot.flashing = true;
        }
    }

    if let Some(piece) = game.active_piece() {
        for (col, row, segment) in piece.shape.occupied() {
            let x = piece.x + col as i32;
            let y = piece.y + row as i32;
            if y < 0 || x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                continue;
            }
            view[y as usize][x as usize] = Some(CellView {
                texture: segment.texture,
                orientation: segment.orientation,
                theme: piece.theme,
                flashing: false,
            });
        }
    }

    view
}

/// Two-column glyph for a hot dog segment
fn glyph(texture: Texture, orientation: Orientation) -> &'static str {
    let variants: [&'static str; 4] = match texture {
        Texture::Block => ["══", "║║", "══", "║║"],
        Texture::ElbowLeft => ["╔═", "═╗", "═╝", "╚═"],
        Texture::ElbowRight => ["═╗", "═╝", "╚═", "╔═"],
        Texture::TCenter => ["╦╦", "╣╣", "╩╩", "╠╠"],
        Texture::TopLeft => ["╭─", "─╮", "─╯", "╰─"],
        Texture::TopRight => ["─╮", "─╯", "╰─", "╭─"],
        Texture::BottomRight => ["─╯", "╰─", "╭─", "─╮"],
        Texture::BottomLeft => ["╰─", "╭─", "─╮", "─╯"],
    };
    variants[orientation.degrees() as usize / 90]
}

fn theme_color(theme: Theme) -> Color {
    match theme {
        Theme::Mustard => Color::Yellow,
        Theme::Ketchup => Color::Red,
        Theme::Relish => Color::Green,
    }
}

/// Render the playing screen
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(24), // Stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game);
    render_stats(frame, main_layout[1], game, settings);

    // Overlays
    match game.state() {
        GameState::NotStarted => render_overlay(frame, area, "GLIZZTRIS", "Press Enter to start"),
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Enter to play again"),
        GameState::Running => {}
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" GLIZZTRIS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = board_view(game)
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Some(view) => {
                        let style = Style::default().fg(theme_color(view.theme));
                        let style = if view.flashing { style.reversed() } else { style };
                        Span::styled(glyph(view.texture, view.orientation), style)
                    }
                    None => Span::raw(EMPTY),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            format!("{}", score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        label("LEVEL"),
        Line::from(Span::styled(format!("{}", score.level), Style::default().fg(Color::Cyan))),
        label("LINES"),
        Line::from(Span::styled(format!("{}", score.lines), Style::default().fg(Color::Green))),
    ];

    if let Some(best) = settings.best_score() {
        lines.push(label("BEST"));
        lines.push(Line::raw(format!("{}", best)));
    }

    lines.push(Line::raw(""));
    let mode = match game.theme_selector() {
        ThemeSelector::Random => "Random".to_string(),
        ThemeSelector::Fixed(theme) => theme.name().to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled("THEME ", Style::default().fg(Color::Gray)),
        Span::styled(mode, Style::default().fg(Color::Magenta)),
    ]));

    // used / completed blocks per condiment
    let stats = game.stats();
    for theme in Theme::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", theme.name()), Style::default().fg(theme_color(theme))),
            Span::raw(format!("{:>5}/{:<5}", stats.used(theme), stats.completed(theme))),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for start/pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
