//! Terminal rendering of the game scene.
//!
//! The scene is laid out in points with y growing upward; the play area is
//! a grid of terminal cells with row 0 at the top. `SceneGrid` does the
//! projection so it can be tested without a terminal.

use crate::records::Records;
use crate::scene::banner::GameOverBanner;
use crate::scene::bird::BirdTexture;
use crate::scene::geometry::Rect as SceneRect;
use crate::scene::pipes::PipeKind;
use crate::scene::{GameScene, GameStatus};
use crate::ui::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Meters label sits this far below the top of the scene.
const METERS_LABEL_OFFSET: f64 = 100.0;
/// Width of one floor stripe in points.
const FLOOR_STRIPE: f64 = 12.0;

const CONTROLS: [(&str, &str); 2] = [("[Space/Up/Enter]", "Flap"), ("[Q/Esc]", "Quit")];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub symbol: char,
    pub style: Style,
}

impl Cell {
    fn sky() -> Self {
        Self {
            symbol: ' ',
            style: Style::default(),
        }
    }
}

/// Scene projected onto a `width × height` block of terminal cells.
pub struct SceneGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    scene_width: f64,
    scene_height: f64,
}

impl SceneGrid {
    pub fn new(width: u16, height: u16, scene_width: f64, scene_height: f64) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::sky(); width * height],
            scene_width,
            scene_height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        (col < self.width && row < self.height).then(|| &self.cells[row * self.width + col])
    }

    fn set(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = cell;
    }

    /// Scene x to fractional column.
    fn sx(&self, x: f64) -> f64 {
        x * self.width as f64 / self.scene_width
    }

    /// Scene y to fractional row, flipping the axis.
    fn sy(&self, y: f64) -> f64 {
        (self.scene_height - y) * self.height as f64 / self.scene_height
    }

    pub fn col_of(&self, x: f64) -> i64 {
        self.sx(x).floor() as i64
    }

    pub fn row_of(&self, y: f64) -> i64 {
        self.sy(y).floor() as i64
    }

    /// Scene x at the centre of a column.
    fn x_of(&self, col: i64) -> f64 {
        (col as f64 + 0.5) * self.scene_width / self.width as f64
    }

    /// Inclusive cell ranges covered by a scene rectangle, clipped to the grid.
    fn cover(&self, rect: &SceneRect) -> Option<((i64, i64), (i64, i64))> {
        let col_lo = self.sx(rect.min_x()).floor() as i64;
        let col_hi = self.sx(rect.max_x()).ceil() as i64 - 1;
        let row_lo = self.sy(rect.max_y()).floor() as i64;
        let row_hi = self.sy(rect.min_y()).ceil() as i64 - 1;
        let cols = (col_lo.max(0), col_hi.min(self.width as i64 - 1));
        let rows = (row_lo.max(0), row_hi.min(self.height as i64 - 1));
        (cols.0 <= cols.1 && rows.0 <= rows.1).then_some((cols, rows))
    }

    /// Write `text` centred on `center_col`.
    fn put_centered(&mut self, row: i64, center_col: i64, text: &str, style: Style) {
        let len = text.chars().count() as i64;
        let start = center_col - len / 2;
        for (i, symbol) in text.chars().enumerate() {
            self.set(start + i as i64, row, Cell { symbol, style });
        }
    }

    /// Symbols of one row as a string.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.width)
            .filter_map(|col| self.get(col, row).map(|c| c.symbol))
            .collect()
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| Span::styled(cell.symbol.to_string(), cell.style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

fn bird_sprite(texture: BirdTexture) -> &'static str {
    match texture {
        BirdTexture::Player1 => "^o>",
        BirdTexture::Player2 => "-o>",
        BirdTexture::Player3 => "vo>",
    }
}

/// Project the whole scene onto a grid of `width × height` cells.
pub fn build_grid(scene: &GameScene, width: u16, height: u16) -> SceneGrid {
    let config = scene.config();
    let mut grid = SceneGrid::new(width, height, config.scene_width, config.scene_height);
    if grid.width == 0 || grid.height == 0 {
        return grid;
    }

    for pipe in scene.pipes() {
        let Some(((c0, c1), (r0, r1))) = grid.cover(&pipe.frame()) else {
            continue;
        };
        let mouth_row = match pipe.kind {
            PipeKind::Top => r1,
            PipeKind::Bottom => r0,
        };
        for row in r0..=r1 {
            for col in c0..=c1 {
                let symbol = if row == mouth_row { '▓' } else { '█' };
                let color = if row == mouth_row {
                    Color::LightGreen
                } else {
                    Color::Green
                };
                grid.set(col, row, Cell {
                    symbol,
                    style: Style::default().fg(color),
                });
            }
        }
    }

    for tile in scene.floors() {
        let Some(((c0, c1), (r0, r1))) = grid.cover(&tile.frame()) else {
            continue;
        };
        for col in c0..=c1 {
            let local = grid.x_of(col) - tile.origin.x;
            if local < 0.0 || local >= tile.size.width {
                continue;
            }
            let stripe = (local / FLOOR_STRIPE).floor() as i64 % 2 == 0;
            for row in r0..=r1 {
                let cell = if row == r0 {
                    Cell {
                        symbol: '▀',
                        style: Style::default().fg(Color::Green).bg(Color::Yellow),
                    }
                } else {
                    Cell {
                        symbol: if stripe { '░' } else { '▒' },
                        style: Style::default().fg(Color::Yellow),
                    }
                };
                grid.set(col, row, cell);
            }
        }
    }

    let bird = scene.bird();
    let bird_color = if scene.status() == GameStatus::Over {
        Color::LightRed
    } else {
        Color::Yellow
    };
    grid.put_centered(
        grid.row_of(bird.position.y),
        grid.col_of(bird.position.x),
        bird_sprite(bird.animation.texture()),
        Style::default().fg(bird_color).add_modifier(Modifier::BOLD),
    );

    let center_col = grid.col_of(config.scene_width / 2.0);
    let label_row = grid
        .row_of(config.scene_height - METERS_LABEL_OFFSET)
        .max(0);
    grid.put_centered(
        label_row,
        center_col,
        &scene.meters_label(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );

    if let Some(banner) = scene.banner() {
        let row = grid.row_of(banner.y()).clamp(0, grid.height as i64 - 1);
        grid.put_centered(
            row,
            center_col,
            GameOverBanner::TEXT,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }

    grid
}

/// Render the full game screen: play area, status bar and info panel.
pub fn render_scene(frame: &mut Frame, area: Rect, scene: &GameScene, records: &Records, new_best: bool) {
    let layout = create_game_layout(frame, area, " Flappy ", Color::Cyan, 10, 22);

    let grid = build_grid(scene, layout.content.width, layout.content.height);
    frame.render_widget(Paragraph::new(grid.into_lines()), layout.content);

    render_status(frame, layout.status_bar, scene);
    render_info_panel(frame, layout.info_panel, scene, records, new_best);
}

fn render_status(frame: &mut Frame, area: Rect, scene: &GameScene) {
    match scene.status() {
        GameStatus::Idle => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            &CONTROLS,
        ),
        GameStatus::Running => render_status_bar(
            frame,
            area,
            &format!("Meters: {}", scene.meters()),
            Color::Green,
            &CONTROLS,
        ),
        GameStatus::Over => {
            let text = if scene.interaction_enabled() {
                format!("Crashed at {} meters. Press Space to retry", scene.meters())
            } else {
                format!("Crashed at {} meters", scene.meters())
            };
            render_status_bar(frame, area, &text, Color::Red, &CONTROLS);
        }
    }
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    scene: &GameScene,
    records: &Records,
    new_best: bool,
) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", scene.status().label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Meters: ", label),
            Span::styled(scene.meters().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Best:   ", label),
            Span::styled(
                records.best_meters.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Games:  ", label),
            Span::styled(records.games_played.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Avg:    ", label),
            Span::styled(records.average_meters().to_string(), value),
        ]),
    ];

    if let Some(ts) = records.best_at {
        if let Some(when) = chrono::DateTime::from_timestamp(ts, 0) {
            lines.push(Line::from(Span::styled(
                format!(" set {}", when.format("%Y-%m-%d")),
                label,
            )));
        }
    }

    if new_best {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " NEW BEST!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
