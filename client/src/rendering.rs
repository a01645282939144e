use crate::game::ClientGameState;
use macroquad::prelude::*;
use shared::Position;

const BACKGROUND: Color = Color::new(0.486, 0.988, 0.0, 1.0);
const FOOD_COLOR: Color = Color::new(0.85, 0.1, 0.1, 1.0);
const OWN_BODY_COLOR: Color = Color::new(0.0, 0.39, 0.0, 1.0);
const PEER_COLOR: Color = Color::new(0.0, 0.4, 1.0, 1.0);

/// Top-left pixel of a grid cell.
pub fn cell_origin(pos: Position, cell_size: f32) -> (f32, f32) {
    (pos.x as f32 * cell_size, pos.y as f32 * cell_size)
}

/// Draws a client's state. Reads only; never mutates the simulation.
pub struct Renderer {
    cell_size: f32,
}

impl Renderer {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    pub fn render(&self, state: &ClientGameState) {
        clear_background(BACKGROUND);

        self.draw_cell(state.food().position, FOOD_COLOR);

        for position in state.remote_players().values() {
            self.draw_cell(*position, PEER_COLOR);
        }

        if let Some(snake) = state.snake() {
            for segment in snake.body() {
                self.draw_cell(*segment, OWN_BODY_COLOR);
            }
        }

        self.draw_ui(state);
    }

    fn draw_cell(&self, pos: Position, color: Color) {
        let (x, y) = cell_origin(pos, self.cell_size);
        draw_rectangle(x, y, self.cell_size, self.cell_size, color);
        draw_rectangle_lines(x, y, self.cell_size, self.cell_size, 1.0, BLACK);
    }

    fn draw_ui(&self, state: &ClientGameState) {
        let score_text = format!("Score: {}", state.score());
        draw_text(&score_text, 16.0, 32.0, 20.0, BLACK);

        if state.player_id().is_none() {
            draw_text("Connecting...", 16.0, 56.0, 20.0, DARKGRAY);
        }

        if state.is_game_over() {
            let banner = "Game Over";
            let font_size = 40.0;
            let size = measure_text(banner, None, font_size as u16, 1.0);
            let grid = state.grid();
            let width = grid.width as f32 * self.cell_size;
            let height = grid.height as f32 * self.cell_size;
            draw_text(
                banner,
                (width - size.width) / 2.0,
                (height + size.height) / 2.0,
                font_size,
                RED,
            );
        }
    }
}
