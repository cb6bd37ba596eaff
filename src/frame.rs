use crate::game::GameState;
use crate::Coords;

const BORDER_CHAR: char = '#';
const FOOD_CHAR: char = '*';
const HEAD_CHAR: char = 'O';
const BODY_CHAR: char = 'o';
const EMPTY_CHAR: char = ' ';

const HUD_COLUMN: usize = 2;
const GAME_OVER_TEXT: &str = "GAME OVER  (R=restart, Q=quit)";

/// A full screen of characters, rebuilt from scratch every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<char>>,
}

impl Frame {
    pub fn blank(width: usize, height: usize) -> Self {
        Frame { rows: vec![vec![EMPTY_CHAR; width]; height] }
    }

    pub fn of<R>(state: &GameState<R>) -> Self {
        let (w, h) = (state.width() as usize, state.height() as usize);
        let mut frame = Frame::blank(w, h);

        for x in 0..w {
            frame.put(x, 0, BORDER_CHAR);
            frame.put(x, h - 1, BORDER_CHAR);
        }
        for y in 0..h {
            frame.put(0, y, BORDER_CHAR);
            frame.put(w - 1, y, BORDER_CHAR);
        }

        frame.put_at(state.food(), FOOD_CHAR);

        for (i, pos) in state.snake().body().enumerate() {
            frame.put_at(*pos, if i == 0 { HEAD_CHAR } else { BODY_CHAR });
        }

        let hud = format!("Score: {}   WASD=move  Q=quit", state.score());
        frame.write(HUD_COLUMN, 0, &hud, w.saturating_sub(1));

        if state.is_game_over() {
            let start = w.saturating_sub(GAME_OVER_TEXT.len()) / 2;
            frame.write(start.max(1), h / 2, GAME_OVER_TEXT, w.saturating_sub(1));
        }

        frame
    }

    #[cfg(test)]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn put(&mut self, x: usize, y: usize, ch: char) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = ch;
        }
    }

    fn put_at(&mut self, pos: Coords, ch: char) {
        if let (Ok(x), Ok(y)) = (usize::try_from(pos.0), usize::try_from(pos.1)) {
            self.put(x, y, ch);
        }
    }

    /// Writes `text` from column `x`, stopping before column `limit`.
    fn write(&mut self, x: usize, y: usize, text: &str, limit: usize) {
        for (i, ch) in text.chars().enumerate() {
            if x + i >= limit {
                break;
            }
            self.put(x + i, y, ch);
        }
    }
}
