//! Serializable board snapshot

use serde::{Deserialize, Serialize};

use crate::types::{TileValue, EMPTY_GLYPH};

/// Board contents at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u16,
    pub height: u16,
    pub palette_size: u8,
    pub seed: u32,
    /// Rows top to bottom; `None` is an empty cell
    pub rows: Vec<Vec<Option<TileValue>>>,
}

impl BoardSnapshot {
    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Same layout as the board's `Display` output
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for cell in row {
                match cell {
                    Some(v) => out.push_str(&v.to_string()),
                    None => out.push(EMPTY_GLYPH),
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardModel;

    #[test]
    fn test_snapshot_matches_display() {
        let mut board = BoardModel::new(5, 6, 4, 2024).unwrap();
        board.randomize().unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.to_text(), board.to_string());
        assert_eq!(snap.occupied(), 5 * 5);
        assert_eq!(snap.seed, 2024);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut board = BoardModel::new(2, 2, 3, 1).unwrap();
        board.load_rows(&["XX", "12"]).unwrap();
        let v = serde_json::to_value(board.snapshot()).unwrap();
        assert_eq!(v["width"], 2);
        assert_eq!(v["rows"][0][0], serde_json::Value::Null);
        assert_eq!(v["rows"][1][1], 2);
    }
}
