use serde::Serialize;

use super::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Difficulty {
    pub key: &'static str,
    pub name: &'static str,
    pub rows: usize,
    pub columns: usize,
}

pub const DIFFICULTIES: [Difficulty; 3] = [
    Difficulty { key: "easy", name: "Easy", rows: 6, columns: 7 },
    Difficulty { key: "normal", name: "Normal", rows: 6, columns: 9 },
    Difficulty { key: "hard", name: "Hard", rows: 7, columns: 8 },
];

impl Difficulty {
    pub fn from_key(key: &str) -> GameResult<Difficulty> {
        DIFFICULTIES
            .iter()
            .find(|d| d.key == key)
            .copied()
            .ok_or_else(|| GameError::InvalidDifficulty(key.to_string()))
    }

    pub fn all() -> &'static [Difficulty] {
        &DIFFICULTIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_expected_dimensions() {
        let easy = Difficulty::from_key("easy").unwrap();
        assert_eq!((easy.rows, easy.columns), (6, 7));
        let normal = Difficulty::from_key("normal").unwrap();
        assert_eq!((normal.rows, normal.columns), (6, 9));
        let hard = Difficulty::from_key("hard").unwrap();
        assert_eq!((hard.rows, hard.columns), (7, 8));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert_eq!(
            Difficulty::from_key("nightmare"),
            Err(GameError::InvalidDifficulty("nightmare".to_string()))
        );
        assert!(Difficulty::from_key("").is_err());
        assert!(Difficulty::from_key("Easy").is_err());
    }

    #[test]
    fn test_all_keys_are_unique() {
        let keys: Vec<&str> = Difficulty::all().iter().map(|d| d.key).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key), "duplicate key {}", key);
        }
    }
}
