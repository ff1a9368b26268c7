//! Formation templates: predefined half-board layouts read from a text file.
//!
//! The file holds a formation count followed by that many templates of 24
//! rank ids each (see `Rank::idx`), whitespace separated. A template is read
//! row-major from the back row (which holds the double-wide headquarters in
//! columns 2 and 3) to the front line. Both headquarters slots name the same
//! square: one of them may be written as `-1`, otherwise they must agree.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::board::Board;
use crate::types::*;

/// Squares in a template, dummy headquarters slot included.
pub const TEMPLATE_LEN: usize = (HALF_HEIGHT * WIDTH) as usize;

const DUMMY_HEADQUARTERS_ID: i64 = -1;
const HQ_SLOTS: (usize, usize) = ((WIDTH / 2 - 1) as usize, (WIDTH / 2) as usize);

#[derive(Debug, thiserror::Error)]
pub enum FormationError {
    #[error("failed to read formation file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("formation data does not start with a formation count")]
    MissingCount,

    #[error("formation data lists no formations")]
    Empty,

    #[error("invalid token {token:?} in formation data")]
    BadToken { token: String },

    #[error("formation {index} is truncated: expected {expected} ranks, found {found}")]
    Truncated {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("formation {index} holds unknown rank id {id}")]
    UnknownRank { index: usize, id: i64 },

    #[error("formation {index} has inconsistent headquarters slots")]
    Headquarters { index: usize },

    #[error("formation {index} has {found} {rank}, expected {expected}")]
    WrongCount {
        index: usize,
        rank: Rank,
        found: usize,
        expected: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formation {
    /// Template order; both headquarters slots hold the headquarters rank.
    ranks: [Rank; TEMPLATE_LEN],
}

impl Formation {
    fn from_ids(index: usize, ids: &[i64]) -> Result<Self, FormationError> {
        let (hq, dummy) = HQ_SLOTS;
        let hq_id = match (ids[hq], ids[dummy]) {
            (DUMMY_HEADQUARTERS_ID, DUMMY_HEADQUARTERS_ID) => {
                return Err(FormationError::Headquarters { index })
            }
            (DUMMY_HEADQUARTERS_ID, id) | (id, DUMMY_HEADQUARTERS_ID) => id,
            (a, b) if a == b => a,
            _ => return Err(FormationError::Headquarters { index }),
        };

        let mut ranks = [Rank::Flag; TEMPLATE_LEN];
        for (slot, &id) in ids.iter().enumerate() {
            let id = if slot == hq || slot == dummy { hq_id } else { id };
            ranks[slot] = usize::try_from(id)
                .ok()
                .and_then(Rank::from_idx)
                .ok_or(FormationError::UnknownRank { index, id })?;
        }

        let mut counts = [0usize; Rank::COUNT];
        for (slot, rank) in ranks.iter().enumerate() {
            if slot != dummy {
                counts[rank.idx()] += 1;
            }
        }
        for rank in Rank::ALL {
            let expected = Rank::STARTING_COUNTS[rank.idx()];
            if counts[rank.idx()] != expected {
                return Err(FormationError::WrongCount {
                    index,
                    rank,
                    found: counts[rank.idx()],
                    expected,
                });
            }
        }
        Ok(Formation { ranks })
    }

    /// Rank at template coordinates, row 0 being the back row.
    pub fn rank_at(&self, row: usize, col: usize) -> Rank {
        self.ranks[row * WIDTH as usize + col]
    }

    /// Where template square `(row, col)` lands for `player`.
    pub fn board_point(player: Player, row: usize, col: usize) -> Point {
        let (row, col) = (row as i32, col as i32);
        match player {
            Player::North => Point::new(row, col),
            Player::South => Point::new(HEIGHT - 1 - row, WIDTH - 1 - col),
        }
    }

    /// Lays the template over `player`'s half, replacing whatever was there.
    pub fn place(&self, board: &mut Board, player: Player) {
        for row in 0..HALF_HEIGHT as usize {
            for col in 0..WIDTH as usize {
                let p = Formation::board_point(player, row, col);
                if p.is_dummy_headquarters() {
                    continue;
                }
                board.set_piece(p, Some(Piece::new(self.rank_at(row, col), player)));
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormationBook {
    formations: Vec<Formation>,
}

impl FormationBook {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FormationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, FormationError> {
        let mut tokens = text.split_whitespace();
        let count: usize = match tokens.next() {
            None => return Err(FormationError::MissingCount),
            Some(tok) => tok.parse().map_err(|_| FormationError::BadToken {
                token: tok.to_string(),
            })?,
        };
        if count == 0 {
            return Err(FormationError::Empty);
        }

        let mut formations = Vec::with_capacity(count);
        let mut ids = Vec::with_capacity(TEMPLATE_LEN);
        for index in 0..count {
            ids.clear();
            for tok in tokens.by_ref().take(TEMPLATE_LEN) {
                let id: i64 = tok.parse().map_err(|_| FormationError::BadToken {
                    token: tok.to_string(),
                })?;
                ids.push(id);
            }
            if ids.len() < TEMPLATE_LEN {
                return Err(FormationError::Truncated {
                    index,
                    expected: TEMPLATE_LEN,
                    found: ids.len(),
                });
            }
            formations.push(Formation::from_ids(index, &ids)?);
        }
        Ok(FormationBook { formations })
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Formation> {
        self.formations.get(index)
    }

    /// Uniformly random pick.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Formation {
        &self.formations[rng.gen_range(0..self.formations.len())]
    }
}

#[cfg(test)]
#[path = "formation_tests.rs"]
mod formation_tests;
