use std::fmt;
use std::ops::{Add, Neg, Sub};

pub const HEIGHT: i32 = 8;
pub const WIDTH: i32 = 6;
pub const HALF_HEIGHT: i32 = HEIGHT / 2;
/// Pieces per side at setup.
pub const NUM_PIECES: usize = 23;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Rows 0..4; its view of the board is rotated 180 degrees.
    North,
    /// Rows 4..8.
    South,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::North, Player::South];

    pub fn other(self) -> Player {
        match self {
            Player::North => Player::South,
            Player::South => Player::North,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::North => 0,
            Player::South => 1,
        }
    }

    /// The side whose half contains `row`.
    pub fn owning_row(row: i32) -> Player {
        if row < HALF_HEIGHT {
            Player::North
        } else {
            Player::South
        }
    }

    /// Rows belonging to this side.
    pub fn rows(self) -> std::ops::Range<i32> {
        match self {
            Player::North => 0..HALF_HEIGHT,
            Player::South => HALF_HEIGHT..HEIGHT,
        }
    }

    /// Storage cells of this side's half in row-major order, dummy headquarters skipped.
    pub fn cells(self) -> impl Iterator<Item = Point> {
        self.rows()
            .flat_map(|row| (0..WIDTH).map(move |col| Point::new(row, col)))
            .filter(|p| !p.is_dummy_headquarters())
    }

    /// Turns a raw displacement into this side's frame, where forward is `row - 1`.
    pub fn orient(self, delta: Point) -> Point {
        match self {
            Player::North => -delta,
            Player::South => delta,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::North => f.write_str("north"),
            Player::South => f.write_str("south"),
        }
    }
}

/// Piece kinds, strongest first.
///
/// The discriminant doubles as the index into the combat table and as the
/// basis of the evaluator's strength weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    General,
    LieutenantGeneral,
    MajorGeneral,
    Plane,
    Tank,
    Colonel,
    LieutenantColonel,
    Major,
    Captain,
    FirstLieutenant,
    SecondLieutenant,
    Engineer,
    Cavalry,
    Spy,
    Mine,
    Flag,
}

impl Rank {
    pub const COUNT: usize = 16;

    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::General,
        Rank::LieutenantGeneral,
        Rank::MajorGeneral,
        Rank::Plane,
        Rank::Tank,
        Rank::Colonel,
        Rank::LieutenantColonel,
        Rank::Major,
        Rank::Captain,
        Rank::FirstLieutenant,
        Rank::SecondLieutenant,
        Rank::Engineer,
        Rank::Cavalry,
        Rank::Spy,
        Rank::Mine,
        Rank::Flag,
    ];

    /// How many of each rank a side starts with, indexed by `Rank::idx()`.
    pub const STARTING_COUNTS: [usize; Rank::COUNT] =
        [1, 1, 1, 2, 2, 1, 1, 1, 2, 2, 2, 2, 1, 1, 2, 1];

    /// Assumed rank of an opponent piece nothing is known about.
    pub const UNKNOWN: Rank = Rank::LieutenantColonel;

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Option<Rank> {
        Rank::ALL.get(idx).copied()
    }

    pub fn is_movable(self) -> bool {
        !matches!(self, Rank::Mine | Rank::Flag)
    }

    /// Ranks 0..=2.
    pub fn is_general_officer(self) -> bool {
        self <= Rank::MajorGeneral
    }

    /// The colonel band, ranks 5..=7.
    pub fn is_field_officer(self) -> bool {
        (Rank::Colonel..=Rank::Major).contains(&self)
    }

    /// Ranks allowed to advance two squares at once.
    pub fn can_advance_two(self) -> bool {
        matches!(self, Rank::Plane | Rank::Tank | Rank::Engineer | Rank::Cavalry)
    }

    /// Evaluation weight: 16 for the general down to 1 for the flag.
    pub fn strength(self) -> i32 {
        (Rank::COUNT - self.idx()) as i32
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub rank: Rank,
    pub owner: Player,
    /// The other side's best guess at `rank`. Only the AI writes it.
    pub belief: Option<Rank>,
}

impl Piece {
    pub fn new(rank: Rank, owner: Player) -> Self {
        Self {
            rank,
            owner,
            belief: None,
        }
    }

    /// The rank as seen by `viewer`: the truth for its own pieces, the belief otherwise.
    pub fn rank_seen_by(&self, viewer: Player) -> Option<Rank> {
        if self.owner == viewer {
            Some(self.rank)
        } else {
            self.belief
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        (0..HEIGHT).contains(&self.row) && (0..WIDTH).contains(&self.col)
    }

    /// The right half of a double-wide headquarters square.
    pub fn is_dummy_headquarters(self) -> bool {
        (self.row == 0 || self.row == HEIGHT - 1) && self.col == WIDTH / 2
    }

    /// Maps a dummy headquarters cell onto the cell that actually stores the piece.
    pub fn normalize(self) -> Point {
        if self.is_dummy_headquarters() {
            Point::new(self.row, self.col - 1)
        } else {
            self
        }
    }

    pub fn manhattan(self) -> i32 {
        self.row.abs() + self.col.abs()
    }

    /// Every cell in row-major order, dummy headquarters included.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..HEIGHT).flat_map(|row| (0..WIDTH).map(move |col| Point::new(row, col)))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.row, -self.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub src: Point,
    pub dest: Point,
}

impl Move {
    pub fn new(src: Point, dest: Point) -> Self {
        Self { src, dest }
    }

    pub fn delta(self) -> Point {
        self.dest - self.src
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.src, self.dest)
    }
}

/// Real headquarters cell of each side, indexed by `Player::idx()`.
pub const HEADQUARTERS: [Point; 2] = [
    Point::new(0, WIDTH / 2 - 1),
    Point::new(HEIGHT - 1, WIDTH / 2 - 1),
];

/// Gates through the centre strip, North's first.
pub const ENTRANCES: [Point; 4] = [
    Point::new(3, 1),
    Point::new(3, 4),
    Point::new(4, 1),
    Point::new(4, 4),
];

pub fn entrances_of(player: Player) -> &'static [Point] {
    match player {
        Player::North => &ENTRANCES[..2],
        Player::South => &ENTRANCES[2..],
    }
}

/// Both cells of a side's double-wide headquarters.
pub fn headquarters_cells(player: Player) -> [Point; 2] {
    let hq = HEADQUARTERS[player.idx()];
    [hq, Point::new(hq.row, hq.col + 1)]
}

pub fn is_entrance_column(col: i32) -> bool {
    col == 1 || col == WIDTH - 2
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
