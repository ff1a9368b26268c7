use rand::Rng;
use tracing::{debug, trace};

use crate::battle::{fight, BattleResult};
use crate::types::*;

/// One step of the move log: enough to put both squares back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub mv: Move,
    pub src_before: Option<Piece>,
    pub dest_before: Option<Piece>,
    /// Guard mine blown up while defending a flag, with the square it stood on.
    pub guard: Option<(Point, Piece)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; WIDTH as usize]; HEIGHT as usize],
    log: Vec<LogEntry>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; WIDTH as usize]; HEIGHT as usize],
            log: Vec::new(),
        }
    }

    /// Random legal setup: every side gets exactly the starting counts and
    /// no mine or flag on its entrances.
    pub fn initialize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::empty();
        for player in Player::ALL {
            let mut placed = [0usize; Rank::COUNT];
            for p in player.cells() {
                let rank = loop {
                    let candidate = Rank::ALL[rng.gen_range(0..Rank::COUNT)];
                    if placed[candidate.idx()] < Rank::STARTING_COUNTS[candidate.idx()] {
                        break candidate;
                    }
                };
                placed[rank.idx()] += 1;
                board.set_piece(p, Some(Piece::new(rank, player)));
            }
        }
        for player in Player::ALL {
            board.repair(player, rng);
        }
        debug!("board initialized");
        board
    }

    pub fn piece_at(&self, p: Point) -> Option<Piece> {
        let p = p.normalize();
        self.cells[p.row as usize][p.col as usize]
    }

    pub fn set_piece(&mut self, p: Point, piece: Option<Piece>) {
        let p = p.normalize();
        self.cells[p.row as usize][p.col as usize] = piece;
    }

    /// Occupied storage cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Piece)> + '_ {
        Point::all()
            .filter(|p| !p.is_dummy_headquarters())
            .filter_map(|p| self.piece_at(p).map(|pc| (p, pc)))
    }

    pub fn swap(&mut self, mv: Move) {
        let src = self.piece_at(mv.src);
        let dest = self.piece_at(mv.dest);
        self.set_piece(mv.src, dest);
        self.set_piece(mv.dest, src);
    }

    /// Checks the placement rule for `player`: no mine or flag may block an
    /// entrance. The error lists the offending entrances.
    pub fn is_valid(&self, player: Player) -> Result<(), Vec<Point>> {
        let blocked: Vec<Point> = entrances_of(player)
            .iter()
            .copied()
            .filter(|&p| self.piece_at(p).is_some_and(|pc| !pc.rank.is_movable()))
            .collect();
        if blocked.is_empty() {
            Ok(())
        } else {
            Err(blocked)
        }
    }

    /// Swaps every blocked entrance with a random square of the same half
    /// until the placement rule holds.
    pub fn repair<R: Rng + ?Sized>(&mut self, player: Player, rng: &mut R) {
        while let Err(blocked) = self.is_valid(player) {
            for src in blocked {
                let dest = self.random_point(player, rng);
                trace!(%player, %src, %dest, "repair swap");
                self.swap(Move::new(src, dest));
            }
        }
    }

    /// Swaps `swaps` random pairs of squares inside `player`'s half, then
    /// repairs the placement.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, player: Player, swaps: usize, rng: &mut R) {
        for _ in 0..swaps {
            let src = self.random_point(player, rng);
            let dest = self.random_point(player, rng);
            self.swap(Move::new(src, dest));
        }
        self.repair(player, rng);
    }

    pub fn random_point<R: Rng + ?Sized>(&self, player: Player, rng: &mut R) -> Point {
        let row = rng.gen_range(0..HALF_HEIGHT) + player.rows().start;
        let col = rng.gen_range(0..WIDTH);
        Point::new(row, col)
    }

    pub fn is_move_valid(&self, mv: Move) -> bool {
        if !mv.src.in_bounds() || !mv.dest.in_bounds() {
            return false;
        }
        let mover = match self.piece_at(mv.src) {
            Some(pc) if pc.rank.is_movable() => pc,
            _ => return false,
        };
        if self.piece_at(mv.dest).is_some_and(|pc| pc.owner == mover.owner) {
            return false;
        }

        let d = mover.owner.orient(mv.delta());
        if (d.row != 0 && d.col != 0) || (d.row == 0 && d.col == 0) {
            return false;
        }

        let blocked = self.is_piece_hitting_obstacle(mv);
        let one_row = d.row.abs() == 1;
        let one_col = d.col.abs() == 1;
        match mover.rank {
            Rank::Tank | Rank::Cavalry => ((one_row || d.row == -2) && !blocked) || one_col,
            Rank::Engineer => !blocked,
            Rank::Plane => d.row != 0 || one_col,
            _ => (one_row && !blocked) || one_col,
        }
    }

    /// Walks the straight path of `mv`. True if an intermediate square is
    /// occupied or the path crosses the centre strip away from the entrance
    /// columns. The destination's own occupant never counts.
    pub fn is_piece_hitting_obstacle(&self, mv: Move) -> bool {
        let d = mv.delta();
        let step = if d.row != 0 {
            Point::new(d.row.signum(), 0)
        } else {
            Point::new(0, d.col.signum())
        };

        let mut prev = mv.src;
        let mut current = mv.src;
        while current != mv.dest {
            current = current + step;
            if !current.in_bounds() {
                return true;
            }
            if current != mv.dest && self.piece_at(current).is_some() {
                return true;
            }
            let crosses_midline = prev.row + current.row == HEIGHT - 1;
            if crosses_midline && !is_entrance_column(current.col) {
                return true;
            }
            prev = current;
        }
        false
    }

    /// Resolves `mv` with true ranks and commits the result.
    pub fn battle(&mut self, mv: Move) -> BattleResult {
        let result = self.resolve(mv, None);
        debug!(%mv, ?result, "battle");
        result
    }

    /// Resolves `mv` as `supposer` imagines it: its own pieces at their true
    /// rank, the others at whatever it believes. Must be paired with `undo`.
    pub fn suppose_battle(&mut self, supposer: Player, mv: Move) -> BattleResult {
        self.resolve(mv, Some(supposer))
    }

    /// Runs `f` on the position after a supposed battle, then takes it back.
    pub fn with_supposed_battle<T>(
        &mut self,
        supposer: Player,
        mv: Move,
        f: impl FnOnce(&Board) -> T,
    ) -> T {
        self.suppose_battle(supposer, mv);
        let out = f(self);
        self.undo();
        out
    }

    fn resolve(&mut self, mv: Move, viewer: Option<Player>) -> BattleResult {
        let attacker = self.piece_at(mv.src).expect("battle from an empty square");
        let defender = self.piece_at(mv.dest);
        let seen = |pc: &Piece| match viewer {
            None => Some(pc.rank),
            Some(v) => pc.rank_seen_by(v),
        };

        let attacker_rank = seen(&attacker).unwrap_or(Rank::UNKNOWN);
        let defender_rank = defender.as_ref().and_then(seen);
        let mut blown_guard = None;
        let result = match (defender, defender_rank) {
            (Some(flag), Some(Rank::Flag)) => match self.guard_of(mv.dest, flag.owner) {
                Some((at, guard)) => match seen(&guard) {
                    Some(guard_rank) => {
                        if guard_rank == Rank::Mine {
                            blown_guard = Some((at, guard));
                        }
                        fight(attacker_rank, guard_rank)
                    }
                    None => BattleResult::Win,
                },
                None => BattleResult::Win,
            },
            (_, Some(rank)) => fight(attacker_rank, rank),
            _ => BattleResult::Win,
        };

        self.log.push(LogEntry {
            mv,
            src_before: Some(attacker),
            dest_before: defender,
            guard: blown_guard,
        });

        self.set_piece(mv.src, None);
        match result {
            BattleResult::Lose => {
                if defender_rank == Some(Rank::Mine) {
                    self.set_piece(mv.dest, None);
                }
            }
            BattleResult::Win => self.set_piece(mv.dest, Some(attacker)),
            BattleResult::Draw => self.set_piece(mv.dest, None),
        }
        if let Some((at, _)) = blown_guard {
            self.set_piece(at, None);
        }
        result
    }

    /// The piece of `owner` standing directly behind `flag_at`, if any.
    fn guard_of(&self, flag_at: Point, owner: Player) -> Option<(Point, Piece)> {
        let flag_at = flag_at.normalize();
        let behind = match owner {
            Player::North => Point::new(flag_at.row - 1, flag_at.col),
            Player::South => Point::new(flag_at.row + 1, flag_at.col),
        };
        if !behind.in_bounds() {
            return None;
        }
        self.piece_at(behind)
            .filter(|pc| pc.owner == owner)
            .map(|pc| (behind, pc))
    }

    /// Takes back the last logged battle, real or supposed.
    pub fn undo(&mut self) {
        let entry = self.log.pop().expect("undo with an empty move log");
        if let Some((at, guard)) = entry.guard {
            self.set_piece(at, Some(guard));
        }
        self.set_piece(entry.mv.dest, entry.dest_before);
        self.set_piece(entry.mv.src, entry.src_before);
    }

    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.log.last()
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Stores `belief` on the piece at `at`, and on its snapshot in the last
    /// log entry so that an undo/redo of that move keeps the guess.
    pub fn record_belief(&mut self, at: Point, belief: Rank) {
        let Some(mut piece) = self.piece_at(at) else {
            return;
        };
        let old = piece;
        piece.belief = Some(belief);
        self.set_piece(at, Some(piece));

        if let Some(entry) = self.log.last_mut() {
            for snapshot in [&mut entry.src_before, &mut entry.dest_before] {
                if let Some(pc) = snapshot.as_mut() {
                    if pc.owner == old.owner && pc.rank == old.rank {
                        pc.belief = Some(belief);
                        break;
                    }
                }
            }
        }
    }

    /// Game over check.
    ///
    /// A side loses when an enemy general or field officer stands on its
    /// headquarters, or when it has nothing left that can move. Both sides
    /// stuck at once is a draw.
    pub fn is_end(&self) -> Option<Outcome> {
        let mut winner = None;
        for player in Player::ALL {
            let opponent = player.other();
            if let Some(pc) = self.piece_at(HEADQUARTERS[player.idx()]) {
                let officer = pc.rank.is_general_officer() || pc.rank.is_field_officer();
                if pc.owner == opponent && officer {
                    return Some(Outcome::Winner(opponent));
                }
            }

            let stuck = !self
                .pieces()
                .any(|(_, pc)| pc.owner == player && pc.rank.is_movable());
            if stuck {
                if winner.is_some() {
                    return Some(Outcome::Draw);
                }
                winner = Some(opponent);
            }
        }
        winner.map(Outcome::Winner)
    }

    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces().filter(|(_, pc)| pc.owner == player).count()
    }

    /// Number of squares the piece on `src` may move to. Dummy headquarters
    /// squares are not counted separately.
    pub fn count_placeable_squares(&self, src: Point) -> usize {
        Point::all()
            .filter(|dest| !dest.is_dummy_headquarters())
            .filter(|&dest| self.is_move_valid(Move::new(src, dest)))
            .count()
    }

    /// Every legal move of `player`, source then destination in row-major
    /// order, one move per pair of storage squares.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut out: Vec<Move> = Vec::with_capacity(64);
        for src in Point::all() {
            if self.piece_at(src).map_or(true, |pc| pc.owner != player) {
                continue;
            }
            for dest in Point::all() {
                let mv = Move::new(src, dest);
                if !self.is_move_valid(mv) {
                    continue;
                }
                let same = |m: &Move| {
                    m.src.normalize() == src.normalize() && m.dest.normalize() == dest.normalize()
                };
                if !out.iter().any(same) {
                    out.push(mv);
                }
            }
        }
        out
    }

    /// True if some piece of `player` has a placeable square. A piece whose
    /// only way on is through a dummy headquarters square counts as stuck.
    pub fn has_legal_move(&self, player: Player) -> bool {
        Point::all()
            .filter(|&src| self.piece_at(src).is_some_and(|pc| pc.owner == player))
            .any(|src| self.count_placeable_squares(src) > 0)
    }

    /// Manhattan distance from `p` to the nearer half of `player`'s
    /// headquarters, plus two when `p` sits on the far half in one of the
    /// middle columns and would have to detour through an entrance.
    pub fn distance_to_headquarters(&self, player: Player, p: Point) -> i32 {
        let nearest = headquarters_cells(player)
            .iter()
            .map(|&hq| (hq - p).manhattan())
            .min()
            .unwrap_or(0);
        let far_half = Player::owning_row(p.row) != player;
        let middle_column = p.col == WIDTH / 2 - 1 || p.col == WIDTH / 2;
        if far_half && middle_column {
            nearest + 2
        } else {
            nearest
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
