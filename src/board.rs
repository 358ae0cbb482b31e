//! Pieces, squares, and the 8x8 grid they live on.
//!
//! Row 0 is rank 8 (Black's back rank) and column 0 is file 'a', so the grid
//! reads top-to-bottom the same way the board is printed.

use std::fmt;

use thiserror::Error;

use crate::constants::{
    BACK_RANK, BLACK_BACK_ROW, BLACK_PAWN_ROW, BLAST_RADIUS, EMPTY, FILES, N, NUM_SQUARES,
    WHITE_BACK_ROW, WHITE_PAWN_ROW,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color tables (White = 0, Black = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a forward pawn step.
    #[inline]
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row from which this color's pawns may double-step.
    #[inline]
    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => WHITE_PAWN_ROW,
            Color::Black => BLACK_PAWN_ROW,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Color::White),
            "black" | "b" => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Index into per-kind tables, matching the order of [`PieceKind::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lower-case letter used in diagrams and the text protocol.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        PieceKind::ALL
            .into_iter()
            .find(|k| k.letter() == c.to_ascii_lowercase())
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Display symbol: upper-case for White, lower-case for Black.
    ///
    /// Only used for rendering and diagrams; the color itself is always
    /// carried by [`Piece::color`].
    pub fn symbol(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// A square on the board, always within bounds once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Bounds-checked constructor taking signed indices, so that offsets
    /// computed from other squares can be passed straight in.
    pub fn new(row: isize, col: isize) -> Option<Self> {
        let n = N as isize;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Square reached by moving `(dr, dc)`, if still on the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Square::new(self.row as isize + dr, self.col as isize + dc)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(|i| Square {
            row: (i / N) as u8,
            col: (i % N) as u8,
        })
    }

    #[inline]
    fn idx(self) -> usize {
        self.row() * N + self.col()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = FILES.as_bytes()[self.col()] as char;
        write!(f, "{file}{}", N - self.row())
    }
}

/// Errors from building a board out of a text diagram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("diagram has {0} rows, expected 8")]
    BadRowCount(usize),
    #[error("diagram row {row} has {len} squares, expected 8")]
    BadRowLength { row: usize, len: usize },
    #[error("unknown piece symbol '{0}'")]
    UnknownSymbol(char),
}

/// The 8x8 grid. Holds one piece or nothing per square.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// The standard chess starting layout.
    pub fn standard() -> Self {
        let mut b = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as isize;
            b.place(BLACK_BACK_ROW, col, Piece::new(kind, Color::Black));
            b.place(BLACK_PAWN_ROW, col, Piece::new(PieceKind::Pawn, Color::Black));
            b.place(WHITE_PAWN_ROW, col, Piece::new(PieceKind::Pawn, Color::White));
            b.place(WHITE_BACK_ROW, col, Piece::new(kind, Color::White));
        }
        b
    }

    fn place(&mut self, row: usize, col: isize, piece: Piece) {
        if let Some(sq) = Square::new(row as isize, col) {
            self.set(sq, Some(piece));
        }
    }

    /// Parse a diagram of eight rows (rank 8 first), one symbol per square.
    ///
    /// Upper-case letters are White, lower-case Black, `.` is empty.
    /// Whitespace inside a row is ignored, as are blank lines.
    pub fn from_diagram(diagram: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != N {
            return Err(BoardError::BadRowCount(rows.len()));
        }
        let mut b = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != N {
                return Err(BoardError::BadRowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &c) in symbols.iter().enumerate() {
                if c == EMPTY {
                    continue;
                }
                let piece = Piece::from_symbol(c).ok_or(BoardError::UnknownSymbol(c))?;
                b.place(row, col as isize, piece);
            }
        }
        Ok(b)
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.idx()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.idx()] = piece;
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Every occupied square with its piece, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Number of pieces of the given color and kind on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }

    /// Where the king of `color` stands, if it is still on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces().find(|&(_, p)| p == king).map(|(sq, _)| sq)
    }

    /// Squares swept by an explosion on `center`, clipped to the board.
    /// Includes `center` itself.
    pub fn blast_zone(center: Square) -> impl Iterator<Item = Square> {
        (-BLAST_RADIUS..=BLAST_RADIUS).flat_map(move |dr| {
            (-BLAST_RADIUS..=BLAST_RADIUS).filter_map(move |dc| center.offset(dr, dc))
        })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

/// Text grid with file letters above and below and rank numbers on both sides.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = FILES.chars().map(String::from).collect();
        let header = header.join(" ");
        writeln!(f, "  {header}")?;
        for row in 0..N {
            let rank = N - row;
            write!(f, "{rank} ")?;
            for col in 0..N {
                let ch = Square::new(row as isize, col as isize)
                    .and_then(|sq| self.get(sq))
                    .map_or(EMPTY, Piece::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f, "{rank}")?;
        }
        writeln!(f, "  {header}")
    }
}
