//! Four-piece puzzle assembly.
//!
//! Each piece shows one quadrant of the source drawing and can be dragged
//! freely until it comes within [`SNAP_DISTANCE`] of its target, at which
//! point it locks there for good.

use serde::{Deserialize, Serialize};

use crate::Point2D;

/// Lock-in radius in pixels
pub const SNAP_DISTANCE: f64 = 25.0;
/// Space reserved for a piece when choosing a spawn point
pub const PIECE_FOOTPRINT: f64 = 500.0;
pub const MIN_SPAWN_X: f64 = 50.0;
pub const MIN_SPAWN_Y: f64 = 100.0;

/// Static description of one quadrant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceDescriptor {
    pub id: &'static str,
    /// Position the piece snaps to
    pub lock_in: Point2D,
    /// Background offset that exposes this quadrant of the image
    pub image_offset: Point2D,
}

impl PieceDescriptor {
    /// CSS `background-position` value, e.g. `-200px 0px`
    pub fn background_position(&self) -> String {
        format!("{}px {}px", self.image_offset.x, self.image_offset.y)
    }
}

pub static PIECES: [PieceDescriptor; 4] = [
    PieceDescriptor {
        id: "top-left",
        lock_in: Point2D::new(0.0, 0.0),
        image_offset: Point2D::new(0.0, 0.0),
    },
    PieceDescriptor {
        id: "top-right",
        lock_in: Point2D::new(200.0, 0.0),
        image_offset: Point2D::new(-200.0, 0.0),
    },
    PieceDescriptor {
        id: "bottom-left",
        lock_in: Point2D::new(0.0, 200.0),
        image_offset: Point2D::new(0.0, -200.0),
    },
    PieceDescriptor {
        id: "bottom-right",
        lock_in: Point2D::new(200.0, 200.0),
        image_offset: Point2D::new(-200.0, -200.0),
    },
];

#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyError {
    UnknownPiece(String),
}

impl std::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyError::UnknownPiece(id) => write!(f, "Piece '{}' not found", id),
        }
    }
}

impl std::error::Error for AssemblyError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pick a spawn point for a piece.
///
/// `sample` must yield values in `[0, 1)`. The result never goes below
/// ([`MIN_SPAWN_X`], [`MIN_SPAWN_Y`]), even when the viewport is smaller
/// than [`PIECE_FOOTPRINT`].
pub fn spawn_position(viewport: Viewport, sample: &mut impl FnMut() -> f64) -> Point2D {
    let x = (sample() * (viewport.width - PIECE_FOOTPRINT)).max(MIN_SPAWN_X);
    let y = (sample() * (viewport.height - PIECE_FOOTPRINT)).max(MIN_SPAWN_Y);
    Point2D::new(x, y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceState {
    Free,
    /// Terminal: the piece sits on its target and takes no more input
    Locked,
}

/// Result of feeding a drag delta to a piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragOutcome {
    Moved { position: Point2D, distance: f64 },
    Locked { position: Point2D },
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    descriptor: &'static PieceDescriptor,
    position: Point2D,
    state: PieceState,
}

impl Piece {
    pub fn new(descriptor: &'static PieceDescriptor, position: Point2D) -> Self {
        Self {
            descriptor,
            position,
            state: PieceState::Free,
        }
    }

    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    pub fn descriptor(&self) -> &'static PieceDescriptor {
        self.descriptor
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == PieceState::Locked
    }

    pub fn distance_to_target(&self) -> f64 {
        self.position.distance_to(self.descriptor.lock_in)
    }

    /// Move by a pointer delta and lock in if close enough to the target
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> DragOutcome {
        if self.is_locked() {
            return DragOutcome::Ignored;
        }

        self.position = self.position.offset(dx, dy);
        let distance = self.distance_to_target();

        if distance < SNAP_DISTANCE {
            self.position = self.descriptor.lock_in;
            self.state = PieceState::Locked;
            DragOutcome::Locked {
                position: self.position,
            }
        } else {
            DragOutcome::Moved {
                position: self.position,
                distance,
            }
        }
    }

    /// CSS `transform` value for the current position
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.position.x, self.position.y)
    }
}

/// The four pieces of one puzzle
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    /// Build a board, asking `place` for each piece's starting point
    pub fn new(mut place: impl FnMut(&PieceDescriptor) -> Point2D) -> Self {
        let pieces = PIECES
            .iter()
            .map(|descriptor| Piece::new(descriptor, place(descriptor)))
            .collect();
        Self { pieces }
    }

    /// Board with every piece at a random spawn point inside `viewport`
    pub fn scatter(viewport: Viewport, mut sample: impl FnMut() -> f64) -> Self {
        Self::new(|_| spawn_position(viewport, &mut sample))
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn drag(&mut self, id: &str, dx: f64, dy: f64) -> Result<DragOutcome, AssemblyError> {
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| AssemblyError::UnknownPiece(id.to_string()))?;
        Ok(piece.drag_by(dx, dy))
    }

    pub fn locked_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_locked()).count()
    }

    /// All pieces are locked. Bookmarking does not depend on this.
    pub fn is_complete(&self) -> bool {
        self.pieces.iter().all(Piece::is_locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_board() -> Board {
        Board::new(|d| d.lock_in.offset(300.0, 300.0))
    }

    #[test]
    fn test_descriptor_table() {
        assert_eq!(PIECES.len(), 4);
        let ids: Vec<&str> = PIECES.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["top-left", "top-right", "bottom-left", "bottom-right"]);
        assert_eq!(PIECES[1].background_position(), "-200px 0px");
        assert_eq!(PIECES[2].background_position(), "0px -200px");
        assert_eq!(PIECES[3].lock_in, Point2D::new(200.0, 200.0));
    }

    #[test]
    fn test_every_piece_locks_within_threshold() {
        for descriptor in &PIECES {
            let mut piece = Piece::new(descriptor, descriptor.lock_in.offset(100.0, 0.0));

            let outcome = piece.drag_by(-70.0, 0.0);
            assert!(matches!(outcome, DragOutcome::Moved { .. }), "{}", descriptor.id);
            assert_eq!(piece.state(), PieceState::Free);

            // 24px away
            let outcome = piece.drag_by(-6.0, 0.0);
            assert_eq!(outcome, DragOutcome::Locked { position: descriptor.lock_in });
            assert_eq!(piece.position(), descriptor.lock_in);
            assert!(piece.is_locked());
        }
    }

    #[test]
    fn test_exact_threshold_does_not_lock() {
        let mut piece = Piece::new(&PIECES[0], Point2D::new(100.0, 0.0));
        match piece.drag_by(-75.0, 0.0) {
            DragOutcome::Moved { distance, .. } => assert_eq!(distance, 25.0),
            other => panic!("Expected Moved, got {:?}", other),
        }
        assert!(!piece.is_locked());
    }

    #[test]
    fn test_lock_is_terminal() {
        let mut piece = Piece::new(&PIECES[3], Point2D::new(210.0, 210.0));
        assert!(matches!(piece.drag_by(0.0, 0.0), DragOutcome::Locked { .. }));

        for _ in 0..5 {
            assert_eq!(piece.drag_by(500.0, -40.0), DragOutcome::Ignored);
        }
        assert_eq!(piece.position(), Point2D::new(200.0, 200.0));
        assert_eq!(piece.state(), PieceState::Locked);
    }

    #[test]
    fn test_deltas_accumulate() {
        let mut piece = Piece::new(&PIECES[0], Point2D::new(400.0, 400.0));
        piece.drag_by(10.0, -5.0);
        piece.drag_by(2.5, 1.0);
        assert_eq!(piece.position(), Point2D::new(412.5, 396.0));
        assert_eq!(piece.transform(), "translate(412.5px, 396px)");
    }

    #[test]
    fn test_board_drag_and_completion() {
        let mut board = far_board();
        assert_eq!(board.locked_count(), 0);
        assert!(!board.is_complete());

        for descriptor in &PIECES {
            let outcome = board.drag(descriptor.id, -295.0, -295.0).unwrap();
            assert!(matches!(outcome, DragOutcome::Locked { .. }));
        }
        assert_eq!(board.locked_count(), 4);
        assert!(board.is_complete());
    }

    #[test]
    fn test_board_unknown_piece() {
        let mut board = far_board();
        assert_eq!(
            board.drag("middle", 1.0, 1.0),
            Err(AssemblyError::UnknownPiece("middle".to_string()))
        );
    }

    #[test]
    fn test_locking_one_piece_leaves_others_free() {
        let mut board = far_board();
        board.drag("top-right", -300.0, -300.0).unwrap();
        assert!(board.piece("top-right").unwrap().is_locked());
        assert!(!board.piece("top-left").unwrap().is_locked());
        assert_eq!(board.locked_count(), 1);
    }

    #[test]
    fn test_spawn_minimums_hold_for_any_viewport() {
        let viewports = [
            Viewport::new(0.0, 0.0),
            Viewport::new(320.0, 480.0),
            Viewport::new(500.0, 500.0),
            Viewport::new(1920.0, 1080.0),
            Viewport::new(-100.0, 10_000.0),
        ];
        let samples = [0.0, 0.01, 0.5, 0.999];

        for viewport in viewports {
            for s in samples {
                let p = spawn_position(viewport, &mut || s);
                assert!(p.x >= MIN_SPAWN_X, "{:?} {} -> {:?}", viewport, s, p);
                assert!(p.y >= MIN_SPAWN_Y, "{:?} {} -> {:?}", viewport, s, p);
            }
        }
    }

    #[test]
    fn test_spawn_stays_inside_large_viewport() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let p = spawn_position(viewport, &mut || 0.999);
        assert!(p.x < viewport.width - PIECE_FOOTPRINT);
        assert!(p.y < viewport.height - PIECE_FOOTPRINT);

        let p = spawn_position(viewport, &mut || 0.5);
        assert_eq!(p, Point2D::new(710.0, 290.0));
    }

    #[test]
    fn test_scatter_draws_x_then_y_per_piece() {
        let mut values = vec![0.125, 0.25, 0.375, 0.5, 0.5, 0.625, 0.75, 0.875].into_iter();
        let board = Board::scatter(Viewport::new(1500.0, 1500.0), move || values.next().unwrap_or(0.0));
        let positions: Vec<Point2D> = board.pieces().iter().map(Piece::position).collect();
        assert_eq!(positions[0], Point2D::new(125.0, 250.0));
        assert_eq!(positions[3], Point2D::new(750.0, 875.0));
        assert!(board.pieces().iter().all(|p| p.state() == PieceState::Free));
    }
}
