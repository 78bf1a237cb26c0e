use chess::{Board, Color, Piece, ALL_SQUARES};

#[derive(Default)]
struct Material {
    pawns: u32,
    knights: u32,
    bishops: u32,
    rooks: u32,
    queens: u32,
    /// Square color of the last bishop seen, true for light squares.
    bishop_on_light: Option<bool>,
}

impl Material {
    fn minor_only(&self) -> bool {
        self.pawns == 0 && self.rooks == 0 && self.queens == 0
    }

    fn bare_king(&self) -> bool {
        self.minor_only() && self.knights == 0 && self.bishops == 0
    }

    fn lone_minor(&self) -> bool {
        self.minor_only() && self.knights + self.bishops == 1
    }

    fn lone_bishop(&self) -> bool {
        self.minor_only() && self.knights == 0 && self.bishops == 1
    }
}

fn count_material(board: &Board, color: Color) -> Material {
    let mut material = Material::default();
    for square in ALL_SQUARES {
        if board.color_on(square) != Some(color) {
            continue;
        }
        match board.piece_on(square) {
            Some(Piece::Pawn) => material.pawns += 1,
            Some(Piece::Knight) => material.knights += 1,
            Some(Piece::Bishop) => {
                material.bishops += 1;
                let light = (square.get_rank().to_index() + square.get_file().to_index()) % 2 == 1;
                material.bishop_on_light = Some(light);
            }
            Some(Piece::Rook) => material.rooks += 1,
            Some(Piece::Queen) => material.queens += 1,
            _ => {}
        }
    }
    material
}

/// Check if the board has insufficient material for checkmate
pub fn has_insufficient_material(board: &Board) -> bool {
    let white = count_material(board, Color::White);
    let black = count_material(board, Color::Black);

    // King vs King, and a lone minor piece against a bare king
    if white.bare_king() && (black.bare_king() || black.lone_minor()) {
        return true;
    }
    if black.bare_king() && white.lone_minor() {
        return true;
    }

    // King and Bishop vs King and Bishop (bishops on same color)
    white.lone_bishop()
        && black.lone_bishop()
        && white.bishop_on_light.is_some()
        && white.bishop_on_light == black.bishop_on_light
}
