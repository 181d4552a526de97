use log::debug;
use rand::Rng;

use crate::{CELL_SIZE, FOOD_CELLS};
use crate::segment::{Color, Segment};

/// Places a black food segment on one of the first `FOOD_CELLS` rows and columns.
/// The snake's body is not consulted, so food can land underneath it.
pub fn spawn<R: Rng>(rng: &mut R) -> Segment {
    let row = rng.gen_range(0..FOOD_CELLS) * CELL_SIZE;
    let col = rng.gen_range(0..FOOD_CELLS) * CELL_SIZE;

    let mut food = Segment::new(row, col);
    food.set_color(Color::Black);
    debug!("Spawned food at row {} col {}", row, col);
    food
}
