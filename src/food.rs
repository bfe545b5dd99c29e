use std::collections::HashSet;

use crate::config::GridSize;
use crate::error::EngineError;
use crate::random::RandomSource;
use crate::snake::{Cell, Snake};

/// Picks a cell uniformly from the cells the snake does not occupy.
///
/// The free set is built explicitly, so the cost is bounded by the grid area
/// no matter how full the board is.
pub fn spawn_food<R: RandomSource + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Cell, EngineError> {
    let candidates = free_cells(bounds, snake);

    if candidates.is_empty() {
        return Err(EngineError::NoFreeCell {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.next_index(candidates.len());
    Ok(candidates[index])
}

/// Returns every unoccupied cell in row-major order.
#[must_use]
pub fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Cell> {
    let occupied: HashSet<Cell> = snake.segments().copied().collect();
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(occupied.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell::new(x, y);
            if !occupied.contains(&cell) {
                candidates.push(cell);
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::EngineError;
    use crate::input::Direction;
    use crate::random::ScriptedRandom;

    use super::{free_cells, spawn_food};
    use crate::snake::{Cell, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            Direction::Left,
        );
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food = spawn_food(&mut rng, bounds, &snake).expect("board has free cells");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(bounds));
        }
    }

    #[test]
    fn scripted_index_selects_row_major_free_cell() {
        let snake = Snake::from_segments(vec![Cell::new(0, 0), Cell::new(1, 0)], Direction::Left);
        let bounds = GridSize {
            width: 3,
            height: 2,
        };

        let mut first = ScriptedRandom::new(vec![0]);
        let mut third = ScriptedRandom::new(vec![2]);

        assert_eq!(spawn_food(&mut first, bounds, &snake), Ok(Cell::new(2, 0)));
        assert_eq!(spawn_food(&mut third, bounds, &snake), Ok(Cell::new(1, 1)));
    }

    #[test]
    fn single_free_cell_is_always_chosen() {
        let snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
            Direction::Up,
        );
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            assert_eq!(spawn_food(&mut rng, bounds, &snake), Ok(Cell::new(0, 1)));
        }
    }

    #[test]
    fn long_snake_leaves_exactly_the_remaining_cells() {
        let bounds = GridSize {
            width: 20,
            height: 20,
        };
        // Three full rows, snaking back and forth.
        let mut segments = Vec::new();
        for y in 0..3 {
            for step in 0..20 {
                let x = if y % 2 == 0 { 19 - step } else { step };
                segments.push(Cell::new(x, y));
            }
        }
        let snake = Snake::from_segments(segments, Direction::Down);

        let free = free_cells(bounds, &snake);

        assert_eq!(free.len(), 400 - 60);
        assert_eq!(free.first(), Some(&Cell::new(0, 3)));
        assert!(free.iter().all(|cell| !snake.occupies(*cell)));
    }

    #[test]
    fn full_board_fails_instead_of_looping() {
        let snake = Snake::from_segments(
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(0, 1),
            ],
            Direction::Up,
        );
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert!(free_cells(bounds, &snake).is_empty());
        assert_eq!(
            spawn_food(&mut rng, bounds, &snake),
            Err(EngineError::NoFreeCell {
                width: 2,
                height: 2
            })
        );
    }
}
