//! Near-square grid layout for a flat batch.

/// Lay `data` out row-major in a near-square grid of `ceil(sqrt(n))` columns.
/// Returns the rows plus the column and row counts.
pub fn grid_make<T: Clone>(data: &[T]) -> (Vec<Vec<T>>, usize, usize) {
    let size = data.len();
    let mut grid = (size as f64).sqrt() as usize;
    if grid * grid < size {
        grid += 1;
    }
    if grid == 0 {
        return (Vec::new(), 0, 0);
    }

    let rows = size.div_ceil(grid);
    let chunks: Vec<Vec<T>> = data.chunks(grid).map(<[T]>::to_vec).collect();
    let cols = chunks.iter().map(Vec::len).max().unwrap_or(0);
    (chunks, cols, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lays_out_near_square() {
        let (grid, cols, rows) = grid_make(&[1, 2, 3, 4, 5]);
        assert_eq!(grid, vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!((cols, rows), (3, 2));

        let (grid, cols, rows) = grid_make(&[1, 2, 3, 4]);
        assert_eq!(grid.len(), 2);
        assert_eq!((cols, rows), (2, 2));
    }

    #[test]
    fn empty_input_has_no_cells() {
        let (grid, cols, rows) = grid_make::<u8>(&[]);
        assert!(grid.is_empty());
        assert_eq!((cols, rows), (0, 0));
    }
}
