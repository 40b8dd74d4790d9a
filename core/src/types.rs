/// Single coordinate axis used for grid rows, columns and positions.
pub type Coord = u16;

/// Count type used for mine counts, flag counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// `ndarray` index of a cell.
pub(crate) const fn nd_index((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

/// Cell count of a `rows x cols` grid.
pub const fn mult(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

/// Row and column offsets of the surrounding cells, row-major.
static NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up to eight cells around `center` that lie inside a `bounds`-sized grid.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i32, i32)>,
}

impl Neighbors {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: NEIGHBOR_OFFSETS.iter(),
        }
    }

    fn shifted(&self, (d_row, d_col): (i32, i32)) -> Option<Coord2> {
        let (rows, cols) = self.bounds;
        let row = Coord::try_from(i32::from(self.center.0) + d_row).ok()?;
        let col = Coord::try_from(i32::from(self.center.1) + d_col).ok()?;
        (row < rows && col < cols).then_some((row, col))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &offset = self.offsets.next()?;
            if let Some(coords) = self.shifted(offset) {
                return Some(coords);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = Neighbors::new((0, 0), (9, 9)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(Neighbors::new((0, 4), (9, 9)).count(), 5);
        assert_eq!(Neighbors::new((8, 4), (9, 9)).count(), 5);
        assert_eq!(Neighbors::new((4, 8), (9, 9)).count(), 5);
    }

    #[test]
    fn center_has_eight_neighbors_in_row_major_order() {
        let neighbors: Vec<_> = Neighbors::new((4, 4), (9, 9)).collect();
        assert_eq!(
            neighbors,
            vec![(3, 3), (3, 4), (3, 5), (4, 3), (4, 5), (5, 3), (5, 4), (5, 5)]
        );
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(16, 30), 480);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65535 * 65535);
        assert_eq!(nd_index((3, 7)), [3, 7]);
    }
}
