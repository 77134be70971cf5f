use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::exec::executor::Executor;

/// Output-element count above which `multiply_on` computes rows as
/// independent tasks on the worker pool instead of sequentially.
pub const PARALLEL_CUTOFF: usize = 512;

/// Dense 2-D matrix of `f64`, stored row-major in a flat buffer:
/// cell `(r, c)` lives at `data[r * cols + c]`.
///
/// Ownership rule: `map`, `randomize`, `add`, `subtract`, `element_mult`,
/// `scale`, and `pow` mutate in place and return `&mut Self` for chaining;
/// `transpose`, `multiply`, `multiply_on`, and `clone` allocate a new matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from a flat row-major buffer.
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Matrix {
        assert_eq!(
            data.len(),
            rows * cols,
            "buffer of length {} cannot back a {}x{} matrix",
            data.len(),
            rows,
            cols
        );
        Matrix { rows, cols, data }
    }

    /// Wraps a flat vector as a column-vector matrix (`len × 1`).
    pub fn from_array(array: &[f64]) -> Matrix {
        Matrix {
            rows: array.len(),
            cols: 1,
            data: array.to_vec(),
        }
    }

    /// Flattens the backing store into a plain vector (row-major).
    /// For a column vector this is the exact inverse of `from_array`.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            r,
            c,
            self.rows,
            self.cols
        );
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            r,
            c,
            self.rows,
            self.cols
        );
        self.data[r * self.cols + c] = value;
    }

    /// Applies `f(value, row, col)` to every cell in row-major order,
    /// in place. Every elementwise operation is built on this.
    pub fn map<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(f64, usize, usize) -> f64,
    {
        for index in 0..self.data.len() {
            let r = index / self.cols;
            let c = index % self.cols;
            self.data[index] = f(self.data[index], r, c);
        }
        self
    }

    /// Fills every cell with a uniform draw in `[min, max)`.
    pub fn randomize<R: Rng>(&mut self, min: f64, max: f64, rng: &mut R) -> &mut Self {
        self.map(|_, _, _| rng.gen_range(min..max))
    }

    /// Elementwise sum. Panics on shape mismatch.
    pub fn add(&mut self, other: &Matrix) -> &mut Self {
        self.assert_same_shape(other, "add");
        self.map(|value, r, c| value + other.get(r, c))
    }

    /// Elementwise difference. Panics on shape mismatch.
    pub fn subtract(&mut self, other: &Matrix) -> &mut Self {
        self.assert_same_shape(other, "subtract");
        self.map(|value, r, c| value - other.get(r, c))
    }

    /// Elementwise (Hadamard) product. Panics on shape mismatch.
    pub fn element_mult(&mut self, other: &Matrix) -> &mut Self {
        self.assert_same_shape(other, "element_mult");
        self.map(|value, r, c| value * other.get(r, c))
    }

    pub fn scale(&mut self, scalar: f64) -> &mut Self {
        self.map(|value, _, _| value * scalar)
    }

    pub fn pow(&mut self, exponent: f64) -> &mut Self {
        self.map(|value, _, _| value.powf(exponent))
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// Returns a new `cols × rows` matrix with `result[c, r] = self[r, c]`.
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols, self.rows);
        result.map(|_, r, c| self.get(c, r));
        result
    }

    /// Sequential dense product. Panics unless `self.cols == other.rows`;
    /// the result is `self.rows × other.cols`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        self.assert_inner_dim(other);
        let mut out = Matrix::zeros(self.rows, other.cols);
        for (r, out_row) in out.data.chunks_mut(other.cols.max(1)).enumerate() {
            self.product_row(other, r, out_row);
        }
        out
    }

    /// Dense product with a parallel fast path: above `PARALLEL_CUTOFF`
    /// output elements, each output row is computed as an independent task
    /// on `executor`'s pool, writing into its own disjoint slice of the
    /// preallocated result. The call blocks until every row is done, so no
    /// partial result is ever observable. Both paths use the same per-row
    /// summation order and produce identical results.
    pub fn multiply_on(&self, other: &Matrix, executor: &Executor) -> Matrix {
        self.assert_inner_dim(other);
        if self.rows * other.cols <= PARALLEL_CUTOFF {
            return self.multiply(other);
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        let cols = other.cols;
        executor.install(|| {
            out.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(r, out_row)| self.product_row(other, r, out_row));
        });
        out
    }

    /// Inner products for one output row. Shared by the sequential and
    /// parallel multiply paths so their summation order is identical.
    fn product_row(&self, other: &Matrix, r: usize, out_row: &mut [f64]) {
        for (c, out_cell) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for k in 0..self.cols {
                sum += self.data[r * self.cols + k] * other.data[k * other.cols + c];
            }
            *out_cell = sum;
        }
    }

    fn assert_same_shape(&self, other: &Matrix, op: &str) {
        assert!(
            self.rows == other.rows && self.cols == other.cols,
            "{}: shape mismatch ({}x{} vs {}x{})",
            op,
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
    }

    fn assert_inner_dim(&self, other: &Matrix) {
        assert_eq!(
            self.cols, other.rows,
            "multiply: inner dimensions differ ({}x{} vs {}x{})",
            self.rows, self.cols, other.rows, other.cols
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn counting(rows: usize, cols: usize) -> Matrix {
        let mut m = Matrix::zeros(rows, cols);
        m.map(|_, r, c| (r * cols + c) as f64 * 0.25 - 3.0);
        m
    }

    #[test]
    fn from_array_round_trip() {
        let v = vec![0.5, -1.25, 3.0, 0.0];
        let m = Matrix::from_array(&v);
        assert_eq!(m.rows, 4);
        assert_eq!(m.cols, 1);
        assert_eq!(Matrix::from_array(&m.to_array()).to_array(), v);
    }

    #[test]
    fn get_set_row_major() {
        let mut m = Matrix::zeros(2, 3);
        m.set(1, 2, 7.0);
        assert_eq!(m.get(1, 2), 7.0);
        assert_eq!(m.data[1 * 3 + 2], 7.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        let m = Matrix::zeros(2, 3);
        m.get(0, 3);
    }

    #[test]
    fn map_chains_in_place() {
        let mut m = Matrix::zeros(2, 2);
        m.map(|_, r, c| (r + c) as f64).scale(2.0);
        assert_eq!(m.data, vec![0.0, 2.0, 2.0, 4.0]);
    }

    #[test]
    fn transpose_involution() {
        let m = counting(3, 5);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn transpose_swaps_indices() {
        let m = counting(2, 3);
        let t = m.transpose();
        assert_eq!(t.rows, 3);
        assert_eq!(t.cols, 2);
        assert_eq!(t.get(2, 1), m.get(1, 2));
    }

    #[test]
    fn multiply_known_product() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = a.multiply(&b);
        assert_eq!(c.rows, 2);
        assert_eq!(c.cols, 2);
        assert_eq!(c.data, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    #[should_panic(expected = "inner dimensions differ")]
    fn multiply_mismatched_inner_dim_panics() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        a.multiply(&b);
    }

    #[test]
    fn parallel_multiply_matches_sequential() {
        let executor = Executor::with_workers(2).unwrap();

        // Below the cutoff: multiply_on falls through to the sequential path.
        let small_a = counting(4, 4);
        let small_b = counting(4, 4);
        assert_eq!(
            small_a.multiply_on(&small_b, &executor),
            small_a.multiply(&small_b)
        );

        // Above the cutoff (30 * 30 = 900 output elements): row tasks on the
        // pool must produce bitwise-identical results.
        let big_a = counting(30, 40);
        let big_b = counting(40, 30);
        assert!(big_a.rows * big_b.cols > PARALLEL_CUTOFF);
        assert_eq!(big_a.multiply_on(&big_b, &executor), big_a.multiply(&big_b));
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn add_shape_mismatch_panics() {
        let mut a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        a.add(&b);
    }

    #[test]
    fn elementwise_ops() {
        let mut a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_vec(2, 2, vec![0.5, 0.5, 0.5, 0.5]);
        a.add(&b);
        assert_eq!(a.data, vec![1.5, 2.5, 3.5, 4.5]);
        a.subtract(&b);
        assert_eq!(a.data, vec![1.0, 2.0, 3.0, 4.0]);
        a.element_mult(&b);
        assert_eq!(a.data, vec![0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn pow_sum_mean() {
        let mut m = Matrix::from_vec(1, 4, vec![1.0, -2.0, 3.0, -4.0]);
        m.pow(2.0);
        assert_eq!(m.data, vec![1.0, 4.0, 9.0, 16.0]);
        assert_eq!(m.sum(), 30.0);
        assert_eq!(m.mean(), 7.5);
    }

    #[test]
    fn randomize_stays_in_range() {
        let mut rng = rand::thread_rng();
        let mut m = Matrix::zeros(8, 8);
        m.randomize(-1.0, 1.0, &mut rng);
        assert!(m.data.iter().all(|&v| (-1.0..1.0).contains(&v)));
    }

    #[test]
    fn clone_does_not_alias() {
        let mut a = Matrix::from_vec(1, 2, vec![1.0, 2.0]);
        let b = a.clone();
        a.set(0, 0, 9.0);
        assert_eq!(b.get(0, 0), 1.0);
    }
}
