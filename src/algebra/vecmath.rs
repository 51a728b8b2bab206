use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn set(&mut self, c: T) -> &mut Self {
        self.fill(c);
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.iter_mut().for_each(|x| *x *= c);
        self
    }

    fn negate(&mut self) -> &mut Self {
        self.iter_mut().for_each(|x| *x = -*x);
        self
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        accumulate_pairwise(self, y, |x, y| x * y)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    // 2-norm
    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    // Returns infinity norm
    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            if v.is_nan() {
                return T::nan();
            }
            out = if v > out { v } else { out };
        }
        out
    }

    // max absolute difference (used for unit testing)
    fn norm_inf_diff(&self, b: &[T]) -> T {
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }
}

// ---------------------------------------------------------------------
// pairwise accumulation of op(x[i],y[i]) over two slices.  Recursive
// halving keeps the rounding error growth logarithmic in the length.

fn accumulate_pairwise<T, F>(x: &[T], y: &[T], op: F) -> T
where
    T: FloatT,
    F: Fn(T, T) -> T + Copy,
{
    const BASE_CASE_DIM: usize = 16;

    if x.len() < BASE_CASE_DIM {
        zip(x, y).fold(T::zero(), |acc, (&x, &y)| acc + op(x, y))
    } else {
        let n2 = x.len() / 2;
        let (x1, x2) = x.split_at(n2);
        let (y1, y2) = y.split_at(n2);
        accumulate_pairwise(x1, y1, op) + accumulate_pairwise(x2, y2, op)
    }
}

#[test]
fn test_dot_product() {
    let x = vec![1., 2., 3., 4.];
    let y = vec![4., 5., 6., 7.];
    assert_eq!(x.dot(&y), 60.);
}

#[test]
fn test_dot_product_long() {
    //long enough to take the recursive branch
    let x = vec![1.; 101];
    let y: Vec<f64> = (0..101).map(|i| i as f64).collect();
    assert_eq!(x.dot(&y), 5050.);
}

#[test]
fn test_norms() {
    let x = vec![3., -4.];
    assert_eq!(x.sumsq(), 25.);
    assert_eq!(x.norm(), 5.);
    assert_eq!(x.norm_inf(), 4.);
    assert!(vec![1., f64::NAN].norm_inf().is_nan());
}

#[test]
fn test_scale_negate_set() {
    let mut x = vec![1., -2., 3.];
    x.scale(2.);
    assert_eq!(x, vec![2., -4., 6.]);
    x.negate();
    assert_eq!(x, vec![-2., 4., -6.]);
    x.set(7.);
    assert_eq!(x.norm_inf_diff(&[7., 6., 9.]), 2.);
}
