use crate::algebra::FloatT;

// Scratch memory for the numeric factorization.   Buffers only ever
// grow, so that repeated factorizations of matrices of the same size
// do not allocate.

#[derive(Debug)]
pub(crate) struct QRWorkspace<T> {
    // visit stamps, indexed by factor row.  Entry == k+1 means that the
    // row was visited while processing column k
    pub(crate) marks: Vec<usize>,
    // elimination tree traversal stack.  Pending nodes occupy [top, n)
    pub(crate) stack: Vec<usize>,
    // dense accumulator for the current column
    pub(crate) x: Vec<T>,
    // (row, value) scratch for sorting a column of V or R
    pub(crate) pairs: Vec<(usize, T)>,
}

impl<T> QRWorkspace<T>
where
    T: FloatT,
{
    pub(crate) fn new() -> Self {
        Self {
            marks: Vec::new(),
            stack: Vec::new(),
            x: Vec::new(),
            pairs: Vec::new(),
        }
    }

    // prepare for a matrix with m2 factor rows and n columns
    pub(crate) fn reset(&mut self, m2: usize, n: usize) {
        if self.marks.len() < m2 {
            self.marks.resize(m2, 0);
        }
        if self.x.len() < m2 {
            self.x.resize(m2, T::zero());
        }
        if self.stack.len() < n {
            self.stack.resize(n, 0);
        }
        self.pairs.clear();
        self.pairs.reserve(m2);
        self.marks[..m2].fill(0);
        self.x[..m2].fill(T::zero());
    }
}
