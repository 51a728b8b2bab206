// permutation vectors are stored in "gather" form: p[k] is the index
// of the source entry that lands in position k.

use std::iter::zip;

/// Construct an inverse permutation from a permutation.
///
/// Returns `None` if `p` is not a permutation of `0..p.len()`.
pub fn invperm(p: &[usize]) -> Option<Vec<usize>> {
    let n = p.len();
    let mut b = vec![usize::MAX; n];

    for (i, &j) in p.iter().enumerate() {
        if j >= n || b[j] != usize::MAX {
            return None;
        }
        b[j] = i;
    }
    Some(b)
}

/// `x[k] = b[p[k]]`
pub fn permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

/// `x[p[k]] = b[k]`
pub fn ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}

/// True if `p[k] == k` for every `k`
pub fn is_identity_permutation(p: &[usize]) -> bool {
    p.iter().enumerate().all(|(k, &pk)| k == pk)
}

#[test]
fn test_invperm() {
    let perm = vec![3, 0, 2, 1];
    let iperm = invperm(&perm).unwrap();
    assert_eq!(iperm, vec![1, 3, 2, 0]);
    for (k, &pk) in perm.iter().enumerate() {
        assert_eq!(iperm[pk], k);
    }
}

#[test]
fn test_invperm_bad_perm() {
    //repeated index, including a repeat of zero
    assert!(invperm(&[3, 0, 2, 0]).is_none());
    assert!(invperm(&[0, 0]).is_none());
    //index too big
    assert!(invperm(&[4, 0, 2, 1]).is_none());
}

#[test]
fn test_permute_ipermute() {
    let mut x = vec![0; 5];
    let mut y = vec![0; 5];
    let b = [6, 7, 8, 9, 10];
    let p = [2, 4, 1, 3, 0];

    permute(&mut x, &b, &p);
    assert_eq!(x, [8, 10, 7, 9, 6]);

    ipermute(&mut y, &x, &p);
    assert_eq!(y, b);

    assert!(!is_identity_permutation(&p));
    assert!(is_identity_permutation(&[0, 1, 2]));
}
