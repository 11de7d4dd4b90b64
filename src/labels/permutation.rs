//! Seeded deterministic shuffle of a word bank's indices

/// Build a permutation of `0..len` keyed by the MD5 digest of `seed`
///
/// Fisher-Yates walk from the back: the swap target for slot `i` is
/// `digest[i % 16] % (i + 1)`. Not uniform, but bijective and stable
/// on every platform.
pub fn build_permutation(seed: &str, len: usize) -> Vec<usize> {
    let digest = md5::compute(seed.as_bytes());
    let bytes: [u8; 16] = digest.0;

    let mut perm: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = bytes[i % bytes.len()] as usize % (i + 1);
        perm.swap(i, j);
    }
    perm
}

/// Check that `perm` contains every index of `0..perm.len()` exactly once
pub fn is_bijection(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &idx in perm {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
