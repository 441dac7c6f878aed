//! Chess Universe - Spatial Indexer
//!
//! Maps tile coordinates onto a Hilbert curve so that tiles close on the map
//! get curve indices that vary smoothly, without the jumps of row-major order.
//! Neighbouring tiles therefore seed the move walker with related values.

/// Smallest grid the universe is ever indexed on
pub const MIN_GRID_SIZE: u64 = 256;

/// Grid side length used to index the tile `(x, y)`.
///
/// Always a power of two, at least [`MIN_GRID_SIZE`] and at least the next
/// power of two above `max(x, y, 16)`.
pub fn grid_size(x: i64, y: i64) -> u64 {
    let extent = x.max(y).max(16) as u64;
    let covering = extent.checked_next_power_of_two().unwrap_or(1 << 63);
    covering.max(MIN_GRID_SIZE)
}

/// Reduce a signed tile coordinate into `0..n`
#[inline]
pub fn wrap(v: i64, n: u64) -> u64 {
    (v as i128).rem_euclid(n as i128) as u64
}

/// Curve index of `(x, y)` on an `n`×`n` grid (`n` a power of two)
pub fn index_of(n: u64, x: u64, y: u64) -> u128 {
    debug_assert!(n.is_power_of_two(), "grid size {} is not a power of two", n);

    let (mut x, mut y) = (x, y);
    let mut d: u128 = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = (x & s) > 0;
        let ry = (y & s) > 0;
        let quadrant = (3 * rx as u128) ^ ry as u128;
        d += (s as u128) * (s as u128) * quadrant;
        rotate(n, &mut x, &mut y, rx, ry);
        s /= 2;
    }
    d
}

/// Point at curve index `d` on an `n`×`n` grid; inverse of [`index_of`]
pub fn point_of(n: u64, d: u128) -> (u64, u64) {
    debug_assert!(n.is_power_of_two(), "grid size {} is not a power of two", n);

    let (mut x, mut y) = (0u64, 0u64);
    let mut t = d;
    let mut s = 1u64;
    while s < n {
        let rx = (t / 2) & 1 == 1;
        let ry = (t ^ rx as u128) & 1 == 1;
        rotate(s, &mut x, &mut y, rx, ry);
        x += s * rx as u64;
        y += s * ry as u64;
        t /= 4;
        match s.checked_mul(2) {
            Some(next) => s = next,
            None => break,
        }
    }
    (x, y)
}

fn rotate(n: u64, x: &mut u64, y: &mut u64, rx: bool, ry: bool) {
    if !ry {
        if rx {
            *x = n.wrapping_sub(1).wrapping_sub(*x);
            *y = n.wrapping_sub(1).wrapping_sub(*y);
        }
        std::mem::swap(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order_curve() {
        // the 2x2 curve visits (0,0) (0,1) (1,1) (1,0)
        assert_eq!(index_of(2, 0, 0), 0);
        assert_eq!(index_of(2, 0, 1), 1);
        assert_eq!(index_of(2, 1, 1), 2);
        assert_eq!(index_of(2, 1, 0), 3);
    }

    #[test]
    fn exhaustive_round_trip_small_grids() {
        for n in [1u64, 2, 4, 8, 16, 32] {
            for x in 0..n {
                for y in 0..n {
                    let d = index_of(n, x, y);
                    assert!(d < (n as u128) * (n as u128));
                    assert_eq!(point_of(n, d), (x, y), "n={} x={} y={}", n, x, y);
                }
            }
        }
    }

    #[test]
    fn consecutive_indices_are_adjacent() {
        let n = 64;
        for d in 0..(n as u128 * n as u128 - 1) {
            let (x0, y0) = point_of(n, d);
            let (x1, y1) = point_of(n, d + 1);
            assert_eq!(x0.abs_diff(x1) + y0.abs_diff(y1), 1);
        }
    }

    #[test]
    fn grid_size_bounds() {
        assert_eq!(grid_size(0, 0), 256);
        assert_eq!(grid_size(-40, 3), 256);
        assert_eq!(grid_size(300, 2), 512);
        assert_eq!(grid_size(5, 1024), 1024);
        assert_eq!(grid_size(i64::MAX, 0), 1 << 63);
    }

    #[test]
    fn wrap_is_euclidean() {
        assert_eq!(wrap(-1, 256), 255);
        assert_eq!(wrap(257, 256), 1);
        assert_eq!(wrap(i64::MIN, 256), 0);
    }
}
