//! The process-wide decimal-power tower cache (spec.md §3, §5): `B[k] =
//! 10^(2^k)`, append-only, grown lazily as radix conversion needs deeper
//! levels.
//!
//! The teacher declares `lazy_static` in `algebra-core/Cargo.toml` today
//! only behind the `cuda` feature and never actually uses it for shared
//! state; here it is load-bearing, paired with a `Mutex` as spec.md §5
//! permits ("implementations may choose to... serialize append with an
//! internal lock").

use crate::value::BigInt;
use lazy_static::lazy_static;
use log::trace;
use std::sync::Mutex;

lazy_static! {
    static ref DECIMAL_TOWER: Mutex<Vec<BigInt>> = Mutex::new(vec![BigInt::from(10u32)]);
}

/// Returns `B[k] = 10^(2^k)`, growing the shared cache by squaring the
/// previous level as many times as needed.
pub fn decimal_tower_level(k: usize) -> BigInt {
    let mut tower = DECIMAL_TOWER.lock().expect("decimal tower mutex poisoned");
    while tower.len() <= k {
        let prev = tower.last().expect("tower is seeded with B[0]").clone();
        let next = &prev * &prev;
        trace!("decimal tower grown to level {}", tower.len());
        tower.push(next);
    }
    tower[k].clone()
}

/// A private, non-shared tower for a non-decimal generic radix (spec.md
/// §4.11's "the generic consumer maintains its own tower").
pub struct Tower {
    radix: BigInt,
    levels: Vec<BigInt>,
}

impl Tower {
    pub fn new(radix: BigInt) -> Self {
        Tower {
            levels: vec![radix.clone()],
            radix,
        }
    }

    pub fn radix(&self) -> &BigInt {
        &self.radix
    }

    pub fn level(&mut self, k: usize) -> BigInt {
        while self.levels.len() <= k {
            let prev = self.levels.last().expect("tower is seeded with level 0").clone();
            self.levels.push(&prev * &prev);
        }
        self.levels[k].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_levels_are_powers_of_ten() {
        assert_eq!(decimal_tower_level(0), BigInt::from(10u32));
        assert_eq!(decimal_tower_level(1), BigInt::from(100u32));
        assert_eq!(decimal_tower_level(2), BigInt::from(10000u32));
        assert_eq!(decimal_tower_level(3), BigInt::from(100000000u64));
    }

    #[test]
    fn generic_tower_matches_radix_powers() {
        let mut t = Tower::new(BigInt::from(16u32));
        assert_eq!(t.level(0), BigInt::from(16u32));
        assert_eq!(t.level(1), BigInt::from(256u32));
        assert_eq!(t.level(2), BigInt::from(65536u32));
    }
}
