//! End-to-end scenarios S1–S6 and the round-trip/boundary laws of
//! spec.md §8, exercised through the public crate API only.

use bigint::BigInt;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn pow2(k: u32) -> BigInt {
    BigInt::one().shl(k as i64).expect("shift within MAX_LEN")
}

fn pow10(k: u32) -> BigInt {
    let mut v = BigInt::one();
    let ten = BigInt::from(10u32);
    for _ in 0..k {
        v = &v * &ten;
    }
    v
}

#[test]
fn s1_power_of_two_squaring_emits_hex_with_exactly_500_zeros() {
    let a = pow2(1000);
    let product = &a * &a;
    let hex = format!("{:x}", product);
    assert_eq!(hex, format!("1{}", "0".repeat(500)));
}

#[test]
fn s2_ten_to_the_100_divided_by_seven() {
    let a = pow10(100);
    let b = BigInt::from(7u32);
    let (q, r) = a.checked_div_rem(&b).unwrap();

    let q_str = q.to_string();
    assert!(
        q_str.len() == 99 || q_str.len() == 100,
        "quotient has {} digits",
        q_str.len()
    );

    let reconstructed = &(&q * &b) + &r;
    assert_eq!(reconstructed, a);
    assert!(r >= BigInt::zero());
    assert!(r < b);
}

#[test]
fn s3_near_cancelling_opposite_signs() {
    let a = &pow10(50) - &BigInt::one();
    let b = -pow10(50);
    assert_eq!(&a + &b, BigInt::from(-1i64));
}

#[test]
fn s4_grouped_decimal_literal() {
    let v = bigint::parse_literal("12'345'678").unwrap();
    assert_eq!(v, BigInt::from(12345678u32));
}

#[test]
fn s5_large_power_of_two_hex_with_showbase_uppercase() {
    let a = pow2(32000);
    let hex = format!("{:#X}", a);
    assert_eq!(hex, format!("0X1{}", "0".repeat(8000)));
}

#[test]
fn s6_digit_consumer_from_hex_nibbles() {
    let mut consumer = BigInt::get_digit_consumer(16).unwrap();
    for d in [0xFu64, 0xF, 0xF, 0xF] {
        consumer.read_digit(d).unwrap();
    }
    let value = BigInt::from_digit_consumer(consumer, true).unwrap();
    assert_eq!(value, BigInt::from(65535u32));
}

#[test]
fn law_add_then_subtract_is_identity() {
    let mut rng = XorShiftRng::seed_from_u64(42);
    for _ in 0..200 {
        let x = BigInt::from(rng.gen::<i64>());
        let y = BigInt::from(rng.gen::<i64>());
        assert_eq!(&(&x + &y) - &y, x);
    }
}

#[test]
fn law_multiply_then_divide_is_identity_for_nonzero_divisor() {
    let mut rng = XorShiftRng::seed_from_u64(7);
    for _ in 0..200 {
        let x = BigInt::from(rng.gen::<i32>());
        let mut y_raw: i32 = rng.gen();
        if y_raw == 0 {
            y_raw = 1;
        }
        let y = BigInt::from(y_raw);
        let product = &x * &y;
        assert_eq!(&product / &y, x);
    }
}

#[test]
fn law_multiplication_commutes() {
    let mut rng = XorShiftRng::seed_from_u64(99);
    for _ in 0..200 {
        let x = BigInt::from(rng.gen::<i64>());
        let y = BigInt::from(rng.gen::<i64>());
        assert_eq!(&x * &y, &y * &x);
    }
}

#[test]
fn law_division_remainder_bounds() {
    let mut rng = XorShiftRng::seed_from_u64(123);
    for _ in 0..200 {
        let x = BigInt::from(rng.gen::<u32>());
        let mut y_raw: u32 = rng.gen();
        if y_raw == 0 {
            y_raw = 1;
        }
        let y = BigInt::from(y_raw);
        let (q, r) = x.checked_div_rem(&y).unwrap();
        assert_eq!(&(&q * &y) + &r, x);
        assert!(r >= BigInt::zero());
        assert!(r < y);
    }
}

#[test]
fn law_shift_left_then_right_round_trips_for_small_counts() {
    let mut rng = XorShiftRng::seed_from_u64(5);
    for _ in 0..200 {
        let x = BigInt::from(rng.gen::<u32>());
        let k: i64 = rng.gen_range(0..500);
        let shifted = x.shl(k).unwrap();
        let back = shifted.shr(k).unwrap();
        assert_eq!(back, x);
    }
}

#[test]
fn boundary_self_operations() {
    let x = BigInt::from(987654321i64);
    assert_eq!(&x - &x, BigInt::zero());
    assert_eq!(&x * &BigInt::zero(), BigInt::zero());
    assert_eq!(&BigInt::zero() * &x, BigInt::zero());
    let (q, r) = x.checked_div_rem(&x).unwrap();
    assert_eq!(q, BigInt::one());
    assert_eq!(r, BigInt::zero());
}

#[test]
fn boundary_division_by_zero_and_oversized_shift_are_domain_errors() {
    let x = BigInt::from(1u32);
    assert!(x.checked_div_rem(&BigInt::zero()).is_err());
    assert!(x.shl(i64::MAX).is_err());
}

#[test]
fn int_min_initializer_produces_correct_magnitude() {
    let x = BigInt::from(i64::MIN);
    assert!(x.is_negative());
    assert_eq!(-x, BigInt::from(i64::MAX) + BigInt::one());
}

#[test]
fn round_trip_digit_emission_and_parsing_across_radices() {
    let mut rng = XorShiftRng::seed_from_u64(2026);
    for radix in [2u32, 8, 10, 16, 36] {
        for _ in 0..50 {
            let n: u32 = rng.gen();
            let x = BigInt::from(n);
            let mut producer = x.get_digit_producer(radix).unwrap();
            let mut consumer = BigInt::get_digit_consumer(radix).unwrap();
            while let Some(d) = producer.next_digit() {
                consumer.read_digit(d).unwrap();
            }
            let rebuilt = BigInt::from_digit_consumer(consumer, true).unwrap();
            assert_eq!(rebuilt, x, "radix={} n={}", radix, n);
        }
    }
}
