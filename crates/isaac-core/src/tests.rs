use crate::constants::*;
use crate::coordinates::*;
use crate::field::*;
use glam::DVec2;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use proptest::prelude::*;

fn arb_biguint() -> impl Strategy<Value = BigUint> {
    prop::collection::vec(any::<u8>(), 1..=32).prop_map(|bytes| BigUint::from_bytes_be(&bytes))
}

/// Residues decoded as non-negative, `[0, HALF]`
fn arb_low_residue() -> impl Strategy<Value = FieldElement> {
    arb_biguint().prop_map(|v| FieldElement::new(v % (half_prime() + BigUint::one())).unwrap())
}

/// Residues decoded as negative, `(HALF, PRIME)`
fn arb_high_residue() -> impl Strategy<Value = FieldElement> {
    arb_biguint().prop_map(|v| FieldElement::new(half_prime() + BigUint::one() + v % half_prime()).unwrap())
}

fn arb_residue() -> impl Strategy<Value = FieldElement> {
    prop_oneof![arb_low_residue(), arb_high_residue()]
}

fn real(text: &str) -> SignedReal {
    text.parse().unwrap()
}

/// `value / 1000` as an exact real
fn milli(value: i64) -> SignedReal {
    SignedReal::from_scaled(BigInt::from(value) * BigInt::from(10u64.pow(17)))
}

proptest! {
    #[test]
    fn prop_low_residues_are_non_negative(raw in arb_low_residue()) {
        let value = decode(&raw);
        prop_assert!(!value.is_negative());
        prop_assert_eq!(value.scaled(), &BigInt::from(raw.as_biguint().clone()));
    }

    #[test]
    fn prop_high_residues_are_negative(raw in arb_high_residue()) {
        let value = decode(&raw);
        let expected = BigInt::from(raw.as_biguint().clone()) - BigInt::from(prime().clone());
        prop_assert!(value.is_negative());
        prop_assert_eq!(value.scaled(), &expected);
    }

    #[test]
    fn prop_encode_inverts_decode(raw in arb_residue()) {
        prop_assert_eq!(encode(&decode(&raw)).unwrap(), raw);
    }

    #[test]
    fn prop_display_parses_back(raw in arb_residue()) {
        let value = decode(&raw);
        prop_assert_eq!(value.to_string().parse::<SignedReal>().unwrap(), value);
    }

    #[test]
    fn prop_projection_is_affine(
        ax in -1_000_000i64..1_000_000, ay in -1_000_000i64..1_000_000,
        bx in -1_000_000i64..1_000_000, by in -1_000_000i64..1_000_000,
        scale in 0.5f64..200.0,
        ox in 0.0f64..2000.0, oy in 0.0f64..2000.0,
        anchor in 0.0f64..2.0,
    ) {
        let a = Vector2Real::new(milli(ax), milli(ay));
        let b = Vector2Real::new(milli(bx), milli(by));
        let origin = DVec2::new(ox, oy);
        let offset = DVec2::splat(anchor);

        let diff = project(&a, origin, scale, offset) - project(&b, origin, scale, offset);
        let expected = a.delta(&b).to_dvec2() * scale;

        prop_assert!((diff - expected).length() < 1e-6);
    }
}

#[test]
fn test_boundary_values() {
    let zero = decode(&FieldElement::from_u64(0));
    assert!(zero.is_zero());

    let last = decode(&FieldElement::new(prime() - BigUint::one()).unwrap());
    assert_eq!(last, real("-0.00000000000000000001"));

    let half = decode(&FieldElement::new(half_prime().clone()).unwrap());
    assert!(!half.is_negative());
    assert_eq!(half.scaled(), &BigInt::from(half_prime().clone()));
}

#[test]
fn test_decode_str_matches_parse() {
    let text = "3618502788666131213697322783095070105623107215331596699873092056135872020481";
    let value = decode_str(text).unwrap();
    assert_eq!(value, SignedReal::from_integer(-1));
}

#[test]
fn test_to_f64_keeps_fraction() {
    let value = real("123456789.00000000000000000123");
    assert!((value.to_f64() - 123456789.0).abs() < 1e-6);

    let small = real("-0.000001");
    assert!((small.to_f64() + 1e-6).abs() < 1e-18);
}

#[test]
fn test_projection_center_and_top_left() {
    let projection = Projection::for_viewport(Viewport::new(1000.0, 800.0), DISPLAY_SCALE);
    let position = Vector2Real::new(real("1.5"), real("-0.5"));

    let center = projection.center(&position);
    assert!((center.x - 590.0).abs() < 1e-9);
    assert!((center.y - 370.0).abs() < 1e-9);

    let corner = projection.top_left(&position, 0.89);
    assert!((corner.x - (500.0 + (1.5 - 0.89) * 60.0)).abs() < 1e-9);
    assert!((corner.y - (400.0 + (-0.5 - 0.89) * 60.0)).abs() < 1e-9);
}

#[test]
fn test_anchor_offset_is_subtracted_before_scaling() {
    let position = Vector2Real::new(real("0.00000000000000000001"), real("2"));
    let origin = DVec2::new(10.0, 20.0);

    let anchored = project(&position, origin, 60.0, DVec2::new(0.5, 0.25));
    let centered = project(&position, origin, 60.0, DVec2::ZERO);
    assert_eq!(centered - anchored, DVec2::new(30.0, 15.0));
}

#[test]
fn test_projection_is_idempotent() {
    let projection = Projection::default();
    let position = Vector2Real::new(real("0.25"), real("0.75"));
    assert_eq!(projection.center(&position), projection.center(&position));
}

#[test]
fn test_default_viewport_origin() {
    let origin = Viewport::default().origin();
    assert_eq!(origin, DVec2::new(350.0, 407.5));
}
