use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::str::FromStr;

use crate::{
    biginteger::{BigInteger, BigInteger256},
    bytes::FromBytes,
    fields::{
        batch_inversion, Field, Fp256, Fp256Parameters, FpParameters, LegendreSymbol,
        MontgomeryBackend, PrimeField, SquareRootField,
    },
    UniformRand,
};

pub(crate) const ITERATIONS: usize = 5;

pub(crate) fn test_rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(1231275789u64)
}

pub(crate) fn to_biguint(x: &BigInteger256) -> BigUint {
    BigUint::from_slice(&x.0)
}

pub(crate) fn from_biguint(x: &BigUint) -> BigInteger256 {
    let digits = x.to_u32_digits();
    assert!(digits.len() <= 8);
    let mut limbs = [0u32; 8];
    limbs[..digits.len()].copy_from_slice(&digits);
    BigInteger256(limbs)
}

fn random_negation_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let mut b = -a;
        b += &a;

        assert!(b.is_zero());
    }
}

fn random_addition_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let b = F::rand(rng);
        let c = F::rand(rng);

        let t0 = (a + &b) + &c; // (a + b) + c

        let t1 = (a + &c) + &b; // (a + c) + b

        let t2 = (b + &c) + &a; // (b + c) + a

        assert_eq!(t0, t1);
        assert_eq!(t1, t2);
    }
}

fn random_subtraction_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let b = F::rand(rng);

        let t0 = a - &b; // (a - b)

        let mut t1 = b; // (b - a)
        t1 -= &a;

        let mut t2 = t0; // (a - b) + (b - a) = 0
        t2 += &t1;

        assert!(t2.is_zero());
    }
}

fn random_multiplication_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let a = F::rand(rng);
        let b = F::rand(rng);
        let c = F::rand(rng);

        let mut t0 = a; // (a * b) * c
        t0 *= &b;
        t0 *= &c;

        let mut t1 = a; // (a * c) * b
        t1 *= &c;
        t1 *= &b;

        let mut t2 = b; // (b * c) * a
        t2 *= &c;
        t2 *= &a;

        assert_eq!(t0, t1);
        assert_eq!(t1, t2);
    }
}

fn random_inversion_tests<F: Field, R: Rng>(rng: &mut R) {
    assert!(F::zero().inverse().is_none());

    for _ in 0..ITERATIONS {
        let mut a = F::rand(rng);
        let b = a.inverse().unwrap(); // probablistically nonzero
        a *= &b;

        assert_eq!(a, F::one());
    }
}

fn random_doubling_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let mut a = F::rand(rng);
        let mut b = a;
        a += &b;
        b.double_in_place();

        assert_eq!(a, b);
    }
}

fn random_squaring_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        let mut a = F::rand(rng);
        let mut b = a;
        a *= &b;
        b.square_in_place();

        assert_eq!(a, b);
    }
}

fn random_expansion_tests<F: Field, R: Rng>(rng: &mut R) {
    for _ in 0..ITERATIONS {
        // Compare (a + b)(c + d) and (a*c + b*c + a*d + b*d)

        let a = F::rand(rng);
        let b = F::rand(rng);
        let c = F::rand(rng);
        let d = F::rand(rng);

        let mut t0 = a;
        t0 += &b;
        let mut t1 = c;
        t1 += &d;
        t0 *= &t1;

        let mut t2 = a;
        t2 *= &c;
        let mut t3 = b;
        t3 *= &c;
        let mut t4 = a;
        t4 *= &d;
        let mut t5 = b;
        t5 *= &d;

        t2 += &t3;
        t2 += &t4;
        t2 += &t5;

        assert_eq!(t0, t2);
    }

    for _ in 0..ITERATIONS {
        // Compare (a + b)c and (ac + bc)

        let a = F::rand(rng);
        let b = F::rand(rng);
        let c = F::rand(rng);

        let t0 = (a + &b) * &c;
        let t2 = a * &c + &(b * &c);

        assert_eq!(t0, t2);
    }
}

fn random_field_tests<F: Field>() {
    let mut rng = test_rng();

    random_multiplication_tests::<F, _>(&mut rng);
    random_addition_tests::<F, _>(&mut rng);
    random_subtraction_tests::<F, _>(&mut rng);
    random_negation_tests::<F, _>(&mut rng);
    random_doubling_tests::<F, _>(&mut rng);
    random_squaring_tests::<F, _>(&mut rng);
    random_inversion_tests::<F, _>(&mut rng);
    random_expansion_tests::<F, _>(&mut rng);

    assert!(F::zero().is_zero());
    {
        let z = -F::zero();
        assert!(z.is_zero());
    }

    assert!(F::zero().inverse().is_none());

    // Multiplication by zero
    {
        let a = F::rand(&mut rng) * &F::zero();
        assert!(a.is_zero());
    }

    // Addition by zero
    {
        let mut a = F::rand(&mut rng);
        let copy = a;
        a += &F::zero();
        assert_eq!(a, copy);
    }
}

fn random_sqrt_tests<F: SquareRootField>() {
    let mut rng = test_rng();

    for _ in 0..ITERATIONS {
        let a = F::rand(&mut rng);
        let b = a.square();
        assert_eq!(b.legendre(), LegendreSymbol::QuadraticResidue);

        let b = b.sqrt().unwrap();
        assert!(a == b || a == -b);
    }

    let mut c = F::one();
    for _ in 0..ITERATIONS {
        let mut b = c.square();
        assert_eq!(b.legendre(), LegendreSymbol::QuadraticResidue);

        b = b.sqrt().unwrap();

        if b != c {
            b = -b;
        }

        assert_eq!(b, c);

        c += &F::one();
    }
}

pub(crate) fn field_test<F: Field>(a: F, b: F) {
    let zero = F::zero();
    assert_eq!(zero, zero);
    assert_eq!(zero.is_zero(), true);
    assert_eq!(zero.is_one(), false);

    let one = F::one();
    assert_eq!(one, one);
    assert_eq!(one.is_zero(), false);
    assert_eq!(one.is_one(), true);
    assert_eq!(zero + &one, one);

    let two = one + &one;
    assert_eq!(two, two);
    assert_ne!(zero, two);
    assert_ne!(one, two);

    // a == a
    assert_eq!(a, a);
    // a + 0 = a
    assert_eq!(a + &zero, a);
    // a - 0 = a
    assert_eq!(a - &zero, a);
    // a - a = 0
    assert_eq!(a - &a, zero);
    // 0 - a = -a
    assert_eq!(zero - &a, -a);
    // a.double() = a + a
    assert_eq!(a.double(), a + &a);
    // b.double() = b + b
    assert_eq!(b.double(), b + &b);
    // a + b = b + a
    assert_eq!(a + &b, b + &a);
    // a - b = -(b - a)
    assert_eq!(a - &b, -(b - &a));
    // (a + b) + a = a + (b + a)
    assert_eq!((a + &b) + &a, a + &(b + &a));
    // (a + b).double() = (a + b) + (b + a)
    assert_eq!((a + &b).double(), (a + &b) + &(b + &a));

    // a * 0 = 0
    assert_eq!(a * &zero, zero);
    // a * 1 = a
    assert_eq!(a * &one, a);
    // a * 2 = a.double()
    assert_eq!(a * &two, a.double());
    // a * a^-1 = 1
    assert_eq!(a * &a.inverse().unwrap(), one);
    // a * a = a^2
    assert_eq!(a * &a, a.square());
    // a * a * a = a^3
    assert_eq!(a * &(a * &a), a.pow([0x3]));
    // a * b = b * a
    assert_eq!(a * &b, b * &a);
    // (a * b) * a = a * (b * a)
    assert_eq!((a * &b) * &a, a * &(b * &a));
    // (a + b)^2 = a^2 + 2ab + b^2
    assert_eq!(
        (a + &b).square(),
        a.square() + &((a * &b) + &(a * &b)) + &b.square()
    );
    // (a - b)^2 = (-(b - a))^2
    assert_eq!((a - &b).square(), (-(b - &a)).square());

    random_field_tests::<F>();
}

pub(crate) fn primefield_test<F: PrimeField>() {
    let one = F::one();
    assert_eq!(F::from_repr(one.into_repr()).unwrap(), one);
    assert_eq!(F::from_str("1").unwrap(), one);
    assert_eq!(F::from(1u64), one);
}

pub(crate) fn sqrt_field_test<F: SquareRootField>(elem: F) {
    let square = elem.square();
    let sqrt = square.sqrt().unwrap();
    assert!(sqrt == elem || sqrt == -elem);
    if let Some(sqrt) = elem.sqrt() {
        assert!(sqrt.square() == elem || sqrt.square() == -elem);
    }
    assert_eq!(F::zero().sqrt(), Some(F::zero()));
    random_sqrt_tests::<F>();
}

/// Every stored element stays below the modulus, both in Montgomery form and
/// after conversion back.
pub(crate) fn canonical_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let minus_one = -Fp256::<P>::one();
    let mut values = vec![Fp256::<P>::zero(), Fp256::<P>::one(), minus_one];
    values.extend((0..ITERATIONS).map(|_| Fp256::<P>::rand(&mut rng)));

    for a in values.iter() {
        for b in values.iter() {
            for c in [*a + b, *a - b, *a * b, a.square(), -*a, a.double()].iter() {
                assert!(c.0 < P::MODULUS);
                assert!(c.into_repr() < P::MODULUS);
            }
        }
    }
}

/// Plain integers survive the trip into Montgomery form and back.
pub(crate) fn montgomery_round_trip_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let mut minus_one = P::MODULUS;
    minus_one.sub_noborrow(&BigInteger256::from(1));

    let mut inputs = vec![
        BigInteger256::from(0),
        BigInteger256::from(1),
        BigInteger256::from(u64::MAX),
        minus_one,
    ];
    inputs.extend((0..ITERATIONS).map(|_| Fp256::<P>::rand(&mut rng).into_repr()));

    for x in inputs {
        let a = Fp256::<P>::to_montgomery(&x);
        assert_eq!(a.from_montgomery(), x);
        assert_eq!(Fp256::<P>::from_repr(x), Some(a));
    }

    // Inputs at or above the modulus are rejected by `from_repr` and reduced
    // by `to_montgomery`.
    assert_eq!(Fp256::<P>::from_repr(P::MODULUS), None);
    assert!(Fp256::<P>::to_montgomery(&P::MODULUS).is_zero());
    let mut p_plus_one = P::MODULUS;
    p_plus_one.add_nocarry(&BigInteger256::from(1));
    assert!(Fp256::<P>::to_montgomery(&p_plus_one).is_one());
}

/// Multiplication, squaring and inversion agree with arbitrary-precision
/// arithmetic on the plain values.
pub(crate) fn wide_input_conversion_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let p = to_biguint(&P::MODULUS);

    let mut inputs = vec![
        BigInteger256([u32::MAX; 8]),
        P::MODULUS,
        from_biguint(&(&p + 1u32)),
        from_biguint(&(&p * 2u32)),
        from_biguint(&(&p * 2u32 - 1u32)),
    ];
    for _ in 0..200 {
        let mut x: BigInteger256 = rng.gen();
        (x.0)[7] |= 0xc000_0000;
        inputs.push(x);
    }

    for x in inputs {
        let reduced = from_biguint(&(to_biguint(&x) % &p));
        let a = Fp256::<P>::to_montgomery(&x);
        assert_eq!(Some(a), Fp256::<P>::from_repr(reduced), "{:?}", x);
        assert!(a.0 < P::MODULUS);
        assert_eq!(a.from_montgomery(), reduced);
        assert_eq!(<Fp256<P> as MontgomeryBackend>::to_montgomery(&x), a);
    }
}

pub(crate) fn reference_arithmetic_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let p = to_biguint(&P::MODULUS);

    for _ in 0..ITERATIONS * 4 {
        let a = Fp256::<P>::rand(&mut rng);
        let b = Fp256::<P>::rand(&mut rng);
        let x = to_biguint(&a.into_repr());
        let y = to_biguint(&b.into_repr());

        assert_eq!(
            from_biguint(&((&x + &y) % &p)),
            (a + &b).into_repr()
        );
        assert_eq!(
            from_biguint(&((&x + &p - &y) % &p)),
            (a - &b).into_repr()
        );
        assert_eq!(from_biguint(&((&x * &y) % &p)), (a * &b).into_repr());
        assert_eq!(from_biguint(&((&x * &x) % &p)), a.square().into_repr());

        let p_minus_two = &p - BigUint::from(2u32);
        assert_eq!(
            from_biguint(&x.modpow(&p_minus_two, &p)),
            a.inverse().unwrap().into_repr()
        );

        // The stored word is x * 2^256 mod p.
        let r = BigUint::one() << 256;
        assert_eq!(from_biguint(&((&x * &r) % &p)), a.0);
    }
}

/// The stored constants agree with values recomputed from the modulus.
pub(crate) fn constants_test<P: Fp256Parameters>(generator: u64) {
    let p = to_biguint(&P::MODULUS);
    let r = (BigUint::one() << 256) % &p;
    let p_minus_one = &p - BigUint::one();

    assert_eq!(P::MODULUS_BITS as u64, p.bits());
    assert_eq!(P::CAPACITY, P::MODULUS_BITS - 1);
    assert_eq!(P::REPR_SHAVE_BITS, 256 - P::MODULUS_BITS);
    assert_eq!(from_biguint(&r), P::R);
    assert_eq!(from_biguint(&((&r * &r) % &p)), P::R2);

    let p0 = p.to_u32_digits()[0];
    assert_eq!(P::INV.wrapping_mul(p0), u32::MAX);

    let two_s = BigUint::one() << P::TWO_ADICITY;
    assert_eq!(to_biguint(&P::T) * &two_s, p_minus_one);
    assert!(!(to_biguint(&P::T) % 2u32).is_zero());
    assert_eq!(
        from_biguint(&((to_biguint(&P::T) - BigUint::one()) >> 1)),
        P::T_MINUS_ONE_DIV_TWO
    );
    assert_eq!(from_biguint(&(&p_minus_one >> 1)), P::MODULUS_MINUS_ONE_DIV_TWO);

    let g = BigUint::from(generator);
    assert_eq!(from_biguint(&((&g * &r) % &p)), P::GENERATOR);
    // The generator is a quadratic non-residue.
    assert_eq!(g.modpow(&(&p_minus_one >> 1), &p), p_minus_one);

    let root = g.modpow(&to_biguint(&P::T), &p);
    assert_eq!(from_biguint(&((&root * &r) % &p)), P::ROOT_OF_UNITY);
    assert_eq!(
        Fp256::<P>::root_of_unity().pow([1u32 << 31]).pow([2u32]),
        Fp256::<P>::one()
    );
}

/// The dedicated squaring agrees with a general multiplication, also on the
/// extreme inputs.
pub(crate) fn square_matches_mul_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let mut values = vec![
        Fp256::<P>::zero(),
        Fp256::<P>::one(),
        -Fp256::<P>::one(),
        Fp256::<P>::new(BigInteger256::from(1)),
    ];
    values.extend((0..ITERATIONS * 4).map(|_| Fp256::<P>::rand(&mut rng)));

    for a in values {
        assert_eq!(a.square(), a * &a);
    }
}

pub(crate) fn inverse_vartime_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    assert_eq!(Fp256::<P>::zero().inverse_vartime(), None);
    assert_eq!(
        Fp256::<P>::one().inverse_vartime(),
        Some(Fp256::<P>::one())
    );
    for _ in 0..ITERATIONS * 4 {
        let a = Fp256::<P>::rand(&mut rng);
        assert_eq!(a.inverse_vartime(), a.inverse());
    }
}

pub(crate) fn batch_inversion_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    let mut v = (0..100).map(|_| Fp256::<P>::rand(&mut rng)).collect::<Vec<_>>();
    v[17] = Fp256::<P>::zero();
    v[63] = Fp256::<P>::zero();
    let expected = v
        .iter()
        .map(|f| f.inverse().unwrap_or_else(Fp256::<P>::zero))
        .collect::<Vec<_>>();

    batch_inversion(&mut v);
    assert_eq!(v, expected);
}

/// The shared backend interface computes exactly what the field operators do,
/// and maps zero to zero on inversion.
pub(crate) fn backend_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    assert!(<Fp256<P> as MontgomeryBackend>::field_zero().field_is_zero());
    assert_eq!(
        <Fp256<P> as MontgomeryBackend>::field_one(),
        Fp256::<P>::one()
    );
    assert!(Fp256::<P>::zero().field_inv().field_is_zero());

    for _ in 0..ITERATIONS {
        let a = Fp256::<P>::rand(&mut rng);
        let b = Fp256::<P>::rand(&mut rng);
        assert_eq!(a.field_add(&b), a + &b);
        assert_eq!(a.field_sub(&b), a - &b);
        assert_eq!(a.field_mul(&b), a * &b);
        assert_eq!(a.field_sqr(), a.square());
        assert_eq!(a.field_neg(), -a);
        assert_eq!(Some(a.field_inv()), a.inverse());
        assert!(a.field_eq(&a));
        assert!(!a.field_eq(&(a + &Fp256::<P>::one())));

        let x = a.into_repr();
        assert_eq!(<Fp256<P> as MontgomeryBackend>::to_montgomery(&x), a);
        assert_eq!(MontgomeryBackend::from_montgomery(&a), x);
        assert_eq!(Fp256::<P>::from_limbs(a.limbs()), a);
    }
}

pub(crate) fn serialization_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    for _ in 0..ITERATIONS {
        let a = Fp256::<P>::rand(&mut rng);

        let bytes = a.to_bytes();
        assert_eq!(bytes[31] & 0x80, 0);
        assert_eq!(Fp256::<P>::from_bytes(&bytes), Some(a));

        let serialized = to_bytes!(a).unwrap();
        assert_eq!(&serialized[..], &bytes[..]);
        let b = Fp256::<P>::read(&serialized[..]).unwrap();
        assert_eq!(a, b);
    }

    // Little endian: the integer one is the byte 1 followed by zeros.
    let mut one = [0u8; 32];
    one[0] = 1;
    assert_eq!(Fp256::<P>::one().to_bytes(), one);

    // The modulus itself is not a canonical encoding.
    let p = P::MODULUS.to_bytes_le();
    assert_eq!(Fp256::<P>::from_bytes(&p), None);
    let err = Fp256::<P>::read(&p[..]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    // Too short.
    assert!(Fp256::<P>::read(&p[..31]).is_err());
}

pub(crate) fn from_str_test<P: Fp256Parameters>() {
    let mut rng = test_rng();
    assert_eq!(Fp256::<P>::from_str("0"), Ok(Fp256::<P>::zero()));
    assert_eq!(Fp256::<P>::from_str(""), Err(()));
    assert_eq!(Fp256::<P>::from_str("01"), Err(()));
    assert_eq!(Fp256::<P>::from_str("12a"), Err(()));

    for _ in 0..ITERATIONS {
        let n: u64 = rng.gen();
        let a = Fp256::<P>::from_str(&n.to_string()).unwrap();
        assert_eq!(a, Fp256::<P>::from(n));
        assert_eq!(a.into_repr(), BigInteger256::from(n));
    }

    // The decimal modulus reduces to zero.
    let p = to_biguint(&P::MODULUS).to_string();
    assert!(Fp256::<P>::from_str(&p).unwrap().is_zero());

    let displayed = format!("{}", Fp256::<P>::from(255u64));
    assert_eq!(
        displayed,
        "Fp256(0x00000000000000000000000000000000000000000000000000000000000000ff)"
    );
}

pub(crate) fn ordering_test<P: Fp256Parameters>() {
    let one = Fp256::<P>::one();
    let two = one.double();
    let minus_one = -one;
    assert!(Fp256::<P>::zero() < one);
    assert!(one < two);
    assert!(two < minus_one);
}

// Stamps the generic checks above into one `#[test]` per property.
macro_rules! prime_field_tests {
    ($field:ident, $params:ty, $generator:expr) => {
        paste::paste! {
            #[test]
            fn [<test_ $field _field>]() {
                let mut rng = crate::fields::tests_field::test_rng();
                let a: crate::fields::Fp256<$params> = crate::UniformRand::rand(&mut rng);
                let b: crate::fields::Fp256<$params> = crate::UniformRand::rand(&mut rng);
                crate::fields::tests_field::field_test(a, b);
                crate::fields::tests_field::primefield_test::<crate::fields::Fp256<$params>>();
                crate::fields::tests_field::sqrt_field_test(b);
            }

            #[test]
            fn [<test_ $field _canonical>]() {
                crate::fields::tests_field::canonical_test::<$params>();
            }

            #[test]
            fn [<test_ $field _montgomery_round_trip>]() {
                crate::fields::tests_field::montgomery_round_trip_test::<$params>();
            }

            #[test]
            fn [<test_ $field _wide_input_conversion>]() {
                crate::fields::tests_field::wide_input_conversion_test::<$params>();
            }

            #[test]
            fn [<test_ $field _reference_arithmetic>]() {
                crate::fields::tests_field::reference_arithmetic_test::<$params>();
            }

            #[test]
            fn [<test_ $field _constants>]() {
                crate::fields::tests_field::constants_test::<$params>($generator);
            }

            #[test]
            fn [<test_ $field _square_matches_mul>]() {
                crate::fields::tests_field::square_matches_mul_test::<$params>();
            }

            #[test]
            fn [<test_ $field _inverse_vartime>]() {
                crate::fields::tests_field::inverse_vartime_test::<$params>();
            }

            #[test]
            fn [<test_ $field _batch_inversion>]() {
                crate::fields::tests_field::batch_inversion_test::<$params>();
            }

            #[test]
            fn [<test_ $field _backend>]() {
                crate::fields::tests_field::backend_test::<$params>();
            }

            #[test]
            fn [<test_ $field _serialization>]() {
                crate::fields::tests_field::serialization_test::<$params>();
            }

            #[test]
            fn [<test_ $field _from_str>]() {
                crate::fields::tests_field::from_str_test::<$params>();
            }

            #[test]
            fn [<test_ $field _ordering>]() {
                crate::fields::tests_field::ordering_test::<$params>();
            }
        }
    };
}
