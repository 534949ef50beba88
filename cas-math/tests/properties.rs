use assert_float_eq::assert_float_absolute_eq;
use cas_math::algebra::{
    expr::{Expr, Func, NamedConst, Variable},
    matcher::{matches, substitute},
    simplify::simplify,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn x() -> Expr {
    Expr::var("x")
}

fn num(value: f64) -> Expr {
    Expr::num(value)
}

/// Generates a random expression tree of at most the given depth. Every number in the tree is
/// positive and every exponent is a small whole number, so the value of a constant tree is always
/// a finite positive number.
fn random_tree(rng: &mut StdRng, depth: usize, variables: bool, calls: bool) -> Expr {
    let leaf_only = depth == 0 || rng.gen_bool(0.25);
    if leaf_only {
        return match rng.gen_range(0..6) {
            0 if variables => Expr::var(["x", "y"][rng.gen_range(0..2)]),
            1 => Expr::named(NamedConst::Pi),
            _ => num(rng.gen_range(1..=4) as f64),
        };
    }

    match rng.gen_range(0..4) {
        0 => Expr::add(
            random_tree(rng, depth - 1, variables, calls),
            random_tree(rng, depth - 1, variables, calls),
        ),
        1 => Expr::mul(
            random_tree(rng, depth - 1, variables, calls),
            random_tree(rng, depth - 1, variables, calls),
        ),
        2 if calls => Expr::call(
            [Func::Sin, Func::Cos, Func::Arctan][rng.gen_range(0..3)],
            random_tree(rng, depth - 1, variables, calls),
        ),
        _ => Expr::pow(
            random_tree(rng, depth.min(2) - 1, variables, calls),
            num(rng.gen_range(0..=3) as f64),
        ),
    }
}

#[test]
fn idempotence() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let expr = random_tree(&mut rng, 4, true, true);
        let once = simplify(&expr);
        assert_eq!(simplify(&once), once, "simplifying `{}` twice changed it", expr);
    }
}

#[test]
fn evaluation_preservation() {
    let mut rng = StdRng::seed_from_u64(0xca5);
    for _ in 0..300 {
        let expr = random_tree(&mut rng, 4, false, false);
        let expected = expr.value().unwrap();
        let actual = simplify(&expr).value().unwrap();
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (expected - actual).abs() <= tolerance,
            "`{}` has the value {}, but its simplified form has the value {}",
            expr,
            expected,
            actual,
        );
    }
}

#[test]
fn evaluation_preservation_from_text() {
    let expr = Expr::parse("(2 + 3) * 4^2 / 8 - pi").unwrap();
    assert_float_absolute_eq!(simplify(&expr).value().unwrap(), 10.0 - std::f64::consts::PI);
}

#[test]
fn copy_independence() {
    let original = Expr::parse("sin(x) * (x + 2)").unwrap();
    let mut copy = original.clone();
    copy.set_variable(&Variable::new("x"), &num(1.0));
    drop(copy);
    assert_eq!(original, Expr::parse("sin(x) * (x + 2)").unwrap());
}

#[test]
fn identity_elimination() {
    assert_eq!(simplify(&Expr::add(x(), num(0.0))), x());
    assert_eq!(simplify(&Expr::mul(x(), num(1.0))), x());
    assert_eq!(simplify(&Expr::mul(x(), num(0.0))), num(0.0));
}

#[test]
fn like_term_collection() {
    let expr = Expr::add(Expr::mul(num(2.0), x()), Expr::mul(num(3.0), x()));
    assert_eq!(simplify(&expr), Expr::mul(num(5.0), x()));
}

#[test]
fn distribution() {
    let expr = Expr::mul(Expr::add(x(), num(1.0)), Expr::add(x(), num(-1.0)));
    assert_eq!(simplify(&expr), Expr::add(Expr::pow(x(), num(2.0)), num(-1.0)));
}

#[test]
fn commutative_matching() {
    let expr = Expr::add(num(2.0), x());
    let pattern = Expr::add(Expr::var("A"), num(2.0));
    assert!(matches(&expr, &pattern));
}

#[test]
fn differentiation() {
    let derivative = Expr::mul(x(), x()).differentiate(&Variable::new("x"));
    assert_eq!(simplify(&derivative), Expr::mul(num(2.0), x()));
}

#[test]
fn substitution_round_trip() {
    let sin2 = |arg: Expr| Expr::pow(Expr::call(Func::Sin, arg), num(2.0));
    let cos2 = |arg: Expr| Expr::pow(Expr::call(Func::Cos, arg), num(2.0));

    let expr = Expr::add(sin2(x()), cos2(x()));
    let pattern = Expr::add(sin2(Expr::var("A")), cos2(Expr::var("A")));
    let result = substitute(&expr, &pattern, &num(1.0));
    assert_eq!(result, num(1.0));
    assert_eq!(result.value(), Ok(1.0));
}
