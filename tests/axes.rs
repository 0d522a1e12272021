//! Integration tests for the axis kinds: index boundaries, edge
//! intervals, equality, and reproducible text forms.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use rstest::rstest;

use ndhist::{Axis, CategoryAxis, CircularAxis, IntegerAxis, RegularAxis, VariableAxis};

// ============================================================================
// Regular
// ============================================================================

#[rstest]
#[case(-1.0, -1)]
#[case(0.99, -1)]
#[case(1.0, 0)]
#[case(1.249, 0)]
#[case(1.25, 1)]
#[case(1.499, 1)]
#[case(1.5, 2)]
#[case(1.749, 2)]
#[case(1.75, 3)]
#[case(1.999, 3)]
#[case(2.0, 4)]
#[case(20.0, 4)]
fn regular_index_boundaries(#[case] x: f64, #[case] expected: i32) {
    let a = RegularAxis::new(4, 1.0, 2.0).unwrap();
    assert_eq!(a.index(x), expected);
}

#[rstest]
#[case(-1.0, -1)]
#[case(0.99, -1)]
#[case(1.0, 0)]
#[case(9.99, 0)]
#[case(10.0, 1)]
#[case(99.9, 1)]
#[case(100.0, 2)]
#[case(1000.0, 2)]
fn log_index_boundaries(#[case] x: f64, #[case] expected: i32) {
    let a = RegularAxis::log(2, 1.0, 100.0).unwrap();
    assert_eq!(a.index(x), expected);
}

#[rstest]
#[case(-1.0, -1)]
#[case(0.99, -1)]
#[case(1.0, 0)]
#[case(3.99, 0)]
#[case(4.0, 1)]
#[case(8.99, 1)]
#[case(9.0, 2)]
#[case(1000.0, 2)]
fn pow_index_boundaries(#[case] x: f64, #[case] expected: i32) {
    let a = RegularAxis::pow(2, 1.0, 9.0, 0.5).unwrap();
    assert_eq!(a.index(x), expected);
}

#[test]
fn regular_bins_bracket_the_range() {
    let edges = [1.0, 1.25, 1.5, 1.75, 2.0];
    let a = RegularAxis::new(4, 1.0, 2.0).unwrap();
    for i in 0..4 {
        let bin = a.bin(i as i32).unwrap();
        assert_relative_eq!(bin.lo, edges[i]);
        assert_relative_eq!(bin.hi, edges[i + 1]);
    }
    assert_eq!(a.bin(-1).unwrap().lo, f64::NEG_INFINITY);
    assert_eq!(a.bin(4).unwrap().hi, f64::INFINITY);

    let collected: Vec<_> = a.iter_bins().collect();
    assert_eq!(collected.len(), 4);
    assert_relative_eq!(collected[2].lo, 1.5);
}

#[test]
fn log_and_pow_edges_follow_the_transform() {
    let a = RegularAxis::log(2, 1.0, 100.0).unwrap();
    assert_relative_eq!(a.bin(0).unwrap().lo, 1.0);
    assert_relative_eq!(a.bin(1).unwrap().lo, 10.0, max_relative = 1e-12);
    assert_relative_eq!(a.bin(1).unwrap().hi, 100.0);

    let p = RegularAxis::pow(2, 1.0, 9.0, 0.5).unwrap();
    assert_relative_eq!(p.bin(0).unwrap().lo, 1.0);
    assert_relative_eq!(p.bin(1).unwrap().lo, 4.0, max_relative = 1e-12);
    assert_relative_eq!(p.bin(1).unwrap().hi, 9.0);
}

#[test]
fn nan_maps_to_underflow() {
    let a = RegularAxis::new(4, 1.0, 2.0).unwrap();
    assert_eq!(a.index(f64::NAN), -1);
    // log of a negative number is NaN as well
    let l = RegularAxis::log(2, 1.0, 100.0).unwrap();
    assert_eq!(l.index(-5.0), -1);
    assert_eq!(l.index(0.0), -1);
}

// ============================================================================
// Circular
// ============================================================================

#[rstest]
#[case(0.99 - 2.0 * PI, 3)]
#[case(0.99 - 1.5 * PI, 0)]
#[case(0.99 - PI, 1)]
#[case(0.99 - 0.5 * PI, 2)]
#[case(0.99, 3)]
#[case(1.0, 0)]
#[case(1.01, 0)]
#[case(0.99 + 0.5 * PI, 0)]
#[case(1.0 + 0.5 * PI, 1)]
#[case(1.0 + PI, 2)]
#[case(1.0 + 1.5 * PI, 3)]
#[case(1.0 + 2.0 * PI, 0)]
#[case(1.0 + 2.5 * PI, 1)]
fn circular_index_wraps(#[case] x: f64, #[case] expected: i32) {
    let a = CircularAxis::new(4, 1.0).unwrap();
    assert_eq!(a.index(x), expected);
}

#[test]
fn circular_edges_have_no_infinities() {
    let a = CircularAxis::new(4, 1.0).unwrap();
    let expected = [
        1.0,
        1.0 + 0.5 * PI,
        1.0 + PI,
        1.0 + 1.5 * PI,
        1.0 + 2.0 * PI,
    ];
    for i in 0..4 {
        let bin = a.bin(i).unwrap();
        assert_relative_eq!(bin.lo, expected[i as usize]);
        assert_relative_eq!(bin.hi, expected[i as usize + 1]);
    }
    assert!(a.bin(-1).is_none());
    assert!(a.bin(4).is_none());
}

// ============================================================================
// Variable
// ============================================================================

#[rstest]
#[case(-10.0, -1)]
#[case(-0.11, -1)]
#[case(-0.1, 0)]
#[case(0.0, 0)]
#[case(0.19, 0)]
#[case(0.2, 1)]
#[case(0.21, 1)]
#[case(0.29, 1)]
#[case(0.3, 2)]
#[case(10.0, 2)]
fn variable_index_brackets_edges(#[case] x: f64, #[case] expected: i32) {
    let a = VariableAxis::new(vec![-0.1, 0.2, 0.3]).unwrap();
    assert_eq!(a.index(x), expected);
}

#[test]
fn variable_bins_and_iteration() {
    let edges = [-0.1, 0.2, 0.3];
    let a = VariableAxis::new(edges.to_vec()).unwrap();
    assert_eq!(a.num_bins(), 2);
    for i in 0..2 {
        let bin = a.bin(i as i32).unwrap();
        assert_eq!(bin.lo, edges[i]);
        assert_eq!(bin.hi, edges[i + 1]);
    }
    assert_eq!(a.bin(-1).unwrap().lo, f64::NEG_INFINITY);
    assert_eq!(a.bin(2).unwrap().hi, f64::INFINITY);
    assert_eq!(a.iter_bins().count(), 2);
}

// ============================================================================
// Integer
// ============================================================================

#[rstest]
#[case(-3.0, -1)]
#[case(-2.0, -1)]
#[case(-1.0, 0)]
#[case(0.0, 1)]
#[case(1.0, 2)]
#[case(2.0, 3)]
#[case(3.0, 4)]
#[case(4.0, 4)]
fn integer_index_clips(#[case] x: f64, #[case] expected: i32) {
    let a = IntegerAxis::new(-1, 3).unwrap();
    assert_eq!(a.index(x), expected);
}

#[test]
fn integer_bins_and_sentinels() {
    let a = IntegerAxis::new(-1, 3).unwrap();
    assert_eq!(a.num_bins(), 4);
    let firsts: Vec<f64> = a.iter_bins().map(|b| b.lo).collect();
    assert_eq!(firsts, vec![-1.0, 0.0, 1.0, 2.0]);
    assert_eq!(a.bin(-1).unwrap().lo, -(2f64.powi(31)) + 1.0);
    assert_eq!(a.bin(4).unwrap().hi, 2f64.powi(31) - 1.0);
}

// ============================================================================
// Category
// ============================================================================

#[test]
fn category_membership_lookup() {
    let a = CategoryAxis::new(vec![1, 2, 3]).unwrap();
    assert_eq!(a.num_bins(), 3);
    for (i, v) in [1i64, 2, 3].into_iter().enumerate() {
        assert_eq!(a.value(i), Some(v));
        assert_eq!(a.index_of(v), i as i32);
    }
    // outside the set: past the last bin
    assert_eq!(a.index_of(0), 3);
    assert_eq!(a.index(2.5), 3);
    assert_eq!(a.iter_values().collect::<Vec<_>>(), vec![1, 2, 3]);
}

// ============================================================================
// Equality and text forms
// ============================================================================

#[test]
fn equality_distinguishes_kind_args_label_and_uoflow() {
    let a: Axis = RegularAxis::new(4, 1.0, 2.0).unwrap().into();
    assert_eq!(a, RegularAxis::new(4, 1.0, 2.0).unwrap().into());
    assert_ne!(a, RegularAxis::new(3, 1.0, 2.0).unwrap().into());
    assert_ne!(a, RegularAxis::log(4, 1.0, 2.0).unwrap().into());

    let i: Axis = IntegerAxis::new(-1, 2).unwrap().into();
    assert_ne!(
        i,
        IntegerAxis::new(-1, 2).unwrap().with_label("ia").into()
    );
    assert_ne!(
        IntegerAxis::new(-1, 2).unwrap().with_uoflow(false),
        IntegerAxis::new(-1, 2).unwrap()
    );

    assert_ne!(
        CircularAxis::new(4, 1.0).unwrap(),
        CircularAxis::new(4, 0.0).unwrap()
    );
    assert_eq!(
        CategoryAxis::new(vec![1, 2, 3]).unwrap(),
        CategoryAxis::new(vec![1, 2, 3]).unwrap()
    );
}

#[rstest]
#[case::regular("regular(4, 1.1, 2.2)")]
#[case::regular_label_uoflow("regular(4, 1.1, 2.2, label=\"ra\", uoflow=false)")]
#[case::regular_log("regular_log(4, 1.1, 2.2)")]
#[case::regular_pow("regular_pow(4, 1.1, 2.2, 0.5)")]
#[case::circular("circular(4, phase=1)")]
#[case::variable("variable(-0.1, 0.2, 0.3, label=\"va\")")]
#[case::integer("integer(-1, 1, uoflow=false)")]
#[case::category("category(1, 2, 3)")]
fn text_form_is_reproducible(#[case] expected: &str) {
    let axis: Axis = match expected.split('(').next().unwrap() {
        "regular" if expected.contains("label") => RegularAxis::new(4, 1.1, 2.2)
            .unwrap()
            .with_label("ra")
            .with_uoflow(false)
            .into(),
        "regular" => RegularAxis::new(4, 1.1, 2.2).unwrap().into(),
        "regular_log" => RegularAxis::log(4, 1.1, 2.2).unwrap().into(),
        "regular_pow" => RegularAxis::pow(4, 1.1, 2.2, 0.5).unwrap().into(),
        "circular" => CircularAxis::new(4, 1.0).unwrap().into(),
        "variable" => VariableAxis::new(vec![-0.1, 0.2, 0.3])
            .unwrap()
            .with_label("va")
            .into(),
        "integer" => IntegerAxis::new(-1, 1).unwrap().with_uoflow(false).into(),
        "category" => CategoryAxis::new(vec![1, 2, 3]).unwrap().into(),
        other => panic!("unknown case {other}"),
    };
    assert_eq!(axis.to_string(), expected);
}

// ============================================================================
// Constructor rejections
// ============================================================================

#[test]
fn constructors_reject_domain_errors() {
    assert!(RegularAxis::new(0, 1.0, 2.0).is_err());
    assert!(RegularAxis::new(1, 2.0, 1.0).is_err());
    assert!(RegularAxis::log(1, -1.0, 2.0).is_err());
    assert!(RegularAxis::pow(1, 1.0, 2.0, f64::NAN).is_err());
    assert!(CircularAxis::new(0, 0.0).is_err());
    assert!(CircularAxis::new(4, f64::INFINITY).is_err());
    assert!(VariableAxis::new(vec![1.0]).is_err());
    assert!(VariableAxis::new(vec![0.0, 2.0, 1.0]).is_err());
    assert!(IntegerAxis::new(2, -1).is_err());
    assert!(CategoryAxis::new(Vec::<i64>::new()).is_err());
    assert!(CategoryAxis::new(vec![1, 1]).is_err());
}
