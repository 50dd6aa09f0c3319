use musou_shooter::score::*;

#[test]
fn credit_accumulates() {
    let mut s = Score::default();
    s.credit(10);
    s.credit(1);
    assert_eq!(s.value(), 11);
}

#[test]
fn at_least_admits_the_exact_cost() {
    let mut s = Score::new(50);
    assert!(s.try_spend(50, Threshold::AtLeast(50)));
    assert_eq!(s.value(), 0);
}

#[test]
fn above_rejects_the_exact_cost() {
    let mut s = Score::new(100);
    assert!(!s.try_spend(100, Threshold::Above(100)));
    assert_eq!(s.value(), 100);
    s.credit(1);
    assert!(s.try_spend(100, Threshold::Above(100)));
    assert_eq!(s.value(), 1);
}

#[test]
fn rejected_spend_leaves_score_untouched() {
    let mut s = Score::new(199);
    assert!(!s.try_spend(200, Threshold::AtLeast(200)));
    assert_eq!(s.value(), 199);
}

#[test]
fn debit_never_goes_negative() {
    let mut s = Score::new(3);
    s.debit(10);
    assert_eq!(s.value(), 0);
}
