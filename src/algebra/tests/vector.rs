use crate::algebra::*;
use std::iter::zip;

#[test]
fn test_copy_from() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![0.; 4];
    y.copy_from(&x);
    assert_eq!(x, y);
}

#[test]
fn test_select() {
    let x = [1., 2., 3., 4., 5.];
    let idx = [true, false, true, true, false];
    let y = x.select(&idx);
    assert_eq!(y, vec![1., 3., 4.]);
}

#[test]
fn test_scalarop() {
    let mut x = vec![3., 0., 2., 1.];
    x.scalarop(|x| -2. * x);
    assert_eq!(x, vec![-6., 0., -4., -2.]);
}

#[test]
fn test_clip() {
    let mut x = [-2., 0.5, 3.];
    x.clip(0., 1.);
    assert_eq!(x, [0., 0.5, 1.]);
}

#[test]
fn test_rsqrt() {
    let mut x = [4., 16., 1.];
    x.rsqrt();
    assert_eq!(x, [0.5, 0.25, 1.]);
}

#[test]
fn test_norms() {
    let x = [3., -4., 0.];
    assert_eq!(x.norm(), 5.);
    assert_eq!(x.norm_inf(), 4.);
    assert_eq!(x.norm_scaled(&[1., 0., 7.]), 3.);
    assert_eq!(x.norm_inf_scaled(&[2., 1., 1.]), 6.);

    // NaN is never hidden by the infinity norm
    let y = [1., f64::NAN, 2.];
    assert!(y.norm_inf().is_nan());
    assert!(!y.is_finite());
}

#[test]
fn test_min_max_mean() {
    let x = vec![1., 2., 3., 4., 5.];
    assert_eq!(x.minimum(), 1.);
    assert_eq!(x.maximum(), 5.);
    assert_eq!(x.mean(), 3.);
    assert_eq!(x[0..0].mean(), 0.);
    assert_eq!(x[0..0].maximum(), f64::NEG_INFINITY);
}

#[test]
fn test_axpby() {
    let mut y = vec![1., 2.];
    y.axpby(2., &[3., 4.], -1.);
    assert_eq!(y, vec![5., 6.]);

    let mut w = vec![0.; 2];
    w.waxpby(1., &[1., 1.], -2., &[3., 4.]);
    assert_eq!(w, vec![-5., -7.]);
}

#[test]
fn test_dot() {
    let maxlen = 128 * 7 + 1; //awkward length to test base case
    let x: Vec<f64> = (1..=maxlen).map(|x| x as f64).collect();
    let y: Vec<f64> = (1..=maxlen).map(|y| (y as f64 - 3.0) / 2.0).collect();

    for i in 0..=x.len() {
        let xt = &x[0..i];
        let yt = &y[0..i];
        let dot1 = zip(xt, yt).fold(0.0, |acc, (&x, &y)| acc + x * y);
        let dot2 = xt.dot(yt);
        assert_eq!(dot1, dot2);
    }
}

#[test]
fn test_dot_shifted() {
    let z = vec![1., 2., 3.];
    let s = vec![4., 5., 6.];
    let dz = vec![1.; 3];
    let ds = vec![0.5; 3];
    let α = 0.5;
    let dot1 = <[f64] as VectorMath>::dot_shifted(&z, &s, &dz, &ds, α);
    let dot2 = z.dot(&s) + α * z.dot(&ds) + α * s.dot(&dz) + α * α * dz.dot(&ds);
    assert_eq!(dot1, dot2);
}
