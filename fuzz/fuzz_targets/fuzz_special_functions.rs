//! Fuzz target for the distribution functions.
//!
//! For finite, in-domain inputs every CDF must stay within [0, 1] (up to
//! rounding) and the incomplete beta continued fraction must terminate.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tp_math::{normal_cdf, reg_inc_beta, student_t_cdf, student_t_two_tailed_p};

#[derive(Debug, Arbitrary)]
struct Input {
    a: f64,
    b: f64,
    x: f64,
    t: f64,
    df: f64,
}

const SLACK: f64 = 1e-9;

fn in_unit(p: f64) -> bool {
    p.is_nan() || (-SLACK..=1.0 + SLACK).contains(&p)
}

fuzz_target!(|input: Input| {
    if input.a.is_finite() && input.b.is_finite() && input.a >= 1e-3 && input.b >= 1e-3 {
        let x = input.x.clamp(0.0, 1.0);
        if x.is_finite() {
            assert!(in_unit(reg_inc_beta(input.a.min(1e6), input.b.min(1e6), x)));
        }
    }

    if input.t.is_finite() && input.df.is_finite() && input.df >= 1.0 {
        let df = input.df.min(1e6);
        assert!(in_unit(student_t_cdf(input.t, df)));
        assert!(in_unit(student_t_two_tailed_p(input.t, df)));
    }

    if input.t.is_finite() {
        assert!(in_unit(normal_cdf(input.t)));
    }
});
