//! Student's t distribution.

use super::beta::reg_inc_beta;

/// CDF of Student's t with `df` degrees of freedom.
///
/// `P(T <= t) = 1 - I_x(df/2, 1/2) / 2` for `t >= 0` and `I_x(df/2, 1/2) / 2`
/// otherwise, with `x = df / (df + t^2)`.
pub fn student_t_cdf(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    let x = df / (df + t * t);
    let beta = reg_inc_beta(df / 2.0, 0.5, x);
    if t >= 0.0 {
        1.0 - 0.5 * beta
    } else {
        0.5 * beta
    }
}

/// Two-tailed p-value `2 * P(T <= -|t|)`.
pub fn student_t_two_tailed_p(t: f64, df: f64) -> f64 {
    2.0 * student_t_cdf(-t.abs(), df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn symmetric_about_zero() {
        assert!(approx_eq(student_t_cdf(0.0, 7.0), 0.5, 1e-14));
        for df in [1.0, 4.0, 30.0] {
            let lower = student_t_cdf(-1.3, df);
            let upper = student_t_cdf(1.3, df);
            assert!(approx_eq(lower + upper, 1.0, 1e-13), "df={df}");
        }
    }

    #[test]
    fn cauchy_case() {
        // df = 1 is Cauchy: F(t) = 1/2 + atan(t)/pi
        let t: f64 = 2.0;
        let expected = 0.5 + t.atan() / std::f64::consts::PI;
        assert!(approx_eq(student_t_cdf(t, 1.0), expected, 1e-12));
    }

    #[test]
    fn df_two_closed_form() {
        // df = 2: F(t) = 1/2 + t / (2 sqrt(2 + t^2))
        let t: f64 = -1.5;
        let expected = 0.5 + t / (2.0 * (2.0 + t * t).sqrt());
        assert!(approx_eq(student_t_cdf(t, 2.0), expected, 1e-12));
    }

    #[test]
    fn published_two_tailed_values() {
        // t = 2.0, df = 10 -> p = 0.0733880
        assert!(approx_eq(student_t_two_tailed_p(2.0, 10.0), 0.073_388_0, 1e-6));
        // t = 2.228, df = 10 -> p ~ 0.05 (critical value)
        assert!(approx_eq(student_t_two_tailed_p(2.228, 10.0), 0.05, 1e-4));
        // t = 1.96, df large -> p ~ 0.05
        assert!(approx_eq(student_t_two_tailed_p(1.96, 10_000.0), 0.05, 1e-3));
    }

    #[test]
    fn infinite_t_is_certain() {
        assert_eq!(student_t_cdf(f64::INFINITY, 5.0), 1.0);
        assert_eq!(student_t_cdf(f64::NEG_INFINITY, 5.0), 0.0);
        assert_eq!(student_t_two_tailed_p(f64::INFINITY, 5.0), 0.0);
    }

    #[test]
    fn invalid_df_is_nan() {
        assert!(student_t_cdf(1.0, 0.0).is_nan());
        assert!(student_t_cdf(1.0, -3.0).is_nan());
    }
}
