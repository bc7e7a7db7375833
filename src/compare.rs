//! Equivalence engine: decides whether two captured responses are "equal
//! enough" under a configurable policy.

use similar::TextDiff;

use crate::error::ValidationError;
use crate::response::Response;

/// Which parts of two responses are compared, and how strictly.
///
/// A threshold of exactly `1.0` means byte-for-byte body equality; anything
/// below switches to a fuzzy similarity ratio, which exists because some
/// responses (directory listings, timing-dependent pages) legitimately vary
/// between implementations yet should still count as close enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonPolicy {
    pub check_code: bool,
    pub check_body: bool,
    pub body_similarity_threshold: f64,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            check_code: true,
            check_body: true,
            body_similarity_threshold: 1.0,
        }
    }
}

impl ComparisonPolicy {
    /// Compare the status code only, ignoring the body.
    pub fn status_only() -> Self {
        Self {
            check_body: false,
            ..Self::default()
        }
    }

    /// Full comparison with a fuzzy body threshold.
    ///
    /// # Errors
    ///
    /// Returns an error when `threshold` is outside `[0, 1]`.
    pub fn fuzzy(threshold: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ValidationError::ThresholdOutOfRange { value: threshold });
        }
        Ok(Self {
            body_similarity_threshold: threshold,
            ..Self::default()
        })
    }
}

/// Normalized similarity of two texts in `[0, 1]`, rounded to 2 decimals.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let ratio = f64::from(TextDiff::from_chars(a, b).ratio());
    (ratio * 100.0).round() / 100.0
}

pub fn responses_equal(a: &Response, b: &Response, policy: &ComparisonPolicy) -> bool {
    let code_ok = !policy.check_code || a.status == b.status;
    let body_ok =
        !policy.check_body || bodies_equal(&a.body, &b.body, policy.body_similarity_threshold);
    code_ok && body_ok
}

pub(crate) fn bodies_equal(a: &str, b: &str, threshold: f64) -> bool {
    if threshold >= 1.0 {
        a == b
    } else {
        similarity_ratio(a, b) >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(status: i32, body: &str) -> Response {
        Response::new(status, body)
    }

    #[test]
    fn exact_match_passes() {
        let policy = ComparisonPolicy::default();
        assert!(responses_equal(&res(200, "hi"), &res(200, "hi"), &policy));
    }

    #[test]
    fn exact_mode_is_symmetric() {
        let policy = ComparisonPolicy::default();
        let a = res(200, "alpha");
        let b = res(200, "beta");
        assert_eq!(
            responses_equal(&a, &b, &policy),
            responses_equal(&b, &a, &policy)
        );
        let c = res(200, "alpha");
        assert_eq!(
            responses_equal(&a, &c, &policy),
            responses_equal(&c, &a, &policy)
        );
    }

    #[test]
    fn code_mismatch_fails_unless_disabled() {
        let a = res(200, "same");
        let b = res(404, "same");
        assert!(!responses_equal(&a, &b, &ComparisonPolicy::default()));
        let policy = ComparisonPolicy {
            check_code: false,
            ..ComparisonPolicy::default()
        };
        assert!(responses_equal(&a, &b, &policy));
    }

    #[test]
    fn body_mismatch_fails_unless_disabled() {
        let a = res(404, "one body");
        let b = res(404, "another body");
        assert!(!responses_equal(&a, &b, &ComparisonPolicy::default()));
        assert!(responses_equal(&a, &b, &ComparisonPolicy::status_only()));
    }

    #[test]
    fn fuzzy_mode_accepts_near_identical_bodies() -> Result<(), String> {
        let a = res(200, "listing of files: a.txt b.txt generated at 10:00:01");
        let b = res(200, "listing of files: a.txt b.txt generated at 10:00:02");
        let strict = ComparisonPolicy::default();
        let fuzzy = ComparisonPolicy::fuzzy(0.9).map_err(|err| err.to_string())?;
        assert!(!responses_equal(&a, &b, &strict));
        assert!(responses_equal(&a, &b, &fuzzy));
        Ok(())
    }

    #[test]
    fn threshold_is_monotonic() -> Result<(), String> {
        let a = "abcdefgh";
        let b = "abcdefxx";
        let ratio = similarity_ratio(a, b);
        for threshold in [0.0, 0.25, 0.5, 0.75] {
            if threshold <= ratio {
                assert!(bodies_equal(a, b, threshold));
            }
        }
        // Anything a high threshold accepts, every lower threshold accepts.
        if bodies_equal(a, b, 0.7) {
            assert!(bodies_equal(a, b, 0.3));
        }
        Ok(())
    }

    #[test]
    fn ratio_bounds_and_rounding() {
        assert!(similarity_ratio("same", "same") >= 1.0);
        assert!(similarity_ratio("abc", "xyz") < 0.01);
        let ratio = similarity_ratio("abcd", "abcx");
        assert!((0.0..=1.0).contains(&ratio));
        // Rounded to 2 decimals.
        assert!((ratio * 100.0 - (ratio * 100.0).round()).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_rejects_out_of_range_threshold() {
        assert!(ComparisonPolicy::fuzzy(1.5).is_err());
        assert!(ComparisonPolicy::fuzzy(-0.1).is_err());
        assert!(ComparisonPolicy::fuzzy(0.0).is_ok());
        assert!(ComparisonPolicy::fuzzy(1.0).is_ok());
    }

    #[test]
    fn timeout_sentinel_is_comparable() {
        let policy = ComparisonPolicy::default();
        assert!(responses_equal(
            &Response::timeout(),
            &Response::timeout(),
            &policy
        ));
        assert!(!responses_equal(
            &Response::timeout(),
            &res(200, "ok"),
            &policy
        ));
    }
}
