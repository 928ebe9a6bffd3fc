//! Platform version gating.
//!
//! A minimum spec is either a single dotted version (`"15.0"`), a range
//! (`"12.5.6 <13"`), or a comma-separated disjunction of ranges where every
//! clause but the last must carry an upper bound
//! (`"12.5.6 <13, 13.6.1 <14, 15.7.1"`). Malformed specs fail closed.

use std::sync::OnceLock;

use regex::Regex;

/// Does `version` satisfy `minimum`?
///
/// Empty or non-numeric inputs fail. Equality satisfies the minimum.
pub fn version_passes(version: &str, minimum: &str) -> bool {
    let version = version.trim();
    let minimum = minimum.trim();
    if version.is_empty() || minimum.is_empty() {
        return false;
    }
    if minimum.contains(',') {
        let clauses: Vec<&str> = minimum.split(',').map(str::trim).collect();
        let last = clauses.len() - 1;
        // Structural rule: every clause but the last must be a two-sided
        // range. A violation invalidates the whole spec.
        if clauses
            .iter()
            .take(last)
            .any(|clause| !clause.contains('<'))
        {
            return false;
        }
        return clauses.iter().any(|clause| clause_passes(version, clause));
    }
    clause_passes(version, minimum)
}

fn clause_passes(version: &str, clause: &str) -> bool {
    if clause.contains('<') {
        range_passes(version, clause)
    } else {
        lower_bound_passes(version, clause)
    }
}

fn range_passes(version: &str, range: &str) -> bool {
    let mut parts = range.split('<');
    let min = parts.next().unwrap_or("").trim();
    let max = match parts.next() {
        Some(max) => max.trim(),
        None => return false,
    };
    if parts.next().is_some() {
        // More than one '<' separator: malformed range.
        return false;
    }
    // The last conjunct runs the bound check with the sides swapped: it
    // holds for any well-formed max at or above `version`, and fails when
    // the max side is not itself a plain dotted version.
    lower_bound_passes(version, min)
        && !lower_bound_passes(version, max)
        && lower_bound_passes(max, version)
}

fn dotted_numeric() -> &'static Regex {
    static DOTTED_RE: OnceLock<Regex> = OnceLock::new();
    DOTTED_RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$").expect("static version pattern"))
}

fn components(s: &str) -> Option<Vec<u64>> {
    if !dotted_numeric().is_match(s) {
        return None;
    }
    s.split('.').map(|c| c.parse().ok()).collect()
}

fn lower_bound_passes(version: &str, minimum: &str) -> bool {
    let (Some(v), Some(m)) = (components(version), components(minimum)) else {
        return false;
    };
    for i in 0..v.len().max(m.len()) {
        let a = v.get(i).copied().unwrap_or(0);
        let b = m.get(i).copied().unwrap_or(0);
        if a != b {
            return a > b;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Plain minimums --

    #[test]
    fn equality_satisfies_minimum() {
        assert!(version_passes("15.0", "15.0"));
        assert!(version_passes("12.5.6", "12.5.6"));
        assert!(version_passes("1", "1"));
    }

    #[test]
    fn missing_trailing_components_are_zero() {
        assert!(version_passes("15", "15.0.0"));
        assert!(version_passes("15.0.0", "15"));
        assert!(!version_passes("15", "15.0.1"));
    }

    #[test]
    fn component_comparison_is_numeric_not_lexical() {
        assert!(version_passes("10.0", "9.9"));
        assert!(version_passes("1.10", "1.9"));
        assert!(!version_passes("1.9", "1.10"));
    }

    #[test]
    fn rejects_non_numeric_inputs() {
        assert!(!version_passes("15.x", "15.0"));
        assert!(!version_passes("15.0", "fifteen"));
        assert!(!version_passes("", "15.0"));
        assert!(!version_passes("15.0", ""));
        assert!(!version_passes("15.0-beta", "15.0"));
    }

    // -- Single ranges --

    #[test]
    fn range_requires_at_least_min_and_below_max() {
        assert!(version_passes("12.5.6", "12.5.6 <13"));
        assert!(version_passes("12.9", "12.5.6 <13"));
        assert!(!version_passes("13", "12.5.6 <13"));
        assert!(!version_passes("12.5.5", "12.5.6 <13"));
    }

    #[test]
    fn range_with_two_separators_is_malformed() {
        assert!(!version_passes("12.6", "12 <13 <14"));
    }

    #[test]
    fn range_with_non_numeric_max_fails() {
        assert!(!version_passes("12.6", "12 <next"));
    }

    // -- Disjunctions --

    const HARD_MINIMUM: &str = "12.5.6 <13, 13.6.1 <14, 14.8.1 <15, 15.7.1";

    #[test]
    fn disjunction_first_clause_boundaries() {
        assert!(!version_passes("12.5.5", HARD_MINIMUM));
        assert!(version_passes("12.5.6", HARD_MINIMUM));
        assert!(version_passes("12.9", HARD_MINIMUM));
        assert!(!version_passes("13.0", HARD_MINIMUM));
    }

    #[test]
    fn disjunction_middle_clause_boundaries() {
        assert!(!version_passes("13.6.0", HARD_MINIMUM));
        assert!(version_passes("13.6.1", HARD_MINIMUM));
        assert!(version_passes("13.9", HARD_MINIMUM));
        assert!(!version_passes("14.0", HARD_MINIMUM));
        assert!(version_passes("14.8.1", HARD_MINIMUM));
        assert!(!version_passes("15.0", HARD_MINIMUM));
    }

    #[test]
    fn disjunction_open_ended_last_clause() {
        assert!(version_passes("15.7.1", HARD_MINIMUM));
        assert!(version_passes("16.0", HARD_MINIMUM));
        assert!(version_passes("17.2.1", HARD_MINIMUM));
    }

    #[test]
    fn non_last_clause_without_upper_bound_invalidates_spec() {
        // "14" would otherwise admit 14.5 — the structural rule fails the
        // whole spec instead.
        assert!(!version_passes("14.5", "12 <13, 14, 15.7.1"));
        assert!(!version_passes("16.0", "12, 15.7.1"));
    }

    #[test]
    fn disjunction_with_well_formed_clauses_still_ors() {
        assert!(version_passes("12.5", "12 <13, 14 <15"));
        assert!(version_passes("14.5", "12 <13, 14 <15"));
        assert!(!version_passes("13.5", "12 <13, 14 <15"));
    }
}
