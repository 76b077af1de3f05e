//! Regex-only segment parser
//!
//! A lightweight alternative to the full grammar for the common shape
//! `/tag[@key='value'][N]/...`. One leading slash is dropped, the rest is split on `/`
//! and every segment must match the whole pattern below. Segments that don't match are
//! skipped silently; this parser never fails.

use super::ast::{Comparison, Condition, PathStep};
use once_cell::sync::Lazy;
use regex::Regex;

/// `tag`, then an optional `[@key='value']`, then an optional `[N]`
static SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)(?:\[@(\w+)='([^']+)'\])?(?:\[(\d+)\])?$")
        .expect("segment pattern is valid")
});

/// Split a path into steps using the segment pattern
pub fn parse_segments(path: &str) -> Vec<PathStep> {
    let absolute = path.starts_with('/');
    let path = path.strip_prefix('/').unwrap_or(path);

    path.split('/')
        .filter_map(|segment| {
            let caps = SEGMENT.captures(segment)?;
            let mut conditions = Vec::new();
            if let (Some(key), Some(value)) = (caps.get(2), caps.get(3)) {
                conditions.push(Condition::attribute(
                    key.as_str(),
                    Comparison::Eq,
                    value.as_str(),
                ));
            }
            if let Some(ordinal) = caps.get(4) {
                conditions.push(Condition::position(ordinal.as_str().parse().unwrap_or(1)));
            }

            let step = PathStep::child(&caps[1]).absolute(absolute);
            Some(if conditions.is_empty() {
                step
            } else {
                step.with_predicate(conditions)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segments() {
        let steps = parse_segments("/form/button");
        assert_eq!(
            steps,
            vec![
                PathStep::child("form").absolute(true),
                PathStep::child("button").absolute(true),
            ]
        );
    }

    #[test]
    fn test_attribute_and_ordinal() {
        let steps = parse_segments("list/item[@name='first'][2]");
        assert_eq!(
            steps[1],
            PathStep::child("item").with_predicate(vec![
                Condition::attribute("name", Comparison::Eq, "first"),
                Condition::position(2),
            ])
        );
    }

    #[test]
    fn test_non_matching_segments_are_skipped() {
        let steps = parse_segments("form/*/bad[@x=1]/button");
        let tags: Vec<_> = steps.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["form", "button"]);
    }

    #[test]
    fn test_empty_path() {
        assert!(parse_segments("").is_empty());
        assert!(parse_segments("/").is_empty());
    }

    #[test]
    fn test_ordinal_overflow_falls_back_to_one() {
        let steps = parse_segments("row[99999999999999999999999]");
        assert_eq!(steps[0].conditions(), &[Condition::position(1)]);
    }
}
