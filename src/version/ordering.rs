//! Ordering of upstream version strings

use std::cmp::Ordering;

use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Strips a leading `v` and pads "1" or "1.2" with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2.3-rc1" -> Version(1, 2, 3-rc1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let (core, suffix) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    let normalized = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Text(&'a str),
    Number(u64),
}

fn segments(version: &str) -> impl Iterator<Item = Segment<'_>> {
    version
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_or(Segment::Text(s), Segment::Number))
}

/// Compares two versions
///
/// Uses semver precedence when both parse, otherwise compares dot-separated
/// segments with numeric segments compared as numbers ("0.1.16" > "0.1.9").
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if let (Some(va), Some(vb)) = (parse_version(a), parse_version(b)) {
        return va.cmp(&vb).then_with(|| a.cmp(b));
    }
    segments(a).cmp(segments(b)).then_with(|| a.cmp(b))
}

/// Highest version according to `compare_versions`
pub fn latest_version<'a, I>(versions: I) -> Option<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    versions.into_iter().max_by(|a, b| compare_versions(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some("1.0.0"))]
    #[case("1.2", Some("1.2.0"))]
    #[case("v1.2.3", Some("1.2.3"))]
    #[case("1.2-rc1", Some("1.2.0-rc1"))]
    #[case("1.2.3.4", None)]
    #[case("release", None)]
    fn parse_version_returns_expected(#[case] version: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            parse_version(version).map(|v| v.to_string()),
            expected.map(|s| s.to_string())
        );
    }

    #[rstest]
    #[case("0.1.16", "0.1.9", Ordering::Greater)]
    #[case("0.1", "0.1.1", Ordering::Less)]
    #[case("1.0.0-rc1", "1.0.0", Ordering::Less)]
    #[case("2.0.0.1", "2.0.0.10", Ordering::Less)]
    #[case("2.0.0.10", "2.0.0.9", Ordering::Greater)]
    #[case("1.0", "1.0", Ordering::Equal)]
    fn compare_versions_returns_expected(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(a, b), expected);
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec!["0.1.16", "0.1.9", "0.1.10"], Some("0.1.16"))]
    #[case(vec!["1.0", "1.0.1"], Some("1.0.1"))]
    #[case(vec!["v2", "1.0"], Some("v2"))]
    #[case(vec!["1.2.3.4", "1.2.3.10", "1.2.3.9"], Some("1.2.3.10"))]
    fn latest_version_returns_expected(
        #[case] versions: Vec<&str>,
        #[case] expected: Option<&str>,
    ) {
        let versions: Vec<String> = versions.into_iter().map(|s| s.to_string()).collect();
        assert_eq!(latest_version(&versions).map(String::as_str), expected);
    }
}
