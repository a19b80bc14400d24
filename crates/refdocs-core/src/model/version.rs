use std::cmp::Ordering;

/// Release track of a Kubernetes-style API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stability {
    Alpha,
    Beta,
    Ga,
}

/// Sortable form of an API version string such as `v1`, `v2beta1` or `v1alpha3`.
///
/// Greater means newer. GA outranks beta, beta outranks alpha, then the
/// larger major version wins, then the larger pre-release number.
/// Strings outside the `v<N>[alpha|beta<M>]` shape rank below every
/// recognized version and compare lexically among themselves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionPrecedence {
    Unrecognized(String),
    Known {
        stability: Stability,
        major: u64,
        minor: u64,
    },
}

impl VersionPrecedence {
    pub fn parse(version: &str) -> Self {
        Self::parse_known(version).unwrap_or_else(|| Self::Unrecognized(version.to_string()))
    }

    fn parse_known(version: &str) -> Option<Self> {
        let rest = version.strip_prefix('v')?;
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (major, qualifier) = rest.split_at(digits_end);
        let major = parse_number(major)?;

        let (stability, number) = if qualifier.is_empty() {
            return Some(Self::Known {
                stability: Stability::Ga,
                major,
                minor: 0,
            });
        } else if let Some(n) = qualifier.strip_prefix("beta") {
            (Stability::Beta, n)
        } else if let Some(n) = qualifier.strip_prefix("alpha") {
            (Stability::Alpha, n)
        } else {
            return None;
        };

        let minor = if number.is_empty() {
            0
        } else {
            parse_number(number)?
        };
        Some(Self::Known {
            stability,
            major,
            minor,
        })
    }

    pub fn is_ga(&self) -> bool {
        matches!(
            self,
            Self::Known {
                stability: Stability::Ga,
                ..
            }
        )
    }
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Order two version strings newest first.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    VersionPrecedence::parse(b).cmp(&VersionPrecedence::parse(a))
}
