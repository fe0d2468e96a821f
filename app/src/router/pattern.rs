//! Route pattern language: literal segments and `:name` parameters.

use super::dispatcher::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `/scrutin/:numero`.
///
/// A parameter occupies a whole segment and matches any non-empty run of
/// characters other than `/`. Matching is exact: `/deputes/` does not match
/// `/deputes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl RoutePattern {
    /// # Errors
    /// Returns [`RouteError`] when the pattern does not start with `/` or a
    /// `:` segment has no valid name.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash {
                pattern: pattern.to_string(),
            });
        };

        let segments = rest
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if is_param_name(name) => Ok(Segment::Param(name.to_string())),
                Some(_) => Err(RouteError::InvalidParameter {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                }),
                None => Ok(Segment::Literal(segment.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in pattern order.
    #[must_use]
    pub fn param_names(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.clone()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Positional parameter values when `path` matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Vec<String>> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut values = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(_) if !part.is_empty() => values.push(part.to_string()),
                _ => return None,
            }
        }
        Some(values)
    }
}
