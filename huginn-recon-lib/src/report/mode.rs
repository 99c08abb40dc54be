use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Shape of a fingerprint report
///
/// Parsing never fails: unknown names select [`ReportMode::BestHit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ReportMode {
    /// Best matching label only (`besthit`, also `simple`)
    #[default]
    BestHit,
    /// Best label with accuracy and hit count (`besthitdetail`)
    BestHitDetail,
    /// Every matched label with its hit count (`list`)
    List,
    /// Top ten ranking with accuracy (`besthitlist`)
    BestHitList,
}

impl ReportMode {
    pub fn parse(name: &str) -> Self {
        match name {
            "besthitdetail" => ReportMode::BestHitDetail,
            "list" => ReportMode::List,
            "besthitlist" => ReportMode::BestHitList,
            _ => ReportMode::BestHit,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ReportMode::BestHit => "besthit",
            ReportMode::BestHitDetail => "besthitdetail",
            ReportMode::List => "list",
            ReportMode::BestHitList => "besthitlist",
        }
    }
}

impl FromStr for ReportMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for ReportMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
