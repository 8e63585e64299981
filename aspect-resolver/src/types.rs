//! Types passed between the resolver and the host that owns the dropdowns.
//! Aspect presets and base resolutions arrive as raw dropdown text and are parsed here.
use crate::{ResolverError, ResolverResult};
use serde::{Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Dropdown entry meaning "leave width and height alone"
pub const NO_SELECTION: &str = "None";

/// Target width to height ratio, kept exactly as written (`16:9` is not reduced)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AspectRatio {
    pub a: u32,
    pub b: u32,
}

impl AspectRatio {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Returns the ratio divided through by its gcd, `32:18` becomes `16:9`
    pub fn reduced(&self) -> AspectRatio {
        let gcd = num::integer::gcd(self.a, self.b);
        AspectRatio {
            a: self.a / gcd,
            b: self.b / gcd,
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}

fn parse_component(text: &str) -> ResolverResult<u32> {
    let text = text.trim();
    let value = text
        .parse::<u32>()
        .map_err(|_| ResolverError::InvalidComponent(text.to_string()))?;
    match value {
        0 => Err(ResolverError::ZeroComponent),
        v => Ok(v),
    }
}

impl TryFrom<&str> for AspectRatio {
    type Error = ResolverError;

    fn try_from(value: &str) -> ResolverResult<Self> {
        let (a, b) = value
            .trim()
            .split_once(':')
            .ok_or_else(|| ResolverError::MissingSeparator(value.to_string()))?;
        Ok(AspectRatio {
            a: parse_component(a)?,
            b: parse_component(b)?,
        })
    }
}

impl FromStr for AspectRatio {
    type Err = ResolverError;

    fn from_str(s: &str) -> ResolverResult<Self> {
        AspectRatio::try_from(s)
    }
}

/// One entry of the aspect preset dropdown
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AspectEntry {
    /// The "no selection" sentinel, never resolves
    NoSelection,
    Ratio(AspectRatio),
    /// Text that is not `a:b` with positive integers
    Malformed(ResolverError),
}

impl AspectEntry {
    pub fn ratio(&self) -> Option<AspectRatio> {
        match self {
            AspectEntry::Ratio(ratio) => Some(*ratio),
            _ => None,
        }
    }
}

impl From<&str> for AspectEntry {
    fn from(value: &str) -> Self {
        if value.trim() == NO_SELECTION {
            return AspectEntry::NoSelection;
        }
        match AspectRatio::try_from(value) {
            Ok(ratio) => AspectEntry::Ratio(ratio),
            Err(e) => AspectEntry::Malformed(e),
        }
    }
}

/// Side length of the square whose area is the pixel budget
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BaseResolution(pub u32);

impl BaseResolution {
    pub fn target_area(&self) -> u64 {
        u64::from(self.0) * u64::from(self.0)
    }
}

impl TryFrom<&str> for BaseResolution {
    type Error = ResolverError;

    fn try_from(value: &str) -> ResolverResult<Self> {
        value
            .trim()
            .parse::<u32>()
            .map(BaseResolution)
            .map_err(|_| ResolverError::InvalidBase(value.to_string()))
    }
}

impl Display for BaseResolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A width/height pair picked by the search, both multiples of 64
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub width: u64,
    pub height: u64,
}

impl Resolution {
    pub fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width * self.height
    }

    /// Ratio actually produced after rounding, reduced by gcd
    pub fn aspect_ratio(&self) -> (u64, u64) {
        let gcd = num::integer::gcd(self.width, self.height);
        (self.width / gcd, self.height / gcd)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{AspectEntry, AspectRatio, BaseResolution, Resolution};
    use crate::ResolverError;
    use std::convert::TryFrom;

    #[test]
    fn parse_plain_ratio() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::new(16, 9)));
        assert_eq!(
            AspectRatio::try_from(" 3 : 2 "),
            Ok(AspectRatio::new(3, 2))
        );
    }

    #[test]
    fn ratio_is_not_reduced_on_parse() {
        let ratio = AspectRatio::try_from("32:18").unwrap();
        assert_eq!(ratio, AspectRatio::new(32, 18));
        assert_eq!(ratio.reduced(), AspectRatio::new(16, 9));
        assert_eq!(ratio.to_string(), "32:18");
    }

    #[test]
    fn parse_rejects_bad_ratios() {
        assert_eq!(
            AspectRatio::try_from("abc"),
            Err(ResolverError::MissingSeparator("abc".to_string()))
        );
        assert_eq!(
            AspectRatio::try_from("16:9:1"),
            Err(ResolverError::InvalidComponent("9:1".to_string()))
        );
        assert_eq!(
            AspectRatio::try_from("-1:2"),
            Err(ResolverError::InvalidComponent("-1".to_string()))
        );
        assert_eq!(AspectRatio::try_from("0:1"), Err(ResolverError::ZeroComponent));
        assert_eq!(AspectRatio::try_from("1:0"), Err(ResolverError::ZeroComponent));
        assert!(AspectRatio::try_from(":").is_err());
        assert!(AspectRatio::try_from("").is_err());
    }

    #[test]
    fn aspect_entry_classification() {
        assert_eq!(AspectEntry::from("None"), AspectEntry::NoSelection);
        assert_eq!(
            AspectEntry::from("4:3").ratio(),
            Some(AspectRatio::new(4, 3))
        );
        match AspectEntry::from("wide") {
            AspectEntry::Malformed(ResolverError::MissingSeparator(text)) => {
                assert_eq!(text, "wide")
            }
            other => panic!("unexpected entry {:?}", other),
        }
        assert_eq!(AspectEntry::from("None").ratio(), None);
    }

    #[test]
    fn parse_base_resolution() {
        assert_eq!(BaseResolution::try_from("1024"), Ok(BaseResolution(1024)));
        assert_eq!(BaseResolution::try_from(" 768 "), Ok(BaseResolution(768)));
        assert_eq!(BaseResolution::try_from("0"), Ok(BaseResolution(0)));
        assert_eq!(
            BaseResolution::try_from("-512"),
            Err(ResolverError::InvalidBase("-512".to_string()))
        );
        assert!(BaseResolution::try_from("big").is_err());
        assert_eq!(BaseResolution(1024).target_area(), 1_048_576);
    }

    #[test]
    fn resolution_formatting() {
        let resolution = Resolution::new(1344, 768);
        assert_eq!(resolution.to_string(), "1344x768");
        assert_eq!(resolution.aspect_ratio(), (7, 4));
        assert_eq!(resolution.area(), 1_032_192);
        assert_eq!(
            serde_json::to_string(&resolution).unwrap(),
            "\"1344x768\""
        );
    }
}
