use crate::types::{AspectEntry, BaseResolution, Resolution};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info};
use std::convert::TryFrom;
use thiserror::Error;

pub mod types;

/// Widths and heights are always multiples of this
pub const STEP: u32 = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("aspect ratio `{0}` is not of the form a:b")]
    MissingSeparator(String),
    #[error("invalid aspect ratio component `{0}`")]
    InvalidComponent(String),
    #[error("aspect ratio components must be positive")]
    ZeroComponent,
    #[error("invalid base resolution `{0}`")]
    InvalidBase(String),
}

pub type ResolverResult<T> = Result<T, ResolverError>;

fn round_up_to_step(value: u128) -> u128 {
    let step = u128::from(STEP);
    (value + step - 1) / step * step
}

/// Finds the largest width/height pair for the aspect ratio `a:b` whose area fits in `base * base`
///
/// Widths are tried in steps of 64 from 64 up to (but excluding) `2 * base`. For each width the
/// matching height is rounded up to the next multiple of 64 and the pair is kept if its area is
/// within budget. The candidate closest to the budget from below wins, the first one seen on ties.
///
/// # Example Usage
/// ```
/// use aspect_resolver::{search, types::Resolution};
///
/// assert_eq!(search(16, 9, 1024), Some(Resolution::new(1344, 768)));
/// assert_eq!(search(1, 1, 0), None);
/// ```
pub fn search(a: u32, b: u32, base: u32) -> Option<Resolution> {
    if a == 0 {
        return None;
    }
    let (a, b, base) = (u128::from(a), u128::from(b), u128::from(base));
    let target_area = base * base;

    (u128::from(STEP)..base * 2)
        .step_by(STEP as usize)
        .filter_map(|x| {
            let y = round_up_to_step(x * b / a);
            let area = x * y;
            // a zero height only shows up for extreme ratios and is never a usable size
            if y == 0 || area > target_area {
                None
            } else {
                Some((target_area - area, x, y))
            }
        })
        .fold(None, |best, candidate| match best {
            Some((closest_diff, _, _)) if closest_diff <= candidate.0 => best,
            _ => Some(candidate),
        })
        .map(|(_, x, y)| Resolution::new(x as u64, y as u64))
}

/// Precomputed answers for every (base resolution, aspect entry) pair, keyed by dropdown text
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolutionTable {
    entries: IndexMap<(String, String), Option<Resolution>>,
}

impl ResolutionTable {
    pub fn get(&self, base: &str, aspect: &str) -> Option<Resolution> {
        self.entries
            .get(&(base.to_string(), aspect.to_string()))
            .copied()
            .flatten()
    }

    pub fn contains_key(&self, base: &str, aspect: &str) -> bool {
        self.entries
            .contains_key(&(base.to_string(), aspect.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(base, aspect, result)` in the order the table was built
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Option<Resolution>)> {
        self.entries
            .iter()
            .map(|((base, aspect), result)| (base.as_str(), aspect.as_str(), *result))
    }
}

fn resolve_entry(base: &str, aspect: &str) -> Option<Resolution> {
    let ratio = match AspectEntry::from(aspect) {
        AspectEntry::Ratio(ratio) => ratio,
        AspectEntry::NoSelection => return None,
        AspectEntry::Malformed(e) => {
            debug!("Skipping aspect preset {:?}: {}", aspect, e);
            return None;
        }
    };
    let base_resolution = match BaseResolution::try_from(base) {
        Ok(base_resolution) => base_resolution,
        Err(e) => {
            debug!("Skipping base resolution {:?}: {}", base, e);
            return None;
        }
    };
    search(ratio.a, ratio.b, base_resolution.0)
}

/// Computes the full table for the cross product of `base_resolutions` and `aspect_entries`
///
/// Every combination gets a key. Entries that do not parse (including the "None" sentinel)
/// map to `None` for every base instead of being left out.
pub fn build_table<A, B>(aspect_entries: &[A], base_resolutions: &[B]) -> ResolutionTable
where
    A: AsRef<str>,
    B: ToString,
{
    let entries = base_resolutions
        .iter()
        .map(|base| base.to_string())
        .cartesian_product(aspect_entries.iter().map(|aspect| aspect.as_ref().to_string()))
        .map(|(base, aspect)| {
            let result = resolve_entry(&base, &aspect);
            ((base, aspect), result)
        })
        .collect();
    ResolutionTable { entries }
}

/// Looks up a selection, a missing key reads the same as "no solution"
pub fn lookup(table: &ResolutionTable, base: &str, aspect: &str) -> Option<Resolution> {
    table.get(base, aspect)
}

/// Owns the one resolution table a host works against
#[derive(Debug, Default, Clone)]
pub struct Resolver {
    table: ResolutionTable,
}

impl Resolver {
    pub fn new<A, B>(aspect_entries: &[A], base_resolutions: &[B]) -> Self
    where
        A: AsRef<str>,
        B: ToString,
    {
        let mut resolver = Self::default();
        resolver.refresh(aspect_entries, base_resolutions);
        resolver
    }

    /// Rebuilds the table from fresh lists, the old table is only dropped once the new one is complete
    pub fn refresh<A, B>(&mut self, aspect_entries: &[A], base_resolutions: &[B])
    where
        A: AsRef<str>,
        B: ToString,
    {
        let table = build_table(aspect_entries, base_resolutions);
        info!(
            "Built resolution table for {} presets x {} base resolutions",
            aspect_entries.len(),
            base_resolutions.len()
        );
        self.table = table;
    }

    pub fn resolve(&self, base: &str, aspect: &str) -> Option<Resolution> {
        lookup(&self.table, base, aspect)
    }

    pub fn table(&self) -> &ResolutionTable {
        &self.table
    }
}
