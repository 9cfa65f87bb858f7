use shared::{Role, ShiftCode};
use std::collections::{BTreeMap, BTreeSet};

/// One normalized staff record, ready for the planner.
///
/// `fixed_duties` carries the per-day allowed-code lists parsed from the
/// request: a singleton list is pre-assigned during pre-fill, a longer list
/// only restricts what later stages may place on that day.
#[derive(Debug, Clone)]
pub struct Nurse {
    pub name: String,
    pub role: Role,
    pub request_off: BTreeSet<u32>,
    pub fixed_duties: BTreeMap<u32, Vec<ShiftCode>>,
    /// Display-only; carried through for exporters, never consulted here.
    pub annual_leave: u32,
}

impl Nurse {
    /// Builds a nurse from the free-text request fields. Parsing is lenient:
    /// malformed fragments and out-of-range days are skipped, never rejected.
    pub fn from_free_text(
        name: impl Into<String>,
        role: Role,
        request_off: &str,
        fixed_duties: &str,
        annual_leave: u32,
        last_day: u32,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            request_off: parse_day_set(request_off, last_day),
            fixed_duties: parse_duty_map(fixed_duties, last_day),
            annual_leave,
        }
    }

    /// The allowed-code list for a day, when the nurse restricted it.
    pub fn duty_filter(&self, day: u32) -> Option<&[ShiftCode]> {
        self.fixed_duties.get(&day).map(Vec::as_slice)
    }
}

/// Parses `"d1, d2, d3"` into the set of valid day numbers. Non-numeric
/// tokens and days outside `[1, last_day]` are dropped silently.
pub fn parse_day_set(raw: &str, last_day: u32) -> BTreeSet<u32> {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .filter(|day| (1..=last_day).contains(day))
        .collect()
}

/// Parses `"d=c1/c2, d=c"` into day -> ordered allowed-code list. Codes are
/// uppercased before matching; entries with no valid code are dropped.
pub fn parse_duty_map(raw: &str, last_day: u32) -> BTreeMap<u32, Vec<ShiftCode>> {
    let mut duties = BTreeMap::new();
    for entry in raw.split(',') {
        let Some((day, codes)) = entry.split_once('=') else {
            continue;
        };
        let Ok(day) = day.trim().parse::<u32>() else {
            continue;
        };
        if !(1..=last_day).contains(&day) {
            continue;
        }
        let codes: Vec<ShiftCode> = codes
            .split('/')
            .filter_map(|code| code.trim().to_uppercase().parse::<ShiftCode>().ok())
            .collect();
        if !codes.is_empty() {
            duties.insert(day, codes);
        }
    }
    duties
}
