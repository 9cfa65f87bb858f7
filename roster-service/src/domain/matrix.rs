use crate::domain::calendar::MonthSpan;
use crate::domain::nurse::Nurse;
use shared::{Role, ShiftCode};

/// The roster under construction: a dense nurse x day grid of duty cells.
///
/// `None` is the unassigned sentinel; it exists only while stages run and is
/// normalized to `OFF` at emission. Per-nurse totals are maintained
/// incrementally on every write and cross-checked against a full scan in
/// debug builds.
#[derive(Debug, Clone)]
pub struct DutyMatrix {
    last_day: u32,
    roles: Vec<Role>,
    /// Holiday/weekend flag per day, index `day - 1`.
    combined_days: Vec<bool>,
    cells: Vec<Vec<Option<ShiftCode>>>,
    work_counts: Vec<u32>,
    night_counts: Vec<u32>,
    combined_counts: Vec<u32>,
    holiday_evening_counts: Vec<u32>,
}

impl DutyMatrix {
    pub fn new(staff: &[Nurse], span: &MonthSpan) -> Self {
        let last_day = span.last_day();
        let nurse_count = staff.len();
        Self {
            last_day,
            roles: staff.iter().map(|n| n.role).collect(),
            combined_days: span.days().map(|d| span.is_holiday_or_weekend(d)).collect(),
            cells: vec![vec![None; last_day as usize]; nurse_count],
            work_counts: vec![0; nurse_count],
            night_counts: vec![0; nurse_count],
            combined_counts: vec![0; nurse_count],
            holiday_evening_counts: vec![0; nurse_count],
        }
    }

    pub fn nurse_count(&self) -> usize {
        self.cells.len()
    }

    pub fn last_day(&self) -> u32 {
        self.last_day
    }

    pub fn role(&self, nurse: usize) -> Role {
        self.roles[nurse]
    }

    /// The cell for a 1-based day; days outside the month read as unassigned.
    pub fn cell(&self, nurse: usize, day: u32) -> Option<ShiftCode> {
        if !(1..=self.last_day).contains(&day) {
            return None;
        }
        self.cells[nurse][(day - 1) as usize]
    }

    pub fn is_unassigned(&self, nurse: usize, day: u32) -> bool {
        self.cell(nurse, day).is_none()
    }

    /// Writes a cell, replacing any previous value and keeping the
    /// incremental totals in step.
    pub fn set(&mut self, nurse: usize, day: u32, code: ShiftCode) {
        assert!(
            (1..=self.last_day).contains(&day),
            "day {} outside 1..={}",
            day,
            self.last_day
        );
        let idx = (day - 1) as usize;
        if let Some(old) = self.cells[nurse][idx] {
            self.update_counts(nurse, day, old, -1);
        }
        self.cells[nurse][idx] = Some(code);
        self.update_counts(nurse, day, code, 1);
        debug_assert!(self.counts_match_scan(), "incremental totals drifted");
    }

    fn update_counts(&mut self, nurse: usize, day: u32, code: ShiftCode, delta: i64) {
        let bump = |count: &mut u32| {
            *count = (i64::from(*count) + delta) as u32;
        };
        if code.is_work() {
            bump(&mut self.work_counts[nurse]);
        }
        match code {
            ShiftCode::Night => bump(&mut self.night_counts[nurse]),
            ShiftCode::DayEvening => bump(&mut self.combined_counts[nurse]),
            ShiftCode::Evening
                if self.roles[nurse] == Role::Head && self.combined_days[(day - 1) as usize] =>
            {
                bump(&mut self.holiday_evening_counts[nurse]);
            }
            _ => {}
        }
    }

    pub fn work_count(&self, nurse: usize) -> u32 {
        self.work_counts[nurse]
    }

    pub fn night_count(&self, nurse: usize) -> u32 {
        self.night_counts[nurse]
    }

    pub fn combined_count(&self, nurse: usize) -> u32 {
        self.combined_counts[nurse]
    }

    pub fn holiday_evening_count(&self, nurse: usize) -> u32 {
        self.holiday_evening_counts[nurse]
    }

    /// Rest days seen so far: `OFF` cells plus cells not yet assigned.
    pub fn off_count(&self, nurse: usize) -> u32 {
        self.cells[nurse]
            .iter()
            .filter(|c| c.map_or(true, |code| code == ShiftCode::Off))
            .count() as u32
    }

    /// Whether any nurse already holds `code` on the given day.
    pub fn column_has(&self, day: u32, code: ShiftCode) -> bool {
        (0..self.nurse_count()).any(|n| self.cell(n, day) == Some(code))
    }

    /// Consecutive assigned work days immediately before `day`.
    pub fn work_run_before(&self, nurse: usize, day: u32) -> u32 {
        let mut run = 0;
        let mut d = day;
        while d > 1 {
            d -= 1;
            match self.cell(nurse, d) {
                Some(code) if code.is_work() => run += 1,
                _ => break,
            }
        }
        run
    }

    /// Consecutive assigned work days immediately after `day`.
    pub fn work_run_after(&self, nurse: usize, day: u32) -> u32 {
        let mut run = 0;
        let mut d = day;
        while d < self.last_day {
            d += 1;
            match self.cell(nurse, d) {
                Some(code) if code.is_work() => run += 1,
                _ => break,
            }
        }
        run
    }

    /// Freezes the matrix into emitted rows, normalizing the unassigned
    /// sentinel to `OFF`.
    pub fn emit(&self) -> Vec<Vec<ShiftCode>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.unwrap_or(ShiftCode::Off)).collect())
            .collect()
    }

    fn counts_match_scan(&self) -> bool {
        for nurse in 0..self.nurse_count() {
            let mut work = 0;
            let mut nights = 0;
            let mut combined = 0;
            let mut holiday_evenings = 0;
            for day in 1..=self.last_day {
                let Some(code) = self.cell(nurse, day) else {
                    continue;
                };
                if code.is_work() {
                    work += 1;
                }
                match code {
                    ShiftCode::Night => nights += 1,
                    ShiftCode::DayEvening => combined += 1,
                    ShiftCode::Evening
                        if self.roles[nurse] == Role::Head
                            && self.combined_days[(day - 1) as usize] =>
                    {
                        holiday_evenings += 1;
                    }
                    _ => {}
                }
            }
            if work != self.work_counts[nurse]
                || nights != self.night_counts[nurse]
                || combined != self.combined_counts[nurse]
                || holiday_evenings != self.holiday_evening_counts[nurse]
            {
                return false;
            }
        }
        true
    }
}
