use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use shared::{Role, ShiftCode};

/// Stage one of an attempt: seed the matrix before any search runs.
///
/// Assistant nurses get their blanket pattern (administrative duty on
/// working weekdays, rest on weekends, holidays and requested days), then
/// every single-code fixed entry is written for every role. Multi-code
/// entries are not applied here; they only filter later placements.
pub fn prefill(matrix: &mut DutyMatrix, staff: &[Nurse], span: &MonthSpan) {
    for (nurse, record) in staff.iter().enumerate() {
        if record.role != Role::Assistant {
            continue;
        }
        for day in span.days() {
            let code = if record.request_off.contains(&day) || span.is_holiday_or_weekend(day) {
                ShiftCode::Off
            } else {
                ShiftCode::Admin
            };
            matrix.set(nurse, day, code);
        }
    }

    for (nurse, record) in staff.iter().enumerate() {
        for (&day, codes) in &record.fixed_duties {
            if let [code] = codes[..] {
                matrix.set(nurse, day, code);
            }
        }
    }
}
