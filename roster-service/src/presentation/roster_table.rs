use crate::domain::entities::DutyAssignment;
use shared::{DomainError, DomainResult, ShiftCode};

/// The persisted tabular roster layout: one row per nurse, one column per
/// day numbered `1..=last_day`. Cells that are missing or unreadable load
/// as `OFF`, so a reloaded table always matches the emitted matrix modulo
/// the empty-to-OFF normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    pub last_day: u32,
    pub rows: Vec<RosterTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTableRow {
    pub nurse_name: String,
    pub cells: Vec<ShiftCode>,
}

impl RosterTable {
    /// Builds the table from persisted cells. Rows appear in first-seen
    /// order, which the repository keeps sorted by nurse name.
    pub fn from_assignments(last_day: u32, assignments: &[DutyAssignment]) -> Self {
        let mut rows: Vec<RosterTableRow> = Vec::new();
        for assignment in assignments {
            let index = match rows
                .iter()
                .position(|r| r.nurse_name == assignment.nurse_name)
            {
                Some(index) => index,
                None => {
                    rows.push(RosterTableRow {
                        nurse_name: assignment.nurse_name.clone(),
                        cells: vec![ShiftCode::Off; last_day as usize],
                    });
                    rows.len() - 1
                }
            };
            let row = &mut rows[index];
            if (1..=last_day as i32).contains(&assignment.day) {
                row.cells[(assignment.day - 1) as usize] = assignment.shift;
            }
        }
        Self { last_day, rows }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("name");
        for day in 1..=self.last_day {
            out.push(',');
            out.push_str(&day.to_string());
        }
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.nurse_name);
            for cell in &row.cells {
                out.push(',');
                out.push_str(cell.as_str());
            }
            out.push('\n');
        }
        out
    }

    /// Parses a rendered table. The header fixes the day count; short rows
    /// and unreadable cells degrade to `OFF` rather than failing the load.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| DomainError::InvalidInput("roster table is empty".to_string()))?;
        let last_day = header.split(',').skip(1).count() as u32;
        if last_day == 0 {
            return Err(DomainError::InvalidInput(
                "roster table header carries no day columns".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let nurse_name = fields
                .next()
                .unwrap_or_default()
                .to_string();
            let mut cells = vec![ShiftCode::Off; last_day as usize];
            for (index, field) in fields.enumerate().take(last_day as usize) {
                if let Ok(code) = field.trim().parse::<ShiftCode>() {
                    cells[index] = code;
                }
            }
            rows.push(RosterTableRow { nurse_name, cells });
        }

        Ok(Self { last_day, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::Role;
    use uuid::Uuid;

    fn assignment(name: &str, day: i32, shift: ShiftCode) -> DutyAssignment {
        DutyAssignment {
            id: Uuid::new_v4(),
            roster_job_id: Uuid::new_v4(),
            nurse_name: name.to_string(),
            nurse_role: Role::Registered,
            day,
            shift,
            requested_off: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn render_then_parse_is_identity() {
        let assignments = vec![
            assignment("Kim", 1, ShiftCode::Night),
            assignment("Kim", 2, ShiftCode::Off),
            assignment("Kim", 3, ShiftCode::DayEvening),
            assignment("Lee", 1, ShiftCode::Day),
            assignment("Lee", 2, ShiftCode::Evening),
        ];
        let table = RosterTable::from_assignments(5, &assignments);
        let reloaded = RosterTable::parse(&table.render()).unwrap();
        assert_eq!(table, reloaded);
    }

    #[test]
    fn missing_cells_load_as_rest() {
        let text = "name,1,2,3\nKim,N\n";
        let table = RosterTable::parse(text).unwrap();
        assert_eq!(table.rows[0].cells, vec![ShiftCode::Night, ShiftCode::Off, ShiftCode::Off]);
    }

    #[test]
    fn unreadable_cells_load_as_rest() {
        let text = "name,1,2\nKim,N,??\n";
        let table = RosterTable::parse(text).unwrap();
        assert_eq!(table.rows[0].cells[1], ShiftCode::Off);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(RosterTable::parse("").is_err());
        assert!(RosterTable::parse("name\n").is_err());
    }

    #[test]
    fn header_lists_every_day() {
        let table = RosterTable::from_assignments(3, &[assignment("Kim", 1, ShiftCode::Day)]);
        assert!(table.render().starts_with("name,1,2,3\n"));
    }
}
