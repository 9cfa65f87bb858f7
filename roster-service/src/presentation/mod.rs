pub mod roster_serializer;
pub mod roster_table;

pub use roster_serializer::{
    NurseRosterSerialize, RosterJobSerialize, RosterResultSerialize, RosterStatusSerialize,
};
pub use roster_table::{RosterTable, RosterTableRow};
