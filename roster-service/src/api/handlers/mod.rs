pub mod roster_handlers;

pub use roster_handlers::{
    get_roster_result, get_roster_status, get_roster_table, list_rosters, submit_roster,
};
