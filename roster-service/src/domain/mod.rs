pub mod calendar;
pub mod entities;
pub mod matrix;
pub mod nurse;
pub mod repositories;
pub mod roster_planner;
pub mod rules;
pub mod services;
