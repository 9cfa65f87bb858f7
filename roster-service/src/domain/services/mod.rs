pub mod balancer;
pub mod coverage_filler;
pub mod feasibility;
pub mod gap_repair;
pub mod night_packer;
pub mod off_repair;
pub mod prefill;
pub mod scoring;
