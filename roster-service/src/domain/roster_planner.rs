use crate::domain::calendar::MonthSpan;
use crate::domain::matrix::DutyMatrix;
use crate::domain::nurse::Nurse;
use crate::domain::services::feasibility::FeasibilityChecker;
use crate::domain::services::scoring::{self, ScoreBreakdown};
use crate::domain::services::{balancer, coverage_filler, gap_repair, night_packer, off_repair, prefill};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{DomainResult, ShiftCode};
use std::collections::BTreeSet;

/// Tuning knobs of the engine. Every bound the stages consult lives here so
/// deployments can tighten or relax policy without a rebuild.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Candidate rosters generated per request.
    pub max_attempts: u32,
    /// Per-nurse night budget during normal packing.
    pub night_cap: u32,
    /// Hard night ceiling; reachable only through zero-gap repair.
    pub night_cap_relaxed: u32,
    /// Per-nurse rest-day floor.
    pub min_off_days: u32,
    /// Longest permitted run of consecutive work days.
    pub max_streak: u32,
    /// Swap budget of the rest balancer.
    pub balance_iterations: u32,
    /// Adjusted-score gap at which the balancer stops.
    pub balance_gap: u32,
    /// Rest runs at least this long count as a soft violation.
    pub long_rest_run: u32,
    /// Early-exit gate: acceptable rest spread.
    pub exit_spread: u32,
    /// Early-exit gate: acceptable isolated rest days.
    pub exit_isolated: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            night_cap: 10,
            night_cap_relaxed: 11,
            min_off_days: 6,
            max_streak: 6,
            balance_iterations: 50,
            balance_gap: 2,
            long_rest_run: 4,
            exit_spread: 2,
            exit_isolated: 3,
        }
    }
}

/// One roster request, already normalized: structured staff records, the
/// target month and its holiday day numbers, and an optional seed for
/// reproducible output.
#[derive(Debug, Clone)]
pub struct RosterDemand {
    pub year: i32,
    pub month: u32,
    pub holidays: BTreeSet<u32>,
    pub staff: Vec<Nurse>,
    pub seed: Option<u64>,
}

/// The winning candidate: frozen rows in staff order plus the audit data
/// callers surface (night tallies and the score term counts).
#[derive(Debug, Clone)]
pub struct RosterOutcome {
    pub last_day: u32,
    pub rows: Vec<Vec<ShiftCode>>,
    pub night_counts: Vec<u32>,
    pub score: ScoreBreakdown,
    pub attempts: u32,
}

/// Monte-Carlo roster generator.
///
/// Runs the stage pipeline up to the attempt budget with independent
/// randomness, scores every candidate and keeps the cheapest. Each attempt
/// draws its own rng seed from the master stream, so a fixed demand seed
/// reproduces the same winner regardless of where the early exit lands.
pub struct RosterPlanner {
    config: EngineConfig,
    checker: FeasibilityChecker,
}

impl RosterPlanner {
    pub fn new(config: EngineConfig) -> Self {
        let checker = FeasibilityChecker::new(config.max_streak);
        Self { config, checker }
    }

    pub fn plan(&self, demand: &RosterDemand) -> DomainResult<RosterOutcome> {
        let span = MonthSpan::new(demand.year, demand.month, demand.holidays.clone())?;

        if demand.staff.is_empty() {
            tracing::warn!("roster demand carries no staff, emitting the empty fallback");
            return Ok(Self::fallback(&span, &demand.staff));
        }

        let mut master = match demand.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut best: Option<(ScoreBreakdown, DutyMatrix)> = None;
        let mut attempts = 0;
        for _ in 0..self.config.max_attempts {
            attempts += 1;
            let mut rng = StdRng::seed_from_u64(master.gen());
            let matrix = self.attempt(&span, &demand.staff, &mut rng);
            let breakdown = scoring::score(&matrix, &demand.staff, &span, &self.config);

            let improved = best
                .as_ref()
                .map_or(true, |(incumbent, _)| breakdown.total() < incumbent.total());
            if improved {
                best = Some((breakdown, matrix));
            }
            if breakdown.is_release_ready(&self.config) {
                break;
            }
        }

        let Some((score, matrix)) = best else {
            return Ok(Self::fallback(&span, &demand.staff));
        };

        tracing::debug!(
            attempts,
            total = score.total(),
            holes = score.coverage_holes,
            spread = score.rest_spread,
            "roster simulation finished"
        );

        Ok(RosterOutcome {
            last_day: span.last_day(),
            rows: matrix.emit(),
            night_counts: (0..matrix.nurse_count()).map(|n| matrix.night_count(n)).collect(),
            score,
            attempts,
        })
    }

    /// One full pipeline pass over a fresh matrix.
    fn attempt(&self, span: &MonthSpan, staff: &[Nurse], rng: &mut StdRng) -> DutyMatrix {
        let mut matrix = DutyMatrix::new(staff, span);
        prefill::prefill(&mut matrix, staff, span);
        night_packer::pack_nights(&mut matrix, staff, span, &self.checker, &self.config, rng);
        coverage_filler::fill_coverage(&mut matrix, staff, span, &self.checker, rng);
        gap_repair::repair_gaps(&mut matrix, staff, span, &self.checker, &self.config, rng);
        balancer::balance(&mut matrix, staff, span, &self.checker, &self.config, rng);
        off_repair::enforce_off_floor(&mut matrix, staff, span, &self.checker, &self.config, rng);
        matrix
    }

    /// The safe all-rest matrix for structurally impossible demands.
    fn fallback(span: &MonthSpan, staff: &[Nurse]) -> RosterOutcome {
        let rows = vec![vec![ShiftCode::Off; span.last_day() as usize]; staff.len()];
        let score = ScoreBreakdown {
            coverage_holes: span.last_day(),
            ..ScoreBreakdown::default()
        };
        RosterOutcome {
            last_day: span.last_day(),
            rows,
            night_counts: vec![0; staff.len()],
            score,
            attempts: 0,
        }
    }
}
