//! Simulated-latency policies
//!
//! The query handler does no real work; what varies is how it pretends to.
//! A policy is resolved once from configuration at bootstrap and applied per
//! request:
//!
//! - `None`: respond immediately (fast path)
//! - `IdleDelay`: suspend the request with a non-blocking sleep, modeling an
//!   opaque downstream call
//! - `SyntheticLoad`: sequential CPU-bound phases imitating retrieval,
//!   analysis, and report formatting
//!
//! CPU phases run on the tokio blocking pool so a loaded request does not
//! hold a runtime worker hostage; idle delays use `tokio::time::sleep` and
//! never block unrelated connections.

mod workload;

pub use workload::Workload;

use std::time::Duration;

use crate::config::{SimulationConfig, SimulationMode};
use crate::logger;

// Summation ranges for the three synthetic phases. Arbitrary beyond "large
// enough to register as CPU time"; tuning happens via iteration counts.
const SEARCH_RANGE: u64 = 100_000;
const ANALYSIS_RANGE: u64 = 50_000;
const REPORT_RANGE: u64 = 10_000;

/// When a phase sleeps relative to its busy-loop iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseStyle {
    /// One pause after the whole phase.
    AfterPhase,
    /// A pause after every iteration.
    AfterEachIteration,
}

/// One named phase of synthetic processing.
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: &'static str,
    pub iterations: u32,
    pub workload: Workload,
    pub pause: PauseStyle,
}

impl Phase {
    /// Deterministic sleep floor contributed by this phase.
    fn pause_floor(&self, pause: Duration) -> Duration {
        match self.pause {
            PauseStyle::AfterPhase => pause,
            PauseStyle::AfterEachIteration => pause * self.iterations,
        }
    }
}

/// Latency-simulation strategy selected at bootstrap.
#[derive(Debug, Clone)]
pub enum LatencyPolicy {
    None,
    IdleDelay {
        delay: Duration,
    },
    SyntheticLoad {
        phases: Vec<Phase>,
        pause: Duration,
    },
}

impl LatencyPolicy {
    /// Resolve the policy from the `[simulation]` config section.
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        match cfg.mode {
            SimulationMode::None => Self::None,
            SimulationMode::IdleDelay => Self::IdleDelay {
                delay: Duration::from_millis(cfg.delay_ms),
            },
            SimulationMode::SyntheticLoad => Self::SyntheticLoad {
                phases: vec![
                    Phase {
                        name: "search",
                        iterations: cfg.search_iterations,
                        workload: Workload::SumOfSquares {
                            upper: SEARCH_RANGE,
                        },
                        pause: PauseStyle::AfterPhase,
                    },
                    Phase {
                        name: "analysis",
                        iterations: cfg.analysis_iterations,
                        workload: Workload::SumOfCubes {
                            upper: ANALYSIS_RANGE,
                        },
                        pause: PauseStyle::AfterEachIteration,
                    },
                    Phase {
                        name: "report",
                        iterations: cfg.report_iterations,
                        workload: Workload::SumOfSquares {
                            upper: REPORT_RANGE,
                        },
                        pause: PauseStyle::AfterEachIteration,
                    },
                ],
                pause: Duration::from_millis(cfg.phase_pause_ms),
            },
        }
    }

    /// Lower bound on per-request latency: the sum of all configured sleeps.
    ///
    /// CPU time comes on top of this, so observed latency is always >= floor.
    pub fn floor(&self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::IdleDelay { delay } => *delay,
            Self::SyntheticLoad { phases, pause } => phases
                .iter()
                .map(|phase| phase.pause_floor(*pause))
                .sum(),
        }
    }

    /// Human-readable policy description for the startup banner.
    pub fn describe(&self) -> String {
        match self {
            Self::None => "none (immediate responses)".to_string(),
            Self::IdleDelay { delay } => {
                format!("idle-delay ({}ms per request)", delay.as_millis())
            }
            Self::SyntheticLoad { phases, pause } => {
                let names: Vec<&str> = phases.iter().map(|p| p.name).collect();
                format!(
                    "synthetic-load (phases: {}, floor: {}ms)",
                    names.join(" -> "),
                    (phases
                        .iter()
                        .map(|p| p.pause_floor(*pause))
                        .sum::<Duration>())
                    .as_millis()
                )
            }
        }
    }

    /// Apply the policy: suspend and/or burn CPU until the simulated
    /// processing is "done".
    pub async fn apply(&self) {
        match self {
            Self::None => {}
            Self::IdleDelay { delay } => tokio::time::sleep(*delay).await,
            Self::SyntheticLoad { phases, pause } => {
                for phase in phases {
                    run_phase(phase, *pause).await;
                }
            }
        }
    }
}

/// Run one synthetic phase with its pause pattern.
async fn run_phase(phase: &Phase, pause: Duration) {
    match phase.pause {
        PauseStyle::AfterPhase => {
            burn(phase.workload, phase.iterations).await;
            tokio::time::sleep(pause).await;
        }
        PauseStyle::AfterEachIteration => {
            for _ in 0..phase.iterations {
                burn(phase.workload, 1).await;
                tokio::time::sleep(pause).await;
            }
        }
    }
}

/// Execute `iterations` rounds of the workload on the blocking pool.
async fn burn(workload: Workload, iterations: u32) {
    let joined = tokio::task::spawn_blocking(move || {
        for _ in 0..iterations {
            std::hint::black_box(workload.run());
        }
    })
    .await;

    // JoinError only on panic/abort inside the closure; log and move on
    if let Err(e) = joined {
        logger::log_warning(&format!("Synthetic workload task failed: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, SimulationMode};
    use std::time::Instant;

    fn synthetic_config() -> SimulationConfig {
        SimulationConfig {
            mode: SimulationMode::SyntheticLoad,
            delay_ms: 2000,
            phase_pause_ms: 10,
            search_iterations: 2,
            analysis_iterations: 3,
            report_iterations: 2,
        }
    }

    #[test]
    fn floor_sums_all_configured_pauses() {
        let policy = LatencyPolicy::from_config(&synthetic_config());
        // search: 1 pause, analysis: 3 pauses, report: 2 pauses
        assert_eq!(policy.floor(), Duration::from_millis(60));
    }

    #[test]
    fn idle_delay_floor_is_the_delay() {
        let cfg = SimulationConfig {
            mode: SimulationMode::IdleDelay,
            delay_ms: 2000,
            ..synthetic_config()
        };
        let policy = LatencyPolicy::from_config(&cfg);
        assert_eq!(policy.floor(), Duration::from_secs(2));
    }

    #[test]
    fn none_floor_is_zero() {
        let cfg = SimulationConfig {
            mode: SimulationMode::None,
            ..synthetic_config()
        };
        assert_eq!(LatencyPolicy::from_config(&cfg).floor(), Duration::ZERO);
    }

    #[tokio::test]
    async fn none_policy_returns_immediately() {
        let start = Instant::now();
        LatencyPolicy::None.apply().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn idle_delay_sleeps_at_least_the_configured_delay() {
        let policy = LatencyPolicy::IdleDelay {
            delay: Duration::from_millis(50),
        };
        let start = Instant::now();
        policy.apply().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn synthetic_load_respects_its_latency_floor() {
        let policy = LatencyPolicy::from_config(&synthetic_config());
        let floor = policy.floor();
        let start = Instant::now();
        policy.apply().await;
        assert!(
            start.elapsed() >= floor,
            "elapsed {:?} below floor {floor:?}",
            start.elapsed()
        );
    }
}
