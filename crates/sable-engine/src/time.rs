//! Think-time budgeting from UCI clock parameters.

use std::time::Duration;

use sable_core::Color;

/// Parameters of a UCI `go` command. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    /// Accepted for completeness; the budget formula does not use it.
    pub movestogo: Option<u32>,
    pub depth: Option<u16>,
    pub nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub infinite: bool,
}

/// How long and how deep one search may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Wall-clock budget; `None` runs until stopped or the depth is reached.
    pub think_time: Option<Duration>,
    /// Deepest iteration to run.
    pub depth: Option<u16>,
    /// Node count at which the search is stopped.
    pub nodes: Option<u64>,
}

impl SearchLimits {
    pub fn fixed_time(think_time: Duration) -> Self {
        Self {
            think_time: Some(think_time),
            ..Self::default()
        }
    }

    pub fn fixed_depth(depth: u16) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Only `stop` ends the search.
    pub fn infinite() -> Self {
        Self::default()
    }

    /// Derive limits for `side` from a `go` command.
    ///
    /// Priority: `infinite`, then `movetime`, then the side's clock and
    /// increment. `depth` and `nodes` apply alongside any of them. With
    /// none of these the search is unbounded in time.
    pub fn from_go(params: &GoParams, side: Color) -> Self {
        let depth = params.depth;
        let nodes = params.nodes;
        if params.infinite {
            return Self {
                think_time: None,
                depth,
                nodes,
            };
        }
        if let Some(movetime) = params.movetime {
            return Self {
                think_time: Some(movetime),
                depth,
                nodes,
            };
        }

        let (remaining, increment) = match side {
            Color::White => (params.wtime, params.winc),
            Color::Black => (params.btime, params.binc),
        };
        let think_time = remaining.map(|remaining| {
            let increment = increment.unwrap_or(Duration::ZERO);
            Duration::from_millis(choose_think_time(
                remaining.as_millis() as u64,
                increment.as_millis() as u64,
            ))
        });
        Self {
            think_time,
            depth,
            nodes,
        }
    }

    /// Whether nothing but `stop` can end the search.
    pub fn is_unbounded(&self) -> bool {
        self.think_time.is_none() && self.depth.is_none() && self.nodes.is_none()
    }
}

/// Milliseconds to spend on the next move.
///
/// Roughly a fortieth of the remaining time plus most of the increment,
/// never less than the smaller of 50 ms and a quarter of the clock, and
/// scaled by 0.8 to leave a margin for the search overrunning.
pub fn choose_think_time(remaining_ms: u64, increment_ms: u64) -> u64 {
    let remaining = remaining_ms as f64;
    let increment = increment_ms as f64;

    let mut think = remaining / 40.0;
    if remaining > increment * 2.0 {
        think += increment * 0.8;
    }
    let min_think = (remaining * 0.25).min(50.0);

    (think.max(min_think) * 0.8).ceil() as u64
}
