// ABOUTME: MILP backend abstraction and the default good_lp/microlp implementation
// ABOUTME: Translates a ProblemSpec into solver variables, constraints, and objective
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

use std::time::Duration;

use good_lp::{constraint, default_solver, Expression, ProblemVariables, Solution, SolverModel};
use good_lp::{variable, ResolutionError};

use super::problem::{ProblemSpec, Sense, VarId, VarKind};
use crate::errors::{AppError, AppResult};

/// Variable values of an optimal solution
#[derive(Debug, Clone)]
pub struct MilpSolution {
    values: Vec<f64>,
}

impl MilpSolution {
    /// Wrap raw values indexed by [`VarId`]
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value of one variable
    #[must_use]
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var).copied().unwrap_or(0.0)
    }

    /// Whether a binary variable rounded to 1
    #[must_use]
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }
}

/// Solves a [`ProblemSpec`] within a time limit.
///
/// The driver only distinguishes optimal from everything else: an
/// `Err(AppError::InfeasibleModel)` triggers the next relaxation tier.
pub trait MilpBackend: Send + Sync {
    /// Solve to optimality or report infeasibility
    ///
    /// # Errors
    ///
    /// `AppError::InfeasibleModel` when no feasible assignment exists (or
    /// the limit expired first); `AppError::Solver` for backend faults.
    fn solve(&self, spec: &ProblemSpec, time_limit: Duration) -> AppResult<MilpSolution>;
}

/// Default backend over `good_lp` with the pure-Rust microlp solver.
///
/// microlp has no deadline API, so the time limit is advisory here; the
/// models this crate builds solve in well under the configured limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MilpBackend for GoodLpBackend {
    fn solve(&self, spec: &ProblemSpec, _time_limit: Duration) -> AppResult<MilpSolution> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = spec
            .vars
            .iter()
            .map(|v| match v.kind {
                VarKind::Binary => vars.add(variable().binary()),
                VarKind::Continuous => vars.add(variable().min(0.0)),
            })
            .collect();

        let objective: Expression = spec
            .objective
            .iter()
            .map(|&(var, coefficient)| coefficient * handles[var])
            .sum();

        let mut model = vars.minimise(objective).using(default_solver);
        for c in &spec.constraints {
            let lhs: Expression = c
                .terms
                .iter()
                .map(|&(var, coefficient)| coefficient * handles[var])
                .sum();
            let built = match c.sense {
                Sense::Le => constraint::leq(lhs, c.rhs),
                Sense::Ge => constraint::geq(lhs, c.rhs),
                Sense::Eq => constraint::eq(lhs, c.rhs),
            };
            model = model.with(built);
        }

        match model.solve() {
            Ok(solution) => Ok(MilpSolution::new(
                handles.iter().map(|h| solution.value(*h)).collect(),
            )),
            Err(ResolutionError::Infeasible) => Err(AppError::InfeasibleModel),
            Err(other) => Err(AppError::solver(other.to_string())),
        }
    }
}
