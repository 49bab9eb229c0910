// ABOUTME: Pure-data representation of a mixed-integer linear program
// ABOUTME: Variables, linear constraints, and a minimization objective
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Platewise

/// Index of a variable within a [`ProblemSpec`]
pub type VarId = usize;

/// Variable domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// 0/1 integer
    Binary,
    /// Non-negative real
    Continuous,
}

/// One declared variable
#[derive(Debug, Clone)]
pub struct VarSpec {
    /// Debug name, useful when dumping infeasible models
    pub name: String,
    pub kind: VarKind,
}

/// Comparison sense of a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

/// `terms · x  (sense)  rhs`
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

/// A complete model: built declaratively, solved by a
/// [`crate::planner::backend::MilpBackend`].
///
/// Keeping the model as plain data lets the builder be tested against
/// structural invariants without running a solver, and makes the tiered
/// retry a rebuild rather than a mutation.
#[derive(Debug, Clone, Default)]
pub struct ProblemSpec {
    pub vars: Vec<VarSpec>,
    pub constraints: Vec<LinearConstraint>,
    /// Minimization objective as (variable, coefficient) terms; repeated
    /// variables accumulate
    pub objective: Vec<(VarId, f64)>,
}

impl ProblemSpec {
    /// Declare a binary variable
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), VarKind::Binary)
    }

    /// Declare a non-negative continuous variable
    pub fn add_continuous(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), VarKind::Continuous)
    }

    fn push_var(&mut self, name: String, kind: VarKind) -> VarId {
        let id = self.vars.len();
        self.vars.push(VarSpec { name, kind });
        id
    }

    /// Add a linear constraint
    pub fn constrain(&mut self, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) {
        self.constraints.push(LinearConstraint { terms, sense, rhs });
    }

    /// Add an objective term (minimization)
    pub fn penalize(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.objective.push((var, coefficient));
        }
    }

    /// Number of declared variables
    #[must_use]
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Total objective coefficient on one variable (test helper)
    #[must_use]
    pub fn objective_coefficient(&self, var: VarId) -> f64 {
        self.objective
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }
}
