//! Solver-independent MILP representation
//!
//! A [`MilpProgram`] is a minimisation problem stored as explicit columns and
//! sparse rows. Backends translate it into whatever their solver consumes, so
//! the formulation never depends on a particular solver library.

/// Row comparison sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    /// `Σ terms <= rhs`
    Le,
    /// `Σ terms == rhs`
    Eq,
    /// `Σ terms >= rhs`
    Ge,
}

impl RowSense {
    pub fn symbol(&self) -> &'static str {
        match self {
            RowSense::Le => "<=",
            RowSense::Eq => "=",
            RowSense::Ge => ">=",
        }
    }
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Objective coefficient
    pub objective: f64,
    pub lower: f64,
    pub upper: f64,
    pub integer: bool,
}

/// A linear constraint over column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: RowSense,
    pub rhs: f64,
}

impl Row {
    /// Left-hand side evaluated at `values`.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(col, coef)| coef * values[col]).sum()
    }

    /// How far `values` are from satisfying this row (0 when satisfied).
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.activity(values);
        match self.sense {
            RowSense::Le => (lhs - self.rhs).max(0.0),
            RowSense::Ge => (self.rhs - lhs).max(0.0),
            RowSense::Eq => (lhs - self.rhs).abs(),
        }
    }
}

/// Minimisation MILP.
#[derive(Debug, Clone, Default)]
pub struct MilpProgram {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl MilpProgram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add a `{0, 1}` column and return its index.
    pub fn add_binary(&mut self, name: impl Into<String>, objective: f64) -> usize {
        self.columns.push(Column {
            name: name.into(),
            objective,
            lower: 0.0,
            upper: 1.0,
            integer: true,
        });
        self.columns.len() - 1
    }

    pub fn add_row(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(usize, f64)>,
        sense: RowSense,
        rhs: f64,
    ) {
        self.rows.push(Row {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_integer_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.integer).count()
    }

    /// Objective evaluated at `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.columns
            .iter()
            .zip(values)
            .map(|(col, v)| col.objective * v)
            .sum()
    }

    /// Largest row violation at `values`.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        self.rows
            .iter()
            .map(|row| row.violation(values))
            .fold(0.0, f64::max)
    }
}
