//! Three-branch piecewise function F(x, a, b, c)
//!
//! | Branch | Condition             | Formula         |
//! |--------|-----------------------|-----------------|
//! | 1      | x + 5 < 0 and c = 0   | 1/(a*x) - b     |
//! | 2      | x + 5 > 0 and c != 0  | (x - a)/(x - 1) |
//! | 3      | otherwise             | 10*x/(c - 2)    |
//!
//! A zero denominator is reported as [`EvalError::DivisionByZero`] and never
//! fed through floating point. Overflow to infinity for huge inputs is not
//! detected.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    First,
    Second,
    Third,
}

impl Branch {
    /// Select the branch for the given inputs. `x + 5 = 0` always falls into the third branch.
    pub fn select(x: f64, c: f64) -> Self {
        let shifted = x + 5.0;
        if shifted < 0.0 && c == 0.0 {
            Branch::First
        } else if shifted > 0.0 && c != 0.0 {
            Branch::Second
        } else {
            Branch::Third
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Branch::First => 1,
            Branch::Second => 2,
            Branch::Third => 3,
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            Branch::First => "F = 1/(a*x) - b",
            Branch::Second => "F = (x - a)/(x - 1)",
            Branch::Third => "F = 10*x/(c - 2)",
        }
    }

    pub fn condition(self) -> &'static str {
        match self {
            Branch::First => "x + 5 < 0 and c = 0",
            Branch::Second => "x + 5 > 0 and c != 0",
            Branch::Third => "otherwise (including x + 5 = 0)",
        }
    }

    fn denominator(self) -> &'static str {
        match self {
            Branch::First => "a*x",
            Branch::Second => "x - 1",
            Branch::Third => "c - 2",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "branch {}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero in {branch} ({denominator} = 0)")]
    DivisionByZero {
        branch: Branch,
        denominator: &'static str,
    },
}

/// Successful evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub branch: Branch,
    pub value: f64,
    /// The selected formula with the inputs substituted
    pub substituted: String,
}

pub fn evaluate(x: f64, a: f64, b: f64, c: f64) -> Result<Evaluation, EvalError> {
    let branch = Branch::select(x, c);

    let (numerator, denominator, substituted) = match branch {
        Branch::First => (1.0, a * x, format!("F = 1/({a}*{x}) - {b}")),
        Branch::Second => (x - a, x - 1.0, format!("F = ({x} - {a})/({x} - 1)")),
        Branch::Third => (10.0 * x, c - 2.0, format!("F = 10*{x}/({c} - 2)")),
    };

    if denominator == 0.0 {
        return Err(EvalError::DivisionByZero {
            branch,
            denominator: branch.denominator(),
        });
    }

    let mut value = numerator / denominator;
    if branch == Branch::First {
        value -= b;
    }

    Ok(Evaluation {
        branch,
        value,
        substituted,
    })
}
