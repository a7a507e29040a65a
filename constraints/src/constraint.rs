use serde::{Deserialize, Serialize};
use sobox_space::{Kind, Value};

/// A membership region over a single dimension, typed by dimension kind.
///
/// Numeric regions are closed intervals; categorical regions are an
/// arbitrary label membership set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Region {
    /// Closed interval `[low, high]` over a continuous dimension
    Real {
        /// Lower edge (inclusive)
        low: f64,
        /// Upper edge (inclusive)
        high: f64,
    },
    /// Closed interval `low..=high` over an integer dimension
    Int {
        /// Lower edge (inclusive)
        low: i64,
        /// Upper edge (inclusive)
        high: i64,
    },
    /// Label membership set over a categorical dimension
    Cats(Vec<String>),
}

impl Region {
    /// The dimension kind this region applies to
    pub fn kind(&self) -> Kind {
        match self {
            Region::Real { .. } => Kind::Real,
            Region::Int { .. } => Kind::Integer,
            Region::Cats(_) => Kind::Categorical,
        }
    }

    /// Whether `value` falls inside the region. A value of a different kind
    /// never matches.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Region::Real { low, high }, Value::Real(v)) => *low <= *v && *v <= *high,
            (Region::Int { low, high }, Value::Int(v)) => *low <= *v && *v <= *high,
            (Region::Cats(cats), Value::Cat(v)) => cats.contains(v),
            _ => false,
        }
    }
}

/// A predicate over one or more dimensions of a search space.
///
/// Constraints are declared against dimension indices and validated against
/// a concrete [`sobox_space::Space`] when aggregated into
/// [`crate::Constraints`]. [`Constraint::Conditional`] nodes form a
/// recursive tree built bottom-up by value; a branch cannot reference an
/// ancestor, so the evaluation walk always terminates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Pin the `dim`-th component to an exact value
    Single {
        /// Target dimension index
        dim: usize,
        /// Pinned value, kind must match the target dimension
        value: Value,
    },
    /// Require the `dim`-th component to fall inside `region`.
    /// Several Inclusive constraints on one dimension are OR-combined:
    /// each added clause widens the admissible set.
    Inclusive {
        /// Target dimension index
        dim: usize,
        /// Admissible region
        region: Region,
    },
    /// Require the `dim`-th component to fall outside `region`.
    /// Several Exclusive constraints on one dimension are AND-combined:
    /// each added clause narrows the admissible set.
    Exclusive {
        /// Target dimension index
        dim: usize,
        /// Excluded region
        region: Region,
    },
    /// Compare the sum of the listed numeric components against a
    /// threshold, strictly: the boundary value itself is inadmissible
    Sum {
        /// Target dimension indices, at least two, none categorical
        dims: Vec<usize>,
        /// Comparison threshold
        threshold: f64,
        /// `true` for `sum < threshold`, `false` for `sum > threshold`
        less_than: bool,
    },
    /// Apply `if_true` constraints when `condition` holds on the sample,
    /// `if_false` constraints otherwise. Branch lists are AND-combined and
    /// may nest further Conditional nodes.
    Conditional {
        /// Guard predicate
        condition: Box<Constraint>,
        /// Constraints applied when the guard holds
        if_true: Vec<Constraint>,
        /// Constraints applied when the guard does not hold
        if_false: Vec<Constraint>,
    },
}

impl Constraint {
    /// Pin dimension `dim` to `value`
    pub fn single(dim: usize, value: impl Into<Value>) -> Self {
        Constraint::Single {
            dim,
            value: value.into(),
        }
    }

    /// Keep dimension `dim` inside `region`
    pub fn inclusive(dim: usize, region: Region) -> Self {
        Constraint::Inclusive { dim, region }
    }

    /// Keep dimension `dim` outside `region`
    pub fn exclusive(dim: usize, region: Region) -> Self {
        Constraint::Exclusive { dim, region }
    }

    /// Require the sum over `dims` to stay strictly below `threshold`
    pub fn sum_less_than(dims: Vec<usize>, threshold: f64) -> Self {
        Constraint::Sum {
            dims,
            threshold,
            less_than: true,
        }
    }

    /// Require the sum over `dims` to stay strictly above `threshold`
    pub fn sum_greater_than(dims: Vec<usize>, threshold: f64) -> Self {
        Constraint::Sum {
            dims,
            threshold,
            less_than: false,
        }
    }

    /// Branch on `condition`: apply `if_true` when it holds, `if_false`
    /// otherwise. Branches accept a single constraint or a list.
    pub fn conditional(
        condition: Constraint,
        if_true: impl Into<Vec<Constraint>>,
        if_false: impl Into<Vec<Constraint>>,
    ) -> Self {
        Constraint::Conditional {
            condition: Box::new(condition),
            if_true: if_true.into(),
            if_false: if_false.into(),
        }
    }

    /// Whether `sample` (original representation, one value per dimension)
    /// satisfies this constraint. Pure: no state, no randomness.
    pub fn is_satisfied(&self, sample: &[Value]) -> bool {
        match self {
            Constraint::Single { dim, value } => sample.get(*dim) == Some(value),
            Constraint::Inclusive { dim, region } => {
                sample.get(*dim).is_some_and(|v| region.contains(v))
            }
            Constraint::Exclusive { dim, region } => {
                sample.get(*dim).is_some_and(|v| !region.contains(v))
            }
            Constraint::Sum {
                dims,
                threshold,
                less_than,
            } => {
                let mut total = 0.;
                for &d in dims {
                    match sample.get(d).and_then(Value::as_f64) {
                        Some(v) => total += v,
                        None => return false,
                    }
                }
                if *less_than {
                    total < *threshold
                } else {
                    total > *threshold
                }
            }
            Constraint::Conditional {
                condition,
                if_true,
                if_false,
            } => {
                let branch = if condition.is_satisfied(sample) {
                    if_true
                } else {
                    if_false
                };
                branch.iter().all(|c| c.is_satisfied(sample))
            }
        }
    }
}

impl From<Constraint> for Vec<Constraint> {
    fn from(c: Constraint) -> Self {
        vec![c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_is_satisfied() {
        let cons = Constraint::single(0, 1.0);
        assert!(cons.is_satisfied(&[Value::Real(1.0)]));
        assert!(!cons.is_satisfied(&[Value::Real(1.1)]));
        // no implicit coercion
        assert!(!cons.is_satisfied(&[Value::Int(1)]));

        let cons = Constraint::single(0, "a");
        assert!(cons.is_satisfied(&[Value::from("a")]));
        assert!(!cons.is_satisfied(&[Value::from("b")]));

        let cons = Constraint::single(0, 1i64);
        assert!(cons.is_satisfied(&[Value::Int(1)]));
        assert!(!cons.is_satisfied(&[Value::Int(2)]));
    }

    #[test]
    fn test_region_edges_are_closed() {
        let region = Region::Real { low: 5.0, high: 7.0 };
        assert!(region.contains(&Value::Real(5.0)));
        assert!(region.contains(&Value::Real(7.0)));
        assert!(!region.contains(&Value::Real(7.00001)));
        assert!(!region.contains(&Value::Real(4.99999)));

        let region = Region::Int { low: 5, high: 7 };
        assert!(region.contains(&Value::Int(5)));
        assert!(region.contains(&Value::Int(7)));
        assert!(!region.contains(&Value::Int(8)));

        let region = Region::Cats(vec!["c".into(), "d".into(), "e".into()]);
        assert!(region.contains(&Value::from("c")));
        assert!(!region.contains(&Value::from("a")));
        assert!(!region.contains(&Value::Int(1)));
    }

    #[test]
    fn test_sum_strict_boundary() {
        let cons = Constraint::sum_less_than(vec![0, 1], 6.);
        assert!(!cons.is_satisfied(&[Value::Real(0.0), Value::Int(7)]));
        assert!(!cons.is_satisfied(&[Value::Real(3.00001), Value::Int(3)]));
        assert!(cons.is_satisfied(&[Value::Real(2.99999), Value::Int(3)]));

        let cons = Constraint::sum_greater_than(vec![0, 1], 6.);
        assert!(cons.is_satisfied(&[Value::Real(0.0), Value::Int(7)]));
        assert!(cons.is_satisfied(&[Value::Real(3.00001), Value::Int(3)]));
        assert!(!cons.is_satisfied(&[Value::Real(2.99999), Value::Int(3)]));
    }

    #[test]
    fn test_conditional_branching() {
        let cons = Constraint::conditional(
            Constraint::single(0, "a"),
            Constraint::inclusive(1, Region::Int { low: 1, high: 2 }),
            Constraint::exclusive(1, Region::Int { low: 1, high: 2 }),
        );
        assert!(cons.is_satisfied(&[Value::from("a"), Value::Int(2)]));
        assert!(!cons.is_satisfied(&[Value::from("a"), Value::Int(3)]));
        assert!(cons.is_satisfied(&[Value::from("b"), Value::Int(3)]));
        assert!(!cons.is_satisfied(&[Value::from("b"), Value::Int(2)]));
    }
}
