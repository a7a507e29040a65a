//! Construction-time validation of constraint declarations against a space.

use crate::constraint::{Constraint, Region};
use crate::errors::{ConstraintError, Result};
use sobox_space::{Dimension, Kind, Space, Value};

/// Validate a constraint list against `space`: dimension indices in range,
/// constraint kinds matching dimension kinds, regions and pinned values
/// within the dimension domains, and at most one top-level [`Constraint::Single`]
/// per dimension.
pub fn check_constraints(space: &Space, constraints: &[Constraint]) -> Result<()> {
    let mut pinned = vec![false; space.n_dims()];
    for constraint in constraints {
        check_constraint(space, constraint)?;
        if let Constraint::Single { dim, .. } = constraint {
            if pinned[*dim] {
                return Err(ConstraintError::DuplicateSingle(*dim));
            }
            pinned[*dim] = true;
        }
    }
    Ok(())
}

fn check_constraint(space: &Space, constraint: &Constraint) -> Result<()> {
    match constraint {
        Constraint::Single { dim, value } => {
            let dimension = dimension_at(space, *dim)?;
            check_kind(dimension, value.kind(), *dim)?;
            check_value(dimension, value)
        }
        Constraint::Inclusive { dim, region } | Constraint::Exclusive { dim, region } => {
            let dimension = dimension_at(space, *dim)?;
            check_kind(dimension, region.kind(), *dim)?;
            check_bounds(dimension, region)
        }
        Constraint::Sum { dims, .. } => {
            if dims.len() < 2 {
                return Err(ConstraintError::InvalidSum(format!(
                    "a sum constraint needs at least two dimensions, got {}",
                    dims.len()
                )));
            }
            for &dim in dims {
                let dimension = dimension_at(space, dim)?;
                if dimension.kind() == Kind::Categorical {
                    return Err(ConstraintError::InvalidSum(format!(
                        "dimension {dim} is categorical and cannot be summed"
                    )));
                }
            }
            Ok(())
        }
        Constraint::Conditional {
            condition,
            if_true,
            if_false,
        } => {
            check_constraint(space, condition)?;
            for branch in if_true.iter().chain(if_false.iter()) {
                check_constraint(space, branch)?;
            }
            Ok(())
        }
    }
}

fn dimension_at(space: &Space, dim: usize) -> Result<&Dimension> {
    space.dimensions().get(dim).ok_or_else(|| {
        ConstraintError::DimensionIndex(format!(
            "dimension {dim} does not exist in a space of {} dimensions",
            space.n_dims()
        ))
    })
}

fn check_kind(dimension: &Dimension, kind: Kind, dim: usize) -> Result<()> {
    if dimension.kind() != kind {
        return Err(ConstraintError::KindMismatch(format!(
            "constraint on dimension {dim} is {kind} but the dimension is {}",
            dimension.kind()
        )));
    }
    Ok(())
}

/// Validate that a pinned value lies within the dimension domain
pub fn check_value(dimension: &Dimension, value: &Value) -> Result<()> {
    if !dimension.contains(value) {
        return Err(ConstraintError::ValueOutOfDomain(format!(
            "value {value:?} lies outside the {} dimension {:?}",
            dimension.kind(),
            dimension.bounds()
        )));
    }
    Ok(())
}

/// Validate that a membership region lies within the dimension domain
pub fn check_bounds(dimension: &Dimension, region: &Region) -> Result<()> {
    let ok = match (dimension, region) {
        (Dimension::Real { low, high, .. }, Region::Real { low: rlow, high: rhigh }) => {
            rlow <= rhigh && *low <= *rlow && *rhigh <= *high
        }
        (Dimension::Integer { low, high }, Region::Int { low: rlow, high: rhigh }) => {
            rlow <= rhigh && *low <= *rlow && *rhigh <= *high
        }
        (Dimension::Categorical { categories, .. }, Region::Cats(cats)) => {
            !cats.is_empty() && cats.iter().all(|c| categories.contains(c))
        }
        _ => false,
    };
    if !ok {
        return Err(ConstraintError::BoundsOutOfDomain(format!(
            "region {region:?} is not contained in the {} dimension {:?}",
            dimension.kind(),
            dimension.bounds()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sobox_space::Dimension;

    fn space() -> Space {
        Space::new(vec![
            Dimension::real(0., 5.).unwrap(),
            Dimension::integer(0, 5).unwrap(),
            Dimension::categorical(["a", "b", "c"]).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_index_out_of_range() {
        let err = check_constraints(&space(), &[Constraint::single(3, 1.0)]);
        assert!(matches!(err, Err(ConstraintError::DimensionIndex(_))));
    }

    #[test]
    fn test_kind_must_match_dimension() {
        let space = space();
        let err = check_constraints(&space, &[Constraint::single(2, 1i64)]);
        assert!(matches!(err, Err(ConstraintError::KindMismatch(_))));
        let err = check_constraints(&space, &[Constraint::single(1, 1.0)]);
        assert!(matches!(err, Err(ConstraintError::KindMismatch(_))));
        let err = check_constraints(&space, &[Constraint::single(0, "a")]);
        assert!(matches!(err, Err(ConstraintError::KindMismatch(_))));
        // no implicit int -> real coercion
        let err = check_constraints(&space, &[Constraint::single(0, 1i64)]);
        assert!(matches!(err, Err(ConstraintError::KindMismatch(_))));
    }

    #[test]
    fn test_one_single_per_dimension() {
        let err = check_constraints(
            &space(),
            &[Constraint::single(0, 1.0), Constraint::single(0, 2.0)],
        );
        assert!(matches!(err, Err(ConstraintError::DuplicateSingle(0))));
    }

    #[test]
    fn test_singles_in_conditional_branches_are_not_pins() {
        // both branches may constrain the same dimension
        let cons = Constraint::conditional(
            Constraint::single(2, "a"),
            Constraint::single(1, 1i64),
            Constraint::single(1, 2i64),
        );
        assert!(check_constraints(&space(), &[cons]).is_ok());
    }

    #[test]
    fn test_check_bounds() {
        let space = space();
        check_bounds(&space.dimensions()[0], &Region::Real { low: 1., high: 2. }).unwrap();
        check_bounds(&space.dimensions()[1], &Region::Int { low: 1, high: 3 }).unwrap();
        check_bounds(&space.dimensions()[2], &Region::Cats(vec!["a".into(), "b".into()]))
            .unwrap();

        assert!(
            check_bounds(&space.dimensions()[0], &Region::Real { low: -1., high: 2. }).is_err()
        );
        assert!(
            check_bounds(&space.dimensions()[0], &Region::Real { low: 2., high: 10. }).is_err()
        );
        assert!(check_bounds(&space.dimensions()[1], &Region::Int { low: -1, high: 2 }).is_err());
        assert!(check_bounds(&space.dimensions()[1], &Region::Int { low: 2, high: 10 }).is_err());
        assert!(
            check_bounds(&space.dimensions()[2], &Region::Cats(vec!["k".into()])).is_err()
        );
        // kind mismatch between region and dimension
        assert!(
            check_bounds(&space.dimensions()[0], &Region::Int { low: 1, high: 2 }).is_err()
        );
    }

    #[test]
    fn test_check_value() {
        let space = space();
        check_value(&space.dimensions()[0], &Value::Real(1.0)).unwrap();
        check_value(&space.dimensions()[1], &Value::Int(1)).unwrap();
        check_value(&space.dimensions()[2], &Value::from("b")).unwrap();

        assert!(check_value(&space.dimensions()[0], &Value::Real(10.0)).is_err());
        assert!(check_value(&space.dimensions()[0], &Value::Real(-1.0)).is_err());
        assert!(check_value(&space.dimensions()[1], &Value::Int(10)).is_err());
        assert!(check_value(&space.dimensions()[1], &Value::Int(-1)).is_err());
        assert!(check_value(&space.dimensions()[2], &Value::from("wow")).is_err());
    }

    #[test]
    fn test_sum_checks() {
        let space = space();
        check_constraints(&space, &[Constraint::sum_less_than(vec![0, 1], 5.)]).unwrap();

        let err = check_constraints(&space, &[Constraint::sum_less_than(vec![0], 5.)]);
        assert!(matches!(err, Err(ConstraintError::InvalidSum(_))));
        let err = check_constraints(&space, &[Constraint::sum_less_than(vec![4, 3], 5.)]);
        assert!(matches!(err, Err(ConstraintError::DimensionIndex(_))));
        let err = check_constraints(&space, &[Constraint::sum_less_than(vec![1, 2], 5.)]);
        assert!(matches!(err, Err(ConstraintError::InvalidSum(_))));
    }
}
