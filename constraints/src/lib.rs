/*!
This library declares typed constraints over [`sobox_space::Space`] search
spaces and draws admissible samples under them.

Five constraint forms compose freely: `Single` pins a dimension to an exact
value, `Inclusive`/`Exclusive` keep a dimension inside/outside a membership
region, `Sum` bounds the sum of several numeric dimensions, and
`Conditional` selects between two constraint lists depending on a guard
predicate, recursively. Per dimension, several `Inclusive` clauses widen
the admissible set (union) while several `Exclusive` clauses narrow it
(intersection of exclusions).

Example:
```
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use sobox_constraints::{Constraint, Constraints, Region};
use sobox_space::{Dimension, Space, Value};

let space = Space::new(vec![
    Dimension::real(0., 10.)?,
    Dimension::categorical(["low", "high"])?,
])?;
let cons = Constraints::new(
    vec![
        Constraint::inclusive(0, Region::Real { low: 2., high: 4. }),
        Constraint::single(1, "low"),
    ],
    space,
)?;

let mut rng = Xoshiro256Plus::seed_from_u64(42);
for sample in cons.rvs(10, &mut rng)? {
    assert!(cons.validate_sample(&sample));
    assert_eq!(sample[1], Value::from("low"));
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod checks;
mod constraint;
mod constraints;
mod errors;

pub use checks::{check_bounds, check_constraints, check_value};
pub use constraint::{Constraint, Region};
pub use constraints::Constraints;
pub use errors::{ConstraintError, Result};
