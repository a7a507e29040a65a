/*!
This library defines bounded, possibly mixed-type search spaces for
sequential optimization, with per-dimension sampling priors and warping
transforms to a purely numeric representation.

A space is an ordered list of dimensions; a point is one [`Value`] per
dimension. Warping projects points to a `(n, transformed_n_dims)` float
matrix suitable for surrogate models and numeric optimizers, and
`inverse_transform` recovers the original representation.

Example:
```
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use sobox_space::{Dimension, Space, Value};

let space = Space::new(vec![
    Dimension::real(0., 25.)?,
    Dimension::integer(1, 8)?,
    Dimension::categorical(["relu", "tanh", "sigmoid"])?,
])?;

let mut rng = Xoshiro256Plus::seed_from_u64(42);
let points = space.rvs(5, &mut rng);
let warped = space.transform(&points)?;
assert_eq!(warped.shape(), &[5, 5]);
assert_eq!(space.inverse_transform(&warped)?, points);
# Ok::<(), sobox_space::SpaceError>(())
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod dim;
mod errors;
mod space;
mod value;

pub use dim::{DimBounds, Dimension, Prior, Warping};
pub use errors::{Result, SpaceError};
pub use space::Space;
pub use value::{Kind, Point, Value};
