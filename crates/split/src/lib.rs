//! Data partitioning: Fisher–Yates shuffle, shuffle-split and k-fold.
//!
//! Partitions hold references into the caller's sequence; nothing is
//! copied. All randomness comes from an explicitly passed [`rand::Rng`],
//! so a seeded generator reproduces every split.
//!
//! ```
//! use morpho_split::{k_fold, shuffle_split};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let items: Vec<u32> = (0..10).collect();
//! let mut rng = StdRng::seed_from_u64(1);
//! let split = shuffle_split(&items, 0.8, &mut rng).unwrap();
//! assert_eq!((split.train().len(), split.test().len()), (8, 2));
//!
//! assert_eq!(k_fold(&items, 5).unwrap().len(), 5);
//! ```

pub mod error;
pub mod kfold;
pub mod shuffle;
pub mod split;

pub use error::SplitError;
pub use kfold::{KFold, k_fold};
pub use shuffle::shuffle;
pub use split::{Split, shuffle_split};
