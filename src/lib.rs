// Taxon: ISIC classification for free-text firm activity descriptions.
//
// This is the library root. The reference list is loaded once, stays
// immutable, and is passed by reference into every classification call;
// the matcher does the scoring and the batch module wraps it in CSV I/O.

pub mod batch;
pub mod config;
pub mod error;
pub mod matcher;
pub mod reference;
pub mod remote;
