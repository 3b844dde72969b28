/// Content hashing over raw bytes.
pub mod hash;
/// Path expansion and destination mapping helpers.
pub mod paths;
