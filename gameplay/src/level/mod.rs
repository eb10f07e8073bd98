//! Geometry derived once from a map and never changed afterwards.

pub mod vector_map;
