//! Emission routines, grouped by node family.

pub(crate) mod block;
pub(crate) mod footnote;
pub(crate) mod inline;
pub(crate) mod list;
pub(crate) mod table;
