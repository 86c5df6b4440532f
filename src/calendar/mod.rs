pub(crate) mod classify;
pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod request;
pub(crate) mod sweep;
