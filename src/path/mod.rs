pub(crate) mod primitive;
pub(crate) mod spline;
pub(crate) mod tree;
pub(crate) mod visit;
