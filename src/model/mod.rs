pub(crate) mod paths;
pub(crate) mod reader;
pub(crate) mod role;
pub(crate) mod writer;
