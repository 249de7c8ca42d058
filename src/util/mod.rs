pub(crate) mod error;
pub(crate) mod logging;
pub(crate) mod panics;
pub(crate) mod paths;
