//! CLI command implementations

pub(crate) mod ls;
pub(crate) mod run;
pub(crate) mod split;
