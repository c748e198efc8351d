//! Command handlers grouped by concern.

pub(crate) mod ssh_keys;
pub(crate) mod users;
