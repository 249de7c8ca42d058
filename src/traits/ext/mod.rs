pub(crate) mod exit_status;
