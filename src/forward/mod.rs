pub(crate) mod handle;
pub(crate) mod launcher;
pub(crate) mod output_relay;
