pub mod forward_outcome;
pub mod forward_request;
