pub mod args;
pub mod servicedebug_configuration;
