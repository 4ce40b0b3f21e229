mod config;
mod recommend;

pub(crate) use config::handle_config_command;
pub(crate) use recommend::handle_recommend_command;
