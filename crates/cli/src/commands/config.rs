use std::path::PathBuf;

use anyhow::{Context, Result};
use outfitter_engine::EngineConfig;

/// Handle the `config` command: print the merged configuration as TOML.
pub(crate) fn handle_config_command(config: Option<PathBuf>) -> Result<()> {
    let effective =
        EngineConfig::load(config.as_deref()).context("loading engine configuration")?;
    print!("{}", render(&effective)?);
    Ok(())
}

fn render(config: &EngineConfig) -> Result<String> {
    toml::to_string_pretty(config).context("serializing engine configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_loads_back() {
        let config = EngineConfig {
            top_k_per_category: 4,
            ..EngineConfig::default()
        };
        let rendered = render(&config).unwrap();
        assert!(rendered.contains("top_k_per_category = 4"));

        let parsed =
            EngineConfig::from_toml_str(&rendered, std::path::Path::new("inline")).unwrap();
        assert_eq!(parsed, config);
    }
}
