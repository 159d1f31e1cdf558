use std::path::Path;

use anyhow::{Context, Result};

use skyfall_sim::WorldConfig;

/// Load a world config from a JSON file, or the defaults when no path is given.
/// Missing fields fall back to their defaults.
pub fn load(path: Option<&Path>) -> Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&json).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse(json: &str) -> Result<WorldConfig> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_path() {
        let config = load(None).unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse(r#"{ "seed": 7, "scroll_speed": -80.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.scroll_speed, -80.0);
        assert_eq!(config.view_width, WorldConfig::default().view_width);
        assert_eq!(config.spawns.len(), 8);
    }

    #[test]
    fn test_custom_spawns() {
        let config = parse(r#"{ "spawns": [ { "kind": "Avenger", "x": 10.0, "depth": 300.0 } ] }"#).unwrap();
        assert_eq!(config.spawns.len(), 1);
        assert_eq!(config.spawns[0].depth, 300.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("here.json"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse("{ seed: ").is_err());
    }
}
