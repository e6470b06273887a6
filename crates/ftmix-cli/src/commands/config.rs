use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ftmix_core::pipeline::config::MixConfig;
use ftmix_core::region::MixMode;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default MixConfig as TOML, followed by a commented
/// region-mode example.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = MixConfig::default();
    let mut toml_str = toml::to_string_pretty(&config)?;
    toml_str.push_str(&region_example()?);

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// The default region mode as commented-out TOML, ready to replace
/// `mode = "Component"`.
fn region_example() -> Result<String> {
    let mut table = toml::Table::new();
    table.insert(
        "mode".to_string(),
        toml::Value::try_from(MixMode::default_region())?,
    );
    let body = toml::to_string(&table)?;

    let mut out = String::from(
        "\n# Mix only a centered part of the spectrum (size 0.1-1.0 of the padded grid,\n\
         # pass_inside = false keeps the outer frequencies). Replace `mode` with:\n",
    );
    for line in body.lines().filter(|l| !l.is_empty()) {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_example_is_commented_and_parses_back() {
        let example = region_example().unwrap();
        let body: String = example
            .lines()
            .filter_map(|l| l.strip_prefix("# "))
            .skip(2)
            .map(|l| format!("{l}\n"))
            .collect();
        assert!(example.lines().all(|l| l.is_empty() || l.starts_with('#')));

        let table: toml::Table = toml::from_str(&body).unwrap();
        let mode: MixMode = table["mode"].clone().try_into().unwrap();
        assert_eq!(mode, MixMode::default_region());
    }

    #[test]
    fn default_config_with_example_still_parses() {
        let mut text = toml::to_string_pretty(&MixConfig::default()).unwrap();
        text.push_str(&region_example().unwrap());
        let parsed: MixConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, MixConfig::default());
    }
}
