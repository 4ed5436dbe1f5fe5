use config::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

#[derive(Deserialize)]
pub struct Settings {
    pub api_settings: ApiSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApiSettings {
    pub api_base_url: String,
    pub api_key: String,
}

impl ApiSettings {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

pub fn get_configuration(cfg_file: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::new(cfg_file, config::FileFormat::Yaml))
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub struct ConfigFolder {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigFolder {
    pub fn new() -> Self {
        let home_dir = env::var("HOME").expect("Failed to get HOME environment variable");

        Self {
            config_dir: get_config_dir_name(&home_dir),
            config_file: get_config_file_name(&home_dir),
        }
    }
}

impl Default for ConfigFolder {
    fn default() -> Self {
        Self::new()
    }
}

fn get_config_dir_name(home_dir: &str) -> PathBuf {
    Path::new(home_dir).join(".tunesearch")
}

fn get_config_file_name(home_dir: &str) -> PathBuf {
    Path::new(home_dir).join(".tunesearch").join("config.yaml")
}

pub fn create_config(cfg_folder: ConfigFolder) -> Result<(), Box<dyn std::error::Error>> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");
    let config_dir = cfg_folder.config_dir;

    if config_dir.exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;

    let config_content = include_str!("config_template.yaml");
    fs::write(&cfg_folder.config_file, config_content)?;

    println!("\x1b[32mConfiguration folder created at:");
    println!("  -> ~/.tunesearch");
    println!("Configuration file created at:");
    println!("  -> ~/.tunesearch/config.yaml");
    println!("\x1b[0mPlease edit the configuration file and add your YouTube API key.");

    Ok(())
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration folder already exists.");
    println!("Do you want to overwrite it? Everything will be lost. (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() == "y" {
        Ok(true)
    } else {
        Ok(false)
    }
}
