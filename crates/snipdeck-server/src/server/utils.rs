//! Utilities for managing the API server.

use snipdeck_core::config::{ensure_config_dir, get_port_file_path};
use snipdeck_core::{Result, SnipdeckError};
use std::fs;
use std::path::Path;

/// Try to get the API server port from stored configuration
pub fn get_api_server_port() -> Result<u16> {
    read_port_file(&get_port_file_path())
}

fn read_port_file(path: &Path) -> Result<u16> {
    if !path.exists() {
        return Err(SnipdeckError::Server(
            "API server port information not found".to_string(),
        ));
    }

    fs::read_to_string(path)?
        .trim()
        .parse::<u16>()
        .map_err(|_| SnipdeckError::Server("Invalid port stored in configuration".to_string()))
}

/// Save the API port to a configuration file
pub fn save_api_port(port: u16) -> Result<()> {
    ensure_config_dir()?;
    fs::write(get_port_file_path(), port.to_string())?;
    Ok(())
}

/// Forget the stored API port
pub fn remove_api_port() -> Result<()> {
    let port_file_path = get_port_file_path();
    if port_file_path.exists() {
        fs::remove_file(port_file_path)?;
    }
    Ok(())
}
