//! Interactive mode for the server.
//!
//! Prompts for the bind address, port, and input tables before starting.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

fn prompt_text(prompt: &str, default: String) -> String {
    Input::new()
        .with_prompt(prompt)
        .default(default.clone())
        .interact_text()
        .unwrap_or(default)
}

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults come from [`ServerConfig::from_env`].
///
/// # Errors
///
/// Returns [`ServerError`] if the server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("Complaint Map Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr = prompt_text("Bind address", defaults.bind_addr.clone());
    let port_str = prompt_text("Port", defaults.port.to_string());
    let port = port_str.trim().parse().unwrap_or_else(|_| {
        println!("Invalid port '{port_str}', using {}", defaults.port);
        defaults.port
    });
    let clusters = prompt_text(
        "Cluster table",
        defaults.data.clusters.display().to_string(),
    );
    let comments = prompt_text(
        "Comment table",
        defaults.data.comments.display().to_string(),
    );

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    let mut config = defaults;
    config.bind_addr = bind_addr;
    config.port = port;
    config.data.clusters = PathBuf::from(clusters);
    config.data.comments = PathBuf::from(comments);

    crate::run_server(config).await
}
