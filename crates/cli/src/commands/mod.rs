//! Command implementations.
//!
//! Each command runs one interaction against the storefront state and writes
//! its result to `Context::out`.

use std::io::{self, Write};

use thiserror::Error;
use url::Url;

use odhanee_core::ProductId;
use odhanee_storefront::AppState;
use odhanee_storefront::error::AppError;
use odhanee_storefront::store::BackendError;

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront rejected the interaction.
    #[error(transparent)]
    App(#[from] AppError),

    /// The data directory could not be opened.
    #[error("storage unavailable: {0}")]
    Storage(#[from] BackendError),

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// Invalid command arguments.
    #[error("{0}")]
    Usage(String),
}

/// Everything a command needs: the state, the share base URL and the output.
pub struct Context<'a, W: Write> {
    pub state: &'a mut AppState,
    pub base_url: &'a Url,
    pub out: &'a mut W,
}

fn product_id(id: &str) -> Result<ProductId, CommandError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CommandError::Usage("product ID cannot be empty".to_owned()));
    }
    Ok(ProductId::new(id))
}
