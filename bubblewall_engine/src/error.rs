// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine errors.

use std::error::Error;
use std::fmt;
use std::io;

use bubblewall_core::color::PaletteError;

/// Errors reported by an [`Engine`](crate::Engine).
#[derive(Debug)]
pub enum EngineError {
    /// The engine was shut down; the event was not delivered.
    Stopped,
    /// The host's bubble colors do not form a usable palette.
    Palette(PaletteError),
    /// The surface failed while presenting a frame.
    Surface(Box<dyn Error + Send + Sync>),
    /// The worker thread could not be started.
    Spawn(io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "engine is stopped"),
            Self::Palette(err) => write!(f, "invalid bubble palette: {err}"),
            Self::Surface(err) => write!(f, "surface error: {err}"),
            Self::Spawn(err) => write!(f, "failed to start worker thread: {err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stopped => None,
            Self::Palette(err) => Some(err),
            Self::Surface(err) => Some(&**err),
            Self::Spawn(err) => Some(err),
        }
    }
}

impl From<PaletteError> for EngineError {
    fn from(err: PaletteError) -> Self {
        Self::Palette(err)
    }
}
