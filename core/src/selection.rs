//! Startup Selection Validation
//!
//! Validates the requested provider/model pair against the catalog before
//! anything else is constructed. Validation failures carry the full
//! diagnostic text; the binary prints them to stderr and exits non-zero
//! without allocating an agent, a backend, or any terminal state.

use thiserror::Error;

use crate::catalog::{self, ModelSpec, ProviderSpec};

/// How many model identifiers an unknown-model diagnostic lists before
/// collapsing the remainder into a count.
const MODEL_PREVIEW_LIMIT: usize = 10;

/// The validated provider/model pair, fixed for the process lifetime.
#[derive(Clone, Copy, Debug)]
pub struct SelectedModel {
    /// The provider that serves the model
    pub provider: &'static ProviderSpec,
    /// The model descriptor the catalog matched
    pub model: &'static ModelSpec,
}

impl std::fmt::Display for SelectedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} · {}", self.provider.id, self.model.id)
    }
}

/// Why a requested provider/model pair was rejected.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The requested provider is not in the catalog.
    #[error("Unknown provider \"{requested}\". Available providers: {}", .available.join(", "))]
    UnknownProvider {
        /// The provider identifier that was requested
        requested: String,
        /// Every provider the catalog knows
        available: Vec<String>,
    },

    /// The provider exists but does not serve the requested model.
    #[error(
        "Unknown model \"{requested}\" for provider \"{provider}\". Available models: {}",
        model_preview(.available)
    )]
    UnknownModel {
        /// The model identifier that was requested
        requested: String,
        /// The provider that was searched
        provider: String,
        /// Every model identifier that provider serves
        available: Vec<String>,
    },
}

/// First [`MODEL_PREVIEW_LIMIT`] identifiers, with a remainder count when the
/// list is longer than that.
fn model_preview(available: &[String]) -> String {
    let preview = available
        .iter()
        .take(MODEL_PREVIEW_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if available.len() > MODEL_PREVIEW_LIMIT {
        format!("{preview} (and {} more)", available.len() - MODEL_PREVIEW_LIMIT)
    } else {
        preview
    }
}

/// Resolve a requested provider/model pair against the catalog.
pub fn select_model(provider_id: &str, model_id: &str) -> Result<SelectedModel, SelectionError> {
    let Some(provider) = catalog::find_provider(provider_id) else {
        return Err(SelectionError::UnknownProvider {
            requested: provider_id.to_string(),
            available: catalog::provider_ids().into_iter().map(String::from).collect(),
        });
    };

    let Some(model) = provider.find_model(model_id) else {
        return Err(SelectionError::UnknownModel {
            requested: model_id.to_string(),
            provider: provider_id.to_string(),
            available: provider.models.iter().map(|model| model.id.to_string()).collect(),
        });
    };

    Ok(SelectedModel { provider, model })
}
