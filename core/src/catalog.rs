//! Provider and Model Catalog
//!
//! A static, read-only registry of the providers cell knows how to talk to
//! and the models each of them serves. Startup validation queries this table;
//! nothing else in the crate mutates or extends it.
//!
//! Every listed provider speaks the OpenAI-compatible `/chat/completions`
//! protocol, so one HTTP backend covers all of them; the entries differ only
//! in base URL and in which environment variable holds the API key.

/// One addressable model within a provider's catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    /// Model identifier as the provider's API expects it
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Context window in tokens
    pub context_window: u32,
}

/// A named upstream source of models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Provider identifier (what `CELL_PROVIDER` selects)
    pub id: &'static str,
    /// OpenAI-compatible API root, without the `/chat/completions` suffix
    pub base_url: &'static str,
    /// Environment variable holding the API key, if the provider needs one
    pub api_key_env: Option<&'static str>,
    /// Models served by this provider, in catalog order
    pub models: &'static [ModelSpec],
}

impl ProviderSpec {
    /// Look up a model by identifier.
    pub fn find_model(&self, id: &str) -> Option<&'static ModelSpec> {
        self.models.iter().find(|model| model.id == id)
    }

    /// The API key for this provider, if one is configured.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env.and_then(|var| std::env::var(var).ok())
    }
}

const OPENROUTER_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "openrouter/auto", name: "Auto Router", context_window: 200_000 },
    ModelSpec { id: "anthropic/claude-3.5-sonnet", name: "Claude 3.5 Sonnet", context_window: 200_000 },
    ModelSpec { id: "anthropic/claude-3-haiku", name: "Claude 3 Haiku", context_window: 200_000 },
    ModelSpec { id: "openai/gpt-4o", name: "GPT-4o", context_window: 128_000 },
    ModelSpec { id: "openai/gpt-4o-mini", name: "GPT-4o mini", context_window: 128_000 },
    ModelSpec { id: "google/gemini-pro-1.5", name: "Gemini 1.5 Pro", context_window: 2_000_000 },
    ModelSpec { id: "google/gemini-flash-1.5", name: "Gemini 1.5 Flash", context_window: 1_000_000 },
    ModelSpec { id: "meta-llama/llama-3.1-405b-instruct", name: "Llama 3.1 405B", context_window: 131_072 },
    ModelSpec { id: "meta-llama/llama-3.1-70b-instruct", name: "Llama 3.1 70B", context_window: 131_072 },
    ModelSpec { id: "meta-llama/llama-3.1-8b-instruct", name: "Llama 3.1 8B", context_window: 131_072 },
    ModelSpec { id: "mistralai/mistral-large", name: "Mistral Large", context_window: 128_000 },
    ModelSpec { id: "mistralai/mixtral-8x7b-instruct", name: "Mixtral 8x7B", context_window: 32_768 },
    ModelSpec { id: "deepseek/deepseek-chat", name: "DeepSeek V2.5", context_window: 64_000 },
    ModelSpec { id: "qwen/qwen-2.5-72b-instruct", name: "Qwen 2.5 72B", context_window: 131_072 },
];

const OPENAI_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "gpt-4o", name: "GPT-4o", context_window: 128_000 },
    ModelSpec { id: "gpt-4o-mini", name: "GPT-4o mini", context_window: 128_000 },
    ModelSpec { id: "gpt-4-turbo", name: "GPT-4 Turbo", context_window: 128_000 },
    ModelSpec { id: "gpt-3.5-turbo", name: "GPT-3.5 Turbo", context_window: 16_385 },
];

const GROQ_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "llama-3.1-70b-versatile", name: "Llama 3.1 70B", context_window: 131_072 },
    ModelSpec { id: "llama-3.1-8b-instant", name: "Llama 3.1 8B", context_window: 131_072 },
    ModelSpec { id: "mixtral-8x7b-32768", name: "Mixtral 8x7B", context_window: 32_768 },
    ModelSpec { id: "gemma2-9b-it", name: "Gemma 2 9B", context_window: 8_192 },
];

const MISTRAL_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "mistral-large-latest", name: "Mistral Large", context_window: 128_000 },
    ModelSpec { id: "mistral-small-latest", name: "Mistral Small", context_window: 32_000 },
    ModelSpec { id: "open-mistral-nemo", name: "Mistral Nemo", context_window: 128_000 },
    ModelSpec { id: "codestral-latest", name: "Codestral", context_window: 32_000 },
];

const DEEPSEEK_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "deepseek-chat", name: "DeepSeek Chat", context_window: 64_000 },
    ModelSpec { id: "deepseek-reasoner", name: "DeepSeek Reasoner", context_window: 64_000 },
];

const OLLAMA_MODELS: &[ModelSpec] = &[
    ModelSpec { id: "llama3.2", name: "Llama 3.2", context_window: 131_072 },
    ModelSpec { id: "qwen2.5", name: "Qwen 2.5", context_window: 32_768 },
    ModelSpec { id: "mistral", name: "Mistral 7B", context_window: 32_768 },
];

const PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        id: "openrouter",
        base_url: "https://openrouter.ai/api/v1",
        api_key_env: Some("OPENROUTER_API_KEY"),
        models: OPENROUTER_MODELS,
    },
    ProviderSpec {
        id: "openai",
        base_url: "https://api.openai.com/v1",
        api_key_env: Some("OPENAI_API_KEY"),
        models: OPENAI_MODELS,
    },
    ProviderSpec {
        id: "groq",
        base_url: "https://api.groq.com/openai/v1",
        api_key_env: Some("GROQ_API_KEY"),
        models: GROQ_MODELS,
    },
    ProviderSpec {
        id: "mistral",
        base_url: "https://api.mistral.ai/v1",
        api_key_env: Some("MISTRAL_API_KEY"),
        models: MISTRAL_MODELS,
    },
    ProviderSpec {
        id: "deepseek",
        base_url: "https://api.deepseek.com/v1",
        api_key_env: Some("DEEPSEEK_API_KEY"),
        models: DEEPSEEK_MODELS,
    },
    ProviderSpec {
        id: "ollama",
        base_url: "http://localhost:11434/v1",
        api_key_env: None,
        models: OLLAMA_MODELS,
    },
];

/// All known providers, in catalog order.
pub fn providers() -> &'static [ProviderSpec] {
    PROVIDERS
}

/// All known provider identifiers, in catalog order.
pub fn provider_ids() -> Vec<&'static str> {
    PROVIDERS.iter().map(|provider| provider.id).collect()
}

/// Look up a provider by identifier.
pub fn find_provider(id: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|provider| provider.id == id)
}
