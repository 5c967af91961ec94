//! Commented configuration template written by `init-config`

/// Template whose active values equal the built-in defaults
pub const CONFIG_TEMPLATE: &str = r#"# eskai configuration
#
# Sources, lowest priority first: built-in defaults, the global file
# (~/.config/eskai/config.toml), ./eskai.toml or ./.eskai.toml, --config,
# then ESKAI_* environment variables (ESKAI_EXECUTION__TIMEOUT_SECONDS=600).

[providers]
# Backends tried first for chat replies, agents and synthesis
priority = ["openai", "groq", "gemini"]
temperature = 0.7

# A provider is used only when its API key is available.
[providers.openai]
# model = "gpt-4"
# base_url = "https://api.openai.com/v1"
# api_key_env = "OPENAI_API_KEY"
# timeout_seconds = 60

[providers.groq]
# model = "mixtral-8x7b-32768"
# api_key_env = "GROQ_API_KEY"

[providers.gemini]
# model = "gemini-pro"
# api_key_env = "GEMINI_API_KEY"

[execution]
max_concurrent_agents = 3
enable_parallel_execution = false
# Whole-run budget, at least 60
timeout_seconds = 3600
agent_timeout_seconds = 1800
retry_attempts = 3
retry_delay_ms = 1000

[tools]
enable_internet = true
enable_code_execution = true

[logging]
level = "info"
# file = "~/.local/share/eskai/eskai.log"

[output]
# "pretty" or "json"
format = "pretty"
color = true

[repl]
show_progress = true
# history_file = "~/.local/share/eskai/history.txt"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
