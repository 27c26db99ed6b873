// Application configuration, loaded from environment variables and CLI flags.

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database URL (SQLite connection string).
    pub database_url: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// API key for the external decision service. Left empty, every
    /// decision call fails with an auth error and sessions simply receive
    /// no orders.
    pub llm_api_key: String,
    /// Completion endpoint URL. Anthropic and OpenAI-compatible endpoints
    /// are both supported; the format is detected from the URL.
    pub llm_api_url: String,
    /// Model identifier sent with each completion request.
    pub llm_model: String,
    /// Upper bound on a single decision call, in seconds.
    pub decision_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection string (default: `sqlite:gridtactics.db?mode=rwc`)
    /// - `PORT` - HTTP server port (default: 8000)
    /// - `LLM_API_KEY` - decision service API key
    /// - `LLM_API_URL` - completion endpoint (default: Gemini's OpenAI-compatible endpoint)
    /// - `LLM_MODEL` - model identifier (default: `gemini-1.5-flash`)
    /// - `DECISION_TIMEOUT_SECS` - per-call timeout (default: 30)
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:gridtactics.db?mode=rwc".to_string());

        // Port: CLI flag --port takes precedence, then env var, then default
        let port = Self::parse_cli_value(&args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(8000);

        let llm_api_key = std::env::var("LLM_API_KEY").unwrap_or_default();

        let llm_api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions".to_string()
        });

        let llm_model =
            std::env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let decision_timeout_secs = std::env::var("DECISION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Config {
            database_url,
            port,
            llm_api_key,
            llm_api_url,
            llm_model,
            decision_timeout_secs,
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_value() {
        let args: Vec<String> = ["gridtactics-backend", "--port", "9000"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            Config::parse_cli_value(&args, "--port"),
            Some("9000".to_string())
        );
        assert_eq!(Config::parse_cli_value(&args, "--host"), None);
    }

    #[test]
    fn test_parse_cli_value_flag_without_value() {
        let args: Vec<String> = ["gridtactics-backend", "--port"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(Config::parse_cli_value(&args, "--port"), None);
    }
}
