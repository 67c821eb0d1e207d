#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use crate::i18n::TargetLanguage;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["firmlens"]).unwrap();

        assert!(args.query.is_none());
        assert_eq!(args.output_path, PathBuf::from("./firmlens.report"));
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_positional_query() {
        let args =
            Args::try_parse_from(&["firmlens", "Tell me about Tesla's recent activities"]).unwrap();

        assert_eq!(
            args.query,
            Some("Tell me about Tesla's recent activities".to_string())
        );
    }

    #[test]
    fn test_args_short_options() {
        let args = Args::try_parse_from(&[
            "firmlens",
            "Research Amazon's business model",
            "-o",
            "/test/output",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.output_path, PathBuf::from("/test/output"));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from(&[
            "firmlens",
            "--llm-provider",
            "deepseek",
            "--llm-api-key",
            "test-key",
            "--llm-api-base-url",
            "https://api.deepseek.com/v1",
            "--model-efficient",
            "deepseek-chat",
            "--model-powerful",
            "deepseek-reasoner",
            "--max-tokens",
            "2048",
            "--temperature",
            "0.7",
            "--max-iterations",
            "4",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("deepseek".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(
            args.llm_api_base_url,
            Some("https://api.deepseek.com/v1".to_string())
        );
        assert_eq!(args.model_efficient, Some("deepseek-chat".to_string()));
        assert_eq!(args.model_powerful, Some("deepseek-reasoner".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.7));
        assert_eq!(args.max_iterations, Some(4));
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let args = Args::try_parse_from(&[
            "firmlens",
            "-o",
            "/test/output",
            "--llm-provider",
            "anthropic",
            "--llm-api-key",
            "sk-test",
            "--search-api-key",
            "tvly-test",
            "--max-search-results",
            "2",
            "--target-language",
            "zh",
            "--verbose",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.output_path, PathBuf::from("/test/output"));
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.search.api_key, "tvly-test");
        assert_eq!(config.search.max_results_per_query, 2);
        assert_eq!(config.target_language, TargetLanguage::Chinese);
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let args = Args::try_parse_from(&["firmlens", "--llm-provider", "unknown"]).unwrap();
        let config = args.into_config();
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_into_config_unknown_language_keeps_default() {
        let args = Args::try_parse_from(&["firmlens", "--target-language", "martian"]).unwrap();
        let config = args.into_config();
        assert_eq!(config.target_language, TargetLanguage::English);
    }
}
