// SPDX-FileCopyrightText: 2026 CommitCraft contributors
//
// SPDX-License-Identifier: MIT

use commitcraft::cli::Cli;
use commitcraft::config::{ConfigFile, Settings, load_value_file, merge_layers};
use commitcraft::domain::Provider;
use commitcraft::error::Error;
use serde_json::json;

// ─── Layer merging ───────────────────────────────────────────────────────────

#[test]
fn merge_is_right_biased_per_key() {
    let merged = merge_layers(&[
        json!({"models": {"model": "gemma2", "provider": "ollama"}}),
        json!({"models": {"model": "llama3.1"}}),
    ]);
    assert_eq!(
        merged,
        json!({"models": {"model": "llama3.1", "provider": "ollama"}})
    );
}

#[test]
fn merge_recurses_through_nested_maps() {
    let merged = merge_layers(&[
        json!({"models": {"options": {"num_ctx": 2048, "temperature": 0.3}}}),
        json!({"models": {"options": {"temperature": 0.9}}}),
    ]);
    assert_eq!(
        merged,
        json!({"models": {"options": {"num_ctx": 2048, "temperature": 0.9}}})
    );
}

#[test]
fn null_override_keeps_base_value() {
    let merged = merge_layers(&[
        json!({"context": {"project_name": "demo"}}),
        json!({"context": {"project_name": null}}),
    ]);
    assert_eq!(merged, json!({"context": {"project_name": "demo"}}));
}

#[test]
fn merge_of_no_layers_is_empty_object() {
    assert_eq!(merge_layers(&[]), json!({}));
}

// ─── File loading by extension ───────────────────────────────────────────────

#[test]
fn loads_toml_yaml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("config.toml");
    std::fs::write(&toml_path, "[models]\nmodel = \"gemma2\"\n").unwrap();
    assert_eq!(
        load_value_file(&toml_path).unwrap(),
        json!({"models": {"model": "gemma2"}})
    );

    let yaml_path = dir.path().join("config.yaml");
    std::fs::write(&yaml_path, "models:\n  model: gemma2\n").unwrap();
    assert_eq!(
        load_value_file(&yaml_path).unwrap(),
        json!({"models": {"model": "gemma2"}})
    );

    let json_path = dir.path().join("config.json");
    std::fs::write(&json_path, r#"{"models": {"model": "gemma2"}}"#).unwrap();
    assert_eq!(
        load_value_file(&json_path).unwrap(),
        json!({"models": {"model": "gemma2"}})
    );
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    std::fs::write(&path, "x=1").unwrap();
    assert!(matches!(load_value_file(&path), Err(Error::Config(_))));
}

// ─── Profile resolution ──────────────────────────────────────────────────────

fn config_from(value: serde_json::Value) -> ConfigFile {
    serde_json::from_value(value).unwrap()
}

#[test]
fn defaults_to_ollama_gemma2() {
    let settings = Settings::from_parts(ConfigFile::default(), &Cli::default()).unwrap();
    assert_eq!(settings.profile.provider, Provider::Ollama);
    assert_eq!(settings.profile.model, "gemma2");
    assert!(settings.profile.host.is_none());
    assert!(settings.emoji.enabled);
    assert_eq!(settings.emoji.emoji_convention, "simple");
}

#[test]
fn cli_model_overrides_config_model() {
    let file = config_from(json!({"models": {"model": "from-config"}}));
    let cli = Cli {
        model: Some("from-cli".into()),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();
    assert_eq!(settings.profile.model, "from-cli");
}

#[test]
fn cli_options_override_config_options() {
    let file = config_from(json!({
        "models": {"options": {"num_ctx": 2048, "temperature": 0.3, "top_p": 0.9}}
    }));
    let cli = Cli {
        temperature: Some(0.8),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();
    let options = &settings.profile.options;
    assert_eq!(options.num_ctx, Some(2048));
    assert_eq!(options.temperature, Some(0.8));
    // Free-form extras survive the override pass
    assert_eq!(options.extra.get("top_p"), Some(&json!(0.9)));
}

#[test]
fn unknown_provider_fails_without_dispatch() {
    let cli = Cli {
        provider: Some("mystery".into()),
        ..Default::default()
    };
    let err = Settings::from_parts(ConfigFile::default(), &cli).unwrap_err();
    assert!(matches!(err, Error::UnsupportedProvider(name) if name == "mystery"));
}

#[test]
fn unknown_provider_in_config_is_rejected_too() {
    let file = config_from(json!({"models": {"provider": "not-a-backend"}}));
    let err = Settings::from_parts(file, &Cli::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedProvider(_)));
}

#[test]
fn custom_provider_without_host_fails_at_construction() {
    let file = config_from(json!({
        "models": {"provider": "custom_openai_compatible", "model": "qwen"}
    }));
    let err = Settings::from_parts(file, &Cli::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn malformed_host_url_is_rejected() {
    let file = config_from(json!({
        "models": {"host": "not a url"}
    }));
    let err = Settings::from_parts(file, &Cli::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn non_http_host_scheme_is_rejected() {
    let file = config_from(json!({
        "models": {"host": "ftp://example.com"}
    }));
    let err = Settings::from_parts(file, &Cli::default()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn temperature_outside_unit_range_is_rejected() {
    let cli = Cli {
        temperature: Some(1.5),
        ..Default::default()
    };
    let err = Settings::from_parts(ConfigFile::default(), &cli).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

// ─── Nickname resolution ─────────────────────────────────────────────────────

#[test]
fn nickname_selects_named_block_not_provider_field() {
    unsafe { std::env::set_var("WORKLLM_API_KEY", "sekrit") };

    let file = config_from(json!({
        "models": {"provider": "ollama", "model": "gemma2"},
        "providers": {
            "workllm": {
                "provider": "custom_openai_compatible",
                "model": "qwen2.5-coder",
                "host": "https://llm.example.com/v1"
            }
        }
    }));
    let cli = Cli {
        provider: Some("workllm".into()),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();

    // The nickname never lands in the provider field
    assert_eq!(settings.profile.provider, Provider::CustomOpenaiCompatible);
    assert_eq!(settings.profile.model, "qwen2.5-coder");
    assert_eq!(
        settings.profile.host.as_deref(),
        Some("https://llm.example.com/v1")
    );
    assert_eq!(settings.profile.api_key.as_deref(), Some("sekrit"));

    unsafe { std::env::remove_var("WORKLLM_API_KEY") };
}

#[test]
fn explicit_cli_flags_override_nickname_fields() {
    unsafe { std::env::set_var("LOCALNICK_API_KEY", "unused") };

    let file = config_from(json!({
        "providers": {
            "localnick": {
                "provider": "ollama",
                "model": "gemma2",
                "host": "http://localhost:11434"
            }
        }
    }));
    let cli = Cli {
        provider: Some("localnick".into()),
        model: Some("llama3.1".into()),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();
    assert_eq!(settings.profile.provider, Provider::Ollama);
    assert_eq!(settings.profile.model, "llama3.1");
    assert_eq!(
        settings.profile.host.as_deref(),
        Some("http://localhost:11434")
    );

    unsafe { std::env::remove_var("LOCALNICK_API_KEY") };
}

#[test]
fn option_flags_do_not_reach_into_nickname_blocks() {
    let file = config_from(json!({
        "providers": {
            "tunednick": {
                "provider": "ollama",
                "model": "gemma2",
                "options": {"temperature": 0.2, "num_ctx": 4096}
            }
        }
    }));
    let cli = Cli {
        provider: Some("tunednick".into()),
        temperature: Some(0.9),
        num_ctx: Some(8192),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();

    // The block's options stand as written; only --model/--host/
    // --system-prompt may override a nicknamed profile
    assert_eq!(settings.profile.options.temperature, Some(0.2));
    assert_eq!(settings.profile.options.num_ctx, Some(4096));
}

#[test]
fn keyless_nickname_for_hosted_backend_still_resolves() {
    unsafe { std::env::remove_var("CLOUDNICK_API_KEY") };

    let file = config_from(json!({
        "providers": {
            "cloudnick": {
                "provider": "custom_openai_compatible",
                "model": "qwen",
                "host": "https://llm.example.com/v1"
            }
        }
    }));
    let cli = Cli {
        provider: Some("cloudnick".into()),
        ..Default::default()
    };
    let settings = Settings::from_parts(file, &cli).unwrap();
    assert_eq!(settings.profile.provider, Provider::CustomOpenaiCompatible);
    assert!(settings.profile.api_key.is_none());
}

#[test]
fn keyless_custom_endpoint_resolves_without_key_variable() {
    unsafe { std::env::remove_var("CUSTOM_API_KEY") };

    let file = config_from(json!({
        "models": {
            "provider": "custom_openai_compatible",
            "model": "qwen",
            "host": "http://10.0.0.5:8000/v1"
        }
    }));
    let settings = Settings::from_parts(file, &Cli::default()).unwrap();
    assert_eq!(settings.profile.provider, Provider::CustomOpenaiCompatible);
    assert_eq!(settings.profile.host.as_deref(), Some("http://10.0.0.5:8000/v1"));
    assert!(settings.profile.api_key.is_none());
}
