use figment::Jail;
use ragdb_core::config::{expand_path, resolve_with_base, Config, EmbeddingProvider, RagConfig, TokenizerKind};
use std::path::{Path, PathBuf};

#[test]
fn defaults_without_any_files() {
    // Jail serializes access to process env vars across tests.
    Jail::expect_with(|_jail| {
        let tmp = tempfile::tempdir().map_err(|e| e.to_string())?;
        let config = Config::load_from(tmp.path(), "dev").map_err(|e| e.to_string())?;
        let cfg = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(cfg, RagConfig::default());
        assert_eq!(cfg.chunking.max_tokens, 450);
        assert_eq!(cfg.chunking.overlap_tokens, 20);
        assert_eq!(cfg.retrieval.top_k, 3);
        assert_eq!(cfg.embedding.provider, EmbeddingProvider::Hashing);
        Ok(())
    });
}

#[test]
fn env_overlay_and_env_vars_merge_over_base_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [chunking]
            max_tokens = 200
            overlap_tokens = 10
            tokenizer = "unicode-words"

            [retrieval]
            top_k = 5
            "#,
        )?;
        jail.create_file("config.test.toml", "[retrieval]\ntop_k = 8\n")?;
        jail.set_env("APP_CHUNKING__MAX_TOKENS", "120");

        let config = Config::load_from(Path::new("."), "test").map_err(|e| e.to_string())?;
        let cfg = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(cfg.chunking.max_tokens, 120);
        assert_eq!(cfg.chunking.overlap_tokens, 10);
        assert_eq!(cfg.chunking.tokenizer, TokenizerKind::UnicodeWords);
        assert_eq!(cfg.retrieval.top_k, 8);

        let top_k: usize = config.get("retrieval.top_k").map_err(|e| e.to_string())?;
        assert_eq!(top_k, 8);
        Ok(())
    });
}

#[test]
fn invalid_chunking_is_rejected_at_load() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[chunking]\nmax_tokens = 10\noverlap_tokens = 10\n")?;
        let err = Config::load_from(Path::new("."), "dev").err().expect("must fail");
        assert!(err.to_string().contains("overlap_tokens"), "{err}");
        Ok(())
    });
}

#[test]
fn path_helpers_expand_and_resolve() {
    Jail::expect_with(|jail| {
        jail.set_env("RAGDB_TEST_ROOT", "/srv/corpus");
        assert_eq!(expand_path("${RAGDB_TEST_ROOT}/speeches"), PathBuf::from("/srv/corpus/speeches"));
        assert_eq!(resolve_with_base(Path::new("/base"), "data/txt"), PathBuf::from("/base/data/txt"));
        assert_eq!(resolve_with_base(Path::new("/base"), "/abs/txt"), PathBuf::from("/abs/txt"));
        Ok(())
    });
}

#[test]
fn corpus_dir_resolves_against_config_base() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[data]\ncorpus_dir = \"speeches/txt\"\n")?;
        let base = jail.directory().to_path_buf();
        let config = Config::load_from(&base, "dev").map_err(|e| e.to_string())?;
        assert_eq!(config.base(), base.as_path());
        assert_eq!(config.corpus_dir().map_err(|e| e.to_string())?, base.join("speeches/txt"));

        jail.set_env("APP_DATA__CORPUS_DIR", "/srv/speeches");
        let config = Config::load_from(&base, "dev").map_err(|e| e.to_string())?;
        assert_eq!(config.corpus_dir().map_err(|e| e.to_string())?, PathBuf::from("/srv/speeches"));
        Ok(())
    });
}

#[test]
fn invalid_logging_level_is_rejected_at_load() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[logging]\nlevel = \"ragdb=loud\"\n")?;
        let err = Config::load_from(Path::new("."), "dev").err().expect("must fail");
        assert!(matches!(err, ragdb_core::Error::Config(ref msg) if msg.contains("logging.level")), "{err}");
        Ok(())
    });
}
