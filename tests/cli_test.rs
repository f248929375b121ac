//! CLI Command Tests
//!
//! Argument parsing plus the command handlers run against in-memory
//! backends. Covers exit codes and input validation.

mod common;

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use reelscout::cli::{Cli, Command, ThemeAction};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_suggest_command_basic() {
        let cli = Cli::parse_from(["reelscout", "suggest", "bat"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Suggest(cmd)) => {
                assert_eq!(cmd.query, "bat");
                assert_eq!(cmd.limit, 5); // default
            }
            _ => panic!("Expected Suggest command"),
        }
    }

    #[test]
    fn test_suggest_limit_range() {
        let cli = Cli::parse_from(["reelscout", "suggest", "bat", "-l", "3"]);
        match cli.command {
            Some(Command::Suggest(cmd)) => assert_eq!(cmd.limit, 3),
            _ => panic!("Expected Suggest command"),
        }

        assert!(Cli::try_parse_from(["reelscout", "suggest", "bat", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["reelscout", "suggest", "bat", "-l", "6"]).is_err());
    }

    #[test]
    fn test_search_and_info_commands() {
        let cli = Cli::parse_from(["reelscout", "search", "The Dark Knight"]);
        match cli.command {
            Some(Command::Search(cmd)) => assert_eq!(cmd.title, "The Dark Knight"),
            _ => panic!("Expected Search command"),
        }

        let cli = Cli::parse_from(["reelscout", "info", "tt0468569"]);
        match cli.command {
            Some(Command::Info(cmd)) => assert_eq!(cmd.imdb_id, "tt0468569"),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_theme_command() {
        let cli = Cli::parse_from(["reelscout", "theme"]);
        match cli.command {
            Some(Command::Theme(cmd)) => assert!(cmd.action.is_none()),
            _ => panic!("Expected Theme command"),
        }

        let cli = Cli::parse_from(["reelscout", "theme", "toggle"]);
        match cli.command {
            Some(Command::Theme(cmd)) => assert_eq!(cmd.action, Some(ThemeAction::Toggle)),
            _ => panic!("Expected Theme command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "reelscout",
            "search",
            "Inception",
            "--json",
            "-q",
            "--config",
            "/tmp/reelscout.toml",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/reelscout.toml"))
        );
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["reelscout", "sg", "bat"]);
        assert!(matches!(cli.command, Some(Command::Suggest(_))));

        let cli = Cli::parse_from(["reelscout", "s", "Inception"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));

        let cli = Cli::parse_from(["reelscout", "i", "tt1375666"]);
        assert!(matches!(cli.command, Some(Command::Info(_))));
    }

    #[test]
    fn test_missing_query_is_error() {
        assert!(Cli::try_parse_from(["reelscout", "suggest"]).is_err());
        assert!(Cli::try_parse_from(["reelscout", "info"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use std::sync::Arc;

    use super::common::{FakeApi, FakeAssets};
    use reelscout::cli::{ExitCode, InfoCmd, Output, SearchCmd, SuggestCmd, ThemeAction, ThemeCmd};
    use reelscout::commands::{self, detail_lines, Services};
    use reelscout::config::Config;
    use reelscout::detail::DetailCoordinator;

    fn services() -> Services {
        Services::new(Arc::new(FakeApi::new()), Arc::new(FakeAssets))
    }

    fn quiet() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    #[tokio::test]
    async fn test_suggest_short_query_is_invalid() {
        let cmd = SuggestCmd {
            query: " b ".into(),
            limit: 5,
        };
        let code = commands::suggest_cmd(cmd, &services(), &quiet()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_suggest_no_results_still_succeeds() {
        let cmd = SuggestCmd {
            query: "zzqxv".into(),
            limit: 5,
        };
        let code = commands::suggest_cmd(cmd, &services(), &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_suggest_failure_maps_to_network_error() {
        let cmd = SuggestCmd {
            query: "fail".into(),
            limit: 5,
        };
        let code = commands::suggest_cmd(cmd, &services(), &quiet()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_search_found_and_not_found() {
        let found = SearchCmd {
            title: "Inception".into(),
        };
        assert_eq!(
            commands::search_cmd(found, &services(), &quiet()).await,
            ExitCode::Success
        );

        let missing = SearchCmd {
            title: "Nonexistent Film".into(),
        };
        assert_eq!(
            commands::search_cmd(missing, &services(), &quiet()).await,
            ExitCode::NotFound
        );

        let blank = SearchCmd { title: "  ".into() };
        assert_eq!(
            commands::search_cmd(blank, &services(), &quiet()).await,
            ExitCode::InvalidArgs
        );
    }

    #[tokio::test]
    async fn test_info_validates_id_before_lookup() {
        let api = Arc::new(FakeApi::new());
        let services = Services::new(api.clone(), Arc::new(FakeAssets));

        let bad = InfoCmd {
            imdb_id: "12345".into(),
        };
        assert_eq!(
            commands::info_cmd(bad, &services, &quiet()).await,
            ExitCode::InvalidArgs
        );
        assert!(api.calls().is_empty());

        let good = InfoCmd {
            imdb_id: "tt0468569".into(),
        };
        assert_eq!(
            commands::info_cmd(good, &services, &quiet()).await,
            ExitCode::Success
        );
        assert_eq!(api.calls(), vec!["id:tt0468569".to_string()]);
    }

    #[tokio::test]
    async fn test_info_lookup_failures_map_to_exit_codes() {
        let api = Arc::new(FakeApi::new());
        let services = Services::new(api.clone(), Arc::new(FakeAssets));

        let unknown = InfoCmd {
            imdb_id: "tt0000001".into(),
        };
        assert_eq!(
            commands::info_cmd(unknown, &services, &quiet()).await,
            ExitCode::NotFound
        );

        let flaky = InfoCmd {
            imdb_id: "tt9999999".into(),
        };
        assert_eq!(
            commands::info_cmd(flaky, &services, &quiet()).await,
            ExitCode::NetworkError
        );
        assert_eq!(
            api.calls(),
            vec!["id:tt0000001".to_string(), "id:tt9999999".to_string()]
        );
    }

    #[tokio::test]
    async fn test_detail_lines_cover_every_section() {
        let api = FakeApi::new();
        let coordinator = DetailCoordinator::new();
        coordinator
            .search_movie(&api, &FakeAssets, "Inception")
            .await
            .unwrap();

        let lines = detail_lines(&coordinator.state());
        assert_eq!(lines[0], "Inception (tt1375666)");
        assert!(lines[1].starts_with("2010"));
        assert!(lines.iter().any(|l| l == "── Overview ──"));
        assert!(lines.iter().any(|l| l == "── Info ──"));
        assert!(lines.iter().any(|l| l == "── Ratings ──"));
        assert!(lines.iter().any(|l| l.starts_with("Awards:") && l.ends_with("Unavailable")));
    }

    #[test]
    fn test_theme_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let show = ThemeCmd { action: None };
        assert_eq!(
            commands::theme_cmd(show, Some(path.clone()), &quiet()),
            ExitCode::Success
        );
        assert!(!path.exists());

        let toggle = ThemeCmd {
            action: Some(ThemeAction::Toggle),
        };
        assert_eq!(
            commands::theme_cmd(toggle, Some(path.clone()), &quiet()),
            ExitCode::Success
        );
        assert_eq!(Config::load_from(&path).theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_theme_toggle_reports_save_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();

        let toggle = ThemeCmd {
            action: Some(ThemeAction::Toggle),
        };
        assert_eq!(
            commands::theme_cmd(toggle, Some(path), &quiet()),
            ExitCode::Error
        );
    }
}
