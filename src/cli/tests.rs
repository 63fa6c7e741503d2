//! Argument parsing tests for the CLI.

#[cfg(test)]
mod cli_tests {
    use crate::cli::{Cli, Commands, ListTag, OutputFormat, View};
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["navmenu", "--help"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["navmenu", "render", "menu.toml", "--url", "https://example.com/"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["navmenu", "render", "menu.toml"]);
        assert!(cli.is_err(), "--url is required");
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["navmenu", "--verbose", "validate", "menu.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_filter().to_string(), "navmenu=debug");
    }

    #[test]
    fn test_cli_quiet_flag() {
        let cli = Cli::try_parse_from(["navmenu", "validate", "menu.toml", "-q"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.log_filter().to_string(), "off");
    }

    #[test]
    fn test_cli_verbose_conflicts_with_quiet() {
        let cli = Cli::try_parse_from(["navmenu", "-v", "-q", "validate", "menu.toml"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_render_options() {
        let cli = Cli::try_parse_from([
            "navmenu",
            "render",
            "menu.yaml",
            "--url",
            "https://example.com/about",
            "--format",
            "div",
            "--view",
            "crumb",
            "--role",
            "admin",
            "--role",
            "editor",
        ])
        .unwrap();

        let Commands::Render(cmd) = cli.command else {
            panic!("expected render");
        };
        let debug = format!("{cmd:?}");
        assert!(debug.contains("Div"));
        assert!(debug.contains("Crumb"));
        assert!(debug.contains("\"editor\""));
    }

    #[test]
    fn test_render_parent_conflicts_with_view() {
        let cli = Cli::try_parse_from([
            "navmenu", "render", "menu.toml", "--url", "https://example.com/", "--parent", "about", "--view", "top",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let cli = Cli::try_parse_from(["navmenu", "render", "m.toml", "--url", "https://example.com/", "--format", "table"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["navmenu", "validate", "m.toml", "--format", "yaml"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_value_enum_defaults() {
        assert_eq!(ListTag::default().as_str(), "ul");
        assert_eq!(View::default(), View::Full);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
