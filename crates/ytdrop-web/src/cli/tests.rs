use super::*;
use clap::Parser;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_subcommand() {
    let cli = parse(&["ytdrop"]);
    assert!(cli.command.is_none());
    assert!(!cli.log_stderr);
}

#[test]
fn cli_parse_serve_flags() {
    let cli = parse(&[
        "ytdrop",
        "serve",
        "--port",
        "9000",
        "--host",
        "127.0.0.1",
        "--root",
        "/srv/dl",
        "--log-stderr",
    ]);
    assert!(cli.log_stderr);
    match cli.command {
        Some(CliCommand::Serve(args)) => {
            assert_eq!(args.port, Some(9000));
            assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            assert_eq!(args.config.root.as_deref(), Some(Path::new("/srv/dl")));
        }
        other => panic!("expected Serve, got {other:?}"),
    }
}

#[test]
fn cli_parse_serve_rejects_bad_port() {
    assert!(Cli::try_parse_from(["ytdrop", "serve", "--port", "99999"]).is_err());
}

#[test]
fn cli_parse_dirs() {
    match parse(&["ytdrop", "dirs", "--root", "/tmp/x"]).command {
        Some(CliCommand::Dirs { config }) => {
            assert_eq!(config.root.as_deref(), Some(Path::new("/tmp/x")));
        }
        other => panic!("expected Dirs, got {other:?}"),
    }
}

#[test]
fn cli_parse_fetch() {
    match parse(&[
        "ytdrop",
        "fetch",
        "https://example.com/v",
        "--subdir",
        "music/live",
        "--downloader",
        "/opt/yt-dlp",
    ])
    .command
    {
        Some(CliCommand::Fetch {
            url,
            subdir,
            config,
        }) => {
            assert_eq!(url, "https://example.com/v");
            assert_eq!(subdir, "music/live");
            assert_eq!(config.downloader.as_deref(), Some("/opt/yt-dlp"));
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}

#[test]
fn cli_parse_fetch_requires_url() {
    assert!(Cli::try_parse_from(["ytdrop", "fetch"]).is_err());
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "download_root = \"/from/file\"\ndownloader = \"file-dl\"\nport = 7000\n",
    )
    .unwrap();

    let args = ServeArgs {
        config: ConfigArgs {
            config: Some(path),
            root: Some("/from/flag".into()),
            downloader: None,
        },
        host: None,
        port: Some(7100),
    };
    let cfg = args.load().unwrap();
    assert_eq!(cfg.download_root, Path::new("/from/flag"));
    assert_eq!(cfg.downloader, "file-dl");
    assert_eq!(cfg.port, 7100);
}

#[test]
fn missing_explicit_config_is_error() {
    let args = ConfigArgs {
        config: Some("/nonexistent/ytdrop.toml".into()),
        ..ConfigArgs::default()
    };
    assert!(args.load().is_err());
}

#[test]
fn relative_root_is_made_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "download_root = \"from-file\"\n").unwrap();

    let from_file = ConfigArgs {
        config: Some(path.clone()),
        ..ConfigArgs::default()
    }
    .load()
    .unwrap();
    assert!(from_file.download_root.is_absolute());
    assert!(from_file.download_root.ends_with("from-file"));

    let from_flag = ConfigArgs {
        config: Some(path),
        root: Some("downloads".into()),
        downloader: None,
    }
    .load()
    .unwrap();
    assert_eq!(
        from_flag.download_root,
        std::env::current_dir().unwrap().join("downloads")
    );
}
