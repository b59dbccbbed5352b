mod app;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    sync::Arc,
};
use txt_reader_config::Config;
use txt_reader_engine::{NovelFile, NovelProcessor, build_lex_tree, default_rules, io};

use app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Read,
    Outline,
    Json,
    Substitute,
}

fn parse_args(args: &[String]) -> Option<(Mode, PathBuf)> {
    match args {
        [_, path] if !path.starts_with("--") => Some((Mode::Read, PathBuf::from(path))),
        [_, flag, path] => {
            let mode = match flag.as_str() {
                "--outline" => Mode::Outline,
                "--json" => Mode::Json,
                "--substitute" => Mode::Substitute,
                _ => return None,
            };
            Some((mode, PathBuf::from(path)))
        }
        _ => None,
    }
}

/// All rules in application order: built-in (unless disabled), then the
/// config's own.
fn collect_rules(config: &Config) -> Result<Vec<String>> {
    let mut rules: Vec<String> = if config.default_rules {
        default_rules().iter().map(|r| r.to_string()).collect()
    } else {
        vec![]
    };
    rules.extend(config.extra_rules()?);
    Ok(rules)
}

fn build_processor(config: &Config) -> Result<NovelProcessor> {
    let rules = collect_rules(config)?;
    let tree = build_lex_tree(&rules)?;
    log::info!("{} substitution rules loaded", tree.rule_count());
    Ok(NovelProcessor::new()
        .with_lex_tree(Arc::new(tree))
        .with_cleaning(config.clean))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let Some((mode, path)) = parse_args(&args) else {
        eprintln!("{}", usage(&args));
        process::exit(1);
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!("no config at {}, using defaults", config_path.display());
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let processor = match build_processor(&config) {
        Ok(processor) => processor,
        Err(e) => {
            eprintln!(
                "Error: Invalid substitution rules (config file '{}'): {e:#}",
                config_path.display()
            );
            process::exit(1);
        }
    };

    let raw = match io::read_novel(&path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {e}", path.display());
            process::exit(1);
        }
    };

    match render_output(mode, &processor, &raw)? {
        Some(out) => print!("{out}"),
        None => run_reader(App::new(NovelFile::new(path), processor.process(&raw)?))?,
    }

    Ok(())
}

fn usage(args: &[String]) -> String {
    let program = args.first().map_or("txt-reader", String::as_str);
    format!("Usage: {program} [--outline | --json | --substitute] <file.txt>")
}

/// Output of the print modes; `None` for the interactive reader.
fn render_output(mode: Mode, processor: &NovelProcessor, raw: &str) -> Result<Option<String>> {
    let out = match mode {
        Mode::Read => return Ok(None),
        Mode::Substitute => processor.decensor(raw)?,
        Mode::Outline => format!("{}\n", processor.process(raw)?.doc.index.outline()),
        Mode::Json => {
            let novel = processor.process(raw)?;
            let snap = txt_reader_engine::parsing::snapshot::normalize(&novel.doc);
            format!("{}\n", serde_json::to_string_pretty(&snap)?)
        }
    };
    Ok(Some(out))
}

fn run_reader(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    let restored = restore_terminal(&mut terminal);
    session_result(res, restored)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// A failed session wins over a failed terminal restore.
fn session_result(session: Result<()>, restored: Result<()>) -> Result<()> {
    session.and(restored)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.on_key(key.code)
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_read_mode() {
        assert_eq!(
            parse_args(&args(&["txt-reader", "书.txt"])),
            Some((Mode::Read, PathBuf::from("书.txt")))
        );
    }

    #[test]
    fn parses_print_modes() {
        for (flag, mode) in [
            ("--outline", Mode::Outline),
            ("--json", Mode::Json),
            ("--substitute", Mode::Substitute),
        ] {
            assert_eq!(
                parse_args(&args(&["txt-reader", flag, "a.txt"])),
                Some((mode, PathBuf::from("a.txt")))
            );
        }
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(parse_args(&args(&["txt-reader"])), None);
        assert_eq!(parse_args(&args(&["txt-reader", "--outline"])), None);
        assert_eq!(parse_args(&args(&["txt-reader", "--nope", "a.txt"])), None);
        assert_eq!(parse_args(&args(&["txt-reader", "a", "b", "c"])), None);
    }

    #[test]
    fn usage_survives_empty_argv() {
        assert!(usage(&[]).starts_with("Usage: txt-reader "));
        assert!(usage(&args(&["reader"])).starts_with("Usage: reader "));
    }

    #[test]
    fn print_modes_render_output() {
        let config = Config {
            default_rules: false,
            rules: vec!["zhang => 章".to_string()],
            ..Config::default()
        };
        let processor = build_processor(&config).unwrap();
        let raw = "第一zhang 开始\n正文\n";

        let render = |mode| render_output(mode, &processor, raw).unwrap();
        assert_eq!(render(Mode::Substitute).as_deref(), Some("第一章 开始\n正文\n"));
        assert_eq!(render(Mode::Outline).as_deref(), Some("• 第一章 开始\n"));
        assert!(render(Mode::Json).unwrap().contains("\"keywords\""));
        assert_eq!(render(Mode::Read), None);
    }

    #[test]
    fn session_errors_are_not_swallowed() {
        let failed = session_result(Err(anyhow::anyhow!("draw failed")), Ok(()));
        assert_eq!(failed.unwrap_err().to_string(), "draw failed");

        let restore_failed = session_result(Ok(()), Err(anyhow::anyhow!("restore failed")));
        assert!(restore_failed.is_err());
        assert!(session_result(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn collect_rules_puts_defaults_first() {
        let config = Config {
            rules: vec!["ab => X".to_string()],
            ..Config::default()
        };
        let rules = collect_rules(&config).unwrap();

        assert_eq!(rules.len(), default_rules().len() + 1);
        assert_eq!(rules.last().map(String::as_str), Some("ab => X"));
    }

    #[test]
    fn defaults_can_be_disabled() {
        let config = Config {
            default_rules: false,
            ..Config::default()
        };
        assert!(collect_rules(&config).unwrap().is_empty());
    }

    #[test]
    fn malformed_config_rule_is_reported() {
        let config = Config {
            default_rules: false,
            rules: vec!["ab => X".to_string(), "broken".to_string()],
            ..Config::default()
        };
        let err = build_processor(&config).unwrap_err();
        assert!(err.to_string().starts_with("rule 2:"));
    }
}
