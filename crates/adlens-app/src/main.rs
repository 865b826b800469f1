//! # adlens
//!
//! AdLens 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 서브커맨드 실행.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use adlens_app::commands::{self, AnalyzeOptions};
use adlens_core::config_manager::ConfigManager;

/// AdLens 마케팅 운영 백엔드
///
/// 배너 소재 성과 분석, AI 소재 분석, 배너 카피/이미지 생성
#[derive(Parser, Debug)]
#[command(name = "adlens")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// API 서버 실행
    Serve {
        /// 포트 (기본: 설정값)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// 미완성 소재 일괄 분석
    Analyze {
        /// 분석 결과를 데이터셋 파일에 저장
        #[arg(long)]
        write: bool,
        /// 동시 분석 수
        #[arg(long)]
        concurrency: Option<usize>,
        /// 항목 간 지연 (밀리초)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// 설정 경로와 API 키 상태 확인
    Check,
}

/// 내부 crate 로그 필터
fn log_filter(level: &str) -> String {
    [
        "adlens",
        "adlens_app",
        "adlens_core",
        "adlens_storage",
        "adlens_network",
        "adlens_analytics",
        "adlens_web",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(&args.log_level))),
        )
        .init();

    let manager = match args.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    info!("설정 파일: {}", manager.config_path().display());
    let config = manager.effective();

    match args.command {
        Command::Serve { port } => commands::serve(config, port).await,
        Command::Analyze {
            write,
            concurrency,
            delay_ms,
        } => {
            let report = commands::analyze(
                config,
                AnalyzeOptions {
                    write,
                    concurrency,
                    delay_ms,
                },
            )
            .await?;
            println!("{}", commands::summarize(&report));
            Ok(())
        }
        Command::Check => {
            println!("{}", commands::check_report(manager.config_path(), &config));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let args = Args::parse_from(["adlens", "--config", "/tmp/a.json", "analyze", "--write", "--delay-ms", "0"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/a.json")));
        match args.command {
            Command::Analyze {
                write, delay_ms, ..
            } => {
                assert!(write);
                assert_eq!(delay_ms, Some(0));
            }
            other => panic!("Analyze 기대: {other:?}"),
        }
    }

    #[test]
    fn global_log_level_after_subcommand() {
        let args = Args::parse_from(["adlens", "serve", "-p", "9191", "-l", "debug"]);
        assert_eq!(args.log_level, "debug");
        assert!(matches!(args.command, Command::Serve { port: Some(9191) }));
    }

    #[test]
    fn log_filter_covers_crates() {
        let filter = log_filter("warn");
        assert!(filter.contains("adlens_web=warn"));
        assert!(filter.contains("tower_http=warn"));
    }
}
