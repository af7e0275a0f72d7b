use clap::Parser;
use shiptrack_ui::{cli, config, error, markup, preview};
use cli::{Cli, Commands};
use error::{Result, ShipTrackError};
use markup::Severity;
use shiptrack_ui_common::{UiConfig, Visibility};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { paths, strict, json } => {
            let ui_config = config::load(cli.config.as_deref())?;
            let templates = markup::collect_templates(&paths)?;
            let reports = templates
                .iter()
                .map(|path| markup::audit_file(path, &ui_config))
                .collect::<Result<Vec<_>>>()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                println!("🔍 shiptrack-ui - マークアップ検査 ({}件)\n", reports.len());
                for report in &reports {
                    print_report(report, cli.verbose);
                }
            }

            let problems: usize = reports.iter().map(|r| r.audit.problems(strict)).sum();
            if problems > 0 {
                return Err(ShipTrackError::AuditFailed(problems));
            }
            if !json {
                println!("\n✅ 検査完了");
            }
        }

        Commands::Preview { steps, policy, instant } => {
            let mut ui_config = config::load(cli.config.as_deref())?;
            if let Some(policy) = policy {
                ui_config.hide_policy = policy.into();
            }
            let steps = preview::resolve_steps(&steps)?;

            println!("▶ shiptrack-ui - プレビュー ({:?}, 非表示まで{}ms)\n", ui_config.hide_policy, ui_config.hide_delay_ms);
            if cli.verbose {
                for step in &steps {
                    println!("  {:>6}ms  update({})", step.at_ms, step.percentage);
                }
                println!();
            }

            let report = preview::run_preview(&steps, &ui_config, instant, !instant).await;

            println!("  時刻      状態    進捗");
            for entry in &report.timeline {
                println!(
                    "  {:>6}ms  {}  {:>3}%",
                    entry.at_ms,
                    visibility_label(entry.visibility),
                    entry.percentage
                );
            }
            println!(
                "\n✔ 終了時: {} ({}%, {}ms)",
                visibility_label(report.final_visibility),
                report.final_percentage,
                report.elapsed_ms
            );
        }

        Commands::Config { show, init } => {
            let path = match cli.config.clone() {
                Some(path) => path,
                None => config::config_path()?,
            };

            if init {
                if path.exists() {
                    println!("設定ファイルは既に存在します: {}", path.display());
                } else {
                    config::save(&UiConfig::default(), &path)?;
                    println!("✔ 設定ファイルを作成: {}", path.display());
                }
            }

            if show || !init {
                // 既定の場所に無ければ既定値、明示したパスが無ければエラー
                let ui_config = if cli.config.is_none() && !path.exists() {
                    UiConfig::default()
                } else {
                    config::load(Some(&path))?
                };
                println!("設定ファイル: {}", path.display());
                println!("{}", ui_config.to_json_pretty()?);
            }
        }
    }

    Ok(())
}

fn visibility_label(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Shown => "表示  ",
        Visibility::Hidden => "非表示",
    }
}

fn print_report(report: &markup::AuditReport, verbose: bool) {
    let audit = &report.audit;
    if audit.findings.is_empty() && !verbose {
        return;
    }

    println!("{}", report.path.display());
    if verbose {
        println!(
            "  プログレスバー: {} / ページ内リンク: {} (空: {}) / ツールチップ: {}",
            if audit.has_progress_bar { "あり" } else { "なし" },
            audit.fragment_links,
            audit.empty_fragments,
            audit.tooltip_triggers
        );
    }
    for finding in &audit.findings {
        let mark = match finding.severity {
            Severity::Error => "✖",
            Severity::Warning => "⚠",
        };
        println!("  {} {}行目: {}", mark, finding.line, finding.message);
    }
}
