use clap::Parser;
use ledger_autofill::{cli, client, config, error, report, workflow};
use ledger_autofill_common::{best_match, normalize_date, AutofillEngine, ExtractedFields, MATCH_THRESHOLD};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Apply { extraction, form, choices, output, deep_blue_ref, mapping } => {
            println!("📋 ledger-autofill - 自動入力\n");

            println!("[1/3] 抽出結果を読み込み中...");
            let fields = workflow::load_extraction(&extraction)?;
            println!("✔ {}件のフィールドを検出\n", fields.len());

            let engine = AutofillEngine::new(workflow::load_mapping(&config, mapping.as_deref())?);
            run_autofill(
                &engine,
                &fields,
                form.as_deref(),
                choices.as_deref(),
                output,
                deep_blue_ref.as_deref(),
                cli.verbose,
            )?;
        }

        Commands::Parse { pdf, form, choices, output, deep_blue_ref, mapping } => {
            println!("📎 ledger-autofill - CP解析\n");

            println!("[1/3] 傭船契約書を解析中...");
            let client = client::ExtractionClient::new(&config)?;
            let extraction = client.parse_charterparty(&pdf, deep_blue_ref.as_deref()).await?;
            println!("✔ {}件のフィールドを検出", extraction.fields.len());
            if let Some(model) = &extraction.meta.model_id {
                println!("  モデル: {}", model);
            }
            println!();

            let engine = AutofillEngine::new(workflow::load_mapping(&config, mapping.as_deref())?);
            run_autofill(
                &engine,
                &extraction.fields,
                form.as_deref(),
                choices.as_deref(),
                output,
                deep_blue_ref.as_deref(),
                cli.verbose,
            )?;
        }

        Commands::Match { value, options } => {
            match best_match(&value, &options) {
                Some(m) if m.score >= MATCH_THRESHOLD => {
                    println!("✔ {} (一致率 {:.2})", m.option, m.score);
                }
                Some(m) => {
                    println!("一致なし（最も近い候補: {} / 一致率 {:.2}）", m.option, m.score);
                }
                None => println!("一致なし"),
            }
        }

        Commands::Date { raw } => match normalize_date(&raw) {
            Some(date) => println!("{}", date),
            None => println!("日付として解釈できません: {}", raw),
        },

        Commands::Config { set_service_url, show } => {
            let mut config = config;

            if let Some(url) = set_service_url {
                config.set_service_url(url)?;
                println!("✔ 抽出サービスのURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  抽出サービス: {}", config.service_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  フィールド対応: {}件", config.field_mapping().len());
            }
        }
    }

    Ok(())
}

fn run_autofill(
    engine: &AutofillEngine,
    fields: &ExtractedFields,
    form_path: Option<&Path>,
    choices_path: Option<&Path>,
    output: Option<PathBuf>,
    deep_blue_ref: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let choices = workflow::load_choices(choices_path)?;
    let mut form = workflow::load_form(form_path, &choices)?;
    workflow::set_reference(&mut form, deep_blue_ref);

    println!("[2/3] フォームに入力中...");
    let outcome = workflow::autofill(engine, fields, form);
    report::print_report(&outcome.report, &outcome.hints, verbose);
    println!();

    println!("[3/3] ペイロードを作成中...");
    let payload = outcome.payload()?;
    let json = serde_json::to_string_pretty(&payload)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("✔ ペイロードを保存: {}", path.display());
        }
        None => println!("{}", json),
    }

    println!("\n✅ 完了");
    Ok(())
}
