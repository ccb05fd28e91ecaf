use clap::Parser;
use playstore_scrape::utils::{logger, validation::Validate};
use playstore_scrape::{CliConfig, HttpFetcher, LocalStorage, ScrapeEngine, ScrapeError};

fn fail(e: &ScrapeError) -> ! {
    tracing::error!(
        "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting playstore-scrape");

    // 設定：預設值 < 設定檔 < 命令列
    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    tracing::debug!("Settings: {:?}", settings);

    let fetcher = match HttpFetcher::new(&settings.user_agent, settings.timeout()) {
        Ok(fetcher) => fetcher,
        Err(e) => fail(&e),
    };
    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = ScrapeEngine::new(fetcher, storage, settings.clone());

    let outcome = match engine.run(&cli.package).await {
        Ok(outcome) => outcome,
        Err(e) => fail(&e),
    };

    if cli.json {
        match outcome.record.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e),
        }
        return Ok(());
    }

    let record = &outcome.record;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("Title:        {}", show(&record.title));
    println!("Category:     {}", show(&record.category));
    println!("Year:         {}", show(&record.year));
    println!("Requires:     {}", show(&record.os_requirement));
    println!("Cover image:  {}", show(&record.cover_image_url));
    println!("Screenshots:  {}", record.screenshot_urls.len());
    if let Some(report) = &outcome.report {
        println!(
            "📁 Saved {} files to {}",
            report.written.len(),
            std::path::Path::new(&settings.output_path)
                .join(&report.directory)
                .display()
        );
        if !report.skipped.is_empty() {
            println!("⚠️  Skipped {} assets", report.skipped.len());
        }
    }

    Ok(())
}
