use clap::Parser;
use summit_accommodation::core::ConfigProvider;
use summit_accommodation::utils::error::ErrorSeverity;
use summit_accommodation::utils::{logger, validation::Validate};
use summit_accommodation::{AssignmentEngine, CliConfig, CsvPipeline, LocalStorage, SummitError, TomlConfig};

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let result = match args.config.clone() {
        Some(path) => {
            // 載入 TOML 配置
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            if let Err(e) = args.apply_overrides(&mut config) {
                fail(e);
            }

            init_logging(config.verbose(), config.json_logs());
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(config)
        }
        None => {
            init_logging(args.verbose, args.json_logs);
            run(args)
        }
    };

    if let Err(e) = result {
        fail(e);
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), SummitError> {
    tracing::info!("🚀 Starting summit venue assignment");

    // 驗證配置
    config.validate()?;

    let output_path = config.output_path().map(str::to_string);
    let format = config.output_format();

    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);
    let engine = AssignmentEngine::new(pipeline);
    let summary = engine.run()?;

    match output_path {
        Some(path) => {
            println!("✅ Assigned {} attendees", summary.attendees.len());
            println!("📁 Report saved to: {}", path);
        }
        None => print!("{}", summary.render(format)?),
    }

    Ok(())
}

fn fail(e: SummitError) -> ! {
    tracing::error!(
        "❌ Assignment failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
