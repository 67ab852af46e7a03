use clap::Parser;
use crpt_submit::utils::logger;
use crpt_submit::{CliConfig, CrptError, DocumentSubmitter};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting crpt-submit");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置並載入文件
    let prepared = cli
        .resolve()
        .and_then(|config| Ok((config, cli.load_document()?)));
    let (config, document) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => exit_with(&e),
    };

    tracing::info!(
        "Rate limit: {} request(s) per {:?} to {}",
        config.rate_limit.request_limit,
        config.time_window(),
        config.endpoint()
    );

    let submitter = match DocumentSubmitter::from_config(&config) {
        Ok(submitter) => Arc::new(submitter),
        Err(e) => exit_with(&e),
    };
    let document = Arc::new(document);
    let signature: Arc<str> = Arc::from(cli.signature.as_str());

    // 並發提交，由 RateGate 控制速率
    let mut handles = Vec::with_capacity(cli.repeat);
    for attempt in 1..=cli.repeat {
        let submitter = submitter.clone();
        let document = document.clone();
        let signature = signature.clone();
        handles.push(tokio::spawn(async move {
            let result = submitter.submit(&document, &signature).await;
            (attempt, result)
        }));
    }

    let mut first_error = None;
    for handle in handles {
        let (attempt, result) = handle.await?;
        match result {
            Ok(()) => tracing::info!("✅ Submission {} accepted", attempt),
            Err(e) => {
                tracing::error!("❌ Submission {} failed: {}", attempt, e);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        exit_with(&e);
    }

    println!("✅ Submitted {} document(s)", cli.repeat);
    Ok(())
}

fn exit_with(e: &CrptError) -> ! {
    if let Some(status) = e.status() {
        tracing::error!("Registration endpoint rejected the document with HTTP {}", status);
    }
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤類型決定退出碼
    let exit_code = match e {
        CrptError::InvalidConfiguration { .. }
        | CrptError::InvalidInput { .. }
        | CrptError::ConfigParse { .. }
        | CrptError::Io(_)
        | CrptError::Serialization(_) => 1,
        CrptError::RemoteRejection { .. } => 2,
        CrptError::TransportFailure(_) | CrptError::Interrupted => 3,
    };
    std::process::exit(exit_code);
}
