use clap::Parser;
use peerfinder::app::{common_facility_report, common_ixp_report, missing_ixp_report};
use peerfinder::utils::{logger, validation::Validate};
use peerfinder::{CliConfig, Peer, PeerFinder, PeerFinderError, PeeringDbClient, Report};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::debug!(
        "ASNs: {:?}, ix: {}, private: {}, missing: {}",
        config.asn,
        config.ix,
        config.private,
        config.missing
    );

    if let Err(e) = run(&config).await {
        tracing::error!("{} (severity: {:?})", e, e.severity());
        eprintln!("{}", e);
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<(), PeerFinderError> {
    config.validate()?;
    let settings = config.settings()?;

    let client = PeeringDbClient::new(&settings)?;
    let finder = PeerFinder::new(client);
    let peers = finder.build_peers(&config.asn).await?;

    // 依 --ix, --private, --missing 順序輸出
    let mut builders: Vec<fn(&[Peer]) -> peerfinder::Result<Report>> = Vec::new();
    if config.ix {
        builders.push(common_ixp_report);
    }
    if config.private {
        builders.push(common_facility_report);
    }
    if config.missing {
        builders.push(missing_ixp_report);
    }

    for build in builders {
        let report = build(&peers)?;
        tracing::info!("{}: {} rows", report.title, report.rows.len());
        println!("{}", report.render(settings.format)?);
    }

    Ok(())
}
