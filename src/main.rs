use alloy::primitives::utils::format_ether;
use clap::Parser;
use router_deployer::config::PRIVATE_KEY;
use router_deployer::utils::{logger, validation::validate_required_field, validation::Validate};
use router_deployer::{
    CliConfig, ContractArtifact, DeploymentOrchestrator, EvmClient, LocalStorage, NetworksFile,
    Result,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::info!("Starting router-deployer");

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Deployment failed: {} (Category: {:?})",
            e,
            e.category()
        );
        if e.is_local() {
            tracing::error!("No transaction was submitted");
        }

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    cli.router_args()?;

    let networks = cli
        .networks
        .as_deref()
        .map(NetworksFile::from_file)
        .transpose()?;
    if let Some(networks) = &networks {
        networks.validate()?;
    }

    let config = cli.to_deploy_config(networks.as_ref())?;
    config.validate()?;
    tracing::debug!("Deploy config: {:?}", config);

    let artifact = ContractArtifact::from_file(&config.artifact_path)?;
    let private_key = validate_required_field(PRIVATE_KEY, &cli.private_key)?;
    let client = EvmClient::connect(config.rpc_url()?, private_key)?
        .with_confirmation_timeout(config.confirmation_timeout);

    if let Some(chain_id) = config.chain_id {
        client.ensure_chain_id(chain_id).await?;
    }

    let storage = LocalStorage::new(config.output_dir.clone());
    let orchestrator = DeploymentOrchestrator::new(client, storage, artifact);

    if cli.dry_run {
        let plan = orchestrator.plan(&config).await?;
        tracing::info!("🔍 DRY RUN MODE - nothing was sent");
        println!("Network:   {}", plan.network);
        println!("Deployer:  {}", plan.deployer);
        println!("Balance:   {} ETH", format_ether(plan.balance));
        println!("Factory:   {}", plan.args.factory);
        println!("WETH:      {}", plan.args.weth);
        println!("Init code: {} bytes", plan.request.init_code.len());
        match plan.request.gas {
            Some(gas) => println!("Gas:       limit {}, price {} wei", gas.gas_limit, gas.gas_price),
            None => println!("Gas:       estimated by provider"),
        }
        println!("Output:    {}", config.record_file_name());
        return Ok(());
    }

    let outcome = orchestrator.run(&config).await?;
    println!("{}", outcome.record.to_pretty_json()?);

    Ok(())
}
