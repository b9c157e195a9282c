use chainlaunch_core::DataSource;
use chainlaunch_provider::{KeyProviderData, NetworkData, Platform, Provider};

pub async fn network(
    provider: &Provider,
    name: Option<String>,
    id: Option<u64>,
    platform: &str,
) -> anyhow::Result<()> {
    let platform: Platform = platform.parse()?;

    let data = match (name, id) {
        (Some(name), _) => {
            provider
                .network_by_name()
                .read(NetworkData::by_name(platform, name))
                .await?
        }
        (None, Some(id)) => {
            provider
                .network_by_id()
                .read(NetworkData::by_id(platform, id))
                .await?
        }
        (None, None) => anyhow::bail!("either --name or --id is required"),
    };

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

pub async fn key_provider(provider: &Provider, id: u64) -> anyhow::Result<()> {
    let data = provider.key_provider().read(KeyProviderData::new(id)).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
