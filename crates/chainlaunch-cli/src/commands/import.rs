use chainlaunch_core::state::address;
use chainlaunch_core::{ManagedResource, StateManager, StoredResource};
use chainlaunch_provider::node_join::RESOURCE_TYPE;
use chainlaunch_provider::{Provider, Role};
use colored::Colorize;

pub async fn handle(
    provider: &Provider,
    store: &StateManager,
    name: &str,
    id: &str,
    role: Option<String>,
) -> anyhow::Result<()> {
    let lock = store.acquire_lock().await?;
    let mut state = store.load().await?;
    let address = address(RESOURCE_TYPE, name);

    if state.get_resource(&address).is_some() {
        anyhow::bail!("{} is already in the state", address);
    }
    if let Some(role) = &role {
        role.parse::<Role>()?;
    }

    let imported = provider.fabric_network_join().import(id).await?;
    let mut join = imported.state;

    match role {
        Some(role) => join.role = Some(role),
        None => {
            for diagnostic in &imported.diagnostics {
                eprintln!(
                    "{} {}: {}",
                    format!("{}:", diagnostic.severity).yellow(),
                    diagnostic.summary,
                    diagnostic.detail
                );
            }
        }
    }

    state.set_resource(StoredResource::from_state(
        RESOURCE_TYPE,
        name,
        join.id.clone(),
        &join,
    )?);
    store.save(&state).await?;

    println!("{} {} imported as {}", "✓".green(), address.cyan(), join.id);
    lock.release().await?;
    Ok(())
}
