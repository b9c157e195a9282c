use super::stored_join;
use chainlaunch_core::state::address;
use chainlaunch_core::{ManagedResource, StateManager};
use chainlaunch_provider::Provider;
use chainlaunch_provider::node_join::RESOURCE_TYPE;
use colored::Colorize;

pub async fn handle(provider: &Provider, store: &StateManager, name: &str) -> anyhow::Result<()> {
    let lock = store.acquire_lock().await?;
    let mut state = store.load().await?;
    let address = address(RESOURCE_TYPE, name);
    let current = stored_join(&state, name)?;

    provider.fabric_network_join().delete(&current).await?;
    state.remove_resource(&address);
    store.save(&state).await?;

    println!("{} {} unjoined", "✓".green(), address.cyan());
    lock.release().await?;
    Ok(())
}
