use super::stored_join;
use chainlaunch_core::state::address;
use chainlaunch_core::{ManagedResource, ReadOutcome, StateManager};
use chainlaunch_provider::Provider;
use chainlaunch_provider::node_join::RESOURCE_TYPE;
use colored::Colorize;

pub async fn handle(provider: &Provider, store: &StateManager, name: &str) -> anyhow::Result<()> {
    let lock = store.acquire_lock().await?;
    let mut state = store.load().await?;
    let address = address(RESOURCE_TYPE, name);
    let current = stored_join(&state, name)?;

    match provider.fabric_network_join().read(&current).await? {
        ReadOutcome::Present(refreshed) => {
            if let Some(record) = state.resources.get_mut(&address) {
                record.refresh(&refreshed)?;
            }
            println!("{} {} is present", "✓".green(), address.cyan());
        }
        ReadOutcome::Gone => {
            state.remove_resource(&address);
            println!(
                "{} {} no longer exists remotely; removed from state",
                "!".yellow(),
                address.cyan()
            );
        }
    }

    store.save(&state).await?;
    lock.release().await?;
    Ok(())
}
