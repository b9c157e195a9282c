use super::stored_join;
use chainlaunch_core::state::address;
use chainlaunch_core::{ManagedResource, StateManager, StoredResource};
use chainlaunch_provider::node_join::RESOURCE_TYPE;
use chainlaunch_provider::{NodeJoinSpec, Provider, Role};
use colored::Colorize;

pub async fn handle(
    provider: &Provider,
    store: &StateManager,
    name: &str,
    spec: NodeJoinSpec,
) -> anyhow::Result<()> {
    // Reject a bad role before anything can unjoin the current membership
    spec.role.parse::<Role>()?;

    let lock = store.acquire_lock().await?;
    let mut state = store.load().await?;
    let resource = provider.fabric_network_join();
    let address = address(RESOURCE_TYPE, name);

    if state.get_resource(&address).is_some() {
        let mut current = stored_join(&state, name)?;
        let same_node = current.network_id == spec.network_id && current.node_id == spec.node_id;

        let current_role = current.role.clone();
        match current_role.as_deref() {
            Some(role) if same_node && role == spec.role => {
                println!("{} {} is up to date", "✓".green(), address.cyan());
                lock.release().await?;
                return Ok(());
            }
            // Imported memberships only lack the role
            None if same_node => {
                current.role = Some(spec.role.clone());
                if let Some(record) = state.resources.get_mut(&address) {
                    record.refresh(&current)?;
                }
                store.save(&state).await?;
                println!(
                    "{} {} role set to {}",
                    "✓".green(),
                    address.cyan(),
                    spec.role
                );
                lock.release().await?;
                return Ok(());
            }
            _ => {}
        }

        // Memberships are immutable: replace
        println!("{} {} must be replaced", "~".yellow(), address.cyan());
        resource.delete(&current).await?;
        state.remove_resource(&address);
        store.save(&state).await?;
    }

    let created = resource.create(&spec).await?;
    state.set_resource(StoredResource::from_state(
        RESOURCE_TYPE,
        name,
        created.id.clone(),
        &created,
    )?);
    store.save(&state).await?;

    println!(
        "{} {} joined ({} {} in network {}, id {})",
        "✓".green(),
        address.cyan(),
        spec.role,
        spec.node_id,
        spec.network_id,
        created.id
    );
    lock.release().await?;
    Ok(())
}
