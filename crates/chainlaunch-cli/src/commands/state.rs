use chainlaunch_core::StateManager;
use colored::Colorize;

pub async fn handle(store: &StateManager) -> anyhow::Result<()> {
    let state = store.load().await?;

    if state.resources.is_empty() {
        println!("{}", "No resources in state".dimmed());
        return Ok(());
    }

    for record in state.resources.values() {
        println!(
            "{}  id={}  updated={}",
            record.address.cyan(),
            record.id,
            record.updated_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
